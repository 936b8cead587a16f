//! The planner agent: from a user objective to a stored plan.
//!
//! ```text
//! InputTask ──▶ instruction ──▶ model ──▶ parser ──▶ plan_builder ──▶ Store
//!                                          (JSON, then step grammars)
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: [`PlannerBuilder`] for wiring store, model, catalog and
//!   telemetry
//! - [`instruction`]: the planning prompt
//! - [`grammar`]: step grammars for free-text responses
//! - [`parser`]: [`ResponseParser`], JSON first and grammars second
//! - [`plan_builder`]: [`PlanBuilder`], which creates and stores plans and
//!   steps
//! - [`clarification`]: [`ClarificationHandler`] for human answers
//!
//! Every caller-facing operation reports its outcome as status text. Model
//! failures never surface as errors: a failed plan is stored instead.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use marshal_core::{InputTask, MemoryStore, PlannerBuilder, StaticModel};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_store(Arc::new(MemoryStore::new()))
//!     .with_model(StaticModel::new("1: HrAgent: Schedule orientation"))
//!     .build()
//!     .await?;
//!
//! let task = InputTask::new("session-1", "user-1", "Onboard Jessica Smith");
//! let status = planner.handle_input_task(&task).await;
//! assert!(status.ends_with("created successfully with 1 steps"));
//! # Ok(())
//! # }
//! ```

use std::{sync::Arc, time::Duration};

use log::{error, warn};

use crate::{
    agents::{AvailableAgents, PLANNER_AGENT},
    display::PlanReport,
    error::{PlannerError, Result},
    human::{HandlerRegistry, HumanInputHandler},
    llm::{LanguageModel, LlmError},
    models::{AgentMessage, InputTask, Plan, Step},
    store::Store,
    telemetry::{attributes, Telemetry},
};

pub mod builder;
pub mod clarification;
pub mod grammar;
pub mod instruction;
pub mod parser;
pub mod plan_builder;

#[cfg(test)]
mod tests;

pub use builder::PlannerBuilder;
pub use clarification::ClarificationHandler;
pub use parser::{ParseTier, ParsedPlan, PlanFields, ResponseParser, StepFields};
pub use plan_builder::PlanBuilder;

/// Status returned when a clarification was applied.
pub const CLARIFICATION_APPLIED: &str = "Plan updated with human clarification";

/// What a planning request produced.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub plan: Plan,
    pub steps: Vec<Step>,
    /// Why the model could not produce a plan, for failed plans.
    pub failure: Option<String>,
}

impl PlanOutcome {
    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }
}

/// Generates plans for objectives and applies human clarifications.
pub struct PlannerAgent {
    agents: AvailableAgents,
    tools: Vec<String>,
    parser: ResponseParser,
    plan_builder: PlanBuilder,
    clarifications: ClarificationHandler,
    store: Arc<dyn Store>,
    model: Option<Arc<dyn LanguageModel>>,
    telemetry: Arc<dyn Telemetry>,
    humans: HandlerRegistry,
    model_timeout: Option<Duration>,
}

impl PlannerAgent {
    pub(crate) fn new(
        agents: AvailableAgents,
        tools: Vec<String>,
        store: Arc<dyn Store>,
        model: Option<Arc<dyn LanguageModel>>,
        telemetry: Arc<dyn Telemetry>,
        model_timeout: Option<Duration>,
    ) -> Self {
        Self {
            parser: ResponseParser::new(agents.clone()),
            plan_builder: PlanBuilder::new(Arc::clone(&store), Arc::clone(&telemetry)),
            clarifications: ClarificationHandler::new(Arc::clone(&store), Arc::clone(&telemetry)),
            agents,
            tools,
            store,
            model,
            telemetry,
            humans: HandlerRegistry::new(),
            model_timeout,
        }
    }

    pub fn agents(&self) -> &AvailableAgents {
        &self.agents
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// The prompt that would be sent to the model for `objective`.
    pub fn instruction(&self, objective: &str) -> String {
        instruction::generate_instruction(objective, &self.agents, &self.tools)
    }

    /// Parses a model response without storing anything.
    pub fn parse_response(&self, raw: &str, task: &InputTask) -> ParsedPlan {
        self.parser.parse(raw, task)
    }

    /// The session's human input handler, created on first use.
    pub async fn human_input(&self, session_id: &str) -> Arc<HumanInputHandler> {
        self.humans.handler_for(session_id).await
    }

    /// Asks the model for a plan for `task` and stores the result.
    ///
    /// A model error, a timeout or a missing model stores a failed plan with
    /// no steps.
    pub async fn submit_task(&self, task: &InputTask) -> PlanOutcome {
        let prompt = self.instruction(&task.description);

        let response = match self.invoke_model(&prompt).await {
            Ok(response) => response,
            Err(e) => {
                if e.is_transport() {
                    error!("Model request for session {} did not complete: {e}", task.session_id);
                } else {
                    error!("Model call for session {} failed: {e}", task.session_id);
                }
                let detail = e.to_string();
                let plan = self.plan_builder.persist_failure(task, &detail).await;
                return PlanOutcome {
                    plan,
                    steps: Vec::new(),
                    failure: Some(detail),
                };
            }
        };

        let parsed = self.parser.parse(&response, task);
        let (plan, steps) = self.plan_builder.build_and_persist(task, parsed).await;

        if !steps.is_empty() {
            self.post(
                &plan,
                format!(
                    "Generated a plan with {} steps. Click the blue check box beside each step to complete it, click the x to remove this step.",
                    steps.len()
                ),
            )
            .await;
        }

        if let Some(request) = &plan.human_clarification_request {
            self.post(
                &plan,
                format!("I require additional information before we can proceed: {request}"),
            )
            .await;
            self.humans
                .handler_for(&plan.session_id)
                .await
                .ask(request.as_str())
                .await;
        }

        PlanOutcome {
            plan,
            steps,
            failure: None,
        }
    }

    /// Plans `task` and reports the outcome as a status line.
    pub async fn handle_input_task(&self, task: &InputTask) -> String {
        self.submit_task(task).await.to_string()
    }

    /// Like [`Self::handle_input_task`], reading the task from JSON.
    pub async fn handle_input_task_json(&self, input_task_json: &str) -> String {
        match serde_json::from_str::<InputTask>(input_task_json) {
            Ok(task) => self.handle_input_task(&task).await,
            Err(e) => {
                warn!("Rejected input task: {e}");
                format!("Invalid input task: {e}")
            }
        }
    }

    /// Applies a clarification to the session's most recent plan.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::PlanNotFound` if the session has no plan.
    pub async fn apply_clarification(&self, session_id: &str, text: &str) -> Result<Plan> {
        self.clarifications.apply_clarification(session_id, text).await
    }

    /// Applies a clarification and reports the outcome as a status line.
    pub async fn handle_plan_clarification(&self, session_id: &str, text: &str) -> String {
        match self.apply_clarification(session_id, text).await {
            Ok(_) => CLARIFICATION_APPLIED.to_string(),
            Err(e) => e.to_string(),
        }
    }

    /// The session's most recent plan with its steps and messages.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::PlanNotFound` if the session has no plan.
    pub async fn session_report(&self, session_id: &str) -> Result<PlanReport> {
        let plan = self.store.get_plan_by_session(session_id).await.ok_or_else(|| {
            PlannerError::PlanNotFound {
                session_id: session_id.to_string(),
            }
        })?;
        let steps = self.store.get_steps_by_plan(&plan.id).await;
        let messages = self.store.get_messages_by_session(session_id).await;
        Ok(PlanReport {
            plan,
            steps,
            messages,
        })
    }

    async fn invoke_model(&self, prompt: &str) -> std::result::Result<String, LlmError> {
        let model = self.model.as_ref().ok_or(LlmError::NotConfigured)?;
        match self.model_timeout {
            Some(limit) => tokio::time::timeout(limit, model.invoke(prompt))
                .await
                .map_err(|_| LlmError::Timeout(limit))?,
            None => model.invoke(prompt).await,
        }
    }

    async fn post(&self, plan: &Plan, content: String) {
        let message = AgentMessage::new(PLANNER_AGENT, &plan.session_id, &plan.user_id, content)
            .for_plan(&plan.id);
        self.store.add_message(&message).await;
        self.telemetry.record_event(
            "Planner - Message stored",
            &attributes([
                ("session_id", message.session_id.as_str()),
                ("plan_id", plan.id.as_str()),
                ("source", PLANNER_AGENT),
                ("content", message.content.as_str()),
            ]),
        );
    }
}
