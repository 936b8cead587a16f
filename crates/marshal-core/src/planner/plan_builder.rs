//! Persists parsed plans as Plan and Step entities.

use std::sync::Arc;

use jiff::Timestamp;
use log::info;

use super::parser::ParsedPlan;
use crate::{
    models::{new_id, HumanFeedbackStatus, InputTask, Plan, PlanStatus, Step, StepStatus},
    store::Store,
    telemetry::{attributes, Telemetry},
};

/// Goal recorded on plans whose generation failed.
pub const FAILED_PLAN_GOAL: &str = "Error generating plan";

/// Creates plans and their steps and hands them to the store.
///
/// The plan is always stored before any of its steps, and steps are stored
/// in the order they were parsed.
#[derive(Clone)]
pub struct PlanBuilder {
    store: Arc<dyn Store>,
    telemetry: Arc<dyn Telemetry>,
}

impl PlanBuilder {
    pub fn new(store: Arc<dyn Store>, telemetry: Arc<dyn Telemetry>) -> Self {
        Self { store, telemetry }
    }

    /// Stores a new in-progress plan for `task` and one planned step per
    /// parsed step.
    pub async fn build_and_persist(&self, task: &InputTask, parsed: ParsedPlan) -> (Plan, Vec<Step>) {
        let now = Timestamp::now();
        let plan = Plan {
            id: new_id(),
            session_id: task.session_id.clone(),
            user_id: task.user_id.clone(),
            initial_goal: parsed.fields.initial_goal,
            overall_status: PlanStatus::InProgress,
            summary: parsed.fields.summary,
            human_clarification_request: parsed.fields.human_clarification_request,
            human_clarification_response: None,
            created_at: now,
            updated_at: now,
        };
        self.persist_plan(&plan).await;

        let mut steps = Vec::with_capacity(parsed.steps.len());
        for fields in parsed.steps {
            let now = Timestamp::now();
            let step = Step {
                id: new_id(),
                plan_id: plan.id.clone(),
                session_id: plan.session_id.clone(),
                action: fields.action,
                agent: fields.agent,
                status: StepStatus::Planned,
                human_approval_status: HumanFeedbackStatus::Requested,
                created_at: now,
                updated_at: now,
            };
            self.store.add_step(&step).await;
            self.telemetry.record_event(
                "Planner - Step stored",
                &attributes([
                    ("plan_id", step.plan_id.as_str()),
                    ("step_id", step.id.as_str()),
                    ("action", step.action.as_str()),
                    ("agent", step.agent.as_str()),
                ]),
            );
            steps.push(step);
        }

        info!(
            "Stored plan {} for session {} with {} steps",
            plan.id,
            plan.session_id,
            steps.len()
        );
        (plan, steps)
    }

    /// Stores a failed plan recording why generation did not succeed.
    pub async fn persist_failure(&self, task: &InputTask, detail: &str) -> Plan {
        let now = Timestamp::now();
        let plan = Plan {
            id: new_id(),
            session_id: task.session_id.clone(),
            user_id: task.user_id.clone(),
            initial_goal: FAILED_PLAN_GOAL.to_string(),
            overall_status: PlanStatus::Failed,
            summary: Some(format!("{FAILED_PLAN_GOAL}: {detail}")),
            human_clarification_request: None,
            human_clarification_response: None,
            created_at: now,
            updated_at: now,
        };
        self.persist_plan(&plan).await;
        info!(
            "Stored failed plan {} for session {}",
            plan.id, plan.session_id
        );
        plan
    }

    async fn persist_plan(&self, plan: &Plan) {
        self.store.add_plan(plan).await;
        self.telemetry.record_event(
            "Planner - Plan stored",
            &attributes([
                ("session_id", plan.session_id.as_str()),
                ("user_id", plan.user_id.as_str()),
                ("plan_id", plan.id.as_str()),
                ("initial_goal", plan.initial_goal.as_str()),
                ("overall_status", plan.overall_status.as_str()),
            ]),
        );
    }
}
