//! Tests for the planner agent.

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;

use super::*;
use crate::{
    agents::{GENERIC_AGENT, HUMAN_AGENT},
    llm::StaticModel,
    models::{HumanFeedbackStatus, PlanStatus, StepStatus},
    store::MemoryStore,
    telemetry::RecordingTelemetry,
};

/// Model that always fails with an API error and counts its calls.
struct FailingModel {
    calls: AtomicUsize,
}

#[async_trait]
impl LanguageModel for FailingModel {
    async fn invoke(&self, _prompt: &str) -> std::result::Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(LlmError::ApiError {
            status: 500,
            message: "upstream unavailable".to_string(),
        })
    }
}

/// Model that answers only after a delay.
struct SlowModel;

#[async_trait]
impl LanguageModel for SlowModel {
    async fn invoke(&self, _prompt: &str) -> std::result::Result<String, LlmError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok("1: HrAgent: too late".to_string())
    }
}

const JSON_PLAN: &str = r#"{
    "initial_goal": "Onboard Jessica Smith",
    "steps": [
        {"action": "Ask for the start date", "agent": "HumanAgent"},
        {"action": "Set up an Office 365 account. Function: set_up_office_365_account", "agent": "TechSupportAgent"}
    ],
    "summary_plan_and_steps": "Collect the start date, then set up accounts",
    "human_clarification_request": "When does Jessica start?"
}"#;

async fn planner_with(
    model: impl LanguageModel + 'static,
) -> (PlannerAgent, Arc<MemoryStore>, Arc<RecordingTelemetry>) {
    let store = Arc::new(MemoryStore::new());
    let telemetry = Arc::new(RecordingTelemetry::new());
    let planner = PlannerBuilder::new()
        .with_store(store.clone())
        .with_telemetry(telemetry.clone())
        .with_model(model)
        .build()
        .await
        .expect("Failed to build planner");
    (planner, store, telemetry)
}

fn task() -> InputTask {
    InputTask::new("session-1", "user-1", "Onboard Jessica Smith")
}

#[tokio::test]
async fn test_json_plan_is_persisted_in_order() {
    let (planner, store, _) = planner_with(StaticModel::new(JSON_PLAN)).await;

    let outcome = planner.submit_task(&task()).await;

    assert!(!outcome.is_failed());
    assert_eq!(outcome.plan.overall_status, PlanStatus::InProgress);
    assert_eq!(outcome.steps.len(), 2);

    let plans = store.plans().await;
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].id, outcome.plan.id);

    let steps = store.steps().await;
    assert_eq!(steps.len(), 2);
    assert!(steps.iter().all(|s| s.plan_id == outcome.plan.id));
    assert!(steps.iter().all(|s| s.status == StepStatus::Planned));
    assert!(steps
        .iter()
        .all(|s| s.human_approval_status == HumanFeedbackStatus::Requested));
    assert_eq!(steps[0].agent, HUMAN_AGENT);
    assert_eq!(steps[1].agent, "TechSupportAgent");
}

#[tokio::test]
async fn test_status_line_reports_step_count() {
    let (planner, store, _) = planner_with(StaticModel::new(JSON_PLAN)).await;

    let status = planner.handle_input_task(&task()).await;

    let plan = store.plans().await.remove(0);
    assert_eq!(
        status,
        format!("Plan '{}' created successfully with 2 steps", plan.id)
    );
}

#[tokio::test]
async fn test_plan_messages_and_clarification_question() {
    let (planner, store, _) = planner_with(StaticModel::new(JSON_PLAN)).await;

    planner.submit_task(&task()).await;

    let contents: Vec<_> = store
        .messages()
        .await
        .into_iter()
        .map(|m| (m.source, m.content))
        .collect();
    assert_eq!(
        contents,
        [
            (
                "PlannerAgent".to_string(),
                "Generated a plan with 2 steps. Click the blue check box beside each step to complete it, click the x to remove this step.".to_string()
            ),
            (
                "PlannerAgent".to_string(),
                "I require additional information before we can proceed: When does Jessica start?".to_string()
            ),
        ]
    );

    let handler = planner.human_input("session-1").await;
    assert_eq!(handler.questions().await, ["When does Jessica start?"]);
}

#[tokio::test]
async fn test_free_text_without_steps_still_persists_plan() {
    let (planner, store, _) =
        planner_with(StaticModel::new("Sorry, I need more context first.")).await;

    let outcome = planner.submit_task(&task()).await;

    assert!(outcome.steps.is_empty());
    assert_eq!(outcome.plan.overall_status, PlanStatus::InProgress);
    assert_eq!(outcome.plan.initial_goal, "Onboard Jessica Smith");
    assert_eq!(store.plans().await.len(), 1);
    assert!(store.messages().await.is_empty());
}

#[tokio::test]
async fn test_unknown_agents_become_generic() {
    let (planner, _, _) = planner_with(StaticModel::new(
        "1: LegalAgent: Review the contract\n2: HrAgent: File the paperwork",
    ))
    .await;

    let outcome = planner.submit_task(&task()).await;
    let agents: Vec<_> = outcome.steps.iter().map(|s| s.agent.as_str()).collect();
    assert_eq!(agents, [GENERIC_AGENT, "HrAgent"]);
}

#[tokio::test]
async fn test_model_failure_persists_failed_plan() {
    let model = FailingModel {
        calls: AtomicUsize::new(0),
    };
    let (planner, store, _) = planner_with(model).await;

    let outcome = planner.submit_task(&task()).await;

    assert!(outcome.is_failed());
    assert!(outcome.steps.is_empty());
    assert_eq!(outcome.plan.overall_status, PlanStatus::Failed);
    assert_eq!(outcome.plan.initial_goal, "Error generating plan");
    assert_eq!(
        outcome.plan.summary.as_deref(),
        Some("Error generating plan: API error 500: upstream unavailable")
    );
    assert!(store.steps().await.is_empty());
    assert_eq!(
        outcome.to_string(),
        format!(
            "Plan '{}' could not be generated: API error 500: upstream unavailable",
            outcome.plan.id
        )
    );
}

#[tokio::test]
async fn test_model_is_called_once() {
    let model = Arc::new(FailingModel {
        calls: AtomicUsize::new(0),
    });

    struct Shared(Arc<FailingModel>);

    #[async_trait]
    impl LanguageModel for Shared {
        async fn invoke(&self, prompt: &str) -> std::result::Result<String, LlmError> {
            self.0.invoke(prompt).await
        }
    }

    let (planner, _, _) = planner_with(Shared(model.clone())).await;
    planner.submit_task(&task()).await;
    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_model_timeout_persists_failed_plan() {
    let store = Arc::new(MemoryStore::new());
    let planner = PlannerBuilder::new()
        .with_store(store.clone())
        .with_model(SlowModel)
        .with_model_timeout(Some(Duration::from_millis(50)))
        .build()
        .await
        .unwrap();

    let outcome = planner.submit_task(&task()).await;

    assert!(outcome.is_failed());
    assert_eq!(outcome.failure.as_deref(), Some("Timeout after 50ms"));
    assert_eq!(store.plans().await[0].overall_status, PlanStatus::Failed);
}

#[tokio::test]
async fn test_clarification_overwrites_and_records_messages() {
    let (planner, store, _) = planner_with(StaticModel::new(JSON_PLAN)).await;
    planner.submit_task(&task()).await;

    let status = planner
        .handle_plan_clarification("session-1", "Next Monday")
        .await;
    assert_eq!(status, CLARIFICATION_APPLIED);

    planner
        .handle_plan_clarification("session-1", "Actually, Tuesday")
        .await;

    let plan = store.plans().await.remove(0);
    assert_eq!(
        plan.human_clarification_response.as_deref(),
        Some("Actually, Tuesday")
    );

    let messages = store.messages().await;
    let tail: Vec<_> = messages[messages.len() - 2..]
        .iter()
        .map(|m| (m.source.as_str(), m.content.as_str()))
        .collect();
    assert_eq!(
        tail,
        [
            ("HumanAgent", "Actually, Tuesday"),
            ("PlannerAgent", "Thanks. The plan has been updated.")
        ]
    );
}

#[tokio::test]
async fn test_clarification_without_plan_writes_nothing() {
    let (planner, store, telemetry) = planner_with(StaticModel::new(JSON_PLAN)).await;

    let status = planner
        .handle_plan_clarification("unknown-session", "hello")
        .await;

    assert_eq!(status, "No plan found for session unknown-session");
    assert!(store.plans().await.is_empty());
    assert!(store.messages().await.is_empty());
    assert!(telemetry.events().is_empty());

    let err = planner
        .apply_clarification("unknown-session", "hello")
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::PlanNotFound { .. }));
}

#[tokio::test]
async fn test_telemetry_records_plan_then_steps() {
    let (planner, _, telemetry) = planner_with(StaticModel::new(JSON_PLAN)).await;
    planner.submit_task(&task()).await;

    let names = telemetry.names();
    assert_eq!(names[0], "Planner - Plan stored");
    assert_eq!(names[1], "Planner - Step stored");
    assert_eq!(names[2], "Planner - Step stored");
}

#[tokio::test]
async fn test_handle_input_task_json() {
    let (planner, store, _) = planner_with(StaticModel::new(JSON_PLAN)).await;

    let status = planner
        .handle_input_task_json(
            r#"{"session_id": "s9", "user_id": "u9", "description": "Onboard Jessica"}"#,
        )
        .await;
    assert!(status.ends_with("created successfully with 2 steps"));
    assert_eq!(store.plans().await[0].session_id, "s9");

    let status = planner.handle_input_task_json("{not json").await;
    assert!(status.starts_with("Invalid input task:"));
}

#[tokio::test]
async fn test_session_report() {
    let (planner, _, _) = planner_with(StaticModel::new(JSON_PLAN)).await;
    planner.submit_task(&task()).await;

    let report = planner.session_report("session-1").await.unwrap();
    assert_eq!(report.steps.len(), 2);
    assert_eq!(report.messages.len(), 2);

    let rendered = report.to_string();
    assert!(rendered.contains("# Onboard Jessica Smith"));
    assert!(rendered.contains("### 1. HumanAgent"));
    assert!(rendered.contains("## Messages"));

    assert!(matches!(
        planner.session_report("nobody").await,
        Err(PlannerError::PlanNotFound { .. })
    ));
}

#[tokio::test]
async fn test_planner_without_model_records_failed_plan() {
    let store = Arc::new(MemoryStore::new());
    let planner = PlannerBuilder::new()
        .with_store(store.clone())
        .build()
        .await
        .unwrap();

    let outcome = planner.submit_task(&task()).await;
    assert_eq!(
        outcome.failure.as_deref(),
        Some("No language model configured")
    );
    assert_eq!(store.plans().await[0].overall_status, PlanStatus::Failed);
}

#[tokio::test]
async fn test_restricted_agent_set() {
    let store = Arc::new(MemoryStore::new());
    let planner = PlannerBuilder::new()
        .with_store(store)
        .with_agents(AvailableAgents::new(["HrAgent"]))
        .with_model(StaticModel::new(JSON_PLAN))
        .build()
        .await
        .unwrap();

    let outcome = planner.submit_task(&task()).await;
    let agents: Vec<_> = outcome.steps.iter().map(|s| s.agent.as_str()).collect();
    assert_eq!(agents, [GENERIC_AGENT, GENERIC_AGENT]);
    assert!(planner.instruction("x").contains("HrAgent, GenericAgent"));
}
