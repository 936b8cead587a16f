mod common;

use std::sync::Arc;

use common::{create_test_planner, onboarding_task};
use marshal_core::{
    PlanStatus, PlannerBuilder, SqliteStore, StaticModel, Store, StepStatus,
};
use tempfile::TempDir;

#[tokio::test]
async fn test_numbered_response_persists_plan_and_steps() {
    let (_temp_dir, planner) =
        create_test_planner("1: HrAgent: Do X\n2: MarketingAgent: Do Y").await;

    let outcome = planner.submit_task(&onboarding_task("session-1")).await;
    assert_eq!(outcome.steps.len(), 2);

    let stored = planner
        .store()
        .get_plan_by_session("session-1")
        .await
        .expect("plan should be stored");
    assert_eq!(stored.id, outcome.plan.id);
    assert_eq!(stored.overall_status, PlanStatus::InProgress);

    let steps = planner.store().get_steps_by_plan(&stored.id).await;
    let summary: Vec<_> = steps
        .iter()
        .map(|s| (s.agent.as_str(), s.action.as_str()))
        .collect();
    assert_eq!(summary, [("HrAgent", "Do X"), ("MarketingAgent", "Do Y")]);
    assert!(steps.iter().all(|s| s.status == StepStatus::Planned));
}

#[tokio::test]
async fn test_goal_markers_are_honored() {
    let (_temp_dir, planner) = create_test_planner(
        "Goal: Migrate database\nStep 1: Agent: ProductAgent: Export schema\nStep 2: Agent: GenericAgent: Write migration script",
    )
    .await;

    let outcome = planner.submit_task(&onboarding_task("session-1")).await;
    assert_eq!(outcome.plan.initial_goal, "Migrate database");
    let agents: Vec<_> = outcome.steps.iter().map(|s| s.agent.as_str()).collect();
    assert_eq!(agents, ["ProductAgent", "GenericAgent"]);
}

#[tokio::test]
async fn test_clarification_round_trip_through_sqlite() {
    let (_temp_dir, planner) = create_test_planner(
        r#"{"initial_goal": "Onboard Jessica", "steps": [{"action": "Ask for the start date", "agent": "HumanAgent"}], "human_clarification_request": "Start date?"}"#,
    )
    .await;
    planner.submit_task(&onboarding_task("session-1")).await;

    let status = planner
        .handle_plan_clarification("session-1", "Monday, 3 March")
        .await;
    assert_eq!(status, "Plan updated with human clarification");

    let report = planner.session_report("session-1").await.unwrap();
    assert_eq!(
        report.plan.human_clarification_response.as_deref(),
        Some("Monday, 3 March")
    );
    let sources: Vec<_> = report.messages.iter().map(|m| m.source.as_str()).collect();
    assert_eq!(
        sources,
        ["PlannerAgent", "PlannerAgent", "HumanAgent", "PlannerAgent"]
    );
}

#[tokio::test]
async fn test_clarification_without_plan() {
    let (_temp_dir, planner) = create_test_planner("1: HrAgent: Do X").await;
    let status = planner.handle_plan_clarification("nobody", "hello").await;
    assert_eq!(status, "No plan found for session nobody");
    assert!(planner.store().get_messages_by_session("nobody").await.is_empty());
}

#[tokio::test]
async fn test_latest_plan_is_clarified() {
    let (_temp_dir, planner) = create_test_planner("1: HrAgent: Do X").await;
    let first = planner.submit_task(&onboarding_task("session-1")).await;
    let second = planner.submit_task(&onboarding_task("session-1")).await;

    let clarified = planner
        .apply_clarification("session-1", "use the second one")
        .await
        .unwrap();
    assert_eq!(clarified.id, second.plan.id);
    assert_ne!(clarified.id, first.plan.id);
}

#[tokio::test]
async fn test_planners_share_a_database_file() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("marshal.db");

    let writer = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_model(StaticModel::new("1: HrAgent: Do X"))
        .build()
        .await
        .unwrap();
    writer.submit_task(&onboarding_task("session-1")).await;

    let store = Arc::new(SqliteStore::new(&db_path));
    let reader = PlannerBuilder::new()
        .with_store(store)
        .with_model(StaticModel::new(""))
        .build()
        .await
        .unwrap();
    let report = reader.session_report("session-1").await.unwrap();
    assert_eq!(report.steps.len(), 1);
}

#[tokio::test]
async fn test_unreadable_database_is_swallowed_by_store() {
    let temp_dir = TempDir::new().unwrap();
    // A directory cannot be opened as a database file.
    let store = SqliteStore::new(temp_dir.path());
    assert!(store.get_plan_by_session("session-1").await.is_none());
    assert!(store.get_steps_by_plan("plan-1").await.is_empty());
}
