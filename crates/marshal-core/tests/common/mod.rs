use marshal_core::{InputTask, PlannerAgent, PlannerBuilder, StaticModel};
use tempfile::TempDir;

/// Planner over a fresh SQLite file that always receives `response` from
/// the model.
pub async fn create_test_planner(response: &str) -> (TempDir, PlannerAgent) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_model(StaticModel::new(response))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

pub fn onboarding_task(session_id: &str) -> InputTask {
    InputTask::new(session_id, "user-1", "Onboard Jessica Smith")
}
