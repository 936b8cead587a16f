use jiff::Timestamp;
use marshal_core::{
    AgentMessage, Database, HumanFeedbackStatus, Plan, PlanStatus, PlannerError, Step, StepStatus,
};
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn plan(id: &str, session_id: &str) -> Plan {
    let now = Timestamp::now();
    Plan {
        id: id.to_string(),
        session_id: session_id.to_string(),
        user_id: "user-1".to_string(),
        initial_goal: "Migrate database".to_string(),
        overall_status: PlanStatus::InProgress,
        summary: Some("Export, then migrate".to_string()),
        human_clarification_request: Some("Which database?".to_string()),
        human_clarification_response: None,
        created_at: now,
        updated_at: now,
    }
}

fn step(id: &str, plan_id: &str, agent: &str) -> Step {
    let now = Timestamp::now();
    Step {
        id: id.to_string(),
        plan_id: plan_id.to_string(),
        session_id: "session-1".to_string(),
        action: format!("Action for {id}"),
        agent: agent.to_string(),
        status: StepStatus::Planned,
        human_approval_status: HumanFeedbackStatus::Requested,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn test_database_initialization() {
    let (temp_file, _db) = create_test_db();
    assert!(temp_file.path().exists());
}

#[test]
fn test_plan_round_trip() {
    let (_temp_file, mut db) = create_test_db();
    let original = plan("plan-1", "session-1");
    db.insert_plan(&original).expect("Failed to insert plan");

    let loaded = db
        .get_plan("plan-1")
        .expect("Failed to get plan")
        .expect("Plan should exist");
    assert_eq!(loaded, original);
    assert!(db.get_plan("missing").unwrap().is_none());
}

#[test]
fn test_duplicate_plan_id_is_rejected() {
    let (_temp_file, mut db) = create_test_db();
    db.insert_plan(&plan("plan-1", "session-1")).unwrap();
    let err = db.insert_plan(&plan("plan-1", "session-1")).unwrap_err();
    assert!(matches!(err, PlannerError::Database { .. }));
}

#[test]
fn test_latest_plan_for_session() {
    let (_temp_file, mut db) = create_test_db();
    db.insert_plan(&plan("plan-1", "session-1")).unwrap();
    db.insert_plan(&plan("plan-2", "session-1")).unwrap();
    db.insert_plan(&plan("plan-3", "session-2")).unwrap();

    let latest = db.latest_plan_for_session("session-1").unwrap().unwrap();
    assert_eq!(latest.id, "plan-2");
    assert!(db.latest_plan_for_session("session-9").unwrap().is_none());
}

#[test]
fn test_upsert_keeps_identity_fields() {
    let (_temp_file, mut db) = create_test_db();
    let original = plan("plan-1", "session-1");
    db.insert_plan(&original).unwrap();

    let mut changed = original.clone();
    changed.session_id = "other-session".to_string();
    changed.human_clarification_response = Some("Postgres".to_string());
    changed.overall_status = PlanStatus::Completed;
    db.upsert_plan(&changed).unwrap();

    let loaded = db.get_plan("plan-1").unwrap().unwrap();
    assert_eq!(loaded.session_id, "session-1");
    assert_eq!(loaded.overall_status, PlanStatus::Completed);
    assert_eq!(
        loaded.human_clarification_response.as_deref(),
        Some("Postgres")
    );
}

#[test]
fn test_steps_keep_insertion_order() {
    let (_temp_file, mut db) = create_test_db();
    db.insert_plan(&plan("plan-1", "session-1")).unwrap();

    // Ids sort the other way round on purpose.
    for (id, agent) in [("c", "ProductAgent"), ("b", "GenericAgent"), ("a", "HrAgent")] {
        db.insert_step(&step(id, "plan-1", agent)).unwrap();
    }

    let steps = db.steps_for_plan("plan-1").unwrap();
    let ids: Vec<_> = steps.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["c", "b", "a"]);
    assert_eq!(steps[0].status, StepStatus::Planned);
    assert_eq!(steps[0].human_approval_status, HumanFeedbackStatus::Requested);
    assert!(db.steps_for_plan("plan-2").unwrap().is_empty());
}

#[test]
fn test_step_requires_existing_plan() {
    let (_temp_file, mut db) = create_test_db();
    let err = db.insert_step(&step("s1", "no-such-plan", "HrAgent")).unwrap_err();
    assert!(matches!(err, PlannerError::Database { .. }));
}

#[test]
fn test_messages_for_session() {
    let (_temp_file, mut db) = create_test_db();
    let first = AgentMessage::new("HumanAgent", "session-1", "user-1", "Postgres").for_plan("plan-1");
    let second = AgentMessage::new(
        "PlannerAgent",
        "session-1",
        "user-1",
        "Thanks. The plan has been updated.",
    );
    let other = AgentMessage::new("HumanAgent", "session-2", "user-2", "Hi");
    for message in [&first, &second, &other] {
        db.insert_message(message).unwrap();
    }

    let messages = db.messages_for_session("session-1").unwrap();
    assert_eq!(messages, [first, second]);
}

#[test]
fn test_in_memory_database() {
    let mut db = Database::in_memory().unwrap();
    db.insert_plan(&plan("plan-1", "session-1")).unwrap();
    assert!(db.get_plan("plan-1").unwrap().is_some());
}
