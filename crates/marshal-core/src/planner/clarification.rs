//! Applies a human's answer to the planner's clarification request.

use std::sync::Arc;

use log::info;

use crate::{
    agents::{HUMAN_AGENT, PLANNER_AGENT},
    error::{PlannerError, Result},
    models::{AgentMessage, Plan},
    store::Store,
    telemetry::{attributes, Telemetry},
};

/// Reply recorded once a clarification has been applied.
pub const CLARIFICATION_ACK: &str = "Thanks. The plan has been updated.";

#[derive(Clone)]
pub struct ClarificationHandler {
    store: Arc<dyn Store>,
    telemetry: Arc<dyn Telemetry>,
}

impl ClarificationHandler {
    pub fn new(store: Arc<dyn Store>, telemetry: Arc<dyn Telemetry>) -> Self {
        Self { store, telemetry }
    }

    /// Stores `text` as the response on the session's most recent plan and
    /// records the exchange.
    ///
    /// Earlier responses are overwritten.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::PlanNotFound` when the session has no plan, in
    /// which case nothing is written.
    pub async fn apply_clarification(&self, session_id: &str, text: &str) -> Result<Plan> {
        let mut plan = self.store.get_plan_by_session(session_id).await.ok_or_else(|| {
            PlannerError::PlanNotFound {
                session_id: session_id.to_string(),
            }
        })?;

        plan.record_clarification_response(text);
        self.store.update_plan(&plan).await;
        info!("Applied clarification to plan {}", plan.id);

        self.record(&plan, HUMAN_AGENT, text).await;
        self.record(&plan, PLANNER_AGENT, CLARIFICATION_ACK).await;

        Ok(plan)
    }

    async fn record(&self, plan: &Plan, source: &str, content: &str) {
        let message = AgentMessage::new(source, &plan.session_id, &plan.user_id, content)
            .for_plan(&plan.id);
        self.store.add_message(&message).await;
        self.telemetry.record_event(
            "Planner - Clarification message stored",
            &attributes([
                ("session_id", plan.session_id.as_str()),
                ("plan_id", plan.id.as_str()),
                ("source", source),
                ("content", content),
            ]),
        );
    }
}
