//! Plan model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::PlanStatus;
use crate::error::{PlannerError, Result};

/// A decomposed user objective with its overall status and the optional
/// human clarification exchange.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: String,

    /// Session the plan was generated in
    pub session_id: String,

    /// User who submitted the objective
    pub user_id: String,

    /// Goal of the plan as understood by the planner
    pub initial_goal: String,

    /// Overall status of the plan
    #[serde(default)]
    pub overall_status: PlanStatus,

    /// Short summary of the plan and its steps (advisory limit of 50 words)
    pub summary: Option<String>,

    /// Additional information the planner needs from the human
    pub human_clarification_request: Option<String>,

    /// Latest answer from the human to the clarification request
    pub human_clarification_response: Option<String>,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,
}

impl Plan {
    /// Moves the plan to `next`, refusing transitions out of a terminal
    /// status.
    pub fn transition_to(&mut self, next: PlanStatus) -> Result<()> {
        if !self.overall_status.can_transition_to(next) {
            return Err(PlannerError::InvalidStatusTransition {
                from: self.overall_status,
                to: next,
            });
        }
        self.overall_status = next;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Overwrites the clarification response. Earlier responses are not
    /// retained.
    pub fn record_clarification_response(&mut self, response: impl Into<String>) {
        self.human_clarification_response = Some(response.into());
        self.updated_at = Timestamp::now();
    }
}
