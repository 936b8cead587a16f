//! Step model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{HumanFeedbackStatus, StepStatus};

/// One unit of work within a plan, assigned to a named agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    /// Unique identifier for the step
    pub id: String,

    /// ID of the parent plan
    pub plan_id: String,

    /// Session the parent plan belongs to
    pub session_id: String,

    /// Instruction passed to the assigned agent
    pub action: String,

    /// Name of the agent that executes the step
    pub agent: String,

    /// Execution status of the step
    #[serde(default)]
    pub status: StepStatus,

    /// Whether a human has approved the step
    #[serde(default)]
    pub human_approval_status: HumanFeedbackStatus,

    /// Timestamp when the step was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the step was last updated (UTC)
    pub updated_at: Timestamp,
}
