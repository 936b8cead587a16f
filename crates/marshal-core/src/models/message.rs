//! Audit messages exchanged between agents and the human.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A message recorded against a session, optionally tied to a plan or step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentMessage {
    pub id: String,
    pub session_id: String,
    pub user_id: String,
    pub plan_id: Option<String>,
    pub step_id: Option<String>,
    /// Agent (or `HumanAgent`) that produced the message
    pub source: String,
    pub content: String,
    pub created_at: Timestamp,
}

impl AgentMessage {
    /// Creates a message for a session with a fresh identifier.
    pub fn new(
        source: impl Into<String>,
        session_id: impl Into<String>,
        user_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: super::new_id(),
            session_id: session_id.into(),
            user_id: user_id.into(),
            plan_id: None,
            step_id: None,
            source: source.into(),
            content: content.into(),
            created_at: Timestamp::now(),
        }
    }

    /// Associates the message with a plan.
    pub fn for_plan(mut self, plan_id: impl Into<String>) -> Self {
        self.plan_id = Some(plan_id.into());
        self
    }

    /// Associates the message with a step.
    pub fn for_step(mut self, step_id: impl Into<String>) -> Self {
        self.step_id = Some(step_id.into());
        self
    }
}
