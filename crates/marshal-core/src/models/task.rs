//! Objective submitted by the caller.

use serde::{Deserialize, Serialize};

/// A user objective to be turned into a plan. Read-only to the planner.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputTask {
    pub session_id: String,
    pub user_id: String,
    pub description: String,
}

impl InputTask {
    pub fn new(
        session_id: impl Into<String>,
        user_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            user_id: user_id.into(),
            description: description.into(),
        }
    }
}
