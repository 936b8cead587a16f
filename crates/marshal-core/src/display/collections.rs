//! Collection wrapper types for displaying groups of domain objects.

use std::fmt;

use crate::models::{AgentMessage, Step};

/// Newtype wrapper for displaying the ordered steps of a plan.
///
/// Steps are numbered from 1 in the order they were created.
///
/// # Examples
///
/// ```rust
/// use marshal_core::{
///     display::Steps,
///     models::{HumanFeedbackStatus, Step, StepStatus},
/// };
/// use jiff::Timestamp;
///
/// let step = Step {
///     id: "step-1".to_string(),
///     plan_id: "plan-1".to_string(),
///     session_id: "session-1".to_string(),
///     action: "Export schema".to_string(),
///     agent: "ProductAgent".to_string(),
///     status: StepStatus::Planned,
///     human_approval_status: HumanFeedbackStatus::Requested,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
///
/// let output = format!("{}", Steps(vec![step]));
/// assert!(output.contains("### 1. ProductAgent"));
/// ```
pub struct Steps(pub Vec<Step>);

impl Steps {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of steps in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the steps.
    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.0.iter()
    }
}

impl fmt::Display for Steps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No steps in this plan.");
        }
        for (index, step) in self.0.iter().enumerate() {
            step.fmt_with_position(f, Some(index + 1))?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying a session's message history.
pub struct Messages(pub Vec<AgentMessage>);

impl fmt::Display for Messages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No messages recorded.");
        }
        for message in &self.0 {
            write!(f, "{message}")?;
        }
        Ok(())
    }
}
