//! Status enumerations for plans and steps.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Overall status of a plan.
///
/// Transitions are monotonic: a plan starts `InProgress` and may move to
/// `Completed` or `Failed` exactly once.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// Plan is being worked on
    #[default]
    InProgress,

    /// All steps were carried out
    Completed,

    /// Plan generation or execution failed
    Failed,
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in_progress" | "inprogress" => Ok(PlanStatus::InProgress),
            "completed" => Ok(PlanStatus::Completed),
            "failed" => Ok(PlanStatus::Failed),
            _ => Err(format!("Invalid plan status: {s}")),
        }
    }
}

impl PlanStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::InProgress => "in_progress",
            PlanStatus::Completed => "completed",
            PlanStatus::Failed => "failed",
        }
    }

    /// Whether a plan in this status may move to `next`.
    ///
    /// Only `InProgress` can change, and only to a terminal status.
    pub fn can_transition_to(&self, next: PlanStatus) -> bool {
        matches!(
            (self, next),
            (PlanStatus::InProgress, PlanStatus::Completed)
                | (PlanStatus::InProgress, PlanStatus::Failed)
        )
    }

    /// Whether the status is terminal.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PlanStatus::InProgress)
    }
}

/// Execution status of a single step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Step is planned but not started
    #[default]
    Planned,

    /// Step is being executed by its agent
    InProgress,

    /// Step has been completed
    Completed,

    /// Step execution failed
    Failed,
}

impl FromStr for StepStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "planned" => Ok(StepStatus::Planned),
            "in_progress" | "inprogress" => Ok(StepStatus::InProgress),
            "completed" => Ok(StepStatus::Completed),
            "failed" => Ok(StepStatus::Failed),
            _ => Err(format!("Invalid step status: {s}")),
        }
    }
}

impl StepStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Planned => "planned",
            StepStatus::InProgress => "in_progress",
            StepStatus::Completed => "completed",
            StepStatus::Failed => "failed",
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use marshal_core::models::StepStatus;
    ///
    /// assert_eq!(StepStatus::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(StepStatus::Planned.with_icon(), "○ Planned");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            StepStatus::Completed => "✓ Completed",
            StepStatus::InProgress => "➤ In Progress",
            StepStatus::Planned => "○ Planned",
            StepStatus::Failed => "✗ Failed",
        }
    }
}

/// Human approval state of a step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HumanFeedbackStatus {
    /// Waiting for a human to approve or reject
    #[default]
    Requested,

    /// Approved by a human
    Approved,

    /// Rejected by a human
    Rejected,
}

impl FromStr for HumanFeedbackStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "requested" => Ok(HumanFeedbackStatus::Requested),
            "approved" => Ok(HumanFeedbackStatus::Approved),
            "rejected" => Ok(HumanFeedbackStatus::Rejected),
            _ => Err(format!("Invalid human feedback status: {s}")),
        }
    }
}

impl HumanFeedbackStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            HumanFeedbackStatus::Requested => "requested",
            HumanFeedbackStatus::Approved => "approved",
            HumanFeedbackStatus::Rejected => "rejected",
        }
    }
}
