//! Data models for plans, steps and the messages around them.
//!
//! This module contains the core domain models of the planner. Display
//! implementations for these models are located in
//! [`crate::display::models`] to keep data structures and presentation apart.
//!
//! ## Entities
//!
//! - [`Plan`]: a decomposed objective with an overall [`PlanStatus`] and the
//!   optional human clarification exchange
//! - [`Step`]: one unit of work assigned to an agent, with a [`StepStatus`]
//!   and a [`HumanFeedbackStatus`]
//! - [`AgentMessage`]: an audit record of what an agent or the human said
//! - [`InputTask`]: the objective submitted by the caller
//!
//! Identifiers are UUID v4 strings generated when an entity is created and
//! never changed afterwards.
//!
//! # Examples
//!
//! ```rust
//! use marshal_core::models::{Plan, PlanStatus};
//! use jiff::Timestamp;
//!
//! let mut plan = Plan {
//!     id: "0b6c7a0e-0000-4000-8000-000000000001".to_string(),
//!     session_id: "session-1".to_string(),
//!     user_id: "user-1".to_string(),
//!     initial_goal: "Onboard Jessica Smith".to_string(),
//!     overall_status: PlanStatus::InProgress,
//!     summary: None,
//!     human_clarification_request: None,
//!     human_clarification_response: None,
//!     created_at: Timestamp::now(),
//!     updated_at: Timestamp::now(),
//! };
//!
//! plan.transition_to(PlanStatus::Completed).unwrap();
//! assert!(plan.transition_to(PlanStatus::Failed).is_err());
//! ```

use uuid::Uuid;

pub mod message;
pub mod plan;
pub mod status;
pub mod step;
pub mod task;


pub use message::AgentMessage;
pub use plan::Plan;
pub use status::{HumanFeedbackStatus, PlanStatus, StepStatus};
pub use step::Step;
pub use task::InputTask;

/// Generates a fresh entity identifier.
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}
