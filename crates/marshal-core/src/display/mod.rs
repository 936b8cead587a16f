//! Markdown presentation of planner data.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! this module adds newtype wrappers for collections and report types for
//! whole operations, so the CLI only ever prints something that implements
//! `Display` and hands the text to its terminal renderer.
//!
//! - [`collections`]: [`Steps`] and [`Messages`]
//! - [`results`]: [`PlanReport`] for a session, plus the `Display` impls of
//!   [`crate::planner::PlanOutcome`] and [`crate::planner::ParsedPlan`]
//! - [`status`]: [`OperationStatus`] lines
//! - [`datetime`]: local time formatting
//!
//! ```rust
//! use marshal_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Plan updated with human clarification");
//! assert!(status.to_string().starts_with("Success:"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Messages, Steps};
pub use datetime::LocalDateTime;
pub use results::PlanReport;
pub use status::OperationStatus;
