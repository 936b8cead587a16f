//! Core library for the Marshal planner.
//!
//! Marshal turns a natural-language objective into a stored plan of steps,
//! each assigned to a specialized agent. The model's answer is read as JSON
//! when possible and with a pair of step grammars otherwise; whatever comes
//! out is normalized against the known agents and persisted.
//!
//! # Layout
//!
//! - [`planner`]: [`PlannerAgent`] and its parts (prompt, parser, plan
//!   builder, clarification handler)
//! - [`models`]: plans, steps, messages and input tasks
//! - [`store`]: the persistence seam with SQLite and in-memory stores
//! - [`llm`]: the model seam with an OpenAI-compatible client
//! - [`catalog`] and [`agents`]: which agents and tools the planner knows
//! - [`display`]: markdown rendering for the CLI
//! - [`telemetry`] and [`human`]: event reporting and per-session human input
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use marshal_core::{InputTask, MemoryStore, PlannerBuilder, StaticModel};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_store(Arc::new(MemoryStore::new()))
//!     .with_model(StaticModel::new(
//!         r#"{"initial_goal": "Buy laptops", "steps": [{"action": "Order 5 laptops", "agent": "ProcurementAgent"}]}"#,
//!     ))
//!     .build()
//!     .await?;
//!
//! let outcome = planner
//!     .submit_task(&InputTask::new("session-1", "user-1", "Buy laptops for the new team"))
//!     .await;
//! println!("{outcome}");
//!
//! let report = planner.session_report("session-1").await?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

pub mod agents;
pub mod catalog;
pub mod db;
pub mod display;
pub mod error;
pub mod human;
pub mod llm;
pub mod models;
pub mod planner;
pub mod store;
pub mod telemetry;

// Re-export commonly used types
pub use agents::AvailableAgents;
pub use catalog::AgentCatalog;
pub use db::Database;
pub use display::{OperationStatus, PlanReport, Steps};
pub use error::{PlannerError, Result};
pub use llm::{LanguageModel, LlmError, ModelConfig, OpenAiClient, StaticModel};
pub use models::{
    AgentMessage, HumanFeedbackStatus, InputTask, Plan, PlanStatus, Step, StepStatus,
};
pub use planner::{ParseTier, ParsedPlan, PlanOutcome, PlannerAgent, PlannerBuilder};
pub use store::{MemoryStore, SqliteStore, Store};
pub use telemetry::{LogTelemetry, Telemetry};
