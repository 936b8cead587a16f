//! Persistence seam used by the planner.
//!
//! Store operations never fail the caller: implementations log and swallow
//! their own errors, returning `None` or an empty list where a read could
//! not be served. Plan generation keeps going when storage misbehaves.

use async_trait::async_trait;

use crate::models::{AgentMessage, Plan, Step};

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[async_trait]
pub trait Store: Send + Sync {
    /// Records a newly created plan.
    async fn add_plan(&self, plan: &Plan);

    /// Writes the current state of an existing plan.
    async fn update_plan(&self, plan: &Plan);

    /// The most recently created plan of a session, if any.
    async fn get_plan_by_session(&self, session_id: &str) -> Option<Plan>;

    /// Records a step. Its plan is stored first.
    async fn add_step(&self, step: &Step);

    /// Steps of a plan in creation order.
    async fn get_steps_by_plan(&self, plan_id: &str) -> Vec<Step>;

    async fn add_message(&self, message: &AgentMessage);

    /// Messages of a session in the order they were recorded.
    async fn get_messages_by_session(&self, session_id: &str) -> Vec<AgentMessage>;
}
