//! In-memory store, used when no database is wanted and in tests.

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::Store;
use crate::models::{AgentMessage, Plan, Step};

#[derive(Debug, Default)]
struct Records {
    plans: Vec<Plan>,
    steps: Vec<Step>,
    messages: Vec<AgentMessage>,
}

/// Keeps everything in insertion order for the lifetime of the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Records>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored plans, oldest first.
    pub async fn plans(&self) -> Vec<Plan> {
        self.records.lock().await.plans.clone()
    }

    /// All stored steps, oldest first.
    pub async fn steps(&self) -> Vec<Step> {
        self.records.lock().await.steps.clone()
    }

    /// All stored messages, oldest first.
    pub async fn messages(&self) -> Vec<AgentMessage> {
        self.records.lock().await.messages.clone()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn add_plan(&self, plan: &Plan) {
        self.records.lock().await.plans.push(plan.clone());
    }

    async fn update_plan(&self, plan: &Plan) {
        let mut records = self.records.lock().await;
        match records.plans.iter_mut().find(|p| p.id == plan.id) {
            Some(existing) => *existing = plan.clone(),
            None => records.plans.push(plan.clone()),
        }
    }

    async fn get_plan_by_session(&self, session_id: &str) -> Option<Plan> {
        let records = self.records.lock().await;
        records
            .plans
            .iter()
            .rev()
            .find(|p| p.session_id == session_id)
            .cloned()
    }

    async fn add_step(&self, step: &Step) {
        self.records.lock().await.steps.push(step.clone());
    }

    async fn get_steps_by_plan(&self, plan_id: &str) -> Vec<Step> {
        let records = self.records.lock().await;
        records
            .steps
            .iter()
            .filter(|s| s.plan_id == plan_id)
            .cloned()
            .collect()
    }

    async fn add_message(&self, message: &AgentMessage) {
        self.records.lock().await.messages.push(message.clone());
    }

    async fn get_messages_by_session(&self, session_id: &str) -> Vec<AgentMessage> {
        let records = self.records.lock().await;
        records
            .messages
            .iter()
            .filter(|m| m.session_id == session_id)
            .cloned()
            .collect()
    }
}
