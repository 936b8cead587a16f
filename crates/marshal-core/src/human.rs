//! Per-session human input handlers.
//!
//! When the planner needs information from the person behind a session it
//! posts the question to that session's handler. Handlers are created the
//! first time a session is seen and live as long as the registry.

use std::{collections::HashMap, sync::Arc};

use log::debug;
use tokio::sync::Mutex;

/// Collects the questions asked of one session's human.
#[derive(Debug)]
pub struct HumanInputHandler {
    session_id: String,
    questions: Mutex<Vec<String>>,
}

impl HumanInputHandler {
    fn new(session_id: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            questions: Mutex::new(Vec::new()),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Queues a question for the human.
    pub async fn ask(&self, question: impl Into<String>) {
        let question = question.into();
        debug!("Asking human in session {}: {question}", self.session_id);
        self.questions.lock().await.push(question);
    }

    /// Questions asked so far, oldest first.
    pub async fn questions(&self) -> Vec<String> {
        self.questions.lock().await.clone()
    }
}

/// Session id to handler map with creation on first lookup.
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    handlers: Mutex<HashMap<String, Arc<HumanInputHandler>>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handler for `session_id`, creating it on a miss.
    pub async fn handler_for(&self, session_id: &str) -> Arc<HumanInputHandler> {
        let mut handlers = self.handlers.lock().await;
        Arc::clone(
            handlers
                .entry(session_id.to_string())
                .or_insert_with(|| Arc::new(HumanInputHandler::new(session_id))),
        )
    }

    /// Returns the handler for `session_id` without creating one.
    pub async fn get(&self, session_id: &str) -> Option<Arc<HumanInputHandler>> {
        self.handlers.lock().await.get(session_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_handler_created_on_miss_and_reused() {
        let registry = HandlerRegistry::new();
        assert!(registry.get("s1").await.is_none());

        let first = registry.handler_for("s1").await;
        first.ask("What is the start date?").await;

        let second = registry.handler_for("s1").await;
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.questions().await, ["What is the start date?"]);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let registry = HandlerRegistry::new();
        registry.handler_for("s1").await.ask("Budget?").await;
        let other = registry.handler_for("s2").await;
        assert_eq!(other.session_id(), "s2");
        assert!(other.questions().await.is_empty());
    }
}
