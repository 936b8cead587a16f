//! SQLite-backed store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::warn;
use tokio::task;

use super::Store;
use crate::{
    db::Database,
    error::{PlannerError, Result},
    models::{AgentMessage, Plan, Step},
};

/// Store over a SQLite file. Every call opens its own connection on a
/// blocking task.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    /// Wraps an existing database file. The schema is created lazily by the
    /// first connection.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Creates the parent directory and schema up front, reporting any
    /// failure.
    pub async fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        let path = db_path.clone();
        task::spawn_blocking(move || {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| PlannerError::FileSystem {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
            Database::new(&path).map(drop)
        })
        .await
        .map_err(PlannerError::join)??;

        Ok(Self::new(db_path))
    }

    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    async fn run<T, F>(&self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            operation(&mut db)
        })
        .await
        .map_err(PlannerError::join)?
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn add_plan(&self, plan: &Plan) {
        let plan = plan.clone();
        let id = plan.id.clone();
        if let Err(e) = self.run(move |db| db.insert_plan(&plan)).await {
            warn!("Failed to store plan {id}: {e}");
        }
    }

    async fn update_plan(&self, plan: &Plan) {
        let plan = plan.clone();
        let id = plan.id.clone();
        if let Err(e) = self.run(move |db| db.upsert_plan(&plan)).await {
            warn!("Failed to update plan {id}: {e}");
        }
    }

    async fn get_plan_by_session(&self, session_id: &str) -> Option<Plan> {
        let session = session_id.to_string();
        match self
            .run(move |db| db.latest_plan_for_session(&session))
            .await
        {
            Ok(plan) => plan,
            Err(e) => {
                warn!("Failed to load plan for session {session_id}: {e}");
                None
            }
        }
    }

    async fn add_step(&self, step: &Step) {
        let step = step.clone();
        let id = step.id.clone();
        if let Err(e) = self.run(move |db| db.insert_step(&step)).await {
            warn!("Failed to store step {id}: {e}");
        }
    }

    async fn get_steps_by_plan(&self, plan_id: &str) -> Vec<Step> {
        let plan = plan_id.to_string();
        match self.run(move |db| db.steps_for_plan(&plan)).await {
            Ok(steps) => steps,
            Err(e) => {
                warn!("Failed to load steps for plan {plan_id}: {e}");
                Vec::new()
            }
        }
    }

    async fn add_message(&self, message: &AgentMessage) {
        let message = message.clone();
        let id = message.id.clone();
        if let Err(e) = self.run(move |db| db.insert_message(&message)).await {
            warn!("Failed to store message {id}: {e}");
        }
    }

    async fn get_messages_by_session(&self, session_id: &str) -> Vec<AgentMessage> {
        let session = session_id.to_string();
        match self.run(move |db| db.messages_for_session(&session)).await {
            Ok(messages) => messages,
            Err(e) => {
                warn!("Failed to load messages for session {session_id}: {e}");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_open_creates_parent_directories_and_schema() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("marshal.db");

        let store = SqliteStore::open(&path).await.unwrap();

        assert!(path.exists());
        assert_eq!(store.database_path(), path.as_path());
        assert!(store.get_plan_by_session("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_open_reports_unusable_parent() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = SqliteStore::open(blocker.join("marshal.db")).await.unwrap_err();
        assert!(matches!(err, PlannerError::FileSystem { .. }));
    }
}
