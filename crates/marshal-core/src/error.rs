//! Error types for the planner library.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::PlanStatus;

/// Comprehensive error type for all planner operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// No plan has been recorded for the session
    #[error("No plan found for session {session_id}")]
    PlanNotFound { session_id: String },
    /// Attempted to move a plan out of a terminal status
    #[error("Cannot move plan from '{from}' to '{to}'")]
    InvalidStatusTransition { from: PlanStatus, to: PlanStatus },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> PlannerError {
        PlannerError::Database {
            message: self.message,
            source,
        }
    }
}

impl PlannerError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Wraps a tokio join failure from a blocking database task.
    pub(crate) fn join(e: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {e}"),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PlannerError::database(message).with_source(e))
    }
}

/// Result type alias for planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_not_found_message_names_session() {
        let err = PlannerError::PlanNotFound {
            session_id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "No plan found for session abc");
    }

    #[test]
    fn test_db_context_wraps_source() {
        let result: std::result::Result<(), rusqlite::Error> =
            Err(rusqlite::Error::QueryReturnedNoRows);
        let err = result.db_context("Failed to query plan").unwrap_err();
        assert!(matches!(err, PlannerError::Database { .. }));
        assert!(err.to_string().contains("Failed to query plan"));
    }
}
