//! SQLite storage for plans, steps and agent messages.
//!
//! [`Database`] wraps a single synchronous `rusqlite` connection. The async
//! [`crate::store::SqliteStore`] opens one per call on a blocking task.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod message_queries;
pub mod migrations;
pub mod plan_queries;
mod row;
pub mod step_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database at `path` and brings the schema up to
    /// date.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens a private in-memory database.
    pub fn in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
