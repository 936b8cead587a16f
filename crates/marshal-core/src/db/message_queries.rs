//! Agent message persistence.

use rusqlite::{params, Row};

use super::row;
use crate::{
    error::{DatabaseResultExt, Result},
    models::AgentMessage,
};

const INSERT_MESSAGE_SQL: &str = "INSERT INTO messages (id, session_id, user_id, plan_id, step_id, \
     source, content, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

const SELECT_MESSAGES_BY_SESSION_SQL: &str = "SELECT id, session_id, user_id, plan_id, step_id, \
     source, content, created_at FROM messages WHERE session_id = ?1 ORDER BY rowid";

fn message_from_row(row: &Row<'_>) -> rusqlite::Result<AgentMessage> {
    Ok(AgentMessage {
        id: row.get(0)?,
        session_id: row.get(1)?,
        user_id: row.get(2)?,
        plan_id: row.get(3)?,
        step_id: row.get(4)?,
        source: row.get(5)?,
        content: row.get(6)?,
        created_at: row::timestamp(row, 7)?,
    })
}

impl super::Database {
    pub fn insert_message(&mut self, message: &AgentMessage) -> Result<()> {
        self.connection
            .execute(
                INSERT_MESSAGE_SQL,
                params![
                    message.id,
                    message.session_id,
                    message.user_id,
                    message.plan_id,
                    message.step_id,
                    message.source,
                    message.content,
                    message.created_at.to_string(),
                ],
            )
            .db_context("Failed to insert message")?;
        Ok(())
    }

    /// Retrieves a session's messages in the order they were recorded.
    pub fn messages_for_session(&self, session_id: &str) -> Result<Vec<AgentMessage>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_MESSAGES_BY_SESSION_SQL)
            .db_context("Failed to prepare messages query")?;

        let messages = stmt
            .query_map(params![session_id], message_from_row)
            .db_context("Failed to query messages")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read message row")?;

        Ok(messages)
    }
}
