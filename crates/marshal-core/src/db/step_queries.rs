//! Step persistence and lookups.

use rusqlite::{params, Row};

use super::row;
use crate::{
    error::{DatabaseResultExt, Result},
    models::Step,
};

const INSERT_STEP_SQL: &str = "INSERT INTO steps (id, plan_id, session_id, action, agent, status, \
     human_approval_status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

const SELECT_STEPS_BY_PLAN_SQL: &str = "SELECT id, plan_id, session_id, action, agent, status, \
     human_approval_status, created_at, updated_at FROM steps WHERE plan_id = ?1 ORDER BY rowid";

fn step_from_row(row: &Row<'_>) -> rusqlite::Result<Step> {
    Ok(Step {
        id: row.get(0)?,
        plan_id: row.get(1)?,
        session_id: row.get(2)?,
        action: row.get(3)?,
        agent: row.get(4)?,
        status: row::status(row, 5)?,
        human_approval_status: row::status(row, 6)?,
        created_at: row::timestamp(row, 7)?,
        updated_at: row::timestamp(row, 8)?,
    })
}

impl super::Database {
    /// Inserts a step. Its plan must already be stored.
    pub fn insert_step(&mut self, step: &Step) -> Result<()> {
        self.connection
            .execute(
                INSERT_STEP_SQL,
                params![
                    step.id,
                    step.plan_id,
                    step.session_id,
                    step.action,
                    step.agent,
                    step.status.as_str(),
                    step.human_approval_status.as_str(),
                    step.created_at.to_string(),
                    step.updated_at.to_string(),
                ],
            )
            .db_context("Failed to insert step")?;
        Ok(())
    }

    /// Retrieves the steps of a plan in creation order.
    pub fn steps_for_plan(&self, plan_id: &str) -> Result<Vec<Step>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_STEPS_BY_PLAN_SQL)
            .db_context("Failed to prepare steps query")?;

        let steps = stmt
            .query_map(params![plan_id], step_from_row)
            .db_context("Failed to query steps")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read step row")?;

        Ok(steps)
    }
}
