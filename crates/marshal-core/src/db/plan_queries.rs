//! Plan persistence and lookups.

use rusqlite::{params, OptionalExtension, Row};

use super::row;
use crate::{
    error::{DatabaseResultExt, Result},
    models::Plan,
};

const PLAN_COLUMNS: &str = "id, session_id, user_id, initial_goal, overall_status, summary, \
     human_clarification_request, human_clarification_response, created_at, updated_at";

const INSERT_PLAN_SQL: &str = "INSERT INTO plans (id, session_id, user_id, initial_goal, overall_status, summary, \
     human_clarification_request, human_clarification_response, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";

// session_id, user_id and created_at are fixed at creation and never
// rewritten by an upsert.
const UPSERT_PLAN_SQL: &str = "INSERT INTO plans (id, session_id, user_id, initial_goal, overall_status, summary, \
     human_clarification_request, human_clarification_response, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10) \
     ON CONFLICT(id) DO UPDATE SET \
     initial_goal = excluded.initial_goal, \
     overall_status = excluded.overall_status, \
     summary = excluded.summary, \
     human_clarification_request = excluded.human_clarification_request, \
     human_clarification_response = excluded.human_clarification_response, \
     updated_at = excluded.updated_at";

fn plan_from_row(row: &Row<'_>) -> rusqlite::Result<Plan> {
    Ok(Plan {
        id: row.get(0)?,
        session_id: row.get(1)?,
        user_id: row.get(2)?,
        initial_goal: row.get(3)?,
        overall_status: row::status(row, 4)?,
        summary: row.get(5)?,
        human_clarification_request: row.get(6)?,
        human_clarification_response: row.get(7)?,
        created_at: row::timestamp(row, 8)?,
        updated_at: row::timestamp(row, 9)?,
    })
}

impl super::Database {
    /// Inserts a new plan. Fails if a plan with the same id exists.
    pub fn insert_plan(&mut self, plan: &Plan) -> Result<()> {
        self.connection
            .execute(
                INSERT_PLAN_SQL,
                params![
                    plan.id,
                    plan.session_id,
                    plan.user_id,
                    plan.initial_goal,
                    plan.overall_status.as_str(),
                    plan.summary,
                    plan.human_clarification_request,
                    plan.human_clarification_response,
                    plan.created_at.to_string(),
                    plan.updated_at.to_string(),
                ],
            )
            .db_context("Failed to insert plan")?;
        Ok(())
    }

    /// Writes the mutable fields of `plan`, inserting it if it is not
    /// stored yet.
    pub fn upsert_plan(&mut self, plan: &Plan) -> Result<()> {
        self.connection
            .execute(
                UPSERT_PLAN_SQL,
                params![
                    plan.id,
                    plan.session_id,
                    plan.user_id,
                    plan.initial_goal,
                    plan.overall_status.as_str(),
                    plan.summary,
                    plan.human_clarification_request,
                    plan.human_clarification_response,
                    plan.created_at.to_string(),
                    plan.updated_at.to_string(),
                ],
            )
            .db_context("Failed to update plan")?;
        Ok(())
    }

    /// Retrieves a plan by its id.
    pub fn get_plan(&self, id: &str) -> Result<Option<Plan>> {
        let sql = format!("SELECT {PLAN_COLUMNS} FROM plans WHERE id = ?1");
        self.connection
            .query_row(&sql, params![id], plan_from_row)
            .optional()
            .db_context("Failed to query plan")
    }

    /// Retrieves the most recently created plan of a session.
    pub fn latest_plan_for_session(&self, session_id: &str) -> Result<Option<Plan>> {
        let sql = format!(
            "SELECT {PLAN_COLUMNS} FROM plans WHERE session_id = ?1 ORDER BY rowid DESC LIMIT 1"
        );
        self.connection
            .query_row(&sql, params![session_id], plan_from_row)
            .optional()
            .db_context("Failed to query plan for session")
    }
}
