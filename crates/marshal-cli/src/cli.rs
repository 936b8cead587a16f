//! Command handlers for the `marshal` binary.
//!
//! Each handler calls the planner, turns the result into something that
//! implements `Display` and hands the markdown to the renderer.

use anyhow::{Context, Result};
use marshal_core::{
    planner::CLARIFICATION_APPLIED, InputTask, OperationStatus, PlannerAgent, PlannerError,
};

use crate::{
    args::{ClarifyArgs, ParseArgs, PlanArgs, PromptArgs, ShowArgs},
    renderer::TerminalRenderer,
};

pub struct Cli {
    planner: PlannerAgent,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: PlannerAgent, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    /// Generates a plan and prints the status line and session id.
    ///
    /// Failed plans are still stored; they are reported as errors without
    /// failing the process.
    pub async fn plan(&self, args: &PlanArgs) -> Result<()> {
        let task = args.input_task();
        let outcome = self.planner.submit_task(&task).await;

        let status = if outcome.is_failed() {
            OperationStatus::failure(outcome.to_string())
        } else {
            OperationStatus::success(outcome.to_string())
        };
        self.renderer.render(&status.to_string())?;
        self.renderer
            .render(&format!("- Session: {}\n", task.session_id))?;

        if let Some(request) = &outcome.plan.human_clarification_request {
            self.renderer
                .render(&format!("- **Clarification needed**: {request}\n"))?;
        }
        Ok(())
    }

    pub async fn clarify(&self, args: &ClarifyArgs) -> Result<()> {
        let status = match self
            .planner
            .apply_clarification(&args.session, &args.text)
            .await
        {
            Ok(_) => OperationStatus::success(CLARIFICATION_APPLIED),
            Err(e @ PlannerError::PlanNotFound { .. }) => OperationStatus::failure(e.to_string()),
            Err(e) => return Err(e).context("Failed to apply clarification"),
        };
        self.renderer.render(&status.to_string())
    }

    pub async fn show(&self, args: &ShowArgs) -> Result<()> {
        match self.planner.session_report(&args.session).await {
            Ok(report) => self.renderer.render(&report.to_string()),
            Err(e @ PlannerError::PlanNotFound { .. }) => self
                .renderer
                .render(&OperationStatus::failure(e.to_string()).to_string()),
            Err(e) => Err(e).context("Failed to load session"),
        }
    }

    pub fn prompt(&self, args: &PromptArgs) {
        // Printed verbatim so it can be piped elsewhere.
        print!("{}", self.planner.instruction(&args.objective));
    }

    pub fn parse(&self, args: &ParseArgs) -> Result<()> {
        let raw = std::fs::read_to_string(&args.file).with_context(|| {
            format!("Failed to read response file {}", args.file.display())
        })?;
        let task = InputTask::new("dry-run", "dry-run", args.description.clone());
        let parsed = self.planner.parse_response(&raw, &task);
        self.renderer.render(&parsed.to_string())
    }
}
