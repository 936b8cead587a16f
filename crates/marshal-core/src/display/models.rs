//! Display implementations for domain models.
//!
//! All output is markdown so the CLI can render it through the terminal
//! renderer or print it verbatim.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{AgentMessage, HumanFeedbackStatus, Plan, PlanStatus, Step, StepStatus};

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for HumanFeedbackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.initial_goal)?;
        writeln!(f)?;

        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- Status: {}", self.overall_status)?;
        writeln!(f, "- Session: {}", self.session_id)?;
        writeln!(f, "- User: {}", self.user_id)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(summary) = &self.summary {
            writeln!(f)?;
            writeln!(f, "{summary}")?;
        }

        if let Some(request) = &self.human_clarification_request {
            writeln!(f)?;
            writeln!(f, "## Clarification")?;
            writeln!(f)?;
            writeln!(f, "- **Requested**: {request}")?;
            match &self.human_clarification_response {
                Some(response) => writeln!(f, "- **Response**: {response}")?,
                None => writeln!(f, "- **Response**: _pending_")?,
            }
        } else if let Some(response) = &self.human_clarification_response {
            writeln!(f)?;
            writeln!(f, "## Clarification")?;
            writeln!(f)?;
            writeln!(f, "- **Response**: {response}")?;
        }

        Ok(())
    }
}

impl Step {
    /// Writes the step under a heading, prefixed by its position when shown
    /// as part of a plan.
    pub(crate) fn fmt_with_position(
        &self,
        f: &mut fmt::Formatter<'_>,
        position: Option<usize>,
    ) -> fmt::Result {
        match position {
            Some(n) => writeln!(f, "### {n}. {} ({})", self.agent, self.status.with_icon())?,
            None => writeln!(f, "### {} ({})", self.agent, self.status.with_icon())?,
        }
        writeln!(f)?;
        writeln!(f, "{}", self.action)?;
        writeln!(f)?;
        writeln!(f, "- Approval: {}", self.human_approval_status)?;
        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with_position(f, None)
    }
}

impl fmt::Display for AgentMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- **{}** ({}): {}",
            self.source,
            LocalDateTime(&self.created_at),
            self.content
        )
    }
}
