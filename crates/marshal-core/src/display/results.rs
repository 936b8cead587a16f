//! Report types for the outcome of planning, parsing and session lookups.

use std::fmt;

use super::collections::{Messages, Steps};
use crate::{
    models::{AgentMessage, Plan, Step},
    planner::{ParseTier, ParsedPlan, PlanOutcome},
};

/// Everything recorded for a session: its most recent plan, that plan's
/// steps and the session's message history.
#[derive(Debug, Clone)]
pub struct PlanReport {
    pub plan: Plan,
    pub steps: Vec<Step>,
    pub messages: Vec<AgentMessage>,
}

impl fmt::Display for PlanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.plan)?;
        writeln!(f)?;
        writeln!(f, "## Steps")?;
        writeln!(f)?;
        write!(f, "{}", Steps(self.steps.clone()))?;
        writeln!(f)?;
        writeln!(f, "## Messages")?;
        writeln!(f)?;
        write!(f, "{}", Messages(self.messages.clone()))
    }
}

impl fmt::Display for PlanOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.failure {
            Some(detail) => write!(
                f,
                "Plan '{}' could not be generated: {detail}",
                self.plan.id
            ),
            None => write!(
                f,
                "Plan '{}' created successfully with {} steps",
                self.plan.id,
                self.steps.len()
            ),
        }
    }
}

impl fmt::Display for ParseTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseTier::Structured => write!(f, "structured"),
            ParseTier::Pattern => write!(f, "pattern"),
        }
    }
}

/// Dry-run rendering of a parsed response. Nothing here has been persisted,
/// so steps carry no identifiers.
impl fmt::Display for ParsedPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.fields.initial_goal)?;
        writeln!(f)?;
        writeln!(f, "- Parsed with: {} tier", self.tier)?;
        writeln!(f, "- Steps: {}", self.steps.len())?;

        if let Some(summary) = &self.fields.summary {
            writeln!(f)?;
            writeln!(f, "{summary}")?;
        }
        if let Some(request) = &self.fields.human_clarification_request {
            writeln!(f)?;
            writeln!(f, "**Clarification requested**: {request}")?;
        }

        writeln!(f)?;
        if self.steps.is_empty() {
            return writeln!(f, "No steps extracted.");
        }
        for (index, step) in self.steps.iter().enumerate() {
            writeln!(f, "{}. **{}**: {}", index + 1, step.agent, step.action)?;
        }
        Ok(())
    }
}
