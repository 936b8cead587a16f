//! Agent names known to the planner.
//!
//! A step may only be assigned to an agent in the [`AvailableAgents`] set.
//! Anything the model invents is coerced to [`GENERIC_AGENT`].

use std::fmt;

use log::debug;

/// Fallback agent for steps no specialized agent can handle.
pub const GENERIC_AGENT: &str = "GenericAgent";

/// Agent that escalates a step to a person.
pub const HUMAN_AGENT: &str = "HumanAgent";

/// Source name used for messages the planner itself records.
pub const PLANNER_AGENT: &str = "PlannerAgent";

/// Agents available when no catalog overrides them.
pub const DEFAULT_AGENTS: [&str; 7] = [
    HUMAN_AGENT,
    "HrAgent",
    "MarketingAgent",
    "ProductAgent",
    "ProcurementAgent",
    "TechSupportAgent",
    GENERIC_AGENT,
];

/// Ordered, duplicate-free set of agent names.
///
/// The fallback agent is always a member so that coercion never produces a
/// name outside the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableAgents {
    names: Vec<String>,
}

impl AvailableAgents {
    /// Builds the set from `names`, keeping first occurrences in order.
    /// Blank names are ignored.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self { names: Vec::new() };
        for name in names {
            set.insert(name.into());
        }
        set.insert(GENERIC_AGENT.to_string());
        set
    }

    fn insert(&mut self, name: String) {
        let name = name.trim().to_string();
        if !name.is_empty() && !self.names.contains(&name) {
            self.names.push(name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Maps raw agent text from a model response onto a member of the set.
    ///
    /// All whitespace is removed first, so `"Hr Agent"` resolves to
    /// `HrAgent`. Empty or unknown names become [`GENERIC_AGENT`].
    pub fn resolve(&self, raw: &str) -> String {
        let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if self.contains(&cleaned) {
            return cleaned;
        }
        if !cleaned.is_empty() {
            debug!("Unknown agent '{cleaned}', substituting {GENERIC_AGENT}");
        }
        GENERIC_AGENT.to_string()
    }
}

impl Default for AvailableAgents {
    fn default() -> Self {
        Self::new(DEFAULT_AGENTS)
    }
}

impl fmt::Display for AvailableAgents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names.join(", "))
    }
}
