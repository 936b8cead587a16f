//! Agent and tool catalog loaded from a JSON file.
//!
//! The catalog decides which agents the planner may assign steps to and
//! which functions it tells the model about. A minimal file looks like:
//!
//! ```json
//! {
//!   "agents": [
//!     {
//!       "name": "HrAgent",
//!       "tools": [
//!         { "name": "schedule_orientation_session", "description": "Book an orientation slot" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    agents::{AvailableAgents, DEFAULT_AGENTS},
    error::{PlannerError, Result},
};

/// A function an agent can call, as described to the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// One agent and the tools it exposes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentEntry {
    pub name: String,
    #[serde(default)]
    pub tools: Vec<ToolDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentCatalog {
    pub agents: Vec<AgentEntry>,
}

impl AgentCatalog {
    /// Reads a catalog from `path`.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::FileSystem` if the file cannot be read and
    /// `PlannerError::Configuration` if it is not a valid catalog.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| PlannerError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        let catalog: Self =
            serde_json::from_str(&contents).map_err(|e| PlannerError::Configuration {
                message: format!("Invalid agent catalog '{}': {e}", path.display()),
            })?;
        debug!(
            "Loaded {} agents from catalog {}",
            catalog.agents.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Loads the catalog at `$XDG_CONFIG_HOME/marshal/agents.json` if one
    /// exists, otherwise the built-in agent list without tools.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Location of the user's catalog, if the file exists.
    pub fn default_path() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix("marshal").find_config_file("agents.json")
    }

    /// The set of agents steps may be assigned to.
    pub fn available_agents(&self) -> AvailableAgents {
        AvailableAgents::new(self.agents.iter().map(|a| a.name.as_str()))
    }

    /// One line per tool in `Agent: function - description` form.
    pub fn tool_lines(&self) -> Vec<String> {
        self.agents
            .iter()
            .flat_map(|agent| {
                agent.tools.iter().map(move |tool| {
                    if tool.description.is_empty() {
                        format!("{}: {}", agent.name, tool.name)
                    } else {
                        format!("{}: {} - {}", agent.name, tool.name, tool.description)
                    }
                })
            })
            .collect()
    }
}

impl Default for AgentCatalog {
    fn default() -> Self {
        Self {
            agents: DEFAULT_AGENTS
                .iter()
                .map(|name| AgentEntry {
                    name: (*name).to_string(),
                    tools: Vec::new(),
                })
                .collect(),
        }
    }
}
