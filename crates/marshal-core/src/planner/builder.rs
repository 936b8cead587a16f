//! Builder for creating and configuring [`PlannerAgent`] instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use super::PlannerAgent;
use crate::{
    agents::AvailableAgents,
    catalog::AgentCatalog,
    error::{PlannerError, Result},
    llm::LanguageModel,
    store::{SqliteStore, Store},
    telemetry::{LogTelemetry, Telemetry},
};

/// Builder for creating and configuring [`PlannerAgent`] instances.
///
/// Defaults: a SQLite store at the XDG data path, the built-in agent list
/// without tools, telemetry through `log`, no model timeout and no model.
/// A planner without a model can still apply clarifications and report on
/// sessions; planning requests record a failed plan.
#[derive(Clone, Default)]
pub struct PlannerBuilder {
    database_path: Option<PathBuf>,
    store: Option<Arc<dyn Store>>,
    catalog: Option<AgentCatalog>,
    agents: Option<AvailableAgents>,
    model: Option<Arc<dyn LanguageModel>>,
    telemetry: Option<Arc<dyn Telemetry>>,
    model_timeout: Option<Duration>,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/marshal/marshal.db` or
    /// `~/.local/share/marshal/marshal.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Uses `store` instead of a SQLite database.
    pub fn with_store(mut self, store: Arc<dyn Store>) -> Self {
        self.store = Some(store);
        self
    }

    /// Takes agents and tool descriptions from `catalog`.
    pub fn with_catalog(mut self, catalog: AgentCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Restricts step assignment to `agents`, overriding the catalog's list.
    pub fn with_agents(mut self, agents: AvailableAgents) -> Self {
        self.agents = Some(agents);
        self
    }

    pub fn with_model(mut self, model: impl LanguageModel + 'static) -> Self {
        self.model = Some(Arc::new(model));
        self
    }

    pub fn with_telemetry(mut self, telemetry: Arc<dyn Telemetry>) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Gives up on the model after `timeout`; the plan is then recorded as
    /// failed.
    pub fn with_model_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.model_timeout = timeout;
        self
    }

    /// Builds the configured planner.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::XdgDirectory` if the default database path
    /// cannot be determined, and `PlannerError::FileSystem` or
    /// `PlannerError::Database` if the database cannot be initialized.
    pub async fn build(self) -> Result<PlannerAgent> {
        let store: Arc<dyn Store> = match self.store {
            Some(store) => store,
            None => {
                let db_path = match self.database_path {
                    Some(path) => path,
                    None => Self::default_database_path()?,
                };
                Arc::new(SqliteStore::open(db_path).await?)
            }
        };

        let catalog = self.catalog.unwrap_or_default();
        let agents = self
            .agents
            .unwrap_or_else(|| catalog.available_agents());
        let telemetry = self
            .telemetry
            .unwrap_or_else(|| Arc::new(LogTelemetry) as Arc<dyn Telemetry>);

        Ok(PlannerAgent::new(
            agents,
            catalog.tool_lines(),
            store,
            self.model,
            telemetry,
            self.model_timeout,
        ))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    pub fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("marshal")
            .place_data_file("marshal.db")
            .map_err(|e| PlannerError::XdgDirectory(e.to_string()))
    }
}
