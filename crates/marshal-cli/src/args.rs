use std::{path::PathBuf, time::Duration};

use clap::{Args as ClapArgs, Parser, Subcommand};
use marshal_core::{InputTask, ModelConfig};
use uuid::Uuid;

/// Command-line front end for the Marshal planner
///
/// Marshal asks a language model to break an objective into steps, assigns
/// each step to one of a fixed set of agents and records the plan in a
/// local SQLite database. Plans can then be clarified and inspected.
#[derive(Parser)]
#[command(version, about, name = "marshal")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/marshal/marshal.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Agent catalog (JSON). Defaults to $XDG_CONFIG_HOME/marshal/agents.json
    /// when present, otherwise the built-in agents
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate and store a plan for an objective
    #[command(alias = "p")]
    Plan(PlanArgs),
    /// Answer the planner's clarification request for a session
    #[command(alias = "c")]
    Clarify(ClarifyArgs),
    /// Show the latest plan, its steps and messages for a session
    #[command(alias = "s")]
    Show(ShowArgs),
    /// Print the prompt that would be sent to the model
    Prompt(PromptArgs),
    /// Parse a saved model response without storing anything
    Parse(ParseArgs),
}

#[derive(ClapArgs)]
pub struct PlanArgs {
    /// What the plan should achieve
    pub objective: String,

    /// Session to record the plan under. A new one is generated if omitted
    #[arg(long)]
    pub session: Option<String>,

    /// User submitting the objective
    #[arg(long, default_value = "cli-user")]
    pub user: String,

    /// Replay a saved model response instead of calling a model
    #[arg(long)]
    pub response_file: Option<PathBuf>,

    /// Model name sent to the chat completions endpoint
    #[arg(long, env = "MARSHAL_MODEL", default_value = "gpt-4o")]
    pub model: String,

    /// Root URL of an OpenAI-compatible endpoint
    #[arg(long, env = "MARSHAL_BASE_URL", default_value = "https://api.openai.com")]
    pub base_url: String,

    /// Environment variable holding the API key
    #[arg(long, default_value = "OPENAI_API_KEY")]
    pub api_key_env: String,

    /// Give up on the model after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl PlanArgs {
    pub fn input_task(&self) -> InputTask {
        let session_id = self
            .session
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        InputTask::new(session_id, self.user.clone(), self.objective.clone())
    }

    pub fn model_timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn model_config(&self) -> ModelConfig {
        let defaults = ModelConfig::default();
        ModelConfig {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            api_key_env: self.api_key_env.clone(),
            timeout: self.model_timeout().unwrap_or(defaults.timeout),
        }
    }
}

#[derive(ClapArgs)]
pub struct ClarifyArgs {
    /// Session whose latest plan receives the answer
    pub session: String,
    /// The answer, stored verbatim
    pub text: String,
}

#[derive(ClapArgs)]
pub struct ShowArgs {
    pub session: String,
}

#[derive(ClapArgs)]
pub struct PromptArgs {
    pub objective: String,
}

#[derive(ClapArgs)]
pub struct ParseArgs {
    /// File holding a raw model response
    pub file: PathBuf,

    /// Objective used when the response names no goal
    #[arg(long, default_value = "")]
    pub description: String,
}
