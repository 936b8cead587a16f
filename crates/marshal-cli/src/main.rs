//! Marshal CLI
//!
//! Plans objectives with a language model and inspects the stored results.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use marshal_core::{AgentCatalog, OpenAiClient, PlannerBuilder, StaticModel};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        catalog,
        command,
    } = Args::parse();

    let catalog = match catalog {
        Some(path) => AgentCatalog::load(&path)
            .with_context(|| format!("Failed to load agent catalog {}", path.display()))?,
        None => AgentCatalog::load_default().context("Failed to load agent catalog")?,
    };

    let mut builder = PlannerBuilder::new()
        .with_database_path(database_file)
        .with_catalog(catalog);

    // Only planning talks to a model.
    if let Plan(plan) = &command {
        builder = match &plan.response_file {
            Some(path) => builder.with_model(
                StaticModel::from_file(path).context("Failed to load saved response")?,
            ),
            None => builder.with_model(
                OpenAiClient::from_config(&plan.model_config())
                    .context("Failed to configure language model")?,
            ),
        }
        .with_model_timeout(plan.model_timeout());
    }

    let planner = builder
        .build()
        .await
        .context("Failed to initialize planner")?;

    let cli = Cli::new(planner, TerminalRenderer::new(!no_color));

    info!("Marshal started");

    match command {
        Plan(args) => cli.plan(&args).await,
        Clarify(args) => cli.clarify(&args).await,
        Show(args) => cli.show(&args).await,
        Prompt(args) => {
            cli.prompt(&args);
            Ok(())
        }
        Parse(args) => cli.parse(&args),
    }
}
