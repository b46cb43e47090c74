use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitrine_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(author, version, about = "A terminal showcase board for live institute content")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run,
    /// Fetch one collection and print it
    Show {
        /// Which collection to fetch
        #[arg(value_enum)]
        collection: Collection,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Collection {
    Certificates,
    Courses,
    Trainings,
    Placements,
    Contacts,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    // Initialize logging; RUST_LOG overrides the configured level
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Show { collection }) => commands::show::run(&config, collection).await,
    }
}
