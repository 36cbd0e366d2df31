//! callbox - Retrieve, play back, and export call recordings
//!
//! Entry point for the callbox CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use callbox::cli::{Cli, Commands};
use callbox::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::load()?;

    // Execute command
    match cli.command {
        Commands::List { date } => {
            callbox::cli::commands::list_recordings(&settings, date).await?;
        }
        Commands::Export { id, output } => {
            callbox::cli::commands::export_recording(&settings, id, output).await?;
        }
        Commands::Delete { id } => {
            callbox::cli::commands::delete_recording(&settings, id).await?;
        }
        Commands::Config(config_cmd) => {
            callbox::cli::commands::config_command(&settings, config_cmd)?;
        }
    }

    Ok(())
}
