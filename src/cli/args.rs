//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// callbox - Retrieve, play back, and export call recordings
#[derive(Parser, Debug)]
#[command(name = "callbox")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the recordings of one calendar day
    List {
        /// Day to search, formatted YYYY-MM-DD (defaults to today)
        date: Option<String>,
    },

    /// Fetch a recording and write it out as a WAV file
    Export {
        /// Recording ID
        id: i64,

        /// Output file path (defaults to <id>.wav)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete a recording server-side
    Delete {
        /// Recording ID
        id: i64,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
