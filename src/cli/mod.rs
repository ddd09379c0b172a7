//! CLI module for Gamedock
//!
//! Without a subcommand the binary opens the library window.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use output::OutputFormat;

/// Gamedock - game library client
#[derive(Parser, Debug)]
#[command(name = "gamedock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[command(flatten)]
    pub output: OutputOptions,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output formatting options
#[derive(Parser, Debug, Clone)]
pub struct OutputOptions {
    /// Output in JSON format (for machine parsing)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply a JSON event log to an empty store and print the result
    Replay {
        /// File holding a JSON array of events
        file: PathBuf,
    },

    /// Show what the main action button renders for the given state
    Button(commands::button::ButtonArgs),

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}

/// Run a CLI subcommand
pub async fn run(command: Commands, output: &OutputOptions) -> anyhow::Result<()> {
    let format = output.format();
    let quiet = output.quiet;

    match command {
        Commands::Replay { file } => commands::replay::run(file, format, quiet).await,
        Commands::Button(args) => commands::button::run(args, format, quiet).await,
        Commands::Config { command } => commands::config::run(command, format, quiet).await,
    }
}
