mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use diagreset::config::DiagResetConfig;

#[derive(Parser)]
#[command(name = "diagreset", version, about = "Wipe the diagnostics database and reset its identity counters")]
struct Cli {
    /// Config file (default: ~/.diagreset/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file, overriding the configured path
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Delete ALL rows from every diagnostics table and restart identity counters
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show row counts of every diagnostics table without modifying anything
    Counts {
        /// Print the counts as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DiagResetConfig::load_from(path)?,
        None => DiagResetConfig::load()?,
    };
    if let Some(db) = &cli.db {
        config.storage.db_path = db.to_string_lossy().into_owned();
    }

    // Log to stderr so stdout carries only the report.
    let filter = EnvFilter::try_new(&config.logging.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Reset { yes, json } => cli::reset::reset(&config, yes, json)?,
        Command::Counts { json } => cli::counts::counts(&config, json)?,
    }

    Ok(())
}
