//! Operator entry point: replay a JSONL tick fixture through the engine, or
//! validate/hash a threshold document — no daemon, no order routing.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lta")]
#[command(about = "Level-1 advisory engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a newline-delimited JSON tick file through the engine and
    /// print each resulting `DualTimeframeResult` as one JSON line.
    Run {
        /// Path to the compiled threshold document (YAML).
        #[arg(long)]
        config: String,

        /// Path to a file of one JSON-encoded `RawTick` per line.
        #[arg(long)]
        ticks: String,
    },

    /// Compile one or more layered YAML threshold documents and print the
    /// resulting version hash plus canonical JSON.
    ValidateConfig {
        /// Paths in merge order (base -> env -> override...).
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Run { config, ticks } => commands::run::replay(&config, &ticks),
        Commands::ValidateConfig { paths } => commands::validate_config::run(&paths),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
}
