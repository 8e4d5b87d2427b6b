//! Washlytics CLI - Data directory seeding and inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed the default service catalog into ./data
//! washlytics seed
//!
//! # Seed a different directory, overwriting an existing catalog
//! washlytics seed --data-dir /var/lib/washlytics --force
//!
//! # Show document counts per collection
//! washlytics stats --data-dir ./data
//! ```
//!
//! # Commands
//!
//! - `seed` - Write the default service catalog into a data directory
//! - `stats` - Show document counts per collection

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "washlytics")]
#[command(author, version, about = "Washlytics CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the default service catalog into a data directory
    Seed {
        /// Data directory holding the per-collection JSON files
        #[arg(short, long, default_value = "data")]
        data_dir: String,

        /// Overwrite an existing service catalog
        #[arg(short, long)]
        force: bool,
    },
    /// Show document counts per collection
    Stats {
        /// Data directory holding the per-collection JSON files
        #[arg(short, long, default_value = "data")]
        data_dir: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { data_dir, force } => commands::seed::run(&data_dir, force).await?,
        Commands::Stats { data_dir } => commands::stats::run(&data_dir).await?,
    }
    Ok(())
}
