//! Backup Ledger CLI
//!
//! Usage:
//!   bl export  - Export recovery points of a vault to recovery_points.json
//!   bl show    - Summarize an existing export
//!   bl init    - Write the config file

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("bl={}", log_level).parse()?)
                .add_directive(format!("backup_ledger={}", log_level).parse()?),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Export {
            vault,
            region,
            output,
            endpoint_url,
        } => cli::commands::export(vault, region, output, endpoint_url),
        Commands::Show { output, json } => cli::commands::show(output, json),
        Commands::Init {
            vault,
            region,
            output,
        } => cli::commands::init(vault, region, output),
    }
}
