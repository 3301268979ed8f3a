//! CLI definitions and command implementations for Backup Ledger.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Backup Ledger - Export AWS Backup recovery points and their tags
#[derive(Parser)]
#[command(name = "bl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export every recovery point of a vault, with tags, to recovery_points.json
    Export {
        /// Backup vault name (default: vault_name from config)
        #[arg(long)]
        vault: Option<String>,

        /// AWS region (default: region from config)
        #[arg(short, long)]
        region: Option<String>,

        /// Output directory (default: output_dir from config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Custom AWS Backup endpoint URL
        #[arg(long)]
        endpoint_url: Option<String>,
    },

    /// Show the contents of an existing export
    Show {
        /// Output directory holding recovery_points.json
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the raw JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Write the config file with the given defaults
    Init {
        #[arg(long)]
        vault: Option<String>,

        #[arg(short, long)]
        region: Option<String>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
