//! Command implementations for Backup Ledger CLI.
//!
//! Main commands:
//! - export: List, enrich with tags, and write recovery_points.json
//! - show: Summarize an existing export
//! - init: Write the config file

use anyhow::{bail, Context, Result};
use backup_ledger::config::default_config_path;
use backup_ledger::exporter::export_recovery_points_with_progress;
use backup_ledger::{load_recovery_points, write_json, AwsBackupService, Config};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

/// Config file values, overridden by command line flags.
fn resolve_config(
    vault: Option<String>,
    region: Option<String>,
    output: Option<PathBuf>,
) -> Result<Config> {
    let mut config = Config::load_default()?;
    if vault.is_some() {
        config.vault_name = vault;
    }
    if let Some(region) = region {
        config.region = region;
    }
    if let Some(output) = output {
        config.output_dir = output;
    }
    Ok(config)
}

/// Export every recovery point of a vault.
pub fn export(
    vault: Option<String>,
    region: Option<String>,
    output: Option<PathBuf>,
    endpoint_url: Option<String>,
) -> Result<()> {
    let mut config = resolve_config(vault, region, output)?;
    if endpoint_url.is_some() {
        config.endpoint_url = endpoint_url;
    }

    let Some(vault_name) = config.vault_name.clone() else {
        bail!(
            "No backup vault given. Use --vault or set vault_name in {}",
            default_config_path().display()
        );
    };

    println!("{}", "Backup Ledger Export".bold().cyan());
    println!();
    println!("Vault:  {}", vault_name.bold());
    println!("Region: {}", config.region.dimmed());
    println!();

    let service =
        AwsBackupService::connect_with_endpoint(&config.region, config.endpoint_url.as_deref())
            .context("Cannot create AWS Backup client")?;

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::with_template("  Tagging [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")?
            .progress_chars("█▓░"),
    );

    let summary = export_recovery_points_with_progress(
        &service,
        &vault_name,
        &config.output_dir,
        |done, total| {
            pb.set_length(total as u64);
            pb.set_position(done as u64);
        },
    );
    pb.finish_and_clear();

    let summary =
        summary.with_context(|| format!("Export of vault '{}' failed", vault_name))?;

    println!(
        "{} Exported {} recovery points to {}",
        "✓".green(),
        summary.exported.to_string().green().bold(),
        summary.output_file.display().to_string().cyan()
    );
    if summary.tag_failures > 0 {
        println!(
            "  {}",
            format!(
                "{} recovery points exported without tags (see log)",
                summary.tag_failures
            )
            .yellow()
        );
    }

    Ok(())
}

/// Summarize an existing export.
pub fn show(output: Option<PathBuf>, json: bool) -> Result<()> {
    let config = resolve_config(None, None, output)?;
    let path = config.output_file();

    if !path.exists() {
        println!(
            "{}",
            format!("No export found at {}. Run 'bl export' first.", path.display()).yellow()
        );
        return Ok(());
    }

    let records = load_recovery_points(&path)?;

    if json {
        let stdout = std::io::stdout();
        write_json(stdout.lock(), &records)?;
        println!();
        return Ok(());
    }

    for record in &records {
        println!(
            "{} {} {} {}",
            record.recovery_point_arn.cyan(),
            record.resource_type.as_deref().unwrap_or("-").bold(),
            record.status.as_deref().unwrap_or("-").dimmed(),
            format!("{} tags", record.tags.len()).dimmed()
        );
    }

    println!();
    println!(
        "{} recovery points in {}",
        records.len().to_string().green().bold(),
        path.display()
    );

    Ok(())
}

/// Write the config file.
pub fn init(vault: Option<String>, region: Option<String>, output: Option<PathBuf>) -> Result<()> {
    let config = resolve_config(vault, region, output)?;
    let path = config.save_default()?;
    println!("{} Config written to {}", "✓".green(), path.display());
    Ok(())
}
