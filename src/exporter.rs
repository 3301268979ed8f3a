//! Exporter - Write enriched recovery points to `recovery_points.json`.
//!
//! The file is rewritten in place on every run (no temp file, no rename), so an
//! interrupted write can leave a truncated file behind.

use crate::backup::{AwsBackupService, BackupService};
use crate::enricher::fetch_recovery_points_with_progress;
use crate::error::{ExportError, Result};
use crate::record::RecoveryPointRecord;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Name of the export file inside the output directory.
pub const OUTPUT_FILE_NAME: &str = "recovery_points.json";

/// Result of an export run.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Path of the written file
    pub output_file: PathBuf,
    /// Number of recovery points written
    pub exported: usize,
    /// Recovery points exported with `{}` because their tag lookup failed
    pub tag_failures: usize,
}

/// Save recovery points as a 2-space indented JSON array, creating `output_dir` if needed.
/// Returns the path of the written file.
pub fn save_recovery_points_to_file(
    recovery_points: &[RecoveryPointRecord],
    output_dir: &Path,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|source| ExportError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let output_file = output_dir.join(OUTPUT_FILE_NAME);
    let content = serde_json::to_string_pretty(recovery_points)?;

    fs::write(&output_file, content).map_err(|source| ExportError::Write {
        path: output_file.clone(),
        source,
    })?;

    Ok(output_file)
}

/// Read an export file back.
pub fn load_recovery_points(path: &Path) -> Result<Vec<RecoveryPointRecord>> {
    let content = fs::read_to_string(path).map_err(|source| ExportError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ExportError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// List, enrich and save every recovery point of a vault.
pub fn export_recovery_points<S>(
    service: &S,
    backup_vault_name: &str,
    output_dir: &Path,
) -> Result<ExportSummary>
where
    S: BackupService + ?Sized,
{
    export_recovery_points_with_progress(service, backup_vault_name, output_dir, |_, _| {})
}

/// Same as [`export_recovery_points`], reporting `(done, total)` during tag enrichment.
pub fn export_recovery_points_with_progress<S, F>(
    service: &S,
    backup_vault_name: &str,
    output_dir: &Path,
    on_progress: F,
) -> Result<ExportSummary>
where
    S: BackupService + ?Sized,
    F: FnMut(usize, usize),
{
    let enriched = fetch_recovery_points_with_progress(service, backup_vault_name, on_progress)?;
    warn_duplicate_arns(&enriched.records);

    let output_file = save_recovery_points_to_file(&enriched.records, output_dir)?;

    info!(
        "Exported {} recovery points to {}",
        enriched.records.len(),
        output_file.display()
    );
    if enriched.tag_failures > 0 {
        warn!(
            "{} recovery points exported without tags",
            enriched.tag_failures
        );
    }

    Ok(ExportSummary {
        output_file,
        exported: enriched.records.len(),
        tag_failures: enriched.tag_failures,
    })
}

/// Export a vault from AWS Backup in `region`. Returns the path of the written file.
pub fn export_vault(
    backup_vault_name: &str,
    region: &str,
    output_dir: impl AsRef<Path>,
) -> Result<PathBuf> {
    let service = AwsBackupService::connect(region).map_err(ExportError::Client)?;
    export_recovery_points(&service, backup_vault_name, output_dir.as_ref())
        .map(|summary| summary.output_file)
}

fn warn_duplicate_arns(records: &[RecoveryPointRecord]) {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.recovery_point_arn.as_str()) {
            warn!(
                "Recovery point {} listed more than once",
                record.recovery_point_arn
            );
        }
    }
}

/// Pretty-print `value` into `writer` with a 2-space indent, as in the export file.
pub fn write_json<W, T>(writer: W, value: &T) -> Result<()>
where
    W: std::io::Write,
    T: Serialize + ?Sized,
{
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"  ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    value.serialize(&mut serializer)?;
    Ok(())
}
