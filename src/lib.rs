//! Backup Ledger Core Library
//!
//! Exports AWS Backup recovery points, together with their tags, to a local JSON file.
//!
//! Pipeline: List (paginated) -> Enrich (one tag lookup per recovery point) -> Persist (JSON)

pub mod backup;
pub mod config;
pub mod enricher;
pub mod error;
pub mod exporter;
pub mod lister;
pub mod record;

// Re-export main types
pub use backup::{AwsBackupService, BackendError, BackupService, RecoveryPointPage};
pub use config::Config;
pub use enricher::{
    enrich, fetch_recovery_points_with_progress, fetch_recovery_points_with_tags, fetch_tags,
    EnrichedRecoveryPoints, TagLookup,
};
pub use error::ExportError;
pub use exporter::{
    export_recovery_points, export_recovery_points_with_progress, export_vault,
    load_recovery_points, save_recovery_points_to_file, write_json, ExportSummary,
    OUTPUT_FILE_NAME,
};
pub use lister::list_all_recovery_points;
pub use record::{RecoveryPointRecord, RecoveryPointSummary};
