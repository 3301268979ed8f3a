//! Error types for the export pipeline.
//!
//! Only tag lookups are recovered locally (see `enricher`); every variant here is fatal
//! for the run that produced it.

use crate::backup::BackendError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Backup vault name must not be empty")]
    EmptyVaultName,

    #[error("Failed to list recovery points in vault '{vault}': {source}")]
    Listing {
        vault: String,
        #[source]
        source: BackendError,
    },

    #[error("Failed to connect to AWS Backup: {0}")]
    Client(#[source] BackendError),

    #[error("Cannot create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot serialize recovery points: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T, E = ExportError> = std::result::Result<T, E>;
