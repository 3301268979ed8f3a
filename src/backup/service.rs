//! BackupService trait - Abstraction for the backup backend.
//!
//! The lister and the enricher only talk to this trait, so the AWS client can be swapped
//! for an in-process fake in tests.

use crate::record::RecoveryPointSummary;
use std::collections::HashMap;
use thiserror::Error;

/// One page of a vault listing.
#[derive(Debug, Clone, Default)]
pub struct RecoveryPointPage {
    /// Items in backend order
    pub recovery_points: Vec<RecoveryPointSummary>,
    /// Continuation token, None (or empty) on the last page
    pub next_token: Option<String>,
}

/// Error reported by a backend call.
#[derive(Debug, Clone, Error)]
#[error("{operation} failed: {message}")]
pub struct BackendError {
    /// Backend operation name (ListRecoveryPointsByBackupVault, ListTags, ...)
    pub operation: &'static str,
    pub message: String,
}

impl BackendError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

/// Trait for backup backends.
///
/// Calls are blocking and authenticated out of band.
pub trait BackupService {
    /// Backend name (aws-backup, ...)
    fn name(&self) -> &'static str;

    /// Fetch one page of recovery points stored in `vault_name`.
    /// `next_token` is None for the first page.
    fn list_recovery_points(
        &self,
        vault_name: &str,
        next_token: Option<&str>,
    ) -> Result<RecoveryPointPage, BackendError>;

    /// Fetch every tag attached to a resource.
    fn list_tags(&self, resource_arn: &str) -> Result<HashMap<String, String>, BackendError>;
}
