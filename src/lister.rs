//! Lister - Walk every page of a vault listing.

use crate::backup::BackupService;
use crate::error::{ExportError, Result};
use crate::record::RecoveryPointSummary;
use tracing::debug;

/// List all recovery points stored in a backup vault, following continuation tokens.
///
/// Stops exactly when a page comes back without a token (an empty token counts as none).
/// There is no page cap: a backend that keeps returning tokens keeps this loop running.
/// Any failed page aborts the listing, nothing is returned for the pages already read.
pub fn list_all_recovery_points<S>(
    service: &S,
    backup_vault_name: &str,
) -> Result<Vec<RecoveryPointSummary>>
where
    S: BackupService + ?Sized,
{
    if backup_vault_name.is_empty() {
        return Err(ExportError::EmptyVaultName);
    }

    let mut recovery_points = Vec::new();
    let mut next_token: Option<String> = None;
    let mut page_index = 0usize;

    loop {
        let page = service
            .list_recovery_points(backup_vault_name, next_token.as_deref())
            .map_err(|source| ExportError::Listing {
                vault: backup_vault_name.to_string(),
                source,
            })?;

        page_index += 1;
        debug!(
            "[{}] Page {} of '{}': {} recovery points",
            service.name(),
            page_index,
            backup_vault_name,
            page.recovery_points.len()
        );

        recovery_points.extend(page.recovery_points);

        match page.next_token {
            Some(token) if !token.is_empty() => next_token = Some(token),
            _ => break,
        }
    }

    Ok(recovery_points)
}
