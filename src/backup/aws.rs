use crate::backup::service::{BackendError, BackupService, RecoveryPointPage};
use crate::record::RecoveryPointSummary;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_backup::error::DisplayErrorContext;
use aws_sdk_backup::primitives::DateTime as AwsDateTime;
use aws_sdk_backup::types::RecoveryPointByBackupVault;
use aws_sdk_backup::Client;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::runtime::Runtime;
use tracing::{debug, info};

const LIST_RECOVERY_POINTS: &str = "ListRecoveryPointsByBackupVault";
const LIST_TAGS: &str = "ListTags";

/// AWS Backup provider.
/// Wraps the async SDK client behind blocking calls on a current-thread runtime.
pub struct AwsBackupService {
    client: Client,
    runtime: Runtime,
}

impl AwsBackupService {
    /// Build a client from the ambient credential chain for `region`.
    pub fn connect(region: &str) -> Result<Self, BackendError> {
        Self::connect_with_endpoint(region, None)
    }

    /// Build a client, optionally pointing at a custom endpoint (LocalStack, VPC endpoint).
    pub fn connect_with_endpoint(
        region: &str,
        endpoint_url: Option<&str>,
    ) -> Result<Self, BackendError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| BackendError::new("Connect", format!("Cannot start runtime: {}", e)))?;

        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_string()));
        if let Some(endpoint) = endpoint_url {
            info!("[AwsBackup] Using custom endpoint {}", endpoint);
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = runtime.block_on(loader.load());
        let client = Client::new(&sdk_config);

        Ok(Self { client, runtime })
    }
}

impl BackupService for AwsBackupService {
    fn name(&self) -> &'static str {
        "aws-backup"
    }

    fn list_recovery_points(
        &self,
        vault_name: &str,
        next_token: Option<&str>,
    ) -> Result<RecoveryPointPage, BackendError> {
        let output = self
            .runtime
            .block_on(
                self.client
                    .list_recovery_points_by_backup_vault()
                    .backup_vault_name(vault_name)
                    .set_next_token(next_token.map(str::to_string))
                    .send(),
            )
            .map_err(|e| {
                BackendError::new(LIST_RECOVERY_POINTS, DisplayErrorContext(&e).to_string())
            })?;

        let recovery_points = output
            .recovery_points()
            .iter()
            .map(summary_from_sdk)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RecoveryPointPage {
            recovery_points,
            next_token: output.next_token().map(str::to_string),
        })
    }

    fn list_tags(&self, resource_arn: &str) -> Result<HashMap<String, String>, BackendError> {
        let mut tags = HashMap::new();
        let mut next_token: Option<String> = None;

        // ListTags is paginated too, although a single page covers the 50-tag limit
        loop {
            let output = self
                .runtime
                .block_on(
                    self.client
                        .list_tags()
                        .resource_arn(resource_arn)
                        .set_next_token(next_token.take())
                        .send(),
                )
                .map_err(|e| BackendError::new(LIST_TAGS, DisplayErrorContext(&e).to_string()))?;

            if let Some(page) = output.tags() {
                tags.extend(page.iter().map(|(k, v)| (k.clone(), v.clone())));
            }

            match output.next_token() {
                Some(token) if !token.is_empty() => {
                    debug!("[AwsBackup] More tags for {}", resource_arn);
                    next_token = Some(token.to_string());
                }
                _ => break,
            }
        }

        Ok(tags)
    }
}

/// Convert an SDK listing item into a summary. Items without an ARN are rejected.
fn summary_from_sdk(
    item: &RecoveryPointByBackupVault,
) -> Result<RecoveryPointSummary, BackendError> {
    let arn = item
        .recovery_point_arn()
        .filter(|arn| !arn.is_empty())
        .ok_or_else(|| {
            BackendError::new(
                LIST_RECOVERY_POINTS,
                format!(
                    "Recovery point without ARN (resource {})",
                    item.resource_arn().unwrap_or("unknown")
                ),
            )
        })?;

    Ok(RecoveryPointSummary {
        recovery_point_arn: arn.to_string(),
        backup_vault_name: item.backup_vault_name().map(str::to_string),
        resource_arn: item.resource_arn().map(str::to_string),
        resource_type: item.resource_type().map(str::to_string),
        creation_date: item.creation_date().and_then(to_chrono),
        completion_date: item.completion_date().and_then(to_chrono),
        status: item.status().map(|s| s.as_str().to_string()),
        backup_size_in_bytes: item.backup_size_in_bytes(),
    })
}

fn to_chrono(ts: &AwsDateTime) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts.secs(), ts.subsec_nanos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_backup::types::RecoveryPointStatus;

    #[test]
    fn test_summary_from_sdk() {
        let item = RecoveryPointByBackupVault::builder()
            .recovery_point_arn("arn:aws:backup:us-east-1:123456789012:recovery-point:rp1")
            .backup_vault_name("test-vault")
            .resource_arn("arn:aws:ec2:us-east-1:123456789012:instance/i-123456")
            .resource_type("EC2")
            .creation_date(AwsDateTime::from_secs(1_704_067_200))
            .status(RecoveryPointStatus::Completed)
            .backup_size_in_bytes(1_024_000)
            .build();

        let summary = summary_from_sdk(&item).unwrap();
        assert_eq!(summary.resource_type.as_deref(), Some("EC2"));
        assert_eq!(summary.status.as_deref(), Some("COMPLETED"));
        assert_eq!(summary.backup_size_in_bytes, Some(1_024_000));
        assert_eq!(
            summary.creation_date.map(|d| d.to_rfc3339()).as_deref(),
            Some("2024-01-01T00:00:00+00:00")
        );
        assert!(summary.completion_date.is_none());
    }

    #[test]
    fn test_summary_without_arn_is_rejected() {
        let item = RecoveryPointByBackupVault::builder()
            .resource_arn("arn:aws:rds:us-east-1:123456789012:db:mydb")
            .build();

        let err = summary_from_sdk(&item).unwrap_err();
        assert_eq!(err.operation, LIST_RECOVERY_POINTS);
        assert!(err.message.contains("db:mydb"));
    }
}
