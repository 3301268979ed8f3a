//! Recovery point records - raw listing items and the enriched export format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A recovery point as returned by the vault listing, before tag enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveryPointSummary {
    /// Recovery point ARN (always present, a listing item without one is rejected)
    pub recovery_point_arn: String,
    pub backup_vault_name: Option<String>,
    /// ARN of the protected resource
    pub resource_arn: Option<String>,
    /// Resource type as reported by AWS Backup (EC2, RDS, EFS, ...)
    pub resource_type: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    /// None while the backup job is still running
    pub completion_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub backup_size_in_bytes: Option<i64>,
}

impl RecoveryPointSummary {
    /// Summary with only an ARN set.
    pub fn new(recovery_point_arn: impl Into<String>) -> Self {
        Self {
            recovery_point_arn: recovery_point_arn.into(),
            backup_vault_name: None,
            resource_arn: None,
            resource_type: None,
            creation_date: None,
            completion_date: None,
            status: None,
            backup_size_in_bytes: None,
        }
    }
}

/// One entry of `recovery_points.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryPointRecord {
    pub recovery_point_arn: String,
    pub backup_vault_name: Option<String>,
    pub resource_arn: Option<String>,
    pub resource_type: Option<String>,
    /// RFC 3339 with explicit offset
    pub creation_date: Option<String>,
    pub completion_date: Option<String>,
    pub status: Option<String>,
    pub backup_size_bytes: Option<i64>,
    /// Tag key -> value, empty when the lookup failed
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

/// Normalize a backend timestamp for the export file.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp_keeps_offset() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_record_field_names() {
        let record = RecoveryPointRecord {
            recovery_point_arn: "arn:aws:backup:us-east-1:123456789012:recovery-point:rp1"
                .to_string(),
            backup_vault_name: Some("test-vault".to_string()),
            resource_arn: Some("arn:aws:ec2:us-east-1:123456789012:instance/i-123456".to_string()),
            resource_type: Some("EC2".to_string()),
            creation_date: Some("2024-01-01T00:00:00+00:00".to_string()),
            completion_date: None,
            status: Some("COMPLETED".to_string()),
            backup_size_bytes: Some(1_024_000),
            tags: BTreeMap::from([("Environment".to_string(), "Production".to_string())]),
        };

        let value = serde_json::to_value(&record).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "recovery_point_arn",
            "backup_vault_name",
            "resource_arn",
            "resource_type",
            "creation_date",
            "completion_date",
            "status",
            "backup_size_bytes",
            "tags",
        ] {
            assert!(obj.contains_key(key), "missing field {}", key);
        }
        assert_eq!(obj.len(), 9);
        assert!(obj["completion_date"].is_null());
        assert_eq!(obj["tags"]["Environment"], "Production");
    }

    #[test]
    fn test_missing_tags_deserialize_as_empty() {
        let json = r#"{"recovery_point_arn": "arn:rp1", "backup_vault_name": null,
            "resource_arn": null, "resource_type": null, "creation_date": null,
            "completion_date": null, "status": null, "backup_size_bytes": null}"#;
        let record: RecoveryPointRecord = serde_json::from_str(json).unwrap();
        assert!(record.tags.is_empty());
    }
}
