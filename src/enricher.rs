//! Tag enricher - Attach tags to each listed recovery point.
//!
//! Tag lookups are best effort: a failed lookup is logged and exported as an empty tag
//! map, the recovery point itself is always kept.

use crate::backup::BackupService;
use crate::error::Result;
use crate::lister::list_all_recovery_points;
use crate::record::{format_timestamp, RecoveryPointRecord, RecoveryPointSummary};
use std::collections::BTreeMap;
use tracing::warn;

/// Outcome of a single tag lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum TagLookup {
    Found(BTreeMap<String, String>),
    Failed { reason: String },
}

impl TagLookup {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Tags to export, empty for a failed lookup.
    pub fn into_tags(self) -> BTreeMap<String, String> {
        match self {
            Self::Found(tags) => tags,
            Self::Failed { .. } => BTreeMap::new(),
        }
    }
}

/// Fetch the tags of one recovery point (one backend call).
pub fn fetch_tags<S>(service: &S, recovery_point_arn: &str) -> TagLookup
where
    S: BackupService + ?Sized,
{
    match service.list_tags(recovery_point_arn) {
        Ok(tags) => TagLookup::Found(tags.into_iter().collect()),
        Err(e) => {
            warn!("Error getting tags for {}: {}", recovery_point_arn, e);
            TagLookup::Failed {
                reason: e.to_string(),
            }
        }
    }
}

/// Assemble the exported record from a listing item and its tag lookup.
pub fn enrich(summary: RecoveryPointSummary, tags: TagLookup) -> RecoveryPointRecord {
    RecoveryPointRecord {
        recovery_point_arn: summary.recovery_point_arn,
        backup_vault_name: summary.backup_vault_name,
        resource_arn: summary.resource_arn,
        resource_type: summary.resource_type,
        creation_date: summary.creation_date.as_ref().map(format_timestamp),
        completion_date: summary.completion_date.as_ref().map(format_timestamp),
        status: summary.status,
        backup_size_bytes: summary.backup_size_in_bytes,
        tags: tags.into_tags(),
    }
}

/// Enriched recovery points plus the number of tag lookups that fell back to `{}`.
#[derive(Debug, Clone, Default)]
pub struct EnrichedRecoveryPoints {
    pub records: Vec<RecoveryPointRecord>,
    pub tag_failures: usize,
}

/// List a vault and attach tags to every recovery point, sequentially.
pub fn fetch_recovery_points_with_tags<S>(
    service: &S,
    backup_vault_name: &str,
) -> Result<Vec<RecoveryPointRecord>>
where
    S: BackupService + ?Sized,
{
    fetch_recovery_points_with_progress(service, backup_vault_name, |_, _| {})
        .map(|enriched| enriched.records)
}

/// Same as [`fetch_recovery_points_with_tags`], calling `on_progress(done, total)` after
/// each record.
pub fn fetch_recovery_points_with_progress<S, F>(
    service: &S,
    backup_vault_name: &str,
    mut on_progress: F,
) -> Result<EnrichedRecoveryPoints>
where
    S: BackupService + ?Sized,
    F: FnMut(usize, usize),
{
    let recovery_points = list_all_recovery_points(service, backup_vault_name)?;
    let total = recovery_points.len();

    let mut enriched = EnrichedRecoveryPoints {
        records: Vec::with_capacity(total),
        tag_failures: 0,
    };

    for (i, summary) in recovery_points.into_iter().enumerate() {
        let lookup = fetch_tags(service, &summary.recovery_point_arn);
        if lookup.is_failed() {
            enriched.tag_failures += 1;
        }
        enriched.records.push(enrich(summary, lookup));
        on_progress(i + 1, total);
    }

    Ok(enriched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::{BackendError, RecoveryPointPage};
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;

    struct SinglePageService {
        points: Vec<RecoveryPointSummary>,
        tags: HashMap<String, HashMap<String, String>>,
    }

    impl BackupService for SinglePageService {
        fn name(&self) -> &'static str {
            "single-page"
        }

        fn list_recovery_points(
            &self,
            _vault_name: &str,
            _next_token: Option<&str>,
        ) -> std::result::Result<RecoveryPointPage, BackendError> {
            Ok(RecoveryPointPage {
                recovery_points: self.points.clone(),
                next_token: None,
            })
        }

        fn list_tags(
            &self,
            resource_arn: &str,
        ) -> std::result::Result<HashMap<String, String>, BackendError> {
            self.tags
                .get(resource_arn)
                .cloned()
                .ok_or_else(|| BackendError::new("ListTags", "AccessDeniedException"))
        }
    }

    #[test]
    fn test_enrich_formats_timestamps() {
        let mut summary = RecoveryPointSummary::new("arn:rp1");
        summary.creation_date = Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
        summary.backup_size_in_bytes = Some(42);

        let record = enrich(summary, TagLookup::Found(BTreeMap::new()));
        assert_eq!(
            record.creation_date.as_deref(),
            Some("2024-01-02T03:04:05+00:00")
        );
        assert_eq!(record.completion_date, None);
        assert_eq!(record.backup_size_bytes, Some(42));
    }

    #[test]
    fn test_failed_lookup_becomes_empty_tags() {
        let record = enrich(
            RecoveryPointSummary::new("arn:rp1"),
            TagLookup::Failed {
                reason: "boom".to_string(),
            },
        );
        assert!(record.tags.is_empty());
        assert_eq!(record.recovery_point_arn, "arn:rp1");
    }

    #[test]
    fn test_tag_failure_keeps_record() {
        let service = SinglePageService {
            points: vec![
                RecoveryPointSummary::new("arn:rp1"),
                RecoveryPointSummary::new("arn:rp2"),
            ],
            tags: HashMap::from([(
                "arn:rp1".to_string(),
                HashMap::from([("Environment".to_string(), "Production".to_string())]),
            )]),
        };

        let mut progress = Vec::new();
        let enriched =
            fetch_recovery_points_with_progress(&service, "test-vault", |done, total| {
                progress.push((done, total))
            })
            .unwrap();

        assert_eq!(enriched.records.len(), 2);
        assert_eq!(enriched.tag_failures, 1);
        assert_eq!(enriched.records[0].tags["Environment"], "Production");
        assert_eq!(enriched.records[1].recovery_point_arn, "arn:rp2");
        assert!(enriched.records[1].tags.is_empty());
        assert_eq!(progress, vec![(1, 2), (2, 2)]);
    }

    #[test]
    fn test_fetch_tags_reports_reason() {
        let service = SinglePageService {
            points: vec![],
            tags: HashMap::new(),
        };
        match fetch_tags(&service, "arn:missing") {
            TagLookup::Failed { reason } => assert!(reason.contains("AccessDeniedException")),
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
