//! Backup module - Access to the backup service holding the recovery points.
//!
//! This module contains:
//! - BackupService trait for abstraction
//! - AWS Backup implementation (aws-sdk-backup)

pub mod aws;
pub mod service;

pub use aws::AwsBackupService;
pub use service::{BackendError, BackupService, RecoveryPointPage};
