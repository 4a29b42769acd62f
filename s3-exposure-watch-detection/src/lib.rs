//! This crate provides the core business logic for S3 Exposure Watch:
//! - CloudTrail log decoding (gzipped delivery files)
//! - Public-exposure classification of access-control API calls
//! - Alert formatting and SNS publication

pub mod alert;
mod aws;
mod classify;
mod commands;
mod config;
mod error;
mod event;
pub mod trail;
mod types;

// Re-exports for a small, focused public API
pub use alert::format::{format_alert, AlertMessage, REMEDIATION_HINT, SUBJECT_PREFIX};
pub use alert::notifier::Notifier;
pub use aws::sns::SnsNotifier;
pub use classify::{classify, route};
pub use commands::{publish_alerts, scan_log, ExposureWatchService};
pub use config::{WatchConfig, TOPIC_ARN_ENV};
pub use error::{ExposureWatchError, ExposureWatchResult};
pub use event::{ObjectRef, S3EventNotification};
pub use trail::{decode_log, TrailLog};
pub use types::{
    AccessOrigin, Exposure, ExposureVerdict, Finding, ProcessSummary, ResourceKind, ScanReport,
};
