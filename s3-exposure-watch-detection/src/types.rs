//! Verdict and report types shared across the crate.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::alert::format::AlertMessage;

/// Whether a verdict concerns a bucket as a whole or a single object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Bucket,
    Object,
}

/// How the API call reached AWS, derived from the record's user agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccessOrigin {
    Console,
    Lambda,
    Api,
}

impl AccessOrigin {
    /// Derive the origin from a CloudTrail `userAgent` value.
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        match user_agent {
            Some("signin.amazonaws.com" | "console.amazonaws.com") => Self::Console,
            Some("lambda.amazonaws.com") => Self::Lambda,
            _ => Self::Api,
        }
    }
}

impl fmt::Display for AccessOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Console => "Console",
            Self::Lambda => "Lambda",
            Self::Api => "API",
        };
        write!(f, "{label}")
    }
}

/// The grant mechanism behind a public verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mechanism", rename_all = "snake_case")]
pub enum Exposure {
    /// Explicit grants to a public group, from an ACL grant list or the
    /// `x-amz-grant-*` request headers.
    AclGrant { read: bool, write: bool },
    /// A canned ACL shorthand carried on the request.
    CannedAcl {
        acl: String,
        read: bool,
        write: bool,
    },
    /// An Allow statement for the wildcard principal in a bucket policy.
    PolicyWildcard,
}

impl Exposure {
    /// Wording for the opened access classes, when they are known.
    ///
    /// A public grant with an unrecognized permission value still alerts but
    /// carries no class wording; a policy wildcard opens whatever actions the
    /// statement lists, which this crate does not inspect.
    pub fn operations(&self) -> Option<&'static str> {
        match self {
            Self::AclGrant { read, write } | Self::CannedAcl { read, write, .. } => {
                match (read, write) {
                    (true, true) => Some("READ and WRITE"),
                    (false, true) => Some("WRITE"),
                    (true, false) => Some("READ"),
                    (false, false) => None,
                }
            }
            Self::PolicyWildcard => None,
        }
    }

    /// One-line description of the mechanism for alert bodies.
    pub fn describe(&self) -> String {
        match self {
            Self::AclGrant { .. } => "explicit ACL grant to a public group".to_string(),
            Self::CannedAcl { acl, .. } => format!("canned ACL \"{acl}\""),
            Self::PolicyWildcard => {
                "bucket policy statement allowing the wildcard principal".to_string()
            }
        }
    }
}

/// The classification result for one audit record.
///
/// Built by the grant evaluator, filtered by the router, consumed once by
/// the alert formatter. `exposure` is `Some` exactly when `is_public` is
/// true.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExposureVerdict {
    pub is_public: bool,
    pub kind: ResourceKind,
    pub bucket: String,
    pub object_key: Option<String>,
    pub account: Option<String>,
    pub region: Option<String>,
    pub actor: String,
    pub origin: AccessOrigin,
    pub event_name: String,
    pub event_time: Option<DateTime<Utc>>,
    pub exposure: Option<Exposure>,
}

/// One public verdict with its formatted alert, as produced by a dry scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub verdict: ExposureVerdict,
    pub alert: AlertMessage,
}

/// Outcome of scanning one decoded log without publishing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    /// Entries present in the log's `Records` array, skipped ones included.
    pub records_seen: usize,
    /// Entries skipped because they did not decode.
    pub records_skipped: usize,
    /// One finding per public verdict, in record order.
    pub findings: Vec<Finding>,
}

/// Outcome of one full process invocation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessSummary {
    pub objects_processed: usize,
    pub records_seen: usize,
    pub records_skipped: usize,
    pub alerts_published: usize,
}
