//! Alert formatting.
//!
//! Formatting is pure and total: it never fails for a well-formed verdict.

use serde::Serialize;

use crate::trail::change::{CREATE_BUCKET, PUT_OBJECT};
use crate::types::{Exposure, ExposureVerdict};

/// Fixed subject prefix for every alert.
pub const SUBJECT_PREFIX: &str = "Public S3 access detected";

/// Fixed remediation guidance appended to every alert body.
pub const REMEDIATION_HINT: &str =
    "Review the resource's ACL and bucket policy and revoke public access unless it is intended.";

// SNS rejects subjects longer than 100 characters.
const MAX_SUBJECT_LEN: usize = 100;

/// A formatted alert ready for publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertMessage {
    pub subject: String,
    pub body: String,
}

/// Format one public verdict into a subject and body.
pub fn format_alert(verdict: &ExposureVerdict) -> AlertMessage {
    AlertMessage {
        subject: subject(verdict),
        body: body(verdict),
    }
}

fn subject(verdict: &ExposureVerdict) -> String {
    let mut subject = match &verdict.object_key {
        Some(key) => format!("{SUBJECT_PREFIX}: {}/{key}", verdict.bucket),
        None => format!("{SUBJECT_PREFIX}: {}", verdict.bucket),
    };
    if subject.len() > MAX_SUBJECT_LEN {
        let mut end = MAX_SUBJECT_LEN;
        while !subject.is_char_boundary(end) {
            end -= 1;
        }
        subject.truncate(end);
    }
    subject
}

fn body(verdict: &ExposureVerdict) -> String {
    let verb = if matches!(verdict.event_name.as_str(), CREATE_BUCKET | PUT_OBJECT) {
        "created"
    } else {
        "changed"
    };
    let target = match &verdict.object_key {
        Some(key) => format!("object {key} at bucket {}", verdict.bucket),
        None => format!("bucket {}", verdict.bucket),
    };
    let access = match verdict.exposure.as_ref().and_then(Exposure::operations) {
        Some(operations) => format!("{operations} public access"),
        None => "public access".to_string(),
    };

    let mut body = format!(
        "User {} via {} call has just {verb} {target} with {access}.\n\n",
        verdict.actor, verdict.origin
    );
    body.push_str(&format!("Bucket: {}\n", verdict.bucket));
    if let Some(key) = &verdict.object_key {
        body.push_str(&format!("Object key: {key}\n"));
    }
    if let Some(account) = &verdict.account {
        body.push_str(&format!("Account: {account}\n"));
    }
    if let Some(region) = &verdict.region {
        body.push_str(&format!("Region: {region}\n"));
    }
    body.push_str(&format!("API call: {}\n", verdict.event_name));
    if let Some(time) = verdict.event_time {
        body.push_str(&format!("Event time: {}\n", time.to_rfc3339()));
    }
    if let Some(exposure) = &verdict.exposure {
        body.push_str(&format!("Exposure: {}\n", exposure.describe()));
    }
    body.push('\n');
    body.push_str(REMEDIATION_HINT);
    body
}
