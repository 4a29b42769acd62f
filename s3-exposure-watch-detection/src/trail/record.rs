//! CloudTrail record envelope types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// `eventSource` value on records emitted by S3.
pub const S3_EVENT_SOURCE: &str = "s3.amazonaws.com";

const S3_OBJECT_RESOURCE_TYPE: &str = "AWS::S3::Object";

/// One audit record: a single logged API call.
///
/// Only the envelope fields this crate reads are modeled. `requestParameters`
/// and `responseElements` stay raw JSON until the event-specific decode in
/// [`crate::trail::change`] gives them shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailRecord {
    pub event_name: String,
    #[serde(default)]
    pub event_version: Option<String>,
    #[serde(default)]
    pub event_source: Option<String>,
    #[serde(default)]
    pub event_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub aws_region: Option<String>,
    #[serde(default)]
    pub user_identity: Option<UserIdentity>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub recipient_account_id: Option<String>,
    #[serde(default)]
    pub request_parameters: Option<serde_json::Value>,
    #[serde(default)]
    pub response_elements: Option<serde_json::Value>,
    #[serde(default)]
    pub resources: Vec<TrailResource>,
}

impl TrailRecord {
    /// Whether this record describes an S3 call with parameters attached.
    ///
    /// A record without an `eventSource` passes; only a source naming a
    /// different service rules the record out.
    pub fn is_s3_call(&self) -> bool {
        self.event_source
            .as_deref()
            .is_none_or(|source| source == S3_EVENT_SOURCE)
            && self.request_parameters.is_some()
    }

    /// Best available name for the calling principal.
    ///
    /// CloudTrail omits `userName` for root and for assumed-role sessions,
    /// so fall back through the identity ARN and type before giving up.
    pub fn actor(&self) -> String {
        let Some(identity) = &self.user_identity else {
            return "unknown".to_string();
        };
        identity
            .user_name
            .clone()
            .or_else(|| identity.arn.clone())
            .or_else(|| identity.identity_type.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// The account the record was delivered to, falling back to the caller's.
    pub fn account(&self) -> Option<String> {
        self.recipient_account_id.clone().or_else(|| {
            self.user_identity
                .as_ref()
                .and_then(|identity| identity.account_id.clone())
        })
    }

    /// The object ARN recorded under `resources`, if any.
    pub fn object_arn(&self) -> Option<&str> {
        self.resources
            .iter()
            .find(|resource| resource.resource_type.as_deref() == Some(S3_OBJECT_RESOURCE_TYPE))
            .and_then(|resource| resource.arn.as_deref())
    }
}

/// The principal that made the call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    #[serde(rename = "type", default)]
    pub identity_type: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub arn: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
}

/// One entry of a record's `resources` list.
#[derive(Debug, Clone, Deserialize)]
pub struct TrailResource {
    #[serde(rename = "type", default)]
    pub resource_type: Option<String>,
    #[serde(rename = "ARN", default)]
    pub arn: Option<String>,
}
