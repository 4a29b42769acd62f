//! Event-specific decoding of request parameters.
//!
//! CloudTrail logs request parameters as free-form JSON. Each recognized
//! event name gets an explicit decode into a typed [`AccessChange`], failing
//! closed into [`MalformedRecord`] on any shape mismatch so the grant
//! evaluator only ever sees well-formed input.

use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

use super::record::TrailRecord;

pub const PUT_BUCKET_ACL: &str = "PutBucketAcl";
pub const PUT_OBJECT_ACL: &str = "PutObjectAcl";
pub const PUT_BUCKET_POLICY: &str = "PutBucketPolicy";
pub const CREATE_BUCKET: &str = "CreateBucket";
pub const PUT_OBJECT: &str = "PutObject";

/// Group URI that stands for anyone on the internet.
pub const ALL_USERS_URI: &str = "http://acs.amazonaws.com/groups/global/AllUsers";
/// Group URI that stands for any authenticated AWS principal.
pub const AUTHENTICATED_USERS_URI: &str =
    "http://acs.amazonaws.com/groups/global/AuthenticatedUsers";

// Matched as suffixes so the scheme does not matter.
const PUBLIC_GROUP_SUFFIXES: [&str; 2] = ["/global/AllUsers", "/global/AuthenticatedUsers"];

/// Whether `event_name` is one of the access-control-mutating actions.
pub fn recognized_event(event_name: &str) -> bool {
    matches!(
        event_name,
        PUT_BUCKET_ACL | PUT_OBJECT_ACL | PUT_BUCKET_POLICY | CREATE_BUCKET | PUT_OBJECT
    )
}

/// A record that names a recognized event but does not have its shape.
///
/// Absorbed by the classifier (the record is skipped with a warning); never
/// propagated as an invocation error.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct MalformedRecord(String);

impl MalformedRecord {
    fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// The access-control mutation described by one recognized record.
#[derive(Debug, Clone)]
pub enum AccessChange {
    /// `PutBucketAcl` / `PutObjectAcl`: a full ACL replacement.
    Acl(AclChange),
    /// `PutBucketPolicy`: a bucket policy replacement.
    Policy(PolicyChange),
    /// `CreateBucket`: creation that may carry ACL shorthand or grant headers.
    CreateBucket(CreateBucketChange),
    /// `PutObject`: an upload, considered only for its canned ACL.
    PutObject(PutObjectChange),
}

impl AccessChange {
    /// Decode a record's request parameters for its event name.
    ///
    /// Returns `Ok(None)` when the event name is outside the recognized set,
    /// and `Err(MalformedRecord)` when it is recognized but the parameters do
    /// not decode to the event's shape.
    pub fn from_record(record: &TrailRecord) -> Result<Option<Self>, MalformedRecord> {
        if !recognized_event(&record.event_name) {
            return Ok(None);
        }
        let Some(params) = &record.request_parameters else {
            return Err(MalformedRecord::new(format!(
                "{} record has no request parameters",
                record.event_name
            )));
        };
        let change = match record.event_name.as_str() {
            PUT_BUCKET_ACL | PUT_OBJECT_ACL => Self::Acl(decode_acl(params)?),
            PUT_BUCKET_POLICY => Self::Policy(decode_policy(params)?),
            CREATE_BUCKET => Self::CreateBucket(decode_create_bucket(params)?),
            PUT_OBJECT => Self::PutObject(decode_put_object(params)?),
            _ => return Ok(None),
        };
        Ok(Some(change))
    }
}

/// A decoded `PutBucketAcl` / `PutObjectAcl` call.
#[derive(Debug, Clone)]
pub struct AclChange {
    pub bucket: String,
    /// Present for object ACL calls that logged their key.
    pub key: Option<String>,
    /// The explicit grant list, when the request carried one. `Some(vec![])`
    /// means an access control policy with no grants was supplied.
    pub grants: Option<Vec<AclGrant>>,
    /// Canned ACL header values, normalized to a list.
    pub canned: Vec<CannedAcl>,
}

/// A decoded `PutBucketPolicy` call.
#[derive(Debug, Clone)]
pub struct PolicyChange {
    pub bucket: String,
    pub policy: BucketPolicy,
}

/// A decoded `CreateBucket` call.
#[derive(Debug, Clone)]
pub struct CreateBucketChange {
    pub bucket: String,
    pub canned: Vec<CannedAcl>,
    pub grant_headers: GrantHeaders,
}

/// A decoded `PutObject` call.
#[derive(Debug, Clone)]
pub struct PutObjectChange {
    pub bucket: String,
    pub key: Option<String>,
    pub canned: Vec<CannedAcl>,
}

/// One grant within an explicit access control list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AclGrant {
    #[serde(default)]
    pub grantee: Option<AclGrantee>,
    #[serde(default)]
    pub permission: Option<AclPermission>,
}

/// The grantee side of an ACL grant.
#[derive(Debug, Clone, Deserialize)]
pub struct AclGrantee {
    #[serde(rename = "xsi:type", default)]
    pub grantee_type: Option<String>,
    #[serde(rename = "URI", default)]
    pub uri: Option<String>,
    #[serde(rename = "ID", default)]
    pub id: Option<String>,
    #[serde(rename = "EmailAddress", default)]
    pub email_address: Option<String>,
}

impl AclGrantee {
    /// Whether this grantee is one of the public group URIs.
    pub fn is_public_group(&self) -> bool {
        self.uri.as_deref().is_some_and(|uri| {
            PUBLIC_GROUP_SUFFIXES
                .iter()
                .any(|suffix| uri.ends_with(suffix))
        })
    }
}

/// Permission levels an ACL grant can carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AclPermission {
    Read,
    Write,
    ReadAcp,
    WriteAcp,
    FullControl,
    /// A permission string this crate does not recognize. A public grantee
    /// with an unrecognized permission still counts as public.
    Other(String),
}

impl AclPermission {
    /// Whether the permission lets the holder read data or configuration.
    pub fn grants_read(&self) -> bool {
        matches!(self, Self::Read | Self::ReadAcp | Self::FullControl)
    }

    /// Whether the permission lets the holder write data or configuration.
    pub fn grants_write(&self) -> bool {
        matches!(self, Self::Write | Self::WriteAcp | Self::FullControl)
    }
}

impl<'de> Deserialize<'de> for AclPermission {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(match value.as_str() {
            "READ" => Self::Read,
            "WRITE" => Self::Write,
            "READ_ACP" => Self::ReadAcp,
            "WRITE_ACP" => Self::WriteAcp,
            "FULL_CONTROL" => Self::FullControl,
            _ => Self::Other(value),
        })
    }
}

/// Canned ACL shorthands (the `x-amz-acl` request header).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CannedAcl {
    Private,
    PublicRead,
    PublicReadWrite,
    AuthenticatedRead,
    /// Any other canned value (bucket-owner presets, log-delivery-write, ...).
    Other(String),
}

impl CannedAcl {
    /// Whether applying this canned ACL opens read access to a public group.
    ///
    /// `authenticated-read` expands to a grant for the AuthenticatedUsers
    /// group, which is public for alerting purposes.
    pub fn grants_public_read(&self) -> bool {
        matches!(
            self,
            Self::PublicRead | Self::PublicReadWrite | Self::AuthenticatedRead
        )
    }

    /// Whether applying this canned ACL opens write access to a public group.
    pub fn grants_public_write(&self) -> bool {
        matches!(self, Self::PublicReadWrite)
    }

    /// The wire spelling of the canned value.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Private => "private",
            Self::PublicRead => "public-read",
            Self::PublicReadWrite => "public-read-write",
            Self::AuthenticatedRead => "authenticated-read",
            Self::Other(value) => value,
        }
    }
}

impl<'de> Deserialize<'de> for CannedAcl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(match value.as_str() {
            "private" => Self::Private,
            "public-read" => Self::PublicRead,
            "public-read-write" => Self::PublicReadWrite,
            "authenticated-read" => Self::AuthenticatedRead,
            _ => Self::Other(value),
        })
    }
}

/// The `x-amz-grant-*` headers CloudTrail logs under `accessControlList`.
///
/// Header values look like `uri="http://acs.amazonaws.com/groups/global/AllUsers"`,
/// possibly comma-separated, so matching is by containment rather than by
/// exact URI.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GrantHeaders {
    #[serde(rename = "x-amz-grant-read", default)]
    pub read: Option<String>,
    #[serde(rename = "x-amz-grant-read-acp", default)]
    pub read_acp: Option<String>,
    #[serde(rename = "x-amz-grant-write", default)]
    pub write: Option<String>,
    #[serde(rename = "x-amz-grant-write-acp", default)]
    pub write_acp: Option<String>,
}

impl GrantHeaders {
    /// Whether any of the four grant headers was present at all.
    pub fn any_present(&self) -> bool {
        self.read.is_some()
            || self.read_acp.is_some()
            || self.write.is_some()
            || self.write_acp.is_some()
    }

    /// Whether a read-class header names a public group.
    pub fn public_read(&self) -> bool {
        names_public_group(self.read.as_deref()) || names_public_group(self.read_acp.as_deref())
    }

    /// Whether a write-class header names a public group.
    pub fn public_write(&self) -> bool {
        names_public_group(self.write.as_deref()) || names_public_group(self.write_acp.as_deref())
    }
}

fn names_public_group(header: Option<&str>) -> bool {
    header.is_some_and(|value| {
        PUBLIC_GROUP_SUFFIXES
            .iter()
            .any(|suffix| value.contains(suffix))
    })
}

/// A bucket policy document.
#[derive(Debug, Clone, Deserialize)]
pub struct BucketPolicy {
    #[serde(rename = "Statement", deserialize_with = "one_or_many", default)]
    pub statement: Vec<PolicyStatement>,
}

/// One statement of a bucket policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    #[serde(default)]
    pub effect: Option<PolicyEffect>,
    #[serde(default)]
    pub principal: Option<PolicyPrincipal>,
    /// Operator name to condition-key/value map, e.g.
    /// `{"IpAddress": {"aws:SourceIp": "10.0.0.0/8"}}`.
    #[serde(default)]
    pub condition: Option<HashMap<String, HashMap<String, serde_json::Value>>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PolicyEffect {
    Allow,
    Deny,
}

/// The `Principal` element of a policy statement.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PolicyPrincipal {
    /// The bare form, `"Principal": "*"`.
    Literal(String),
    /// The keyed form, e.g. `{"AWS": "*"}` or `{"Service": [...]}`.
    Keyed(HashMap<String, PrincipalEntries>),
}

impl PolicyPrincipal {
    /// Whether this principal resolves to the wildcard.
    pub fn is_wildcard(&self) -> bool {
        match self {
            Self::Literal(value) => value == "*",
            Self::Keyed(map) => map.values().any(PrincipalEntries::contains_wildcard),
        }
    }
}

/// One or more principal identifiers under a principal key.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PrincipalEntries {
    One(String),
    Many(Vec<String>),
}

impl PrincipalEntries {
    fn contains_wildcard(&self) -> bool {
        match self {
            Self::One(value) => value == "*",
            Self::Many(values) => values.iter().any(|value| value == "*"),
        }
    }
}

/// Accept either a single value or a list, the way CloudTrail flattens
/// single-element XML sequences.
fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        One(T),
        Many(Vec<T>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AclParams {
    bucket_name: Option<String>,
    key: Option<String>,
    #[serde(rename = "AccessControlPolicy", default)]
    access_control_policy: Option<AccessControlPolicy>,
    #[serde(rename = "x-amz-acl", deserialize_with = "one_or_many", default)]
    canned: Vec<CannedAcl>,
}

#[derive(Debug, Clone, Deserialize)]
struct AccessControlPolicy {
    #[serde(rename = "AccessControlList", default)]
    access_control_list: Option<AccessControlList>,
}

#[derive(Debug, Clone, Deserialize)]
struct AccessControlList {
    #[serde(rename = "Grant", deserialize_with = "one_or_many", default)]
    grant: Vec<AclGrant>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PolicyParams {
    bucket_name: Option<String>,
    bucket_policy: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateBucketParams {
    bucket_name: Option<String>,
    #[serde(rename = "x-amz-acl", deserialize_with = "one_or_many", default)]
    canned: Vec<CannedAcl>,
    #[serde(rename = "accessControlList", default)]
    grant_headers: GrantHeaders,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PutObjectParams {
    bucket_name: Option<String>,
    key: Option<String>,
    #[serde(rename = "x-amz-acl", deserialize_with = "one_or_many", default)]
    canned: Vec<CannedAcl>,
}

fn decode_acl(params: &serde_json::Value) -> Result<AclChange, MalformedRecord> {
    let params: AclParams = serde_json::from_value(params.clone())
        .map_err(|e| MalformedRecord::new(format!("ACL parameters did not decode: {e}")))?;
    let bucket = params
        .bucket_name
        .ok_or_else(|| MalformedRecord::new("ACL record is missing bucketName"))?;
    let grants = params
        .access_control_policy
        .map(|policy| match policy.access_control_list {
            Some(list) => list.grant,
            None => Vec::new(),
        });
    Ok(AclChange {
        bucket,
        key: params.key,
        grants,
        canned: params.canned,
    })
}

fn decode_policy(params: &serde_json::Value) -> Result<PolicyChange, MalformedRecord> {
    let params: PolicyParams = serde_json::from_value(params.clone())
        .map_err(|e| MalformedRecord::new(format!("policy parameters did not decode: {e}")))?;
    let bucket = params
        .bucket_name
        .ok_or_else(|| MalformedRecord::new("PutBucketPolicy record is missing bucketName"))?;
    // Newer records log the policy as structured JSON, older ones as an
    // embedded JSON string.
    let policy = match params.bucket_policy {
        Some(serde_json::Value::String(text)) => serde_json::from_str(&text)
            .map_err(|e| MalformedRecord::new(format!("bucket policy text did not parse: {e}")))?,
        Some(value) => serde_json::from_value(value)
            .map_err(|e| MalformedRecord::new(format!("bucket policy did not decode: {e}")))?,
        None => {
            return Err(MalformedRecord::new(
                "PutBucketPolicy record is missing bucketPolicy",
            ))
        }
    };
    Ok(PolicyChange { bucket, policy })
}

fn decode_create_bucket(params: &serde_json::Value) -> Result<CreateBucketChange, MalformedRecord> {
    let params: CreateBucketParams = serde_json::from_value(params.clone())
        .map_err(|e| MalformedRecord::new(format!("CreateBucket parameters did not decode: {e}")))?;
    let bucket = params
        .bucket_name
        .ok_or_else(|| MalformedRecord::new("CreateBucket record is missing bucketName"))?;
    Ok(CreateBucketChange {
        bucket,
        canned: params.canned,
        grant_headers: params.grant_headers,
    })
}

fn decode_put_object(params: &serde_json::Value) -> Result<PutObjectChange, MalformedRecord> {
    let params: PutObjectParams = serde_json::from_value(params.clone())
        .map_err(|e| MalformedRecord::new(format!("PutObject parameters did not decode: {e}")))?;
    let bucket = params
        .bucket_name
        .ok_or_else(|| MalformedRecord::new("PutObject record is missing bucketName"))?;
    Ok(PutObjectChange {
        bucket,
        key: params.key,
        canned: params.canned,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_for(event_name: &str, params: serde_json::Value) -> TrailRecord {
        serde_json::from_value(json!({
            "eventName": event_name,
            "eventSource": "s3.amazonaws.com",
            "requestParameters": params
        }))
        .expect("record should decode")
    }

    #[test]
    fn test_unrecognized_event_decodes_to_none() {
        let record = record_for("GetBucketAcl", json!({"bucketName": "b"}));
        let change = AccessChange::from_record(&record).expect("should not be malformed");
        assert!(change.is_none());
    }

    #[test]
    fn test_recognized_event_without_parameters_is_malformed() {
        let record: TrailRecord =
            serde_json::from_value(json!({"eventName": "PutBucketAcl"})).expect("should decode");
        let result = AccessChange::from_record(&record);
        assert!(result.is_err());
    }

    #[test]
    fn test_put_bucket_acl_decodes_grant_list() {
        let record = record_for(
            PUT_BUCKET_ACL,
            json!({
                "bucketName": "my-bucket",
                "AccessControlPolicy": {
                    "AccessControlList": {
                        "Grant": [
                            {
                                "Grantee": {"xsi:type": "Group", "URI": ALL_USERS_URI},
                                "Permission": "READ"
                            },
                            {
                                "Grantee": {"xsi:type": "CanonicalUser", "ID": "abc123"},
                                "Permission": "FULL_CONTROL"
                            }
                        ]
                    }
                }
            }),
        );
        let change = AccessChange::from_record(&record)
            .expect("should decode")
            .expect("should be recognized");
        let AccessChange::Acl(acl) = change else {
            panic!("expected an ACL change");
        };
        assert_eq!(acl.bucket, "my-bucket");
        assert_eq!(acl.key, None);
        let grants = acl.grants.expect("grant list should be present");
        assert_eq!(grants.len(), 2);
        assert!(grants[0].grantee.as_ref().is_some_and(AclGrantee::is_public_group));
        assert!(!grants[1].grantee.as_ref().is_some_and(AclGrantee::is_public_group));
        assert_eq!(grants[0].permission, Some(AclPermission::Read));
    }

    #[test]
    fn test_single_grant_is_normalized_to_a_list() {
        // CloudTrail flattens single-element XML sequences to a bare object.
        let record = record_for(
            PUT_OBJECT_ACL,
            json!({
                "bucketName": "my-bucket",
                "key": "path/to/file.txt",
                "AccessControlPolicy": {
                    "AccessControlList": {
                        "Grant": {
                            "Grantee": {"xsi:type": "Group", "URI": AUTHENTICATED_USERS_URI},
                            "Permission": "WRITE"
                        }
                    }
                }
            }),
        );
        let change = AccessChange::from_record(&record)
            .expect("should decode")
            .expect("should be recognized");
        let AccessChange::Acl(acl) = change else {
            panic!("expected an ACL change");
        };
        assert_eq!(acl.key.as_deref(), Some("path/to/file.txt"));
        assert_eq!(acl.grants.map(|grants| grants.len()), Some(1));
    }

    #[test]
    fn test_put_bucket_acl_missing_bucket_name_is_malformed() {
        let record = record_for(PUT_BUCKET_ACL, json!({"x-amz-acl": ["public-read"]}));
        assert!(AccessChange::from_record(&record).is_err());
    }

    #[test]
    fn test_canned_header_accepts_scalar_and_list() {
        let scalar = record_for(
            PUT_OBJECT,
            json!({"bucketName": "b", "key": "k", "x-amz-acl": "public-read"}),
        );
        let AccessChange::PutObject(change) = AccessChange::from_record(&scalar)
            .expect("should decode")
            .expect("should be recognized")
        else {
            panic!("expected a PutObject change");
        };
        assert_eq!(change.canned, vec![CannedAcl::PublicRead]);

        let list = record_for(
            PUT_OBJECT,
            json!({"bucketName": "b", "key": "k", "x-amz-acl": ["private", "bucket-owner-read"]}),
        );
        let AccessChange::PutObject(change) = AccessChange::from_record(&list)
            .expect("should decode")
            .expect("should be recognized")
        else {
            panic!("expected a PutObject change");
        };
        assert_eq!(
            change.canned,
            vec![
                CannedAcl::Private,
                CannedAcl::Other("bucket-owner-read".to_string())
            ]
        );
    }

    #[test]
    fn test_put_bucket_policy_decodes_structured_document() {
        let record = record_for(
            PUT_BUCKET_POLICY,
            json!({
                "bucketName": "my-bucket",
                "bucketPolicy": {
                    "Version": "2012-10-17",
                    "Statement": [{
                        "Effect": "Allow",
                        "Principal": "*",
                        "Action": "s3:GetObject",
                        "Resource": "arn:aws:s3:::my-bucket/*"
                    }]
                }
            }),
        );
        let AccessChange::Policy(change) = AccessChange::from_record(&record)
            .expect("should decode")
            .expect("should be recognized")
        else {
            panic!("expected a policy change");
        };
        assert_eq!(change.policy.statement.len(), 1);
        assert_eq!(change.policy.statement[0].effect, Some(PolicyEffect::Allow));
        assert!(change.policy.statement[0]
            .principal
            .as_ref()
            .is_some_and(PolicyPrincipal::is_wildcard));
    }

    #[test]
    fn test_put_bucket_policy_decodes_embedded_string_document() {
        let text = r#"{"Statement": {"Effect": "Allow", "Principal": {"AWS": "*"}}}"#;
        let record = record_for(
            PUT_BUCKET_POLICY,
            json!({"bucketName": "my-bucket", "bucketPolicy": text}),
        );
        let AccessChange::Policy(change) = AccessChange::from_record(&record)
            .expect("should decode")
            .expect("should be recognized")
        else {
            panic!("expected a policy change");
        };
        // One-or-many also applies to the Statement element itself.
        assert_eq!(change.policy.statement.len(), 1);
        assert!(change.policy.statement[0]
            .principal
            .as_ref()
            .is_some_and(PolicyPrincipal::is_wildcard));
    }

    #[test]
    fn test_unparseable_policy_text_is_malformed() {
        let record = record_for(
            PUT_BUCKET_POLICY,
            json!({"bucketName": "my-bucket", "bucketPolicy": "{not json"}),
        );
        assert!(AccessChange::from_record(&record).is_err());
    }

    #[test]
    fn test_principal_wildcard_forms() {
        let literal: PolicyPrincipal = serde_json::from_value(json!("*")).expect("should decode");
        assert!(literal.is_wildcard());

        let keyed: PolicyPrincipal =
            serde_json::from_value(json!({"AWS": "*"})).expect("should decode");
        assert!(keyed.is_wildcard());

        let keyed_list: PolicyPrincipal =
            serde_json::from_value(json!({"AWS": ["arn:aws:iam::123456789012:root", "*"]}))
                .expect("should decode");
        assert!(keyed_list.is_wildcard());

        let specific: PolicyPrincipal =
            serde_json::from_value(json!({"AWS": "arn:aws:iam::123456789012:root"}))
                .expect("should decode");
        assert!(!specific.is_wildcard());

        let service: PolicyPrincipal =
            serde_json::from_value(json!({"Service": "cloudtrail.amazonaws.com"}))
                .expect("should decode");
        assert!(!service.is_wildcard());
    }

    #[test]
    fn test_create_bucket_decodes_grant_headers() {
        let record = record_for(
            CREATE_BUCKET,
            json!({
                "bucketName": "my-bucket",
                "accessControlList": {
                    "x-amz-grant-read": format!("uri=\"{ALL_USERS_URI}\""),
                    "x-amz-grant-write": "id=\"abc123\""
                }
            }),
        );
        let AccessChange::CreateBucket(change) = AccessChange::from_record(&record)
            .expect("should decode")
            .expect("should be recognized")
        else {
            panic!("expected a CreateBucket change");
        };
        assert!(change.grant_headers.any_present());
        assert!(change.grant_headers.public_read());
        assert!(!change.grant_headers.public_write());
        assert!(change.canned.is_empty());
    }

    #[test]
    fn test_grantee_uri_suffix_matching() {
        let https: AclGrantee = serde_json::from_value(json!({
            "xsi:type": "Group",
            "URI": "https://acs.amazonaws.com/groups/global/AllUsers"
        }))
        .expect("should decode");
        assert!(https.is_public_group());

        let log_delivery: AclGrantee = serde_json::from_value(json!({
            "xsi:type": "Group",
            "URI": "http://acs.amazonaws.com/groups/s3/LogDelivery"
        }))
        .expect("should decode");
        assert!(!log_delivery.is_public_group());

        let canonical: AclGrantee =
            serde_json::from_value(json!({"xsi:type": "CanonicalUser", "ID": "abc123"}))
                .expect("should decode");
        assert!(!canonical.is_public_group());
    }

    #[test]
    fn test_unknown_permission_decodes_to_other() {
        let grant: AclGrant = serde_json::from_value(json!({
            "Grantee": {"xsi:type": "Group", "URI": ALL_USERS_URI},
            "Permission": "SOMETHING_NEW"
        }))
        .expect("should decode");
        let permission = grant.permission.expect("permission should be present");
        assert_eq!(permission, AclPermission::Other("SOMETHING_NEW".to_string()));
        assert!(!permission.grants_read());
        assert!(!permission.grants_write());
    }
}
