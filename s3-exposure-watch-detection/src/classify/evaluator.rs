//! Grant evaluation: does one API call's grant set include a public principal?

use log::{debug, warn};

use crate::trail::change::{
    AccessChange, AclChange, BucketPolicy, CannedAcl, CreateBucketChange, PolicyEffect,
    PolicyStatement, PutObjectChange,
};
use crate::trail::record::TrailRecord;
use crate::types::{AccessOrigin, Exposure, ExposureVerdict, ResourceKind};

/// Condition keys that narrow a wildcard statement to a specific caller or
/// network, matched case-insensitively. A condition on any other key
/// (`aws:SecureTransport`, `s3:prefix`, ...) does not make a wildcard
/// statement private.
const NARROWING_CONDITION_KEYS: [&str; 9] = [
    "aws:sourceip",
    "aws:sourcearn",
    "aws:sourceaccount",
    "aws:sourcevpc",
    "aws:sourcevpce",
    "aws:principalarn",
    "aws:principalaccount",
    "aws:principalorgid",
    "aws:userid",
];

enum Evaluation {
    /// No ACL or policy material to judge.
    NotApplicable,
    /// Judged, and no public principal found.
    Private,
    Public(Exposure),
}

/// Classify one audit record.
///
/// Returns `None` for records outside the recognized action set, for
/// recognized records carrying no ACL or policy material, and for records
/// whose parameters do not decode (logged and skipped). A returned verdict
/// may still be private; the router filters on `is_public`.
///
/// Classification is a pure function of the record: identical input yields
/// an identical verdict.
pub fn classify(record: &TrailRecord) -> Option<ExposureVerdict> {
    let change = match AccessChange::from_record(record) {
        Ok(Some(change)) => change,
        Ok(None) => return None,
        Err(malformed) => {
            warn!("skipping {} record: {malformed}", record.event_name);
            return None;
        }
    };

    let (bucket, key, evaluation) = match &change {
        AccessChange::Acl(acl) => (acl.bucket.clone(), acl.key.clone(), evaluate_acl(acl)),
        AccessChange::Policy(policy) => (
            policy.bucket.clone(),
            None,
            evaluate_policy(&policy.policy),
        ),
        AccessChange::CreateBucket(create) => {
            (create.bucket.clone(), None, evaluate_create_bucket(create))
        }
        AccessChange::PutObject(put) => {
            (put.bucket.clone(), put.key.clone(), evaluate_put_object(put))
        }
    };

    let (is_public, exposure) = match evaluation {
        Evaluation::NotApplicable => {
            debug!(
                "{} on {bucket} carries no access-control material",
                record.event_name
            );
            return None;
        }
        Evaluation::Private => (false, None),
        Evaluation::Public(exposure) => (true, Some(exposure)),
    };

    let key = key.or_else(|| object_key_from_arn(record.object_arn(), &bucket));
    let kind = if key.is_some() {
        ResourceKind::Object
    } else {
        ResourceKind::Bucket
    };

    Some(ExposureVerdict {
        is_public,
        kind,
        bucket,
        object_key: key,
        account: record.account(),
        region: record.aws_region.clone(),
        actor: record.actor(),
        origin: AccessOrigin::from_user_agent(record.user_agent.as_deref()),
        event_name: record.event_name.clone(),
        event_time: record.event_time,
        exposure,
    })
}

/// An explicit grant list wins over the canned shorthand; the shorthand is
/// only consulted when no grant list was supplied at all.
fn evaluate_acl(change: &AclChange) -> Evaluation {
    if let Some(grants) = &change.grants {
        let mut public = false;
        let mut read = false;
        let mut write = false;
        for grant in grants {
            let Some(grantee) = &grant.grantee else {
                continue;
            };
            if !grantee.is_public_group() {
                continue;
            }
            public = true;
            if let Some(permission) = &grant.permission {
                read |= permission.grants_read();
                write |= permission.grants_write();
            }
        }
        if public {
            Evaluation::Public(Exposure::AclGrant { read, write })
        } else {
            Evaluation::Private
        }
    } else if change.canned.is_empty() {
        Evaluation::NotApplicable
    } else {
        evaluate_canned(&change.canned)
    }
}

fn evaluate_canned(canned: &[CannedAcl]) -> Evaluation {
    let mut first_public: Option<&CannedAcl> = None;
    let mut read = false;
    let mut write = false;
    for acl in canned {
        let public = acl.grants_public_read() || acl.grants_public_write();
        if public && first_public.is_none() {
            first_public = Some(acl);
        }
        read |= acl.grants_public_read();
        write |= acl.grants_public_write();
    }
    match first_public {
        Some(acl) => Evaluation::Public(Exposure::CannedAcl {
            acl: acl.as_str().to_string(),
            read,
            write,
        }),
        None => Evaluation::Private,
    }
}

fn evaluate_policy(policy: &BucketPolicy) -> Evaluation {
    if policy.statement.iter().any(statement_is_public) {
        Evaluation::Public(Exposure::PolicyWildcard)
    } else {
        Evaluation::Private
    }
}

fn statement_is_public(statement: &PolicyStatement) -> bool {
    if statement.effect != Some(PolicyEffect::Allow) {
        return false;
    }
    let Some(principal) = &statement.principal else {
        return false;
    };
    if !principal.is_wildcard() {
        return false;
    }
    match &statement.condition {
        Some(condition) => !condition
            .values()
            .flat_map(|keys| keys.keys())
            .any(|key| NARROWING_CONDITION_KEYS.contains(&key.to_ascii_lowercase().as_str())),
        None => true,
    }
}

fn evaluate_create_bucket(change: &CreateBucketChange) -> Evaluation {
    if change.canned.is_empty() && !change.grant_headers.any_present() {
        return Evaluation::NotApplicable;
    }
    let header_read = change.grant_headers.public_read();
    let header_write = change.grant_headers.public_write();
    if header_read || header_write {
        let read = header_read || change.canned.iter().any(CannedAcl::grants_public_read);
        let write = header_write || change.canned.iter().any(CannedAcl::grants_public_write);
        Evaluation::Public(Exposure::AclGrant { read, write })
    } else {
        evaluate_canned(&change.canned)
    }
}

/// Ordinary uploads never alert; only a canned ACL on the request counts.
fn evaluate_put_object(change: &PutObjectChange) -> Evaluation {
    if change.canned.is_empty() {
        return Evaluation::NotApplicable;
    }
    evaluate_canned(&change.canned)
}

fn object_key_from_arn(arn: Option<&str>, bucket: &str) -> Option<String> {
    let suffix = arn?.strip_prefix("arn:aws:s3:::")?;
    let (arn_bucket, key) = suffix.split_once('/')?;
    if arn_bucket == bucket && !key.is_empty() {
        Some(key.to_string())
    } else {
        None
    }
}
