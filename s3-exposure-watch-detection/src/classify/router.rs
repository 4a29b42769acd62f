//! Record routing: one pass over a batch, public verdicts out.

use super::evaluator::classify;
use crate::trail::record::TrailRecord;
use crate::types::ExposureVerdict;

/// Route a decoded batch through classification.
///
/// Lazy, single-pass, and order-preserving: verdicts come out in the order
/// their source records appear, public verdicts only. No deduplication
/// happens here; two records exposing the same bucket yield two verdicts.
pub fn route<'a, I>(records: I) -> impl Iterator<Item = ExposureVerdict> + 'a
where
    I: IntoIterator<Item = &'a TrailRecord> + 'a,
{
    records
        .into_iter()
        .filter(|record| record.is_s3_call())
        .filter_map(classify)
        .filter(|verdict| verdict.is_public)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trail::change::ALL_USERS_URI;
    use serde_json::json;

    fn sample_records() -> Vec<TrailRecord> {
        let records = json!([
            {
                "eventName": "PutBucketAcl",
                "eventSource": "s3.amazonaws.com",
                "requestParameters": {
                    "bucketName": "first-bucket",
                    "AccessControlPolicy": {"AccessControlList": {"Grant": [{
                        "Grantee": {"xsi:type": "Group", "URI": ALL_USERS_URI},
                        "Permission": "READ"
                    }]}}
                }
            },
            {
                "eventName": "GetObject",
                "eventSource": "s3.amazonaws.com",
                "requestParameters": {"bucketName": "first-bucket", "key": "k"}
            },
            {
                "eventName": "PutBucketAcl",
                "eventSource": "s3.amazonaws.com",
                "requestParameters": {
                    "bucketName": "second-bucket",
                    "AccessControlPolicy": {"AccessControlList": {"Grant": [{
                        "Grantee": {"xsi:type": "CanonicalUser", "ID": "abc123"},
                        "Permission": "FULL_CONTROL"
                    }]}}
                }
            },
            {
                "eventName": "PutObject",
                "eventSource": "s3.amazonaws.com",
                "requestParameters": {
                    "bucketName": "third-bucket",
                    "key": "site/index.html",
                    "x-amz-acl": "public-read"
                }
            }
        ]);
        serde_json::from_value(records).expect("records should decode")
    }

    #[test]
    fn test_route_yields_public_verdicts_in_record_order() {
        let records = sample_records();
        let verdicts: Vec<_> = route(&records).collect();
        assert_eq!(verdicts.len(), 2);
        assert_eq!(verdicts[0].bucket, "first-bucket");
        assert_eq!(verdicts[1].bucket, "third-bucket");
        assert!(verdicts.iter().all(|verdict| verdict.is_public));
    }

    #[test]
    fn test_route_skips_records_from_other_services() {
        let records: Vec<TrailRecord> = serde_json::from_value(json!([{
            "eventName": "PutBucketAcl",
            "eventSource": "iam.amazonaws.com",
            "requestParameters": {
                "bucketName": "not-really-s3",
                "x-amz-acl": "public-read"
            }
        }]))
        .expect("records should decode");
        assert_eq!(route(&records).count(), 0);
    }

    #[test]
    fn test_route_does_not_deduplicate_within_a_batch() {
        let one = json!({
            "eventName": "PutBucketAcl",
            "eventSource": "s3.amazonaws.com",
            "requestParameters": {
                "bucketName": "same-bucket",
                "x-amz-acl": "public-read"
            }
        });
        let records: Vec<TrailRecord> =
            serde_json::from_value(json!([one.clone(), one])).expect("records should decode");
        let verdicts: Vec<_> = route(&records).collect();
        assert_eq!(verdicts.len(), 2);
        assert_eq!(verdicts[0].bucket, verdicts[1].bucket);
    }

    #[test]
    fn test_route_is_lazy() {
        let records = sample_records();
        let mut iterator = route(&records);
        // Pulling one verdict must not require consuming the whole batch.
        let first = iterator.next().expect("one verdict expected");
        assert_eq!(first.bucket, "first-bucket");
        drop(iterator);
    }
}
