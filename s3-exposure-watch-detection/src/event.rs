//! The S3 event notification that triggers an invocation.

use percent_encoding::percent_decode_str;
use serde::Deserialize;

use crate::error::{ExposureWatchError, ExposureWatchResult};

/// One log object referenced by the trigger event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub bucket: String,
    pub key: String,
}

impl ObjectRef {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

/// An S3 event notification payload (the `Records` array form).
#[derive(Debug, Clone, Deserialize)]
pub struct S3EventNotification {
    #[serde(rename = "Records", default)]
    records: Vec<S3EventRecord>,
}

#[derive(Debug, Clone, Deserialize)]
struct S3EventRecord {
    s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize)]
struct S3Entity {
    bucket: S3BucketRef,
    object: S3ObjectRef,
}

#[derive(Debug, Clone, Deserialize)]
struct S3BucketRef {
    name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct S3ObjectRef {
    key: String,
}

impl S3EventNotification {
    /// Decode a notification from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `ExposureWatchError::Event` when the text is not a
    /// notification payload.
    pub fn from_json(text: &str) -> ExposureWatchResult<Self> {
        serde_json::from_str(text).map_err(|e| {
            ExposureWatchError::event(format!("event notification did not decode: {e}"))
        })
    }

    /// The log objects this event references, keys URL-decoded, in order.
    ///
    /// # Errors
    ///
    /// Returns `ExposureWatchError::Event` when the event references no
    /// objects, or when a key does not decode to UTF-8.
    pub fn objects(&self) -> ExposureWatchResult<Vec<ObjectRef>> {
        if self.records.is_empty() {
            return Err(ExposureWatchError::event("event references no S3 objects"));
        }
        self.records
            .iter()
            .map(|record| {
                Ok(ObjectRef {
                    bucket: record.s3.bucket.name.clone(),
                    key: decode_key(&record.s3.object.key)?,
                })
            })
            .collect()
    }
}

/// Notification payloads URL-encode object keys and use `+` for spaces.
fn decode_key(raw: &str) -> ExposureWatchResult<String> {
    let unplused = raw.replace('+', " ");
    percent_decode_str(&unplused)
        .decode_utf8()
        .map(|decoded| decoded.to_string())
        .map_err(|e| ExposureWatchError::event(format!("object key is not valid UTF-8: {e}")))
}
