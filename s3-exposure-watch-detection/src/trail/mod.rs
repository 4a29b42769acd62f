//! CloudTrail log decoding.
//!
//! One delivery is one gzipped JSON file holding a `Records` array. Decoding
//! is lenient at the record level: an entry that does not decode is logged
//! and skipped, never allowed to sink the rest of the batch.

pub mod change;
pub mod record;

use crate::error::{ExposureWatchError, ExposureWatchResult};
use flate2::read::GzDecoder;
use log::warn;
use serde::Deserialize;
use std::io::Read;

use self::record::TrailRecord;

/// A decoded log delivery.
#[derive(Debug, Clone)]
pub struct TrailLog {
    /// Records that decoded cleanly, in file order.
    pub records: Vec<TrailRecord>,
    /// Entries skipped because they did not decode.
    pub skipped: usize,
}

impl TrailLog {
    /// Entries present in the file, skipped ones included.
    pub fn records_seen(&self) -> usize {
        self.records.len() + self.skipped
    }
}

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Decode one log delivery, gunzipping first when the bytes are gzip.
///
/// A JSON file without a `Records` key decodes to an empty batch; CloudTrail
/// writes digest files next to log files and those must not fail the run.
///
/// # Errors
///
/// Returns `ExposureWatchError::MalformedLog` when the bytes do not
/// decompress or are not a JSON document at all.
pub fn decode_log(bytes: &[u8]) -> ExposureWatchResult<TrailLog> {
    let text = decompress(bytes)?;

    #[derive(Deserialize)]
    struct Envelope {
        #[serde(rename = "Records", default)]
        records: Option<Vec<serde_json::Value>>,
    }

    let envelope: Envelope = serde_json::from_str(&text)
        .map_err(|e| ExposureWatchError::malformed_log(format!("log file is not valid JSON: {e}")))?;

    let Some(raw_records) = envelope.records else {
        return Ok(TrailLog {
            records: Vec::new(),
            skipped: 0,
        });
    };

    let mut records = Vec::with_capacity(raw_records.len());
    let mut skipped = 0;
    for (index, raw) in raw_records.into_iter().enumerate() {
        match serde_json::from_value::<TrailRecord>(raw) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("skipping record {index}: {e}");
                skipped += 1;
            }
        }
    }

    Ok(TrailLog { records, skipped })
}

fn decompress(bytes: &[u8]) -> ExposureWatchResult<String> {
    if bytes.starts_with(&GZIP_MAGIC) {
        let mut text = String::new();
        GzDecoder::new(bytes)
            .read_to_string(&mut text)
            .map_err(|e| {
                ExposureWatchError::malformed_log(format!("gzip stream did not decompress: {e}"))
            })?;
        Ok(text)
    } else {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| ExposureWatchError::malformed_log(format!("log bytes are not UTF-8: {e}")))
    }
}
