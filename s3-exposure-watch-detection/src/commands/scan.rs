//! Offline scanning of a log file, no publication.

use crate::alert::format::format_alert;
use crate::classify::route;
use crate::error::ExposureWatchResult;
use crate::trail::decode_log;
use crate::types::{Finding, ScanReport};

/// Decode and classify a log delivery without publishing anything.
///
/// The report carries one finding per public verdict, in record order.
///
/// # Errors
///
/// Returns `ExposureWatchError::MalformedLog` when the bytes do not decode.
pub fn scan_log(bytes: &[u8]) -> ExposureWatchResult<ScanReport> {
    let log = decode_log(bytes)?;
    let findings = route(&log.records)
        .map(|verdict| {
            let alert = format_alert(&verdict);
            Finding { verdict, alert }
        })
        .collect();
    Ok(ScanReport {
        records_seen: log.records_seen(),
        records_skipped: log.skipped,
        findings,
    })
}
