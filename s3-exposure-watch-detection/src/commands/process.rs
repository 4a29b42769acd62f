//! Processing a log delivery end to end.

use log::{info, warn};

use crate::alert::format::format_alert;
use crate::alert::notifier::Notifier;
use crate::classify::route;
use crate::error::ExposureWatchResult;
use crate::event::{ObjectRef, S3EventNotification};
use crate::trail::decode_log;
use crate::types::{ExposureVerdict, ProcessSummary};

impl super::service::ExposureWatchService {
    /// Process one trigger event: fetch each referenced log object, classify
    /// its records, and publish one alert per public verdict.
    ///
    /// Publishing stops at the first delivery failure; alerts already
    /// published stay published, and the error propagates so the platform's
    /// redelivery accounting applies.
    pub async fn process(&self, event: &S3EventNotification) -> ExposureWatchResult<ProcessSummary> {
        let objects = event.objects()?;
        self.process_objects(&objects).await
    }

    /// Process specific log objects, bypassing the event envelope.
    pub async fn process_objects(
        &self,
        objects: &[ObjectRef],
    ) -> ExposureWatchResult<ProcessSummary> {
        let mut summary = ProcessSummary::default();
        for object in objects {
            info!("processing log object s3://{}/{}", object.bucket, object.key);
            let bytes = self.log_source.fetch(&object.bucket, &object.key).await?;
            let log = decode_log(&bytes)?;
            if log.skipped > 0 {
                warn!(
                    "skipped {} malformed records in s3://{}/{}",
                    log.skipped, object.bucket, object.key
                );
            }
            summary.records_seen += log.records_seen();
            summary.records_skipped += log.skipped;
            summary.alerts_published +=
                publish_alerts(self.notifier.as_ref(), route(&log.records)).await?;
            summary.objects_processed += 1;
        }
        info!(
            "processed {} objects, {} records, {} alerts",
            summary.objects_processed, summary.records_seen, summary.alerts_published
        );
        Ok(summary)
    }
}

/// Publish one alert per verdict, in order, stopping at the first delivery
/// failure. Returns how many alerts went out.
pub async fn publish_alerts<I>(notifier: &dyn Notifier, verdicts: I) -> ExposureWatchResult<usize>
where
    I: IntoIterator<Item = ExposureVerdict>,
{
    let mut published = 0;
    for verdict in verdicts {
        let alert = format_alert(&verdict);
        notifier.publish(&alert).await?;
        published += 1;
    }
    Ok(published)
}
