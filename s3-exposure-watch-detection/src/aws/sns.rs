//! SNS publication.

use async_trait::async_trait;
use aws_sdk_sns::Client as SnsClient;
use log::info;

use crate::alert::format::AlertMessage;
use crate::alert::notifier::Notifier;
use crate::config::WatchConfig;
use crate::error::{ExposureWatchError, ExposureWatchResult};

/// [`Notifier`] that publishes to the configured SNS topic.
pub struct SnsNotifier {
    client: SnsClient,
    topic_arn: String,
}

impl SnsNotifier {
    /// Create a notifier bound to the configured topic.
    pub fn new(client: SnsClient, config: &WatchConfig) -> Self {
        Self {
            client,
            topic_arn: config.topic_arn.clone(),
        }
    }
}

#[async_trait]
impl Notifier for SnsNotifier {
    async fn publish(&self, alert: &AlertMessage) -> ExposureWatchResult<()> {
        self.client
            .publish()
            .topic_arn(&self.topic_arn)
            .subject(&alert.subject)
            .message(&alert.body)
            .send()
            .await
            .map_err(|e| {
                ExposureWatchError::delivery(format!(
                    "failed to publish to {}: {e:?}",
                    self.topic_arn
                ))
            })?;
        info!("published alert to {}: {}", self.topic_arn, alert.subject);
        Ok(())
    }
}
