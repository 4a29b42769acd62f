//! S3 Exposure Watch service layer.
//!
//! The service holds the AWS collaborators and provides the high-level
//! operations (process, scan) used by adapters such as the CLI.

use crate::alert::notifier::Notifier;
use crate::aws::s3::TrailLogSource;
use crate::aws::sns::SnsNotifier;
use crate::config::WatchConfig;
use crate::error::ExposureWatchResult;

/// Main service struct holding the log source and the alert channel.
pub struct ExposureWatchService {
    pub(crate) log_source: TrailLogSource,
    pub(crate) notifier: Box<dyn Notifier>,
}

impl ExposureWatchService {
    /// Create a service wired to real AWS clients, reading the topic ARN
    /// from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ExposureWatchError::Config` when the topic ARN is not
    /// configured.
    pub async fn new() -> ExposureWatchResult<Self> {
        let config = WatchConfig::from_env()?;
        Self::with_config(config).await
    }

    /// Create a service wired to real AWS clients with explicit configuration.
    ///
    /// AWS configuration is loaded through the default credential provider
    /// chain.
    pub async fn with_config(config: WatchConfig) -> ExposureWatchResult<Self> {
        let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;

        let s3_client = aws_sdk_s3::Client::new(&aws_config);
        let sns_client = aws_sdk_sns::Client::new(&aws_config);

        Ok(Self {
            log_source: TrailLogSource::new(s3_client),
            notifier: Box::new(SnsNotifier::new(sns_client, &config)),
        })
    }

    // process() implementation is in process.rs
}
