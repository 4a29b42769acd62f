//! Runtime configuration.

use crate::error::{ExposureWatchError, ExposureWatchResult};

/// Environment variable naming the SNS topic that receives alerts.
pub const TOPIC_ARN_ENV: &str = "SNS_TOPIC_ARN";

/// Configuration for one watch invocation.
///
/// The only configuration surface is the destination topic. It is resolved
/// once and passed in explicitly so tests can substitute their own channel.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// ARN of the SNS topic that receives exposure alerts.
    pub topic_arn: String,
}

impl WatchConfig {
    /// Build a configuration with an explicit topic ARN.
    pub fn new(topic_arn: impl Into<String>) -> Self {
        Self {
            topic_arn: topic_arn.into(),
        }
    }

    /// Read the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ExposureWatchError::Config` if `SNS_TOPIC_ARN` is unset or blank.
    pub fn from_env() -> ExposureWatchResult<Self> {
        let topic_arn = std::env::var(TOPIC_ARN_ENV)
            .map_err(|_| ExposureWatchError::config(format!("{TOPIC_ARN_ENV} is not set")))?;
        if topic_arn.trim().is_empty() {
            return Err(ExposureWatchError::config(format!(
                "{TOPIC_ARN_ENV} is empty"
            )));
        }
        Ok(Self { topic_arn })
    }
}
