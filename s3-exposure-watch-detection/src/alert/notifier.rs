//! Notification delivery seam.

use async_trait::async_trait;

use crate::alert::format::AlertMessage;
use crate::error::ExposureWatchResult;

/// Delivery channel for formatted alerts.
///
/// The service publishes through this trait so tests can record alerts
/// instead of calling SNS.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Publish one alert.
    ///
    /// # Errors
    ///
    /// Returns `ExposureWatchError::Delivery` when the channel rejects the
    /// publish. No local retry is attempted; redelivery is the invoking
    /// platform's concern.
    async fn publish(&self, alert: &AlertMessage) -> ExposureWatchResult<()>;
}
