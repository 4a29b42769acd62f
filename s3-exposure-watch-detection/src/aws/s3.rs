//! S3 access: fetching delivered log objects.

use aws_sdk_s3::Client as S3Client;

use crate::error::{ExposureWatchError, ExposureWatchResult};

/// Thin wrapper over the S3 client for reading log deliveries.
pub(crate) struct TrailLogSource {
    client: S3Client,
}

impl TrailLogSource {
    pub(crate) fn new(client: S3Client) -> Self {
        Self { client }
    }

    /// Fetch the raw bytes of one delivered log object.
    pub(crate) async fn fetch(&self, bucket: &str, key: &str) -> ExposureWatchResult<Vec<u8>> {
        let object = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                ExposureWatchError::retrieval(format!("failed to get s3://{bucket}/{key}: {e:?}"))
            })?;
        let body = object.body.collect().await.map_err(|e| {
            ExposureWatchError::retrieval(format!("failed to read s3://{bucket}/{key}: {e:?}"))
        })?;
        Ok(body.to_vec())
    }
}
