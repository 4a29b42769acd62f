//! AWS SDK integration: S3 log retrieval and SNS publication.

pub(crate) mod s3;
pub mod sns;
