//! Error types for S3 Exposure Watch operations.
//!
//! Per-record malformation has no variant here: a record that fails to
//! decode is skipped by the classifier, never surfaced as an error.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExposureWatchError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("event error: {0}")]
    Event(String),
    #[error("retrieval error: {0}")]
    Retrieval(String),
    #[error("malformed log: {0}")]
    MalformedLog(String),
    #[error("delivery error: {0}")]
    Delivery(String),
}

impl ExposureWatchError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn event(msg: impl Into<String>) -> Self {
        Self::Event(msg.into())
    }

    pub fn retrieval(msg: impl Into<String>) -> Self {
        Self::Retrieval(msg.into())
    }

    pub fn malformed_log(msg: impl Into<String>) -> Self {
        Self::MalformedLog(msg.into())
    }

    pub fn delivery(msg: impl Into<String>) -> Self {
        Self::Delivery(msg.into())
    }
}

pub type ExposureWatchResult<T> = Result<T, ExposureWatchError>;
