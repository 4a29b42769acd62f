//! Commands module - service layer for S3 Exposure Watch operations

mod process;
mod scan;
pub(crate) mod service;

pub use process::publish_alerts;
pub use scan::scan_log;
pub use service::ExposureWatchService;
