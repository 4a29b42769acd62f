//! Alert formatting and delivery.

pub mod format;
pub mod notifier;
