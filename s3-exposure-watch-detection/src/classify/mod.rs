//! Classification: deciding whether one API call grants public access.

mod evaluator;
mod router;

pub use evaluator::classify;
pub use router::route;
