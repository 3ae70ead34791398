//! Core types: state snapshot, tracing setup

pub mod snapshot;
pub mod tracing;

pub use snapshot::StateSnapshot;
pub use tracing::{init_tracing, TracingConfig, TracingError, TracingOutputFormat};
