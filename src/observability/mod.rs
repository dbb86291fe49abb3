//! Observability for the suggestion subsystem.
//!
//! Structured logging setup plus counters for queries, pre-filter checks and
//! catalog loads.

pub mod logging;
pub mod metrics;

pub use logging::init_tracing;
pub use metrics::{MetricsTracker, Timer};
