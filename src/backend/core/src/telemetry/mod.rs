//! Telemetry: structured logging and metric definitions.
//!
//! # Example
//!
//! ```rust,no_run
//! use mailvault_core::telemetry::{init_logging, LoggingConfig};
//!
//! init_logging(&LoggingConfig::default()).expect("Failed to initialize logging");
//! ```

pub mod logging;
pub mod metrics;

pub use logging::{build_filter, init_logging, LogFormat, LogWriter, LoggingConfig};
pub use metrics::describe_metrics;
