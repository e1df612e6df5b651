//! Structured logging for the order bot.
//!
//! JSON events land in a rolling log file; console output adapts to
//! the environment.

pub mod error;
pub mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
