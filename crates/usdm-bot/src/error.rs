//! Application-level error type.

use thiserror::Error;

/// Failures outside the order taxonomy: startup, wiring, and terminal IO.
///
/// Order placement itself reports through [`usdm_core::OrderError`]; this
/// type only covers what happens before the pipeline takes over.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Config(String),

    #[error("Transport setup failed: {0}")]
    Transport(#[from] usdm_client::TransportError),

    #[error("Telemetry setup failed: {0}")]
    Telemetry(#[from] usdm_telemetry::TelemetryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
