//! Transport-level error types.
//!
//! These describe what went wrong on the wire, before any retry decision
//! is made. The executor classifies them and maps whatever survives the
//! retry budget into the public [`usdm_core::OrderError`] taxonomy.

use thiserror::Error;

/// A failure raised by the exchange transport.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The exchange answered the request with an error body.
    #[error("API error {code} (HTTP {status}): {message}")]
    Api {
        /// HTTP status of the response.
        status: u16,
        /// Exchange error code, e.g. -1021 for a stale timestamp.
        code: i64,
        /// Exchange error message, verbatim.
        message: String,
    },

    /// The request never produced a response: timeout, DNS, reset, TLS.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The response body could not be decoded.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Request signing failed before anything was sent.
    #[error("Failed to sign request: {0}")]
    Signature(String),
}

pub type TransportResult<T> = std::result::Result<T, TransportError>;
