//! Error taxonomy shared across the order-submission stack.
//!
//! Every component reports failures through [`OrderError`] so callers can
//! pattern-match on kind: fix the input (`Validation`), fix the numeric
//! precision (`Precision`), read the exchange's rejection (`Api`), or
//! treat it as connectivity trouble (`Network`).

use thiserror::Error;

/// Failure kinds surfaced by validation, normalization, and submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Input or business-rule violation. Detected before any network
    /// call; never retried.
    #[error("{0}")]
    Validation(String),

    /// Numeric rounding or step-multiple violation. Never retried;
    /// distinct from `Validation` so callers can tell "fix your input"
    /// apart from "fix your precision".
    #[error("{0}")]
    Precision(String),

    /// The exchange explicitly rejected a well-formed request (4xx).
    /// Carries the exchange error code and message verbatim.
    #[error("Exchange refused order: {message} (Code {code})")]
    Api { code: i64, message: String },

    /// Transport failure, or a retryable failure that exhausted its
    /// retry budget.
    #[error("{0}")]
    Network(String),
}

/// Result type alias for order operations.
pub type Result<T> = std::result::Result<T, OrderError>;
