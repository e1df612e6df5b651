//! Retry policy and failure classification.

use std::time::Duration;

use crate::error::TransportError;

/// Exchange error code for a request timestamp outside the server's
/// receive window.
pub const CLOCK_SKEW_CODE: i64 = -1021;

/// How the executor should handle a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Server-side or connectivity trouble, worth retrying after backoff.
    RetryableServer,
    /// Request timestamp drifted outside the receive window. Resync the
    /// clock, then retry after backoff.
    RetryableClockSkew,
    /// The exchange rejected the request; retrying cannot succeed.
    NonRetryable,
}

impl ErrorClass {
    #[must_use]
    pub fn is_retryable(self) -> bool {
        !matches!(self, Self::NonRetryable)
    }
}

/// Classify a transport failure.
///
/// 5xx and 429 responses are server trouble. Code -1021 is clock skew.
/// Any other exchange-reported error is a client mistake and surfaces
/// immediately. Connectivity and decode failures count as server
/// trouble since the request may never have reached the matcher.
#[must_use]
pub fn classify(error: &TransportError) -> ErrorClass {
    match error {
        TransportError::Api { code, .. } if *code == CLOCK_SKEW_CODE => {
            ErrorClass::RetryableClockSkew
        }
        TransportError::Api { status, .. } if *status >= 500 || *status == 429 => {
            ErrorClass::RetryableServer
        }
        TransportError::Api { .. } => ErrorClass::NonRetryable,
        TransportError::Http(_) | TransportError::Parse(_) => ErrorClass::RetryableServer,
        TransportError::Signature(_) => ErrorClass::NonRetryable,
    }
}

/// Retry budget and backoff timing for exchange calls.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts per logical operation, including the first.
    pub max_attempts: u32,
    /// Delay before the second attempt; later delays double.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Backoff after failed attempt `attempt` (1-indexed):
    /// attempt=1 -> base, attempt=2 -> 2*base, attempt=3 -> 4*base.
    #[must_use]
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        // Cap the exponent to keep the shift in range.
        let exponent = attempt.saturating_sub(1).min(10);
        self.base_delay.saturating_mul(1u32 << exponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16, code: i64) -> TransportError {
        TransportError::Api {
            status,
            code,
            message: "test".to_string(),
        }
    }

    #[test]
    fn server_errors_are_retryable() {
        assert_eq!(classify(&api(500, -1000)), ErrorClass::RetryableServer);
        assert_eq!(classify(&api(503, -1001)), ErrorClass::RetryableServer);
        assert_eq!(classify(&api(429, -1003)), ErrorClass::RetryableServer);
    }

    #[test]
    fn client_errors_are_not_retryable() {
        assert_eq!(classify(&api(400, -2019)), ErrorClass::NonRetryable);
        assert_eq!(classify(&api(404, -1121)), ErrorClass::NonRetryable);
        assert!(!classify(&api(400, -2019)).is_retryable());
    }

    #[test]
    fn clock_skew_is_its_own_class() {
        let class = classify(&api(400, CLOCK_SKEW_CODE));
        assert_eq!(class, ErrorClass::RetryableClockSkew);
        assert!(class.is_retryable());
    }

    #[test]
    fn connectivity_and_decode_failures_are_retryable() {
        let http = TransportError::Http("timed out".to_string());
        let parse = TransportError::Parse("bad json".to_string());
        assert_eq!(classify(&http), ErrorClass::RetryableServer);
        assert_eq!(classify(&parse), ErrorClass::RetryableServer);
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_delay(1), Duration::from_secs(1));
        assert_eq!(policy.backoff_delay(2), Duration::from_secs(2));
        assert_eq!(policy.backoff_delay(3), Duration::from_secs(4));
    }

    #[test]
    fn backoff_exponent_is_capped() {
        let policy = RetryPolicy::new(100, Duration::from_millis(10));
        assert_eq!(policy.backoff_delay(11), policy.backoff_delay(64));
    }

    #[test]
    fn default_policy_matches_config_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay, Duration::from_secs(1));
    }
}
