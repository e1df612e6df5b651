//! Resilient execution of exchange calls.
//!
//! Wraps each logical operation with classification-aware retry and
//! exponential backoff, then maps whatever survives the budget into the
//! public [`OrderError`] taxonomy. Metadata fetches always surface as
//! `Network`; order submissions keep the exchange's own code and
//! message when the exchange rejected them.

use tokio::time::sleep;
use tracing::{debug, error, info, warn};
use usdm_core::{NormalizedOrder, OrderError};

use crate::error::{TransportError, TransportResult};
use crate::retry::{classify, ErrorClass, RetryPolicy};
use crate::transport::{BoxFuture, DynTransport, ExchangeTransport};
use crate::wire::{ExchangeInfo, OrderAck};

/// Runs exchange operations under a [`RetryPolicy`].
pub struct ResilientExecutor {
    transport: DynTransport,
    policy: RetryPolicy,
}

impl ResilientExecutor {
    #[must_use]
    pub fn new(transport: DynTransport, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// Fetch the full exchange metadata.
    ///
    /// Every failure surfaces as `Network`: the caller asked for
    /// metadata and got none, regardless of what broke underneath.
    pub async fn fetch_exchange_info(&self) -> Result<ExchangeInfo, OrderError> {
        debug!("Fetching exchange info");
        self.run("exchange_info", |t| t.fetch_exchange_info())
            .await
            .map_err(|err| {
                error!(error = %err, "Exchange info fetch failed");
                OrderError::Network(format!("Could not fetch exchange info: {err}"))
            })
    }

    /// Submit a normalized order.
    ///
    /// An exchange rejection keeps its code and message verbatim, even
    /// when it exhausted the retry budget first. Anything else becomes
    /// `Network`.
    pub async fn submit_order(&self, order: NormalizedOrder) -> Result<OrderAck, OrderError> {
        info!(
            symbol = %order.symbol,
            side = %order.side,
            order_type = %order.order_type,
            quantity = %order.quantity,
            "Sending order request"
        );
        match self
            .run("create_order", move |t| t.create_order(order.clone()))
            .await
        {
            Ok(ack) => {
                info!(order_id = ack.order_id, status = %ack.status, "Order placed");
                Ok(ack)
            }
            Err(TransportError::Api { code, message, .. }) => {
                error!(code, error_message = %message, "Exchange rejected order");
                Err(OrderError::Api { code, message })
            }
            Err(other) => {
                error!(error = %other, "Order submission failed");
                Err(OrderError::Network(format!("System failure: {other}")))
            }
        }
    }

    /// Drive one operation through the retry loop.
    ///
    /// Backoff sleeps happen only between attempts; the final failure
    /// returns without sleeping.
    async fn run<T>(
        &self,
        op: &'static str,
        call: impl for<'a> Fn(&'a dyn ExchangeTransport) -> BoxFuture<'a, TransportResult<T>>,
    ) -> TransportResult<T> {
        let mut attempt: u32 = 1;
        loop {
            match call(self.transport.as_ref()).await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    let class = classify(&err);
                    if !class.is_retryable() {
                        debug!(op, attempt, error = %err, "Non-retryable failure");
                        return Err(err);
                    }
                    if attempt >= self.policy.max_attempts {
                        error!(op, attempt, error = %err, "Max retries reached");
                        return Err(err);
                    }
                    if class == ErrorClass::RetryableClockSkew {
                        warn!(op, "Timestamp drift detected, resyncing time");
                        self.resync_clock().await;
                    }
                    let delay = self.policy.backoff_delay(attempt);
                    warn!(
                        op,
                        attempt,
                        max_attempts = self.policy.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Attempt failed, retrying after backoff"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Best-effort clock resync; its own failure is logged and swallowed.
    async fn resync_clock(&self) {
        match self.transport.sync_server_time().await {
            Ok(server_time) => debug!(server_time, "Clock resynced"),
            Err(err) => warn!(error = %err, "Time sync failed"),
        }
    }
}
