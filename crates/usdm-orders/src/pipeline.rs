//! Order normalization and placement.
//!
//! Turns a caller's request into an exchange-ready payload: token
//! checks first, then filter lookup, then rounding and rule checks,
//! then submission through the resilient executor. A request that
//! cannot possibly succeed fails before anything touches the network.

use std::sync::Arc;

use tracing::{debug, info};
use usdm_client::{OrderAck, ResilientExecutor};
use usdm_core::validate;
use usdm_core::{
    NormalizedOrder, OrderError, OrderRequest, OrderResult, OrderType, Price, Quantity, Result,
    TimeInForce,
};
use usdm_registry::FilterCache;

/// Validates, rounds, and submits orders.
pub struct OrderPipeline {
    filters: FilterCache,
    executor: Arc<ResilientExecutor>,
}

impl OrderPipeline {
    #[must_use]
    pub fn new(executor: Arc<ResilientExecutor>) -> Self {
        Self {
            filters: FilterCache::new(executor.clone()),
            executor,
        }
    }

    /// Validate and round a request into an exchange-ready payload.
    ///
    /// Quantity rounds toward zero so the payload never exceeds what
    /// the caller asked for; price rounds to the nearest tick. Both
    /// are formatted as plain decimal strings.
    pub async fn normalize(&self, request: &OrderRequest) -> Result<NormalizedOrder> {
        validate::validate_symbol(&request.symbol)?;
        // Checked before the filter lookup so a hopeless request costs
        // no round trip.
        if request.order_type == OrderType::Limit && request.price.is_none() {
            return Err(OrderError::Validation(
                "Price is required for LIMIT orders.".to_string(),
            ));
        }

        let filters = self.filters.get(&request.symbol).await?;
        validate::validate_symbol_status(&request.symbol, &filters)?;

        let quantity = request
            .quantity
            .round_to_step(filters.step_size)
            .map_err(|e| OrderError::Precision(format!("Quantity rounding failed: {e}")))?;
        debug!(
            input = %request.quantity,
            step = %filters.step_size,
            rounded = %quantity,
            "Rounded quantity"
        );
        let min_qty = filters.min_qty;
        if quantity < min_qty {
            return Err(OrderError::Validation(format!(
                "Quantity {quantity} is below minimum {min_qty}."
            )));
        }

        let (price, time_in_force) = match (request.order_type, request.price) {
            (OrderType::Limit, Some(input)) => {
                let rounded = input
                    .round_to_tick(filters.tick_size)
                    .map_err(|e| OrderError::Precision(format!("Price rounding failed: {e}")))?;
                debug!(
                    input = %input,
                    tick = %filters.tick_size,
                    rounded = %rounded,
                    "Rounded price"
                );
                if !rounded.is_positive() {
                    return Err(OrderError::Validation("Price must be positive.".to_string()));
                }
                (Some(rounded), Some(TimeInForce::GoodTilCancelled))
            }
            _ => (None, None),
        };

        Ok(NormalizedOrder {
            symbol: request.symbol.clone(),
            side: request.side,
            order_type: request.order_type,
            quantity: quantity.to_plain_string(),
            price: price.map(|p| p.to_plain_string()),
            time_in_force,
        })
    }

    /// Normalize, submit, and map the exchange acknowledgement.
    pub async fn place_order(&self, request: &OrderRequest) -> Result<OrderResult> {
        info!(
            symbol = %request.symbol,
            side = %request.side,
            order_type = %request.order_type,
            quantity = %request.quantity,
            price = ?request.price,
            "Initiating order flow"
        );
        let payload = self.normalize(request).await?;
        let ack = self.executor.submit_order(payload).await?;
        Ok(order_result(ack))
    }
}

/// Map the raw acknowledgement into the caller-facing result.
fn order_result(ack: OrderAck) -> OrderResult {
    OrderResult {
        order_id: ack.order_id,
        client_order_id: ack.client_order_id,
        symbol: ack.symbol,
        side: ack.side,
        order_type: ack.order_type,
        executed_qty: Quantity::new(ack.executed_qty),
        avg_price: Price::new(ack.avg_price),
        orig_qty: Quantity::new(ack.orig_qty),
        status: ack.status,
    }
}
