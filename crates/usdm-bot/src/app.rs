//! Application wiring.
//!
//! Builds the HTTP transport, retry executor, and order pipeline from
//! configuration, and exposes the single operation the CLI drives.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use usdm_client::{
    BinanceFuturesClient, Credentials, DynTransport, ResilientExecutor, RetryPolicy,
};
use usdm_core::{OrderRequest, OrderResult, Result};
use usdm_orders::OrderPipeline;

use crate::config::AppConfig;
use crate::error::AppResult;

pub struct Application {
    transport: DynTransport,
    pipeline: OrderPipeline,
}

impl Application {
    /// Wire the full stack against the configured exchange endpoint.
    pub fn new(config: &AppConfig, credentials: Credentials) -> AppResult<Self> {
        let timeout = Duration::from_secs(config.exchange.timeout_secs);
        let client =
            BinanceFuturesClient::new(config.exchange.base_url.as_str(), credentials, timeout)?;
        let transport: DynTransport = Arc::new(client);

        let policy = RetryPolicy::new(
            config.retry.max_attempts,
            Duration::from_secs(config.retry.base_delay_secs),
        );
        let executor = Arc::new(ResilientExecutor::new(transport.clone(), policy));

        info!(base_url = %config.exchange.base_url, "Futures client initialized");
        Ok(Self {
            transport,
            pipeline: OrderPipeline::new(executor),
        })
    }

    /// One best-effort clock sync against the exchange. Failure is logged
    /// and otherwise ignored; the executor resyncs again on timestamp
    /// rejections.
    pub async fn sync_clock(&self) {
        if let Err(err) = self.transport.sync_server_time().await {
            warn!(error = %err, "Startup time sync failed");
        }
    }

    /// Validate, normalize, and submit one order.
    pub async fn place_order(&self, request: &OrderRequest) -> Result<OrderResult> {
        self.pipeline.place_order(request).await
    }
}
