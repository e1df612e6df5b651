//! Per-symbol filter cache.
//!
//! The full exchange metadata is fetched once per process, on first
//! lookup, and held for the process lifetime. Filters change rarely
//! enough that a long-lived process serving a stale snapshot is an
//! accepted trade, and a fresh process always refetches.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::info;
use usdm_client::{ExchangeInfo, ResilientExecutor, SymbolFilter, SymbolInfo};
use usdm_core::{OrderError, Price, Quantity, Result, SymbolFilters, SymbolStatus};

/// Lazily populated symbol -> filters map.
///
/// Population is single-flight: concurrent first lookups trigger one
/// fetch, and a failed fetch leaves the cache empty so the next lookup
/// tries again.
pub struct FilterCache {
    executor: Arc<ResilientExecutor>,
    filters: OnceCell<HashMap<String, SymbolFilters>>,
}

impl FilterCache {
    #[must_use]
    pub fn new(executor: Arc<ResilientExecutor>) -> Self {
        Self {
            executor,
            filters: OnceCell::new(),
        }
    }

    /// Look up the filters for one symbol, fetching the exchange
    /// metadata first if this process has not done so yet.
    pub async fn get(&self, symbol: &str) -> Result<SymbolFilters> {
        let map = self
            .filters
            .get_or_try_init(|| async {
                let exchange_info = self.executor.fetch_exchange_info().await?;
                let map = build_filter_map(exchange_info);
                info!(symbols = map.len(), "Cached exchange filters");
                Ok::<_, OrderError>(map)
            })
            .await?;
        map.get(symbol).cloned().ok_or_else(|| {
            OrderError::Validation(format!("Symbol {symbol} not found on Binance Futures."))
        })
    }
}

fn build_filter_map(exchange_info: ExchangeInfo) -> HashMap<String, SymbolFilters> {
    exchange_info
        .symbols
        .into_iter()
        .map(|entry| {
            let filters = symbol_filters(&entry);
            (entry.symbol, filters)
        })
        .collect()
}

/// Fold the wire filter list into the fields the pipeline consumes.
///
/// A filter the exchange did not publish leaves its field at zero,
/// which downstream code treats as unconstrained.
fn symbol_filters(entry: &SymbolInfo) -> SymbolFilters {
    let mut step_size = Quantity::ZERO;
    let mut min_qty = Quantity::ZERO;
    let mut tick_size = Price::ZERO;
    for filter in &entry.filters {
        match filter {
            SymbolFilter::LotSize {
                step_size: step,
                min_qty: min,
            } => {
                step_size = Quantity::new(*step);
                min_qty = Quantity::new(*min);
            }
            SymbolFilter::PriceFilter { tick_size: tick } => {
                tick_size = Price::new(*tick);
            }
            SymbolFilter::Other => {}
        }
    }
    SymbolFilters {
        step_size,
        min_qty,
        tick_size,
        status: SymbolStatus::from_wire(&entry.status),
    }
}
