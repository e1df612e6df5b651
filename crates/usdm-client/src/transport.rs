//! Transport abstraction over the exchange REST API.
//!
//! The executor and the order pipeline talk to this trait, never to a
//! concrete HTTP client, so tests can script exchange behavior without
//! a network.

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use usdm_core::NormalizedOrder;

use crate::error::{TransportError, TransportResult};
use crate::wire::{ExchangeInfo, OrderAck};

/// Boxed future type for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// The exchange operations the bot depends on.
pub trait ExchangeTransport: Send + Sync {
    /// Fetch the full exchange metadata (symbols, statuses, filters).
    fn fetch_exchange_info(&self) -> BoxFuture<'_, TransportResult<ExchangeInfo>>;

    /// Submit a normalized order.
    fn create_order(&self, order: NormalizedOrder) -> BoxFuture<'_, TransportResult<OrderAck>>;

    /// Re-synchronize the local clock offset against the server.
    ///
    /// Returns the server time in milliseconds. Callers treat failures
    /// as non-fatal.
    fn sync_server_time(&self) -> BoxFuture<'_, TransportResult<i64>>;
}

/// Shared handle to a transport.
pub type DynTransport = Arc<dyn ExchangeTransport>;

/// Scripted in-memory transport for tests.
///
/// Each operation pops the next scripted result; the last one sticks,
/// so a single pushed error simulates a persistently failing exchange.
/// An operation with nothing scripted fails with an `Http` error.
#[derive(Default)]
pub struct MockTransport {
    info_results: Mutex<VecDeque<TransportResult<ExchangeInfo>>>,
    order_results: Mutex<VecDeque<TransportResult<OrderAck>>>,
    sync_results: Mutex<VecDeque<TransportResult<i64>>>,
    orders: Mutex<Vec<NormalizedOrder>>,
    info_calls: AtomicUsize,
    order_calls: AtomicUsize,
    sync_calls: AtomicUsize,
}

impl MockTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_info_result(&self, result: TransportResult<ExchangeInfo>) {
        self.info_results.lock().push_back(result);
    }

    pub fn push_order_result(&self, result: TransportResult<OrderAck>) {
        self.order_results.lock().push_back(result);
    }

    pub fn push_sync_result(&self, result: TransportResult<i64>) {
        self.sync_results.lock().push_back(result);
    }

    /// Orders received so far, in submission order.
    #[must_use]
    pub fn recorded_orders(&self) -> Vec<NormalizedOrder> {
        self.orders.lock().clone()
    }

    #[must_use]
    pub fn info_calls(&self) -> usize {
        self.info_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn order_calls(&self) -> usize {
        self.order_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn sync_calls(&self) -> usize {
        self.sync_calls.load(Ordering::SeqCst)
    }

    fn next_scripted<T: Clone>(queue: &Mutex<VecDeque<TransportResult<T>>>) -> TransportResult<T> {
        let mut queue = queue.lock();
        match queue.pop_front() {
            None => Err(TransportError::Http(
                "mock transport has no scripted response".to_string(),
            )),
            Some(result) => {
                if queue.is_empty() {
                    queue.push_back(result.clone());
                }
                result
            }
        }
    }
}

impl ExchangeTransport for MockTransport {
    fn fetch_exchange_info(&self) -> BoxFuture<'_, TransportResult<ExchangeInfo>> {
        Box::pin(async move {
            self.info_calls.fetch_add(1, Ordering::SeqCst);
            Self::next_scripted(&self.info_results)
        })
    }

    fn create_order(&self, order: NormalizedOrder) -> BoxFuture<'_, TransportResult<OrderAck>> {
        Box::pin(async move {
            self.order_calls.fetch_add(1, Ordering::SeqCst);
            self.orders.lock().push(order);
            Self::next_scripted(&self.order_results)
        })
    }

    fn sync_server_time(&self) -> BoxFuture<'_, TransportResult<i64>> {
        Box::pin(async move {
            self.sync_calls.fetch_add(1, Ordering::SeqCst);
            Self::next_scripted(&self.sync_results)
        })
    }
}
