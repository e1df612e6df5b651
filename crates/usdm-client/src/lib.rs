//! Exchange transport and resilient execution.
//!
//! This crate owns everything between a normalized order and the wire:
//! the REST client with request signing and clock-offset handling, the
//! [`ExchangeTransport`] seam that tests mock, and the retrying
//! [`ResilientExecutor`] that turns transport failures into the public
//! error taxonomy.

pub mod error;
pub mod executor;
pub mod rest;
pub mod retry;
pub mod sign;
pub mod transport;
pub mod wire;

pub use error::{TransportError, TransportResult};
pub use executor::ResilientExecutor;
pub use rest::BinanceFuturesClient;
pub use retry::{classify, ErrorClass, RetryPolicy, CLOCK_SKEW_CODE};
pub use sign::{sign_query, Credentials};
pub use transport::{BoxFuture, DynTransport, ExchangeTransport, MockTransport};
pub use wire::{ApiErrorBody, ExchangeInfo, OrderAck, ServerTime, SymbolFilter, SymbolInfo};
