//! Core domain types for the USDⓈ-M futures order bot.
//!
//! This crate provides the fundamental types used throughout the order
//! submission stack:
//! - `Quantity`, `Price`: precision-safe numeric types with step/tick rounding
//! - `SymbolFilters`: exchange-published trading constraints per symbol
//! - `OrderRequest`, `NormalizedOrder`, `OrderResult`: the order life cycle
//! - `OrderError`: the shared error taxonomy
//! - `validate`: rule checks against exchange constraints

pub mod decimal;
pub mod error;
pub mod market;
pub mod order;
pub mod validate;

pub use decimal::{format_plain, round_to_step, round_to_tick, Price, Quantity};
pub use error::{OrderError, Result};
pub use market::{SymbolFilters, SymbolStatus};
pub use order::{
    NormalizedOrder, OrderRequest, OrderResult, OrderSide, OrderType, TimeInForce,
};
