//! Exchange-published trading constraints for a symbol.
//!
//! The exchange publishes per-symbol filters (quantity step, minimum
//! quantity, price tick) and a trading status. A [`SymbolFilters`]
//! snapshot is built once from the metadata feed and never mutated
//! field-by-field; a refetch replaces the whole snapshot.

use crate::decimal::{Price, Quantity};
use std::fmt;

/// Trading status of a symbol as reported by the exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolStatus {
    /// The symbol accepts orders.
    Trading,
    /// Any non-TRADING state (SETTLING, PENDING_TRADING, BREAK, ...),
    /// carrying the raw status string for diagnostics.
    Inactive(String),
}

impl SymbolStatus {
    /// Parse the exchange's raw status string.
    pub fn from_wire(status: &str) -> Self {
        if status == "TRADING" {
            Self::Trading
        } else {
            Self::Inactive(status.to_string())
        }
    }

    pub fn is_trading(&self) -> bool {
        matches!(self, Self::Trading)
    }
}

impl fmt::Display for SymbolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trading => write!(f, "TRADING"),
            Self::Inactive(raw) => write!(f, "{raw}"),
        }
    }
}

/// Per-symbol filter snapshot.
///
/// A missing filter on the exchange side is represented by a zero step
/// or tick, which the rounder treats as "no constraint".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolFilters {
    /// Minimum quantity increment (LOT_SIZE stepSize).
    pub step_size: Quantity,

    /// Minimum order quantity (LOT_SIZE minQty).
    pub min_qty: Quantity,

    /// Minimum price increment (PRICE_FILTER tickSize).
    pub tick_size: Price,

    /// Trading status of the symbol.
    pub status: SymbolStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_wire() {
        assert_eq!(SymbolStatus::from_wire("TRADING"), SymbolStatus::Trading);
        assert_eq!(
            SymbolStatus::from_wire("SETTLING"),
            SymbolStatus::Inactive("SETTLING".to_string())
        );
    }

    #[test]
    fn test_status_display_keeps_raw_string() {
        assert_eq!(SymbolStatus::Trading.to_string(), "TRADING");
        assert_eq!(
            SymbolStatus::Inactive("BREAK".to_string()).to_string(),
            "BREAK"
        );
    }

    #[test]
    fn test_is_trading() {
        assert!(SymbolStatus::Trading.is_trading());
        assert!(!SymbolStatus::Inactive("SETTLING".to_string()).is_trading());
    }
}
