//! Order-related types: sides, types, requests, payloads, and results.
//!
//! Side and type tokens are modeled as enums so an invalid token can
//! only enter the system at a parse boundary, where it fails with the
//! same `ValidationError` the rule layer produces.

use crate::decimal::{Price, Quantity};
use crate::error::OrderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order side: buy or sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for OrderSide {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(Self::Buy),
            "SELL" => Ok(Self::Sell),
            other => Err(OrderError::Validation(format!(
                "Invalid side: {other}. Must be BUY or SELL."
            ))),
        }
    }
}

/// Order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// Market order, executed at the current book price.
    Market,
    /// Limit order, rests at the given price until filled or cancelled.
    Limit,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Market => write!(f, "MARKET"),
            Self::Limit => write!(f, "LIMIT"),
        }
    }
}

impl FromStr for OrderType {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MARKET" => Ok(Self::Market),
            "LIMIT" => Ok(Self::Limit),
            other => Err(OrderError::Validation(format!(
                "Invalid type: {other}. Must be MARKET or LIMIT."
            ))),
        }
    }
}

/// Time-in-force for resting orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good-til-cancelled, the only policy this bot submits.
    #[serde(rename = "GTC")]
    GoodTilCancelled,
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoodTilCancelled => write!(f, "GTC"),
        }
    }
}

/// Caller-supplied order, before validation and rounding.
///
/// Immutable once constructed; lives for one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    /// Trading pair, uppercase (e.g. "BTCUSDT").
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    /// Desired quantity, arbitrary precision.
    pub quantity: Quantity,
    /// Limit price; required iff `order_type` is LIMIT.
    pub price: Option<Price>,
}

impl OrderRequest {
    /// A market order.
    pub fn market(symbol: impl Into<String>, side: OrderSide, quantity: Quantity) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Market,
            quantity,
            price: None,
        }
    }

    /// A limit order.
    pub fn limit(
        symbol: impl Into<String>,
        side: OrderSide,
        quantity: Quantity,
        price: Price,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Limit,
            quantity,
            price: Some(price),
        }
    }
}

/// Exchange-ready order payload.
///
/// Quantity and price are rounded to the symbol's filters and carried as
/// canonical decimal strings (no exponent, no trailing zeros), so they
/// reach the wire without trailing-digit drift. Built once per request
/// and consumed immediately by the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedOrder {
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub quantity: String,
    pub price: Option<String>,
    pub time_in_force: Option<TimeInForce>,
}

/// Normalized exchange response for a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResult {
    pub order_id: i64,
    pub client_order_id: String,
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub executed_qty: Quantity,
    pub avg_price: Price,
    pub orig_qty: Quantity,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_side_round_trip() {
        assert_eq!("BUY".parse::<OrderSide>().unwrap(), OrderSide::Buy);
        assert_eq!("SELL".parse::<OrderSide>().unwrap(), OrderSide::Sell);
        assert_eq!(OrderSide::Buy.to_string(), "BUY");
        assert_eq!(OrderSide::Sell.to_string(), "SELL");
    }

    #[test]
    fn test_side_rejects_unknown_token() {
        let err = "HOLD".parse::<OrderSide>().unwrap_err();
        assert_eq!(
            err,
            OrderError::Validation("Invalid side: HOLD. Must be BUY or SELL.".to_string())
        );
    }

    #[test]
    fn test_side_rejects_lowercase_token() {
        assert!("buy".parse::<OrderSide>().is_err());
    }

    #[test]
    fn test_type_round_trip() {
        assert_eq!("MARKET".parse::<OrderType>().unwrap(), OrderType::Market);
        assert_eq!("LIMIT".parse::<OrderType>().unwrap(), OrderType::Limit);
        assert_eq!(OrderType::Market.to_string(), "MARKET");
        assert_eq!(OrderType::Limit.to_string(), "LIMIT");
    }

    #[test]
    fn test_type_rejects_unknown_token() {
        let err = "STOP".parse::<OrderType>().unwrap_err();
        assert_eq!(
            err,
            OrderError::Validation("Invalid type: STOP. Must be MARKET or LIMIT.".to_string())
        );
    }

    #[test]
    fn test_time_in_force_wire_form() {
        assert_eq!(TimeInForce::GoodTilCancelled.to_string(), "GTC");
    }

    #[test]
    fn test_market_request_has_no_price() {
        let req = OrderRequest::market("BTCUSDT", OrderSide::Buy, Quantity::new(dec!(0.01)));
        assert_eq!(req.order_type, OrderType::Market);
        assert!(req.price.is_none());
    }

    #[test]
    fn test_limit_request_carries_price() {
        let req = OrderRequest::limit(
            "BTCUSDT",
            OrderSide::Sell,
            Quantity::new(dec!(0.01)),
            Price::new(dec!(45000.5)),
        );
        assert_eq!(req.order_type, OrderType::Limit);
        assert_eq!(req.price, Some(Price::new(dec!(45000.5))));
    }

    #[test]
    fn test_enum_wire_serde_is_uppercase() {
        assert_eq!(serde_json::to_string(&OrderSide::Buy).unwrap(), "\"BUY\"");
        let side: OrderSide = serde_json::from_str("\"SELL\"").unwrap();
        assert_eq!(side, OrderSide::Sell);
        let ty: OrderType = serde_json::from_str("\"LIMIT\"").unwrap();
        assert_eq!(ty, OrderType::Limit);
    }
}
