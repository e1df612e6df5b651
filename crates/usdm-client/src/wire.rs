//! Raw payloads of the USDⓈ-M futures REST API.
//!
//! Field sets are trimmed to what the bot consumes; serde ignores the
//! rest of each object. Decimal fields arrive as JSON strings and are
//! parsed on deserialization.

use rust_decimal::Decimal;
use serde::Deserialize;
use usdm_core::{OrderSide, OrderType};

/// Response of `GET /fapi/v1/exchangeInfo`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeInfo {
    #[serde(default)]
    pub symbols: Vec<SymbolInfo>,
}

impl ExchangeInfo {
    /// Look up one symbol entry by exact name.
    #[must_use]
    pub fn symbol(&self, symbol: &str) -> Option<&SymbolInfo> {
        self.symbols.iter().find(|s| s.symbol == symbol)
    }
}

/// One symbol entry from exchangeInfo.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    pub symbol: String,
    /// Trading status as reported, e.g. "TRADING" or "SETTLING".
    pub status: String,
    #[serde(default)]
    pub filters: Vec<SymbolFilter>,
}

/// A per-symbol trading filter, tagged by `filterType`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "filterType")]
pub enum SymbolFilter {
    /// Quantity granularity and minimum.
    #[serde(rename = "LOT_SIZE", rename_all = "camelCase")]
    LotSize { step_size: Decimal, min_qty: Decimal },

    /// Price granularity.
    #[serde(rename = "PRICE_FILTER", rename_all = "camelCase")]
    PriceFilter { tick_size: Decimal },

    /// Filter types the bot does not consume (MIN_NOTIONAL and friends).
    #[serde(other)]
    Other,
}

/// Response of `POST /fapi/v1/order`.
///
/// Fill fields default to zero when the exchange omits them, which it
/// does for orders that rest on the book.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAck {
    pub order_id: i64,
    pub client_order_id: String,
    pub symbol: String,
    pub side: OrderSide,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(default)]
    pub executed_qty: Decimal,
    #[serde(default)]
    pub avg_price: Decimal,
    #[serde(default)]
    pub orig_qty: Decimal,
    pub status: String,
}

/// Response of `GET /fapi/v1/time`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTime {
    pub server_time: i64,
}

/// Error body the exchange attaches to non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub code: i64,
    pub msg: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use usdm_core::{OrderSide, OrderType};

    #[test]
    fn parses_exchange_info_with_mixed_filters() {
        let json = r#"{
            "timezone": "UTC",
            "symbols": [
                {
                    "symbol": "BTCUSDT",
                    "status": "TRADING",
                    "baseAsset": "BTC",
                    "quoteAsset": "USDT",
                    "filters": [
                        {"filterType": "PRICE_FILTER", "tickSize": "0.10", "minPrice": "556.80", "maxPrice": "4529764"},
                        {"filterType": "LOT_SIZE", "stepSize": "0.001", "minQty": "0.001", "maxQty": "1000"},
                        {"filterType": "MIN_NOTIONAL", "notional": "100"}
                    ]
                }
            ]
        }"#;
        let info: ExchangeInfo = serde_json::from_str(json).unwrap();
        let btc = info.symbol("BTCUSDT").unwrap();
        assert_eq!(btc.status, "TRADING");
        assert_eq!(btc.filters.len(), 3);
        assert!(matches!(
            btc.filters[0],
            SymbolFilter::PriceFilter { tick_size } if tick_size == dec!(0.10)
        ));
        assert!(matches!(
            btc.filters[1],
            SymbolFilter::LotSize { step_size, min_qty }
                if step_size == dec!(0.001) && min_qty == dec!(0.001)
        ));
        assert!(matches!(btc.filters[2], SymbolFilter::Other));
    }

    #[test]
    fn symbol_lookup_is_exact() {
        let json = r#"{"symbols": [{"symbol": "ETHUSDT", "status": "TRADING", "filters": []}]}"#;
        let info: ExchangeInfo = serde_json::from_str(json).unwrap();
        assert!(info.symbol("ETHUSDT").is_some());
        assert!(info.symbol("ethusdt").is_none());
        assert!(info.symbol("ETH").is_none());
    }

    #[test]
    fn parses_order_ack_with_fills() {
        let json = r#"{
            "orderId": 4055321,
            "symbol": "BTCUSDT",
            "status": "FILLED",
            "clientOrderId": "x-aBcDeF123",
            "price": "0",
            "avgPrice": "45012.30000",
            "origQty": "0.010",
            "executedQty": "0.010",
            "type": "MARKET",
            "side": "BUY"
        }"#;
        let ack: OrderAck = serde_json::from_str(json).unwrap();
        assert_eq!(ack.order_id, 4055321);
        assert_eq!(ack.side, OrderSide::Buy);
        assert_eq!(ack.order_type, OrderType::Market);
        assert_eq!(ack.executed_qty, dec!(0.010));
        assert_eq!(ack.avg_price, dec!(45012.3));
        assert_eq!(ack.status, "FILLED");
    }

    #[test]
    fn order_ack_fill_fields_default_to_zero() {
        let json = r#"{
            "orderId": 7,
            "symbol": "ETHUSDT",
            "status": "NEW",
            "clientOrderId": "abc",
            "type": "LIMIT",
            "side": "SELL"
        }"#;
        let ack: OrderAck = serde_json::from_str(json).unwrap();
        assert_eq!(ack.executed_qty, Decimal::ZERO);
        assert_eq!(ack.avg_price, Decimal::ZERO);
        assert_eq!(ack.orig_qty, Decimal::ZERO);
    }

    #[test]
    fn parses_server_time_and_error_body() {
        let time: ServerTime = serde_json::from_str(r#"{"serverTime": 1699999999123}"#).unwrap();
        assert_eq!(time.server_time, 1_699_999_999_123);

        let body: ApiErrorBody =
            serde_json::from_str(r#"{"code": -1021, "msg": "Timestamp for this request is outside of the recvWindow."}"#)
                .unwrap();
        assert_eq!(body.code, -1021);
        assert!(body.msg.contains("recvWindow"));
    }
}
