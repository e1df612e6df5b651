//! REST client for the USDⓈ-M futures API.
//!
//! Signed endpoints get an HMAC signature over the exact query string
//! plus a timestamp shifted by the last known server clock offset, so
//! a skewed local clock does not invalidate requests.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use usdm_core::NormalizedOrder;

use crate::error::{TransportError, TransportResult};
use crate::sign::{sign_query, Credentials};
use crate::transport::{BoxFuture, ExchangeTransport};
use crate::wire::{ApiErrorBody, ExchangeInfo, OrderAck, ServerTime};

const EXCHANGE_INFO_PATH: &str = "/fapi/v1/exchangeInfo";
const ORDER_PATH: &str = "/fapi/v1/order";
const PING_PATH: &str = "/fapi/v1/ping";
const TIME_PATH: &str = "/fapi/v1/time";

const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// HTTP client for Binance USDⓈ-M futures.
pub struct BinanceFuturesClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
    /// server_time - local_time in milliseconds, applied to signed
    /// request timestamps.
    time_offset_ms: AtomicI64,
}

impl BinanceFuturesClient {
    /// Create a client against `base_url`, e.g. the futures testnet.
    pub fn new(
        base_url: impl Into<String>,
        credentials: Credentials,
        timeout: Duration,
    ) -> TransportResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Http(format!("Failed to create HTTP client: {e}")))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            credentials,
            time_offset_ms: AtomicI64::new(0),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Local time in milliseconds, shifted by the known server offset.
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis() + self.time_offset_ms.load(Ordering::Relaxed)
    }

    /// Build the signed query for order creation.
    ///
    /// Parameter order is fixed; the signature covers exactly this
    /// string and goes last.
    fn signed_order_query(&self, order: &NormalizedOrder) -> TransportResult<String> {
        let mut query = format!(
            "symbol={}&side={}&type={}&quantity={}",
            order.symbol, order.side, order.order_type, order.quantity
        );
        if let Some(price) = &order.price {
            query.push_str(&format!("&price={price}"));
        }
        if let Some(tif) = &order.time_in_force {
            query.push_str(&format!("&timeInForce={tif}"));
        }
        query.push_str(&format!("&timestamp={}", self.now_millis()));
        let signature = sign_query(&self.credentials.secret_key, &query)?;
        query.push_str(&format!("&signature={signature}"));
        Ok(query)
    }

    async fn get_exchange_info(&self) -> TransportResult<ExchangeInfo> {
        debug!(url = %self.url(EXCHANGE_INFO_PATH), "Fetching exchange info");
        let response = self
            .client
            .get(self.url(EXCHANGE_INFO_PATH))
            .send()
            .await
            .map_err(|e| TransportError::Http(format!("HTTP request failed: {e}")))?;
        decode(response).await
    }

    async fn post_order(&self, order: &NormalizedOrder) -> TransportResult<OrderAck> {
        let query = self.signed_order_query(order)?;
        debug!(symbol = %order.symbol, "Posting order");
        let response = self
            .client
            .post(format!("{}?{query}", self.url(ORDER_PATH)))
            .header(API_KEY_HEADER, &self.credentials.api_key)
            .send()
            .await
            .map_err(|e| TransportError::Http(format!("HTTP request failed: {e}")))?;
        decode(response).await
    }

    async fn ping(&self) -> TransportResult<()> {
        let response = self
            .client
            .get(self.url(PING_PATH))
            .send()
            .await
            .map_err(|e| TransportError::Http(format!("HTTP request failed: {e}")))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), &body));
        }
        Ok(())
    }

    /// Ping, then read the server clock and store the local offset.
    async fn sync_time(&self) -> TransportResult<i64> {
        self.ping().await?;
        let response = self
            .client
            .get(self.url(TIME_PATH))
            .send()
            .await
            .map_err(|e| TransportError::Http(format!("HTTP request failed: {e}")))?;
        let server: ServerTime = decode(response).await?;
        let offset = server.server_time - chrono::Utc::now().timestamp_millis();
        self.time_offset_ms.store(offset, Ordering::Relaxed);
        info!(offset_ms = offset, "Time sync complete");
        Ok(server.server_time)
    }
}

impl ExchangeTransport for BinanceFuturesClient {
    fn fetch_exchange_info(&self) -> BoxFuture<'_, TransportResult<ExchangeInfo>> {
        Box::pin(self.get_exchange_info())
    }

    fn create_order(&self, order: NormalizedOrder) -> BoxFuture<'_, TransportResult<OrderAck>> {
        Box::pin(async move { self.post_order(&order).await })
    }

    fn sync_server_time(&self) -> BoxFuture<'_, TransportResult<i64>> {
        Box::pin(self.sync_time())
    }
}

/// Check the status and decode a JSON body.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> TransportResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(api_error(status.as_u16(), &body));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| TransportError::Parse(format!("Failed to parse response: {e}")))
}

/// Map a non-2xx response body to a typed failure.
///
/// The exchange reports errors as `{"code": int, "msg": string}`; when
/// the body is some other shape the raw text is carried with code 0.
fn api_error(status: u16, body: &str) -> TransportError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => TransportError::Api {
            status,
            code: parsed.code,
            message: parsed.msg,
        },
        Err(_) => TransportError::Api {
            status,
            code: 0,
            message: format!("HTTP {status}: {body}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use usdm_core::{OrderSide, OrderType, TimeInForce};

    fn client() -> BinanceFuturesClient {
        BinanceFuturesClient::new(
            "https://testnet.binancefuture.com",
            Credentials::new("test-key", "test-secret"),
            Duration::from_secs(10),
        )
        .unwrap()
    }

    fn limit_order() -> NormalizedOrder {
        NormalizedOrder {
            symbol: "BTCUSDT".to_string(),
            side: OrderSide::Sell,
            order_type: OrderType::Limit,
            quantity: "0.5".to_string(),
            price: Some("45000.13".to_string()),
            time_in_force: Some(TimeInForce::GoodTilCancelled),
        }
    }

    #[test]
    fn signed_query_has_fixed_parameter_order() {
        let query = client().signed_order_query(&limit_order()).unwrap();
        assert!(
            query.starts_with(
                "symbol=BTCUSDT&side=SELL&type=LIMIT&quantity=0.5&price=45000.13&timeInForce=GTC&timestamp="
            ),
            "{query}"
        );
        let signature = query.rsplit("&signature=").next().unwrap();
        assert_eq!(signature.len(), 64);
    }

    #[test]
    fn market_query_omits_price_and_time_in_force() {
        let order = NormalizedOrder {
            symbol: "ETHUSDT".to_string(),
            side: OrderSide::Buy,
            order_type: OrderType::Market,
            quantity: "1".to_string(),
            price: None,
            time_in_force: None,
        };
        let query = client().signed_order_query(&order).unwrap();
        assert!(query.contains("type=MARKET"));
        assert!(!query.contains("price="));
        assert!(!query.contains("timeInForce"));
    }

    #[test]
    fn time_offset_shifts_signed_timestamps() {
        let client = client();
        client.time_offset_ms.store(5_000, Ordering::Relaxed);
        let now = chrono::Utc::now().timestamp_millis();
        let stamped = client.now_millis();
        assert!(stamped - now >= 4_900 && stamped - now <= 5_100);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = BinanceFuturesClient::new(
            "https://testnet.binancefuture.com/",
            Credentials::new("k", "s"),
            Duration::from_secs(10),
        )
        .unwrap();
        assert_eq!(
            client.url(ORDER_PATH),
            "https://testnet.binancefuture.com/fapi/v1/order"
        );
    }

    #[test]
    fn api_error_parses_exchange_body() {
        let err = api_error(400, r#"{"code": -2019, "msg": "Margin is insufficient."}"#);
        match err {
            TransportError::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 400);
                assert_eq!(code, -2019);
                assert_eq!(message, "Margin is insufficient.");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn api_error_keeps_raw_body_when_not_json() {
        let err = api_error(502, "<html>Bad Gateway</html>");
        match err {
            TransportError::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 502);
                assert_eq!(code, 0);
                assert!(message.contains("Bad Gateway"));
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }
}
