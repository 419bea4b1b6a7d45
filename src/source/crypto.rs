//! Crypto price adapter (CoinGecko `/simple/price`).

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use super::{HttpFetcher, SourceAdapter};
use crate::error::FetchError;

/// Price and 24h change for one coin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoinQuote {
    pub price: f64,

    /// Signed percentage. The provider omits it for some coins; it is passed
    /// through as `None` and read as 0 by consumers that need a number.
    pub change_24h: Option<f64>,
}

impl CoinQuote {
    pub fn change_or_zero(&self) -> f64 {
        self.change_24h.unwrap_or(0.0)
    }
}

/// BTC and ETH quotes in USD.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CryptoSnapshot {
    pub btc: CoinQuote,
    pub eth: CoinQuote,
}

/// Fetches BTC/ETH prices and 24h change.
#[derive(Debug, Clone)]
pub struct CryptoAdapter {
    http: HttpFetcher,
    endpoint: Url,
}

impl CryptoAdapter {
    pub fn new(http: HttpFetcher, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    fn request_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("ids", "bitcoin,ethereum")
            .append_pair("vs_currencies", "usd")
            .append_pair("include_24hr_change", "true");
        url
    }
}

#[async_trait]
impl SourceAdapter for CryptoAdapter {
    type Output = CryptoSnapshot;

    async fn fetch(&self) -> Result<CryptoSnapshot, FetchError> {
        let raw = self.http.get_json(self.request_url()).await?;
        normalize(&raw)
    }
}

/// Normalize a `/simple/price` payload like
/// `{"bitcoin": {"usd": 64000.0, "usd_24h_change": 1.2}, "ethereum": {...}}`.
pub(crate) fn normalize(raw: &Value) -> Result<CryptoSnapshot, FetchError> {
    Ok(CryptoSnapshot {
        btc: coin(raw, "bitcoin")?,
        eth: coin(raw, "ethereum")?,
    })
}

fn coin(raw: &Value, id: &str) -> Result<CoinQuote, FetchError> {
    let record = raw
        .get(id)
        .filter(|v| v.is_object())
        .ok_or_else(|| FetchError::malformed(format!("{} missing", id)))?;

    let price = record
        .get("usd")
        .and_then(Value::as_f64)
        .ok_or_else(|| FetchError::malformed(format!("{}.usd missing", id)))?;

    if !price.is_finite() || price <= 0.0 {
        return Err(FetchError::malformed(format!("{}.usd not positive: {}", id, price)));
    }

    let change_24h = match record.get("usd_24h_change") {
        None | Some(Value::Null) => None,
        Some(v) => Some(v.as_f64().ok_or_else(|| {
            FetchError::malformed(format!("{}.usd_24h_change not a number", id))
        })?),
    };

    Ok(CoinQuote { price, change_24h })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use mockito::Matcher;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_normalize_full_payload() {
        let raw = json!({
            "bitcoin": {"usd": 64000.5, "usd_24h_change": 2.5},
            "ethereum": {"usd": 3100.0, "usd_24h_change": -1.25}
        });

        let snapshot = normalize(&raw).unwrap();
        assert_eq!(snapshot.btc.price, 64000.5);
        assert_eq!(snapshot.btc.change_24h, Some(2.5));
        assert_eq!(snapshot.eth.change_24h, Some(-1.25));
    }

    #[test]
    fn test_normalize_missing_change_passes_through() {
        let raw = json!({
            "bitcoin": {"usd": 64000.0},
            "ethereum": {"usd": 3100.0, "usd_24h_change": null}
        });

        let snapshot = normalize(&raw).unwrap();
        assert_eq!(snapshot.btc.change_24h, None);
        assert_eq!(snapshot.eth.change_24h, None);
        assert_eq!(snapshot.btc.change_or_zero(), 0.0);
    }

    #[test]
    fn test_normalize_rejects_missing_fields() {
        let no_eth = json!({"bitcoin": {"usd": 1.0}});
        assert!(matches!(normalize(&no_eth), Err(FetchError::Malformed(m)) if m.contains("ethereum")));

        let no_price = json!({"bitcoin": {"usd_24h_change": 1.0}, "ethereum": {"usd": 1.0}});
        assert!(matches!(normalize(&no_price), Err(FetchError::Malformed(m)) if m.contains("bitcoin.usd")));

        let zero_price = json!({"bitcoin": {"usd": 0.0}, "ethereum": {"usd": 1.0}});
        assert!(normalize(&zero_price).is_err());

        let bad_change = json!({"bitcoin": {"usd": 1.0, "usd_24h_change": "up"}, "ethereum": {"usd": 1.0}});
        assert!(normalize(&bad_change).is_err());
    }

    #[tokio::test]
    async fn test_fetch_against_provider() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v3/simple/price")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("ids".into(), "bitcoin,ethereum".into()),
                Matcher::UrlEncoded("vs_currencies".into(), "usd".into()),
                Matcher::UrlEncoded("include_24hr_change".into(), "true".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"bitcoin":{"usd":60000,"usd_24h_change":10.0},"ethereum":{"usd":3000,"usd_24h_change":4.0}}"#,
            )
            .create_async()
            .await;

        let http = HttpFetcher::new(Duration::from_secs(2), 3).unwrap();
        let endpoint = Url::parse(&format!("{}/api/v3/simple/price", server.url())).unwrap();
        let snapshot = CryptoAdapter::new(http, endpoint).fetch().await.unwrap();

        assert_eq!(snapshot.btc.price, 60000.0);
        assert_eq!(snapshot.eth.change_24h, Some(4.0));
        mock.assert_async().await;
    }
}
