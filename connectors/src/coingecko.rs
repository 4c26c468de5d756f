use crate::{CoinGeckoConfig, MarketDataSource};
use async_trait::async_trait;
use common::{
    models::{CoinRecord, MarketQuery},
    Error, Result,
};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Url;
use tracing::{debug, error};

const API_KEY_HEADER: &str = "x-cg-demo-api-key";

pub struct CoinGeckoConnector {
    client: reqwest::Client,
    base_url: String,
}

impl CoinGeckoConnector {
    pub fn new(config: CoinGeckoConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|e| Error::ConfigError(format!("Invalid CoinGecko API key: {}", e)))?;
            headers.insert(API_KEY_HEADER, value);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    fn require_id(coin_id: &str) -> Result<()> {
        if coin_id.trim().is_empty() {
            return Err(Error::InvalidRequest("empty coin id".to_string()));
        }
        Ok(())
    }

    /// Base URL extended by `segments`, each percent-encoded as a single
    /// path segment so ids cannot redirect the request elsewhere.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            Error::InvalidRequest(format!("Invalid CoinGecko base URL '{}': {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                Error::InvalidRequest(format!("CoinGecko base URL '{}' cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        error!("CoinGecko API error: {} - {}", status, error_text);
        Err(Error::FetchError(format!(
            "CoinGecko API error: {} - {}",
            status, error_text
        )))
    }
}

/// Contract address found at `pointer` in a coin detail payload.
/// Missing, non-string and empty values all count as absent.
pub fn token_address(detail: &serde_json::Value, pointer: &str) -> Option<String> {
    detail
        .pointer(pointer)
        .and_then(|value| value.as_str())
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl MarketDataSource for CoinGeckoConnector {
    async fn list_markets(&self, query: &MarketQuery) -> Result<Vec<CoinRecord>> {
        let url = self.endpoint(&["coins", "markets"])?;

        debug!(
            "Fetching market listing from CoinGecko: {} (category: {:?})",
            url, query.category
        );

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(Error::from_request)?;

        let response = Self::error_for_status(response).await?;

        response.json().await.map_err(|e| {
            Error::ParseError(format!("Failed to parse CoinGecko market listing: {}", e))
        })
    }

    async fn has_exchange_ticker(&self, exchange_id: &str, coin_id: &str) -> Result<bool> {
        Self::require_id(coin_id)?;
        let url = self.endpoint(&["exchanges", exchange_id, "tickers"])?;

        debug!("Checking {} tickers for {}", exchange_id, coin_id);

        let response = self
            .client
            .get(url)
            .query(&[("coin_ids", coin_id)])
            .send()
            .await
            .map_err(Error::from_request)?;

        let status = response.status();
        if !status.is_success() {
            debug!("{} ticker check for {} returned {}", exchange_id, coin_id, status);
        }
        Ok(status.is_success())
    }

    async fn coin_detail(&self, coin_id: &str) -> Result<serde_json::Value> {
        Self::require_id(coin_id)?;
        let url = self.endpoint(&["coins", coin_id])?;

        debug!("Fetching coin detail from CoinGecko: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(Error::from_request)?;

        let response = Self::error_for_status(response).await?;

        response.json().await.map_err(|e| {
            Error::ParseError(format!("Failed to parse CoinGecko coin detail: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unreachable_connector() -> CoinGeckoConnector {
        CoinGeckoConnector::new(CoinGeckoConfig {
            base_url: "not a url".to_string(),
            ..CoinGeckoConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn extracts_platform_addresses() {
        let detail = json!({
            "platforms": {
                "binance-smart-chain": "0xfb5b838b6cfeedc2873ab27866079ac55363d37e",
                "solana": ""
            },
            "detail_platforms": {
                "ethereum": { "decimal_place": 18, "contract_address": "0x6982508145454ce325ddbe47a25d4ec3d2311933" }
            }
        });

        assert_eq!(
            token_address(&detail, "/platforms/binance-smart-chain").as_deref(),
            Some("0xfb5b838b6cfeedc2873ab27866079ac55363d37e")
        );
        assert_eq!(
            token_address(&detail, "/detail_platforms/ethereum/contract_address").as_deref(),
            Some("0x6982508145454ce325ddbe47a25d4ec3d2311933")
        );
        assert_eq!(token_address(&detail, "/platforms/solana"), None);
        assert_eq!(token_address(&detail, "/platforms/tron"), None);
        assert_eq!(token_address(&json!({ "platforms": null }), "/platforms/solana"), None);
    }

    #[test]
    fn ids_stay_inside_their_path_segment() {
        let connector = CoinGeckoConnector::new(CoinGeckoConfig::default()).unwrap();

        let detail = connector.endpoint(&["coins", "a/b?c#d"]).unwrap();
        assert_eq!(
            detail.as_str(),
            "https://api.coingecko.com/api/v3/coins/a%2Fb%3Fc%23d"
        );
        assert_eq!(detail.query(), None);

        let tickers = connector.endpoint(&["exchanges", "binance", "tickers"]).unwrap();
        assert_eq!(
            tickers.as_str(),
            "https://api.coingecko.com/api/v3/exchanges/binance/tickers"
        );
    }

    #[test]
    fn trailing_slash_on_base_url_is_ignored() {
        let connector = CoinGeckoConnector::new(CoinGeckoConfig {
            base_url: "http://localhost:8080/api/v3/".to_string(),
            ..CoinGeckoConfig::default()
        })
        .unwrap();

        let url = connector.endpoint(&["coins", "markets"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/v3/coins/markets");
    }

    #[test]
    fn rejects_invalid_api_key() {
        let result = CoinGeckoConnector::new(CoinGeckoConfig {
            api_key: Some("bad\nkey".to_string()),
            ..CoinGeckoConfig::default()
        });
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }

    #[tokio::test]
    async fn unbuildable_requests_are_reported_as_invalid() {
        let connector = unreachable_connector();

        let listing = connector
            .list_markets(&MarketQuery::top_by_market_cap(None))
            .await;
        assert!(matches!(listing, Err(Error::InvalidRequest(_))));

        let ticker = connector.has_exchange_ticker("binance", "dogecoin").await;
        assert!(matches!(ticker, Err(Error::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn empty_coin_id_never_reaches_the_network() {
        let connector = CoinGeckoConnector::new(CoinGeckoConfig::default()).unwrap();

        let ticker = connector.has_exchange_ticker("binance", " ").await;
        assert!(matches!(ticker, Err(Error::InvalidRequest(_))));

        let detail = connector.coin_detail("").await;
        assert!(matches!(detail, Err(Error::InvalidRequest(_))));
    }
}
