//! In-memory market data source for unit tests.

use async_trait::async_trait;
use common::{
    models::{CoinRecord, MarketQuery},
    Error, Result,
};
use connectors::MarketDataSource;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// How the ticker endpoint answers for a coin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerReply {
    /// 2xx response
    Listed,
    /// Non-success status
    Missing,
    /// Transport failure
    Unreachable,
    /// Request could not be built
    Unbuildable,
}

/// Blocks `list_markets` until released, to hold a cycle in flight
#[derive(Debug, Default)]
pub struct ListingGate {
    pub entered: Notify,
    pub release: Notify,
}

#[derive(Default)]
pub struct StubSource {
    listing: Option<Vec<CoinRecord>>,
    tickers: HashMap<String, TickerReply>,
    details: HashMap<String, serde_json::Value>,
    detail_delays: HashMap<String, Duration>,
    gate: Option<Arc<ListingGate>>,
    calls: Mutex<Vec<String>>,
}

impl StubSource {
    /// Listing fails with a non-2xx status until `with_listing` is called
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(mut self, coins: Vec<CoinRecord>) -> Self {
        self.listing = Some(coins);
        self
    }

    pub fn with_ticker(mut self, coin_id: &str, reply: TickerReply) -> Self {
        self.tickers.insert(coin_id.to_string(), reply);
        self
    }

    pub fn with_detail(mut self, coin_id: &str, detail: serde_json::Value) -> Self {
        self.details.insert(coin_id.to_string(), detail);
        self
    }

    pub fn with_detail_delay(mut self, coin_id: &str, delay: Duration) -> Self {
        self.detail_delays.insert(coin_id.to_string(), delay);
        self
    }

    pub fn with_gate(mut self, gate: Arc<ListingGate>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl MarketDataSource for StubSource {
    async fn list_markets(&self, query: &MarketQuery) -> Result<Vec<CoinRecord>> {
        self.record(format!("markets:{}", query.category.as_deref().unwrap_or("")));
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        self.listing
            .clone()
            .ok_or_else(|| Error::FetchError("CoinGecko API error: 503 Service Unavailable".to_string()))
    }

    async fn has_exchange_ticker(&self, exchange_id: &str, coin_id: &str) -> Result<bool> {
        self.record(format!("tickers:{}:{}", exchange_id, coin_id));
        match self.tickers.get(coin_id).copied().unwrap_or(TickerReply::Missing) {
            TickerReply::Listed => Ok(true),
            TickerReply::Missing => Ok(false),
            TickerReply::Unreachable => Err(Error::FetchError("connection refused".to_string())),
            TickerReply::Unbuildable => Err(Error::InvalidRequest("relative URL without a base".to_string())),
        }
    }

    async fn coin_detail(&self, coin_id: &str) -> Result<serde_json::Value> {
        self.record(format!("detail:{}", coin_id));
        if let Some(delay) = self.detail_delays.get(coin_id) {
            tokio::time::sleep(*delay).await;
        }
        self.details
            .get(coin_id)
            .cloned()
            .ok_or_else(|| Error::FetchError("CoinGecko API error: 404 Not Found".to_string()))
    }
}

pub fn coin(id: &str, symbol: &str, name: &str, market_cap: f64) -> CoinRecord {
    CoinRecord {
        id: id.to_string(),
        symbol: symbol.to_string(),
        name: name.to_string(),
        image: format!("https://assets.coingecko.com/coins/images/{}.png", id),
        current_price: Some(0.25),
        market_cap: Some(market_cap),
        price_change_percentage_24h: Some(3.21),
        categories: None,
    }
}
