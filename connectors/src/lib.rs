pub mod coingecko;
pub mod config;

use async_trait::async_trait;
use common::{
    models::{CoinRecord, MarketQuery},
    Result,
};

pub use config::CoinGeckoConfig;

/// Trait defining the interface for market data API clients
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch one page of the market listing
    async fn list_markets(&self, query: &MarketQuery) -> Result<Vec<CoinRecord>>;

    /// Whether `exchange_id` answers its ticker listing for `coin_id` successfully.
    /// A non-success status is `Ok(false)`; transport failures are errors.
    async fn has_exchange_ticker(&self, exchange_id: &str, coin_id: &str) -> Result<bool>;

    /// Raw coin detail payload
    async fn coin_detail(&self, coin_id: &str) -> Result<serde_json::Value>;
}
