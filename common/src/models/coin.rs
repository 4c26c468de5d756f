use serde::{Deserialize, Serialize};

/// Coin entry as returned by the `/coins/markets` listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoinRecord {
    /// Stable identifier (e.g., "dogecoin", "dogwifcoin")
    pub id: String,
    /// Ticker symbol, lowercase as delivered upstream (e.g., "doge")
    pub symbol: String,
    /// Human-readable name (e.g., "Dogecoin")
    pub name: String,
    /// Logo URL
    #[serde(default)]
    pub image: String,
    /// Price in the quote currency
    #[serde(default)]
    pub current_price: Option<f64>,
    /// Market capitalisation in the quote currency
    #[serde(default)]
    pub market_cap: Option<f64>,
    /// Signed 24h change in percent
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    /// Category tags, only present on some payloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

impl CoinRecord {
    pub fn has_category(&self, tag: &str) -> bool {
        self.categories
            .as_ref()
            .map_or(false, |categories| categories.iter().any(|c| c == tag))
    }
}

/// Query parameters for the market listing endpoint
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MarketQuery {
    pub vs_currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub order: String,
    pub per_page: usize,
    pub page: u32,
    pub sparkline: bool,
    pub price_change_percentage: String,
}

impl MarketQuery {
    /// Page size of a single listing request
    pub const PAGE_SIZE: usize = 20;

    /// Top coins by market cap in USD, optionally scoped to a category
    pub fn top_by_market_cap(category: Option<&str>) -> Self {
        Self {
            vs_currency: "usd".to_string(),
            category: category.map(str::to_string),
            order: "market_cap_desc".to_string(),
            per_page: Self::PAGE_SIZE,
            page: 1,
            sparkline: false,
            price_change_percentage: "24h".to_string(),
        }
    }
}
