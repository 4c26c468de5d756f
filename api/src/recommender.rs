use common::{
    models::{CoinRecord, ExchangeSuggestion, Venue},
    ChainProfile, Result,
};
use connectors::{coingecko::token_address, MarketDataSource};
use std::sync::Arc;
use tracing::{debug, warn};

/// Hard cap on suggestions per coin
pub const MAX_SUGGESTIONS: usize = 2;

/// Suggests where a coin can be traded. Lookups are best effort: a failed
/// lookup degrades the suggestion, it never fails the coin.
pub struct ExchangeRecommender {
    source: Arc<dyn MarketDataSource>,
    profile: ChainProfile,
}

impl ExchangeRecommender {
    pub fn new(source: Arc<dyn MarketDataSource>, profile: ChainProfile) -> Self {
        Self { source, profile }
    }

    pub async fn recommend(&self, coin: &CoinRecord) -> Vec<ExchangeSuggestion> {
        match self.lookup(coin).await {
            Ok(suggestions) => suggestions,
            Err(e) => {
                warn!("Exchange lookup for {} failed, using defaults: {}", coin.id, e);
                self.fallback()
            }
        }
    }

    /// Static suggestions that do not depend on any lookup
    pub fn fallback(&self) -> Vec<ExchangeSuggestion> {
        self.profile
            .fallback_venues()
            .iter()
            .map(Venue::fallback)
            .collect()
    }

    async fn lookup(&self, coin: &CoinRecord) -> Result<Vec<ExchangeSuggestion>> {
        let cex = if self.listed_on_primary(coin).await? {
            self.profile.primary_cex
        } else {
            self.profile.secondary_cex
        };

        let mut suggestions = vec![cex.suggest(&coin.symbol, "")];

        let address = self.resolve_address(&coin.id).await;
        let dex = self.profile.dex_for(&coin.symbol);
        suggestions.push(dex.suggest(&coin.symbol, &address));

        suggestions.truncate(MAX_SUGGESTIONS);
        Ok(suggestions)
    }

    /// Only a request that cannot be built is an error; any answer other
    /// than success means "not listed".
    async fn listed_on_primary(&self, coin: &CoinRecord) -> Result<bool> {
        let exchange = self.profile.primary_cex;
        match self.source.has_exchange_ticker(exchange.id(), &coin.id).await {
            Ok(listed) => Ok(listed),
            Err(e) if e.is_invalid_request() => Err(e),
            Err(e) => {
                debug!("{} ticker check for {} failed: {}", exchange, coin.id, e);
                Ok(false)
            }
        }
    }

    async fn resolve_address(&self, coin_id: &str) -> String {
        let placeholder = self.profile.placeholder_address;
        match self.source.coin_detail(coin_id).await {
            Ok(detail) => token_address(&detail, self.profile.address_pointer)
                .unwrap_or_else(|| placeholder.to_string()),
            Err(e) => {
                debug!("Contract address lookup for {} failed: {}", coin_id, e);
                placeholder.to_string()
            }
        }
    }
}
