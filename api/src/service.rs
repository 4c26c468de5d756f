use crate::recommender::ExchangeRecommender;
use crate::render;
use chrono::Utc;
use common::{
    models::{CoinRecord, DisplayEntry, PageSnapshot},
    ChainProfile, Error, Result,
};
use connectors::MarketDataSource;
use futures::stream::{self, StreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Service running the fetch, filter, enrich and publish cycle
pub struct MemeService {
    /// Market data API client
    source: Arc<dyn MarketDataSource>,
    /// Chain specific query, filter and exchange table
    profile: ChainProfile,
    recommender: ExchangeRecommender,
    /// Page state shown to visitors
    store: Arc<store::PageStore>,
    /// Coins enriched at the same time
    enrich_concurrency: usize,
    /// Set while a cycle runs
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the cycle ends, however it ends
struct CycleGuard<'a>(&'a AtomicBool);

impl<'a> CycleGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| CycleGuard(flag))
    }
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl MemeService {
    pub fn new(
        source: Arc<dyn MarketDataSource>,
        profile: ChainProfile,
        store: Arc<store::PageStore>,
        enrich_concurrency: usize,
    ) -> Self {
        let recommender = ExchangeRecommender::new(source.clone(), profile.clone());
        Self {
            source,
            profile,
            recommender,
            store,
            enrich_concurrency: enrich_concurrency.max(1),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn profile(&self) -> &ChainProfile {
        &self.profile
    }

    pub fn is_refreshing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn snapshot(&self) -> PageSnapshot {
        self.store.snapshot().await
    }

    /// Current page as HTML
    pub async fn page_html(&self) -> String {
        render::render_page(&self.profile, &self.store.snapshot().await)
    }

    /// Run one full cycle and return the number of published cards.
    /// Fails with `RefreshInProgress` when another cycle is still running.
    ///
    /// The cycle runs on its own task: dropping the returned future stops
    /// waiting for it but the cycle still ends in `publish` or `fail`.
    pub async fn refresh(self: &Arc<Self>) -> Result<usize> {
        let service = Arc::clone(self);
        tokio::spawn(async move { service.run_cycle().await })
            .await
            .map_err(|e| Error::InternalError(format!("Refresh task failed: {}", e)))?
    }

    async fn run_cycle(&self) -> Result<usize> {
        let _guard = CycleGuard::acquire(&self.in_flight).ok_or(Error::RefreshInProgress)?;

        info!("Refreshing {} meme board", self.profile.chain);
        self.store.begin_cycle().await;

        let query = self.profile.market_query();
        let mut coins = match self.source.list_markets(&query).await {
            Ok(coins) => coins,
            Err(e) => {
                error!("Failed to load market listing: {}", e);
                self.store.fail(e.to_string()).await;
                return Err(e);
            }
        };
        coins.truncate(query.per_page);

        let fetched = coins.len();
        let coins = self.profile.filter.apply(coins);
        debug!("Kept {} of {} listed coins", coins.len(), fetched);

        let cards = self.enrich(coins).await;
        let count = cards.len();
        let metadata = render::schema_block(&self.profile, &cards);
        self.store.publish(cards, metadata, Utc::now()).await;

        info!("Published {} coins", count);
        Ok(count)
    }

    /// Look up exchanges for every coin. Lookups overlap up to the
    /// configured concurrency; results keep the listing order.
    async fn enrich(&self, coins: Vec<CoinRecord>) -> Vec<DisplayEntry> {
        stream::iter(coins.into_iter().enumerate())
            .map(|(index, coin)| async move {
                let exchanges = self.recommender.recommend(&coin).await;
                DisplayEntry {
                    rank: index + 1,
                    coin,
                    exchanges,
                }
            })
            .buffered(self.enrich_concurrency)
            .collect()
            .await
    }
}
