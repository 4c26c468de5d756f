use chrono::{DateTime, Utc};
use common::models::{DisplayEntry, PageSnapshot, ViewState};
use tokio::sync::RwLock;
use tracing::debug;

/// Holds the page as last rendered. Every transition replaces state
/// wholesale so exactly one slot is visible and at most one metadata
/// block exists.
#[derive(Debug, Default)]
pub struct PageStore {
    page: RwLock<PageSnapshot>,
}

impl PageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the loading slot
    pub async fn begin_cycle(&self) {
        let mut page = self.page.write().await;
        page.state = ViewState::Loading;
    }

    /// Replace the cards and metadata and show the content slot
    pub async fn publish(
        &self,
        cards: Vec<DisplayEntry>,
        metadata: serde_json::Value,
        updated_at: DateTime<Utc>,
    ) {
        debug!("Publishing {} cards", cards.len());

        let mut page = self.page.write().await;
        page.cards = cards;
        page.metadata = Some(metadata);
        page.updated_at = Some(updated_at);
        page.last_error = None;
        page.state = ViewState::Content;
    }

    /// Show the error slot. Cards of the last good cycle stay stored but hidden.
    pub async fn fail(&self, message: impl Into<String>) {
        let mut page = self.page.write().await;
        page.last_error = Some(message.into());
        page.state = ViewState::Error;
    }

    pub async fn snapshot(&self) -> PageSnapshot {
        self.page.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::models::CoinRecord;
    use serde_json::json;

    fn card(rank: usize, id: &str) -> DisplayEntry {
        DisplayEntry {
            rank,
            coin: CoinRecord {
                id: id.to_string(),
                symbol: id.to_string(),
                name: id.to_string(),
                image: String::new(),
                current_price: Some(0.1),
                market_cap: Some(1000.0),
                price_change_percentage_24h: Some(-1.5),
                categories: None,
            },
            exchanges: Vec::new(),
        }
    }

    #[tokio::test]
    async fn starts_loading_with_nothing_to_show() {
        let store = PageStore::new();
        let page = store.snapshot().await;
        assert!(page.is_loading());
        assert!(page.visible_cards().is_empty());
        assert!(page.metadata.is_none());
        assert!(page.updated_at.is_none());
    }

    #[tokio::test]
    async fn publish_replaces_previous_cycle() {
        let store = PageStore::new();
        store
            .publish(vec![card(1, "a"), card(2, "b")], json!({ "n": 1 }), Utc::now())
            .await;
        store.begin_cycle().await;
        assert!(store.snapshot().await.is_loading());

        store.publish(vec![card(1, "c")], json!({ "n": 2 }), Utc::now()).await;

        let page = store.snapshot().await;
        assert!(page.is_content());
        assert_eq!(page.visible_cards().len(), 1);
        assert_eq!(page.cards[0].coin.id, "c");
        assert_eq!(page.metadata, Some(json!({ "n": 2 })));
    }

    #[tokio::test]
    async fn failure_hides_but_keeps_stale_cards() {
        let store = PageStore::new();
        store.publish(vec![card(1, "a")], json!({}), Utc::now()).await;
        store.begin_cycle().await;
        store.fail("CoinGecko API error: 429").await;

        let page = store.snapshot().await;
        assert!(page.is_error());
        assert!(!page.is_loading());
        assert!(!page.is_content());
        assert!(page.visible_cards().is_empty());
        assert_eq!(page.cards.len(), 1);
        assert_eq!(page.last_error.as_deref(), Some("CoinGecko API error: 429"));

        store.publish(Vec::new(), json!({}), Utc::now()).await;
        assert!(store.snapshot().await.last_error.is_none());
    }
}
