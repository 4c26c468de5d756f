use crate::models::{CoinRecord, ExchangeSuggestion};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One ranked card of the board
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayEntry {
    /// 1-based position after filtering
    pub rank: usize,
    pub coin: CoinRecord,
    /// At most one centralized and one decentralized suggestion
    pub exchanges: Vec<ExchangeSuggestion>,
}

/// Which of the three page slots is visible
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewState {
    #[default]
    Loading,
    Error,
    Content,
}

impl std::fmt::Display for ViewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewState::Loading => write!(f, "loading"),
            ViewState::Error => write!(f, "error"),
            ViewState::Content => write!(f, "content"),
        }
    }
}

/// Everything the page renderer needs
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageSnapshot {
    pub state: ViewState,
    /// Cards of the last successful cycle
    pub cards: Vec<DisplayEntry>,
    /// JSON-LD block for the page head
    pub metadata: Option<serde_json::Value>,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

impl PageSnapshot {
    pub fn is_loading(&self) -> bool {
        self.state == ViewState::Loading
    }

    pub fn is_error(&self) -> bool {
        self.state == ViewState::Error
    }

    pub fn is_content(&self) -> bool {
        self.state == ViewState::Content
    }

    /// Cards that should be visible right now
    pub fn visible_cards(&self) -> &[DisplayEntry] {
        if self.is_content() {
            &self.cards
        } else {
            &[]
        }
    }
}
