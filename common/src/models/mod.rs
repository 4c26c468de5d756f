mod coin;
mod exchange;
mod page;

pub use coin::{CoinRecord, MarketQuery};
pub use exchange::{ExchangeKind, ExchangeSuggestion, Venue};
pub use page::{DisplayEntry, PageSnapshot, ViewState};
