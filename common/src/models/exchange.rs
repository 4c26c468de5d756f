use serde::{Deserialize, Serialize};

/// Kind of trading venue
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ExchangeKind {
    #[serde(rename = "cex")]
    Centralized,
    #[serde(rename = "dex")]
    Decentralized,
}

impl std::fmt::Display for ExchangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExchangeKind::Centralized => write!(f, "cex"),
            ExchangeKind::Decentralized => write!(f, "dex"),
        }
    }
}

/// Venues that can be suggested for a coin
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Venue {
    #[serde(rename = "binance")]
    Binance,
    #[serde(rename = "okx")]
    Okx,
    #[serde(rename = "pancakeswap_v3")]
    PancakeSwap,
    #[serde(rename = "raydium")]
    Raydium,
    #[serde(rename = "uniswap")]
    Uniswap,
}

impl Venue {
    /// Identifier used by the market data API
    pub fn id(&self) -> &'static str {
        match self {
            Venue::Binance => "binance",
            Venue::Okx => "okx",
            Venue::PancakeSwap => "pancakeswap_v3",
            Venue::Raydium => "raydium",
            Venue::Uniswap => "uniswap",
        }
    }

    pub fn kind(&self) -> ExchangeKind {
        match self {
            Venue::Binance | Venue::Okx => ExchangeKind::Centralized,
            Venue::PancakeSwap | Venue::Raydium | Venue::Uniswap => ExchangeKind::Decentralized,
        }
    }

    /// Short name, used on the static fallback entries
    pub fn name(&self) -> &'static str {
        match self {
            Venue::Binance => "Binance",
            Venue::Okx => "OKX",
            Venue::PancakeSwap => "PancakeSwap",
            Venue::Raydium => "Raydium",
            Venue::Uniswap => "Uniswap",
        }
    }

    /// Name shown on coin-specific suggestions
    pub fn display_name(&self) -> &'static str {
        match self {
            Venue::PancakeSwap => "PancakeSwap (BNB DEX)",
            Venue::Raydium => "Raydium (Solana DEX)",
            Venue::Uniswap => "Uniswap (Ethereum DEX)",
            other => other.name(),
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Venue::Binance => "https://www.binance.com",
            Venue::Okx => "https://www.okx.com",
            Venue::PancakeSwap => "https://pancakeswap.finance/swap",
            Venue::Raydium => "https://raydium.io/swap/",
            Venue::Uniswap => "https://app.uniswap.org/swap",
        }
    }

    /// Generic trading page, not tied to any coin
    pub fn trading_page(&self) -> &'static str {
        match self {
            Venue::Binance => "https://www.binance.com/en/trade",
            Venue::Okx => "https://www.okx.com/trade-spot",
            dex => dex.base_url(),
        }
    }

    /// Deep link for a coin. Centralized venues link the USDT spot pair of
    /// `symbol`, decentralized venues swap into `token_address`.
    pub fn deep_link(&self, symbol: &str, token_address: &str) -> String {
        let symbol = symbol.to_uppercase();
        match self {
            Venue::Binance => format!("{}/en/trade/{}_USDT", self.base_url(), symbol),
            Venue::Okx => format!("{}/trade-spot/{}-USDT", self.base_url(), symbol),
            Venue::PancakeSwap => format!(
                "{}?outputCurrency={}&chain=bsc",
                self.base_url(),
                token_address
            ),
            Venue::Raydium => format!(
                "{}?inputMint=sol&outputMint={}",
                self.base_url(),
                token_address
            ),
            Venue::Uniswap => format!(
                "{}?outputCurrency={}&chain=mainnet",
                self.base_url(),
                token_address
            ),
        }
    }

    /// Coin-specific suggestion for this venue
    pub fn suggest(&self, symbol: &str, token_address: &str) -> ExchangeSuggestion {
        ExchangeSuggestion {
            kind: self.kind(),
            name: self.display_name().to_string(),
            url: self.base_url().to_string(),
            link: self.deep_link(symbol, token_address),
        }
    }

    /// Static suggestion pointing at the generic trading page
    pub fn fallback(&self) -> ExchangeSuggestion {
        ExchangeSuggestion {
            kind: self.kind(),
            name: self.name().to_string(),
            url: self.base_url().to_string(),
            link: self.trading_page().to_string(),
        }
    }
}

impl std::fmt::Display for Venue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// A suggested place to trade a coin
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExchangeSuggestion {
    #[serde(rename = "type")]
    pub kind: ExchangeKind,
    pub name: String,
    pub url: String,
    pub link: String,
}
