use crate::filter::MemeFilter;
use crate::models::{MarketQuery, Venue};
use crate::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Chain flavour of the board
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Generic,
    Bnb,
    Solana,
}

impl FromStr for Chain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generic" | "all" => Ok(Chain::Generic),
            "bnb" | "bsc" => Ok(Chain::Bnb),
            "solana" | "sol" => Ok(Chain::Solana),
            other => Err(Error::ConfigError(format!(
                "Unknown chain: {}. Supported chains: generic, bnb, solana",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Chain::Generic => write!(f, "generic"),
            Chain::Bnb => write!(f, "bnb"),
            Chain::Solana => write!(f, "solana"),
        }
    }
}

/// Symbol fragments that route the generic board to PancakeSwap
const BSC_SYMBOL_HINTS: &[&str] = &["bnb", "cake", "bsc"];

/// Everything that differs between chain flavours
#[derive(Debug, Clone, PartialEq)]
pub struct ChainProfile {
    pub chain: Chain,
    /// Category passed to the market listing
    pub category: Option<String>,
    pub filter: MemeFilter,
    /// JSON pointer to the token contract address in the coin detail payload
    pub address_pointer: &'static str,
    /// Used when no contract address can be resolved
    pub placeholder_address: &'static str,
    pub primary_cex: Venue,
    pub secondary_cex: Venue,
    /// Page title and schema name
    pub title: &'static str,
    pub description: &'static str,
    /// Prefix of the coin image alt text
    pub alt_prefix: &'static str,
    pub exchange_heading: &'static str,
}

impl ChainProfile {
    pub fn for_chain(chain: Chain) -> Self {
        match chain {
            Chain::Generic => Self {
                chain,
                category: Some("meme-token".to_string()),
                filter: MemeFilter::CategoryOnly,
                address_pointer: "/detail_platforms/ethereum/contract_address",
                placeholder_address: "0x...",
                primary_cex: Venue::Binance,
                secondary_cex: Venue::Okx,
                title: "Top 20 Meme Coins Market Cap Ranking",
                description: "Top 20 meme cryptocurrencies ranked by market cap",
                alt_prefix: "Meme",
                exchange_heading: "Suggested exchanges",
            },
            Chain::Bnb => Self {
                chain,
                category: Some("binance-smart-chain".to_string()),
                filter: MemeFilter::keywords(&["floki", "baby-doge", "cheems", "czs-dog"]),
                address_pointer: "/platforms/binance-smart-chain",
                placeholder_address: "0x...",
                primary_cex: Venue::Binance,
                secondary_cex: Venue::Okx,
                title: "Top 20 BNB Meme Coins Market Cap Ranking",
                description: "Top 20 meme cryptocurrencies on BNB Chain ranked by market cap",
                alt_prefix: "BNB Meme",
                exchange_heading: "Suggested exchanges (BNB Chain)",
            },
            Chain::Solana => Self {
                chain,
                category: Some("solana-ecosystem".to_string()),
                filter: MemeFilter::keywords(&["wif", "bonk", "popcat"]),
                address_pointer: "/platforms/solana",
                placeholder_address: "Ez...",
                primary_cex: Venue::Binance,
                secondary_cex: Venue::Okx,
                title: "Top 20 Solana Meme Coins Market Cap Ranking",
                description: "Top 20 meme cryptocurrencies on Solana ranked by market cap",
                alt_prefix: "Solana Meme",
                exchange_heading: "Suggested exchanges (Solana)",
            },
        }
    }

    /// Replaces the local filter policy
    pub fn with_filter(mut self, filter: MemeFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn market_query(&self) -> MarketQuery {
        MarketQuery::top_by_market_cap(self.category.as_deref())
    }

    /// Decentralized venue for a coin
    pub fn dex_for(&self, symbol: &str) -> Venue {
        match self.chain {
            Chain::Bnb => Venue::PancakeSwap,
            Chain::Solana => Venue::Raydium,
            Chain::Generic => {
                let symbol = symbol.to_lowercase();
                if BSC_SYMBOL_HINTS.iter().any(|hint| symbol.contains(hint)) {
                    Venue::PancakeSwap
                } else {
                    Venue::Uniswap
                }
            }
        }
    }

    /// Static venues used when a coin's lookups cannot run at all
    pub fn fallback_venues(&self) -> [Venue; 2] {
        let dex = match self.chain {
            Chain::Bnb => Venue::PancakeSwap,
            Chain::Solana => Venue::Raydium,
            Chain::Generic => Venue::Uniswap,
        };
        [self.primary_cex, dex]
    }

    /// Canonical lookup page of a coin, used by the schema block
    pub fn coin_page_url(&self, coin_id: &str) -> String {
        format!("https://www.coingecko.com/en/coins/{}", coin_id)
    }
}

impl Default for ChainProfile {
    fn default() -> Self {
        Self::for_chain(Chain::Generic)
    }
}
