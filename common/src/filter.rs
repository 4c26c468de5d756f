use crate::models::CoinRecord;
use crate::Error;
use std::str::FromStr;

/// Category tag that always qualifies a coin
const MEME_CATEGORY: &str = "Meme";
/// Name fragment that always qualifies a coin
const MEME_NAME_FRAGMENT: &str = "meme";

/// Local narrowing applied after the market listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemeFilter {
    /// Trust the listing category, keep everything
    CategoryOnly,
    /// Keep coins named like memes, with a keyword in their id, or tagged `Meme`
    Keywords(Vec<String>),
}

impl MemeFilter {
    pub fn keywords(keywords: &[&str]) -> Self {
        MemeFilter::Keywords(keywords.iter().map(|k| k.to_string()).collect())
    }

    pub fn matches(&self, coin: &CoinRecord) -> bool {
        match self {
            MemeFilter::CategoryOnly => true,
            MemeFilter::Keywords(keywords) => {
                coin.name.to_lowercase().contains(MEME_NAME_FRAGMENT)
                    || keywords.iter().any(|k| coin.id.contains(k.as_str()))
                    || coin.has_category(MEME_CATEGORY)
            }
        }
    }

    /// Keeps matching coins in their original order
    pub fn apply(&self, coins: Vec<CoinRecord>) -> Vec<CoinRecord> {
        coins.into_iter().filter(|coin| self.matches(coin)).collect()
    }

    /// Resolves a `MEME_FILTER` override against the profile's keyword list
    pub fn from_mode(mode: &str, profile_default: &MemeFilter) -> crate::Result<Self> {
        match mode.parse::<FilterMode>()? {
            FilterMode::Category => Ok(MemeFilter::CategoryOnly),
            FilterMode::Keyword => match profile_default {
                MemeFilter::Keywords(_) => Ok(profile_default.clone()),
                MemeFilter::CategoryOnly => Ok(MemeFilter::Keywords(Vec::new())),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterMode {
    Category,
    Keyword,
}

impl FromStr for FilterMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "category" | "none" => Ok(FilterMode::Category),
            "keyword" | "keywords" => Ok(FilterMode::Keyword),
            other => Err(Error::ConfigError(format!(
                "Unknown filter mode: {}. Supported modes: category, keyword",
                other
            ))),
        }
    }
}
