use common::{Chain, ChainProfile, Error, MemeFilter, Result};
use std::time::Duration;

/// Default refresh period: one hour
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 3_600_000;
/// Default number of coins enriched at the same time
pub const DEFAULT_ENRICH_CONCURRENCY: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // Unset or unparsable values fall back to the defaults
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            host: lookup("API_HOST").unwrap_or(defaults.host),
            port: lookup("API_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
        }
    }
}

/// What the board shows and how often it refreshes
#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub chain: Chain,
    /// `MEME_FILTER` override, profile default when unset
    pub filter_mode: Option<String>,
    pub refresh_interval: Duration,
    pub enrich_concurrency: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            chain: Chain::Generic,
            filter_mode: None,
            refresh_interval: Duration::from_millis(DEFAULT_REFRESH_INTERVAL_MS),
            enrich_concurrency: DEFAULT_ENRICH_CONCURRENCY,
        }
    }
}

impl BoardConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let chain = match lookup("MEME_CHAIN") {
            Some(raw) => raw.parse()?,
            None => defaults.chain,
        };

        let refresh_interval = match lookup("MEME_REFRESH_INTERVAL_MS") {
            Some(raw) => {
                let ms = raw.parse::<u64>().map_err(|e| {
                    Error::ConfigError(format!("Invalid MEME_REFRESH_INTERVAL_MS '{}': {}", raw, e))
                })?;
                if ms == 0 {
                    return Err(Error::ConfigError(
                        "MEME_REFRESH_INTERVAL_MS must be greater than zero".to_string(),
                    ));
                }
                Duration::from_millis(ms)
            }
            None => defaults.refresh_interval,
        };

        let enrich_concurrency = match lookup("MEME_ENRICH_CONCURRENCY") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(Error::ConfigError(format!(
                        "Invalid MEME_ENRICH_CONCURRENCY '{}': expected a positive integer",
                        raw
                    )))
                }
            },
            None => defaults.enrich_concurrency,
        };

        Ok(Self {
            chain,
            filter_mode: lookup("MEME_FILTER").filter(|mode| !mode.trim().is_empty()),
            refresh_interval,
            enrich_concurrency,
        })
    }

    /// Chain profile with the filter override applied
    pub fn profile(&self) -> Result<ChainProfile> {
        let profile = ChainProfile::for_chain(self.chain);
        match &self.filter_mode {
            Some(mode) => {
                let filter = MemeFilter::from_mode(mode, &profile.filter)?;
                Ok(profile.with_filter(filter))
            }
            None => Ok(profile),
        }
    }
}
