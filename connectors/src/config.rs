use common::{Error, Result};
use std::time::Duration;

const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Configuration for the CoinGecko client
#[derive(Debug, Clone)]
pub struct CoinGeckoConfig {
    /// API base URL, without trailing slash
    pub base_url: String,
    /// Demo API key, sent as `x-cg-demo-api-key`
    pub api_key: Option<String>,
    /// Per-request timeout; requests may hang indefinitely when unset
    pub timeout: Option<Duration>,
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            timeout: None,
        }
    }
}

impl CoinGeckoConfig {
    /// Create a new client configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("COINGECKO_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_key = std::env::var("COINGECKO_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());
        let timeout = match std::env::var("COINGECKO_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs = raw.parse::<u64>().map_err(|e| {
                    Error::ConfigError(format!("Invalid COINGECKO_TIMEOUT_SECS '{}': {}", raw, e))
                })?;
                Some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        Ok(Self {
            base_url,
            api_key,
            timeout,
        })
    }
}
