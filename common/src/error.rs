use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Market data API error: {0}")]
    FetchError(String),

    #[error("Parsing error: {0}")]
    ParseError(String),

    #[error("Request could not be built: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("A refresh cycle is already running")]
    RefreshInProgress,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl Error {
    /// Wraps a reqwest error, keeping requests that never left the client
    /// apart from transport failures.
    pub fn from_request(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Error::InvalidRequest(err.to_string())
        } else {
            Error::HttpError(err)
        }
    }

    /// True when the request could not even be issued.
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Error::InvalidRequest(_))
    }
}
