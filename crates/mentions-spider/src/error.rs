use reqwest::StatusCode;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the spider surfaces to its caller.
#[derive(Debug, Error)]
pub enum Error {
    /// There is no ticker data to filter mentions against.
    #[error("ticker catalog unavailable at {}: {reason}", path.display())]
    CatalogUnavailable { path: PathBuf, reason: &'static str },

    /// A request to one of the external providers failed.
    #[error("{provider} request failed for {target}: {failure}")]
    ProviderRequestFailed {
        provider: Provider,
        /// The exchange, subreddit or step the request was made for.
        target: String,
        #[source]
        failure: ProviderFailure,
    },

    /// Reading or writing a persisted file failed.
    #[error("storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: StorageFailure,
    },
}

impl Error {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: impl Into<StorageFailure>) -> Self {
        Error::Storage {
            path: path.into(),
            source: source.into(),
        }
    }

    pub(crate) fn provider(
        provider: Provider,
        target: impl Into<String>,
        failure: ProviderFailure,
    ) -> Self {
        Error::ProviderRequestFailed {
            provider,
            target: target.into(),
            failure,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provider {
    /// dumbstockapi.com
    TickerData,

    /// reddit
    Content,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::TickerData => f.write_str("ticker-data provider"),
            Provider::Content => f.write_str("content provider"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProviderFailure {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("authentication rejected ({0})")]
    Unauthorized(String),

    #[error("rate limited")]
    RateLimited,

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("malformed response: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum StorageFailure {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("missing column `{0}`")]
    MissingColumn(&'static str),
}
