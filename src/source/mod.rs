//! Quote sources.
//!
//! A `QuoteSource` hands back the raw body of one API response. The HTTP
//! implementation lives in `client`; tests substitute scripted sources.

pub mod client;

use async_trait::async_trait;
use thiserror::Error;

pub use client::HttpQuoteSource;

/// Failure while fetching or decoding one API response.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, timeout, body read).
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{url} responded with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The body was not a JSON list of quote objects.
    #[error("response body is not a quote list")]
    Parse(#[from] serde_json::Error),
}

impl FetchError {
    /// Returns true for transport and HTTP status failures.
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Transport { .. } | FetchError::Status { .. })
    }
}

/// Something that can be asked for a batch of quotes.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Where the quotes come from, for log messages.
    fn endpoint(&self) -> &str;

    /// Fetch one response body.
    async fn fetch(&self) -> Result<String, FetchError>;
}
