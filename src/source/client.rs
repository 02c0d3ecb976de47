//! HTTP quote source backed by reqwest.

use crate::source::{FetchError, QuoteSource};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Fetches quote lists with a plain GET against a fixed URL.
pub struct HttpQuoteSource {
    url: String,
    http_client: reqwest::Client,
}

impl HttpQuoteSource {
    /// Build a source for `url`. One client is shared by every attempt.
    pub fn new(url: impl Into<String>, timeout_seconds: u64) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(concat!("quotegrouper/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            url: url.into(),
            http_client,
        })
    }
}

#[async_trait]
impl QuoteSource for HttpQuoteSource {
    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<String, FetchError> {
        debug!("GET {}", self.url);

        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        debug!("{} -> {}", self.url, status);

        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status,
            });
        }

        response.text().await.map_err(|source| FetchError::Transport {
            url: self.url.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a single canned HTTP response on a random local port.
    async fn serve_once(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}/v1/quotes/", addr)
    }

    #[tokio::test]
    async fn test_fetch_returns_body_on_success() {
        let body = r#"[{"author":"Walt","quote":"Say my name."}]"#;
        let url = serve_once(format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        ))
        .await;

        let source = HttpQuoteSource::new(url.clone(), 5).unwrap();
        assert_eq!(source.endpoint(), url);

        assert_eq!(source.fetch().await.unwrap(), body);
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_status_error() {
        let url = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                .to_string(),
        )
        .await;

        let source = HttpQuoteSource::new(url, 5).unwrap();
        let err = source.fetch().await.unwrap_err();

        assert!(matches!(
            err,
            FetchError::Status { status, .. } if status == reqwest::StatusCode::INTERNAL_SERVER_ERROR
        ));
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = HttpQuoteSource::new(format!("http://{}/", addr), 5).unwrap();
        let err = source.fetch().await.unwrap_err();

        assert!(matches!(err, FetchError::Transport { .. }));
        assert!(err.is_network());
    }
}
