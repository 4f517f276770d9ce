//! Async HTTP fetcher wrapping reqwest.
//!
//! One plain GET per call, no retries and no caching. Non-2xx answers are
//! failures. The response is fully drained or dropped before the call
//! returns, so the pooled connection is released on every path.

use crate::config::ScanConfig;
use crate::error::{FetchError, FetchResult};
use std::time::Duration;

/// Redirect hops followed before giving up.
const MAX_REDIRECTS: usize = 5;

/// HTTP client shared by every fetch in a run.
#[derive(Clone, Debug)]
pub struct Fetcher {
    client: reqwest::Client,
    max_body_bytes: usize,
}

impl Fetcher {
    /// Build a fetcher from the run configuration.
    pub fn new(config: &ScanConfig) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// GET `url` and return the full body.
    pub async fn fetch(&self, url: &str) -> FetchResult<Vec<u8>> {
        let parsed = url::Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let mut resp = self.client.get(parsed).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if resp
            .content_length()
            .is_some_and(|len| len > self.max_body_bytes as u64)
        {
            return Err(self.too_large(url));
        }

        let mut body = Vec::new();
        while let Some(chunk) = resp.chunk().await? {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(self.too_large(url));
            }
            body.extend_from_slice(&chunk);
        }

        tracing::debug!("fetched {} bytes from {url}", body.len());
        Ok(body)
    }

    fn too_large(&self, url: &str) -> FetchError {
        FetchError::TooLarge {
            url: url.to_string(),
            max: self.max_body_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_creation() {
        let fetcher = Fetcher::new(&ScanConfig::default()).unwrap();
        assert_eq!(fetcher.max_body_bytes, ScanConfig::default().max_body_bytes);
    }

    #[tokio::test]
    async fn test_malformed_url_is_fetch_error() {
        let fetcher = Fetcher::new(&ScanConfig::default()).unwrap();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_relative_url_is_fetch_error() {
        let fetcher = Fetcher::new(&ScanConfig::default()).unwrap();
        assert!(fetcher.fetch("/app.js").await.is_err());
    }
}
