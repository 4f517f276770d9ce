//! Runs the page scanner over a batch of URLs and merges the results.
//!
//! URLs are scanned concurrently through a bounded buffered stream. Scans
//! only return token lists; this task is the single writer into the
//! [`ParameterSet`]. A failing URL is recorded, and never stops
//! the rest of the batch.

use crate::config::ScanConfig;
use crate::error::FetchResult;
use crate::scanner::PageScanner;
use crate::types::{ParameterSet, ScanReport, UrlFailure};
use futures::stream::{self, StreamExt};

/// Drives a scan run over many URLs.
#[derive(Clone, Debug)]
pub struct Aggregator {
    scanner: PageScanner,
    concurrency: usize,
}

impl Aggregator {
    pub fn new(config: &ScanConfig) -> FetchResult<Self> {
        Ok(Self::with_scanner(PageScanner::new(config)?, config))
    }

    pub fn with_scanner(scanner: PageScanner, config: &ScanConfig) -> Self {
        Self {
            scanner,
            concurrency: config.concurrency.max(1),
        }
    }

    /// Scan every URL and return the merged parameter set and any failures.
    ///
    /// URLs are fetched exactly as given; an empty or malformed entry fails
    /// the fetch and is recorded under its original string.
    pub async fn run<I, S>(&self, urls: I) -> ScanReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let urls: Vec<String> = urls
            .into_iter()
            .map(|u| u.as_ref().to_string())
            .collect();

        tracing::info!(
            "scanning {} URLs (concurrency {})",
            urls.len(),
            self.concurrency
        );

        let mut scans = stream::iter(urls.into_iter().enumerate())
            .map(|(idx, url)| async move {
                let result = self.scanner.scan_url(&url).await;
                (idx, url, result)
            })
            .buffer_unordered(self.concurrency);

        let mut parameters = ParameterSet::new();
        let mut failures: Vec<(usize, UrlFailure)> = Vec::new();

        while let Some((idx, url, result)) = scans.next().await {
            match result {
                Ok(tokens) => {
                    let seen = tokens.len();
                    let added = parameters.merge(tokens);
                    tracing::debug!("{url}: {seen} tokens, {added} new");
                }
                Err(error) => {
                    tracing::debug!("could not process URL {url}: {error}");
                    failures.push((idx, UrlFailure { url, error }));
                }
            }
        }

        failures.sort_by_key(|(idx, _)| *idx);

        tracing::info!(
            "collected {} parameter names, {} URLs failed",
            parameters.len(),
            failures.len()
        );

        ScanReport {
            parameters,
            failures: failures.into_iter().map(|(_, f)| f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FetchError, ScanError};

    #[tokio::test]
    async fn test_empty_input() {
        let agg = Aggregator::new(&ScanConfig::default()).unwrap();
        let report = agg.run(Vec::<String>::new()).await;
        assert!(report.parameters.is_empty());
        assert!(report.failures.is_empty());
    }

    #[tokio::test]
    async fn test_blank_entries_fail_fetch() {
        let agg = Aggregator::new(&ScanConfig::default()).unwrap();
        let report = agg.run(["", "   "]).await;
        let urls: Vec<&str> = report.failures.iter().map(|f| f.url.as_str()).collect();
        assert_eq!(urls, vec!["", "   "]);
        assert!(report
            .failures
            .iter()
            .all(|f| matches!(f.error, ScanError::Fetch(FetchError::InvalidUrl { .. }))));
    }

    #[tokio::test]
    async fn test_malformed_urls_recorded_in_order() {
        let agg = Aggregator::new(&ScanConfig::default()).unwrap();
        let report = agg.run(["nope", "  also nope  ", "still:nope:"]).await;
        assert!(report.parameters.is_empty());
        let urls: Vec<&str> = report.failures.iter().map(|f| f.url.as_str()).collect();
        assert_eq!(urls, vec!["nope", "  also nope  ", "still:nope:"]);
        assert!(report
            .failures
            .iter()
            .all(|f| matches!(f.error, ScanError::Fetch(_))));
        assert!(matches!(
            report.failures[0].error,
            ScanError::Fetch(FetchError::InvalidUrl { .. })
        ));
    }
}
