//! Tunables for a scan run.

use serde::{Deserialize, Serialize};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default number of top-level URLs scanned at once.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Default number of linked resources fetched at once for a single page.
pub const DEFAULT_RESOURCE_CONCURRENCY: usize = 8;

/// Default response body cap (5 MB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

/// Configuration shared by the fetcher, scanner and aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Timeout applied to every outbound request, in milliseconds.
    pub timeout_ms: u64,
    /// Maximum top-level URLs in flight.
    pub concurrency: usize,
    /// Maximum linked-resource fetches in flight per page.
    pub resource_concurrency: usize,
    /// Bodies larger than this are rejected.
    pub max_body_bytes: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            concurrency: DEFAULT_CONCURRENCY,
            resource_concurrency: DEFAULT_RESOURCE_CONCURRENCY,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ScanConfig {
    /// Clamp concurrency knobs to at least one so buffered streams make progress.
    pub fn normalized(mut self) -> Self {
        self.concurrency = self.concurrency.max(1);
        self.resource_concurrency = self.resource_concurrency.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.concurrency, 10);
        assert_eq!(config.resource_concurrency, 8);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: ScanConfig = serde_json::from_str(r#"{"timeout_ms": 2500}"#).unwrap();
        assert_eq!(config.timeout_ms, 2500);
        assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    fn test_normalized_clamps_zero() {
        let config = ScanConfig {
            concurrency: 0,
            resource_concurrency: 0,
            ..ScanConfig::default()
        }
        .normalized();
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.resource_concurrency, 1);
    }
}
