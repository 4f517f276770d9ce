//! paramram — harvest candidate HTTP parameter names from web pages.
//!
//! Fetches each URL, scans `name`/`id`/`class` attribute values and the
//! bodies of linked scripts and stylesheets for identifier-shaped tokens,
//! filters out noise, and merges everything into one deduplicated set.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod scanner;
pub mod types;

pub use aggregator::Aggregator;
pub use config::ScanConfig;
pub use error::{FetchError, ParseError, ScanError};
pub use fetcher::Fetcher;
pub use filter::{extract_candidates, filter_candidates, is_parameter_name, parameter_tokens};
pub use scanner::{extract_attribute_tokens, linked_resource_urls, PageScanner};
pub use types::{ParameterSet, ScanReport, UrlFailure};
