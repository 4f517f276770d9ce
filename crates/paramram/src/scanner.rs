//! Page scanner: attribute values plus linked script/stylesheet bodies.
//!
//! For one fetched page the scanner walks every element, runs the candidate
//! regex over its `name`, `id` and `class` values, then fetches each
//! `<link href>` and `<script src>` target and scans the raw body the same
//! way. Linked resources are best-effort: a failed fetch contributes an empty
//! token list and never fails the page.
//!
//! `scraper::Html` is not `Send`, so the document is parsed and dropped
//! before any linked fetch is awaited.

use crate::config::ScanConfig;
use crate::error::{FetchResult, ParseError, ScanError};
use crate::fetcher::Fetcher;
use crate::filter::parameter_tokens;
use futures::stream::{self, StreamExt};
use scraper::{Html, Selector};
use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Attributes whose values are scanned on every element.
const SCANNED_ATTRIBUTES: &[&str] = &["name", "id", "class"];

/// Leading bytes inspected when deciding whether content is markup.
const SNIFF_LEN: usize = 1024;

fn any_element() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse("*").expect("valid selector"))
}

fn linked_resources() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse("link[href], script[src]").expect("valid selector"))
}

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16BE_BOM: [u8; 2] = [0xFE, 0xFF];

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

/// Decode a body as text. A UTF-16 BOM selects UTF-16, anything else is
/// read as lossy UTF-8.
fn decode_text(body: &[u8]) -> Cow<'_, str> {
    if let Some(rest) = body.strip_prefix(&UTF16LE_BOM) {
        return Cow::Owned(decode_utf16(rest, u16::from_le_bytes));
    }
    if let Some(rest) = body.strip_prefix(&UTF16BE_BOM) {
        return Cow::Owned(decode_utf16(rest, u16::from_be_bytes));
    }
    String::from_utf8_lossy(body.strip_prefix(&UTF8_BOM).unwrap_or(body))
}

/// Decode page bytes as text, rejecting content that is clearly binary.
///
/// UTF-16 pages carry NUL bytes by nature, so the NUL sniff only applies
/// when no UTF-16 BOM is present.
fn decode_markup(body: &[u8]) -> Result<Cow<'_, str>, ParseError> {
    let utf16 = body.starts_with(&UTF16LE_BOM) || body.starts_with(&UTF16BE_BOM);
    let head = &body[..body.len().min(SNIFF_LEN)];
    if !utf16 && head.contains(&0) {
        return Err(ParseError::Binary);
    }
    Ok(decode_text(body))
}

fn attribute_tokens(doc: &Html) -> Vec<String> {
    let mut tokens = Vec::new();
    for el in doc.select(any_element()) {
        for attr in SCANNED_ATTRIBUTES {
            if let Some(value) = el.value().attr(attr) {
                tokens.extend(parameter_tokens(value));
            }
        }
    }
    tokens
}

fn linked_urls(doc: &Html, page_url: &str) -> Vec<String> {
    let base = url::Url::parse(page_url).ok();
    let mut seen = HashSet::new();
    let mut urls = Vec::new();

    for el in doc.select(linked_resources()) {
        let attr = if el.value().name() == "link" { "href" } else { "src" };
        let Some(raw) = el.value().attr(attr).map(str::trim) else {
            continue;
        };
        if raw.is_empty() {
            continue;
        }

        let resolved = base
            .as_ref()
            .and_then(|b| b.join(raw).ok())
            .map(|u| u.to_string())
            .unwrap_or_else(|| raw.to_string());

        if seen.insert(resolved.clone()) {
            urls.push(resolved);
        }
    }

    urls
}

/// Tokens from the `name`/`id`/`class` attributes of every element in `html`.
pub fn extract_attribute_tokens(html: &str) -> Vec<String> {
    attribute_tokens(&Html::parse_document(html))
}

/// `<link href>` and `<script src>` targets in `html`, resolved against
/// `page_url` and deduplicated in document order.
pub fn linked_resource_urls(html: &str, page_url: &str) -> Vec<String> {
    linked_urls(&Html::parse_document(html), page_url)
}

/// Scans pages and their linked resources for parameter names.
#[derive(Clone, Debug)]
pub struct PageScanner {
    fetcher: Fetcher,
    resource_concurrency: usize,
}

impl PageScanner {
    pub fn new(config: &ScanConfig) -> FetchResult<Self> {
        Ok(Self::with_fetcher(Fetcher::new(config)?, config))
    }

    pub fn with_fetcher(fetcher: Fetcher, config: &ScanConfig) -> Self {
        Self {
            fetcher,
            resource_concurrency: config.resource_concurrency.max(1),
        }
    }

    /// Fetch one linked resource and scan its raw body.
    ///
    /// Any fetch failure yields an empty list.
    pub async fn scan_linked(&self, url: &str) -> Vec<String> {
        match self.fetcher.fetch(url).await {
            Ok(body) => parameter_tokens(&decode_text(&body)),
            Err(e) => {
                tracing::debug!("skipping linked resource {url}: {e}");
                Vec::new()
            }
        }
    }

    /// Scan already-fetched page content, including its linked resources.
    pub async fn scan_page(&self, page_url: &str, body: &[u8]) -> Result<Vec<String>, ParseError> {
        let (mut tokens, linked) = {
            let text = decode_markup(body)?;
            let doc = Html::parse_document(&text);
            (attribute_tokens(&doc), linked_urls(&doc, page_url))
        };

        tracing::debug!(
            "{page_url}: {} attribute tokens, {} linked resources",
            tokens.len(),
            linked.len()
        );

        let linked_tokens: Vec<Vec<String>> = stream::iter(linked)
            .map(|url| async move { self.scan_linked(&url).await })
            .buffer_unordered(self.resource_concurrency)
            .collect()
            .await;

        tokens.extend(linked_tokens.into_iter().flatten());
        Ok(tokens)
    }

    /// Fetch a top-level URL and scan it.
    pub async fn scan_url(&self, url: &str) -> Result<Vec<String>, ScanError> {
        let body = self.fetcher.fetch(url).await?;
        Ok(self.scan_page(url, &body).await?)
    }
}
