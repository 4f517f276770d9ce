//! Error taxonomy for the extraction pipeline.

/// Failure retrieving a resource over HTTP.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("response from {url} exceeds {max} bytes")]
    TooLarge { url: String, max: usize },

    #[error("could not build HTTP client: {0}")]
    Client(String),
}

/// Content that could not be turned into a traversable document.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The body looks like binary data rather than markup: a NUL byte in
    /// the first 1024 bytes with no UTF-16 byte-order mark.
    #[error("content is binary, not markup")]
    Binary,
}

/// Why a top-level URL contributed no tokens.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type FetchResult<T> = Result<T, FetchError>;
