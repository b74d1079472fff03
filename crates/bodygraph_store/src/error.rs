//! Error types for the chart store and share codec.

use bodygraph_base::ChartError;

/// Errors from persistence, export, and share encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// Store configuration failed validation.
    #[error("invalid store config: {0}")]
    InvalidConfig(&'static str),
    /// Reading or writing the store file failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Store file or share payload is not valid JSON for its shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// zstd compression or decompression failed.
    #[error("compression error: {0}")]
    Compression(#[source] std::io::Error),
    /// Share string is not valid URL-safe base64.
    #[error("invalid share encoding: {0}")]
    Base64(#[from] base64::DecodeError),
    /// Share URL could not be parsed.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    /// URL carries no `chart` query parameter.
    #[error("URL has no chart parameter")]
    MissingChartParam,
    /// Decompressed share payload exceeds the size limit.
    #[error("share payload exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },
    /// Stored or shared chart data is inconsistent.
    #[error(transparent)]
    Chart(#[from] ChartError),
}
