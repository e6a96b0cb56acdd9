//! The table-fetch capability and its error type.

use crate::table::Table;
use std::path::PathBuf;

/// A provider of one raw table per fetch.
///
/// Implementations own their transport (filesystem, HTTP, generator);
/// the engine only sees the resulting table. Fetch failures are the one
/// place errors propagate — the engine itself is total.
pub trait TableSource: Send + Sync {
    /// Short identifier used in summaries and artifact directory names.
    fn name(&self) -> &str;

    fn fetch(&self) -> Result<Table, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote source returned HTTP status {0}")]
    HttpStatus(u16),
}
