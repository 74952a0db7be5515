//! Error types for event volatility analysis.

use thiserror::Error;

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Structural failures that abort a run.
///
/// Per-series and per-event data problems never surface here: an
/// unavailable series or a degenerate window contributes zero records and
/// is reported through the skip counts on the batch report.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Event table document does not match the expected shape
    #[error("Malformed event table: {0}")]
    MalformedEventTable(String),

    /// Polars DataFrame error
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// I/O error while writing results
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
