#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/eventvol/eventvol/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod batch;
pub mod error;
pub mod events;
pub mod provider;
pub mod returns;
pub mod summary;
pub mod volatility;
pub mod window;

// Re-export core types
pub use batch::{BatchAnalyzer, BatchReport};
pub use error::{AnalysisError, Result};
pub use events::{DATE_FORMAT, EventSpec, EventTable, SeriesEvents};
pub use provider::{
    CsvPriceProvider, MemoryPriceProvider, PricePoint, PriceProvider, ProviderError,
};
pub use returns::ReturnSeries;
pub use summary::{DEFAULT_TOP_N, SeriesAverage, Summary};
pub use volatility::{VolatilityChange, VolatilityRecord, window_change};
pub use window::{DEFAULT_WINDOW, EventWindow};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
