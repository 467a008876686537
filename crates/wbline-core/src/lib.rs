//! Wbline Core - Common infrastructure for indicator data pipelines
//!
//! This crate provides reusable components for fetching, retrying,
//! and exporting tabular indicator data from public statistical APIs.

pub mod http;
pub mod logging;
pub mod retry;
pub mod sink;

// Re-exports for convenience
pub use http::{HttpError, get_text};
pub use logging::init_logging;
pub use retry::RetryPolicy;
pub use sink::{CsvSink, cleanup_tmp_files};
