//! Output formatting module

use anyhow::Result;
use fuzzdate_core::ProcessResult;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and output one processed input with its dialect renderings
    fn record(&mut self, result: &ProcessResult, rendered: &[String]) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;
