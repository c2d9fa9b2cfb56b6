//! Fuzzdate CLI library
//!
//! Command-line interface over the fuzzy date resolution pipeline and its
//! output dialects.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use error::{CliError, CliResult};
