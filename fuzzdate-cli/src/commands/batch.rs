//! Batch command implementation
//!
//! Replays a CSV fixture of date strings through the pipeline and diffs the
//! rendered output against each row's expectation. A row that fails to
//! parse, resolve, or match is reported and counted; it never aborts the
//! remaining rows.

use crate::config::{self, parse_dialect};
use crate::error::CliError;
use anyhow::{bail, Result};
use clap::Args;
use fuzzdate_core::{process, Options};
use fuzzdate_translate::dialect_for;
use serde::Deserialize;
use std::path::PathBuf;

/// Arguments for the batch command
#[derive(Debug, Args)]
pub struct BatchArgs {
    /// CSV fixture with columns input,dialect,expected,options
    #[arg(value_name = "FILE")]
    pub fixture: PathBuf,

    /// Configuration file supplying base options
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print every row, not only mismatches
    #[arg(long)]
    pub show_passing: bool,
}

/// One fixture row
///
/// `dialect` falls back to the configured default when empty; `options` is
/// an optional JSON object of option overrides for that row.
#[derive(Debug, Deserialize)]
struct FixtureRow {
    input: String,
    #[serde(default)]
    dialect: String,
    expected: String,
    #[serde(default)]
    options: String,
}

impl BatchArgs {
    /// Execute the batch command
    pub fn execute(&self) -> Result<()> {
        let base = match &self.config {
            Some(path) => config::load_options(path)?,
            None => Options::default(),
        };

        let mut reader = csv::Reader::from_path(&self.fixture)
            .map_err(|_| CliError::FileNotFound(self.fixture.display().to_string()))?;

        let mut passed = 0usize;
        let mut failed = 0usize;
        for (index, record) in reader.deserialize::<FixtureRow>().enumerate() {
            let row_number = index + 2; // 1-based, after the header row
            let row = match record {
                Ok(row) => row,
                Err(err) => {
                    failed += 1;
                    println!("row {row_number}: unreadable ({err})");
                    continue;
                }
            };
            match self.replay(&row, &base) {
                Ok(rendered) if rendered == row.expected => {
                    passed += 1;
                    if self.show_passing {
                        println!("row {row_number}: ok {:?}", row.input);
                    }
                }
                Ok(rendered) => {
                    failed += 1;
                    println!(
                        "row {row_number}: {:?} rendered {rendered:?}, expected {:?}",
                        row.input, row.expected
                    );
                }
                Err(err) => {
                    failed += 1;
                    println!("row {row_number}: {:?} failed ({err})", row.input);
                }
            }
        }

        println!("{passed} passed, {failed} failed");
        if failed > 0 {
            bail!("{failed} fixture row(s) failed");
        }
        Ok(())
    }

    /// Run one row through the pipeline and its dialect
    fn replay(&self, row: &FixtureRow, base: &Options) -> Result<String> {
        let mut options = if row.options.trim().is_empty() {
            base.clone()
        } else {
            serde_json::from_str(&row.options)
                .map_err(|e| CliError::FixtureError(format!("bad options column: {e}")))?
        };
        if !row.dialect.trim().is_empty() {
            options.target_dialect = parse_dialect(row.dialect.trim())?;
        }

        let result = process(&row.input, &options);
        let dialect = dialect_for(options.target_dialect);
        Ok(dialect.render_result(&result, &options).join("; "))
    }
}
