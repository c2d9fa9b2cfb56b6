//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use fuzzdate_core::{Certainty, ProcessResult, ProcessState};
use serde::Serialize;
use std::io::Write;

/// JSON formatter - outputs processed inputs as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    records: Vec<DateRecord>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize)]
pub struct DateRecord {
    /// The input string, verbatim
    pub original: String,
    /// Dialect renderings, one per resolved date
    pub rendered: Vec<String>,
    /// Aggregated certainty tags
    pub certainty: Vec<Certainty>,
    /// Warnings from every stage
    pub warnings: Vec<String>,
    /// Errors, non-empty when processing failed
    pub errors: Vec<String>,
    /// Final processing state
    pub state: ProcessState,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records: Vec::new(),
        }
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn record(&mut self, result: &ProcessResult, rendered: &[String]) -> Result<()> {
        self.records.push(DateRecord {
            original: result.original.clone(),
            rendered: rendered.to_vec(),
            certainty: result.certainty.clone(),
            warnings: result.warnings.clone(),
            errors: result.errors.clone(),
            state: result.state,
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.records)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
