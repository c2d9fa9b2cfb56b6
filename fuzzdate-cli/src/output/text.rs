//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use fuzzdate_core::ProcessResult;
use std::io::{self, Write};

/// Plain text formatter - one rendered line per input
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn record(&mut self, result: &ProcessResult, rendered: &[String]) -> Result<()> {
        writeln!(self.writer, "{}", rendered.join("; "))?;
        for warning in &result.warnings {
            log::warn!("{}: {warning}", result.original);
        }
        for error in &result.errors {
            log::error!("{}: {error}", result.original);
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
