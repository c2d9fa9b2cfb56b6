//! Generate config command implementation

use crate::config::default_toml;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        let template = default_toml();
        match &self.output {
            Some(path) => {
                std::fs::write(path, template)
                    .with_context(|| format!("Failed to write to {}", path.display()))?;
                println!("Wrote default configuration to {}", path.display());
            }
            None => print!("{template}"),
        }
        Ok(())
    }
}
