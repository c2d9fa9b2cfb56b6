//! Parse command implementation

use crate::config::{self, parse_dialect};
use crate::output::{JsonFormatter, OutputFormatter, TextFormatter};
use anyhow::Result;
use clap::Args;
use fuzzdate_core::{process, AmbiguousMonthYear, Options};
use fuzzdate_translate::dialect_for;
use std::io::{self, BufRead};
use std::path::PathBuf;

/// Arguments for the parse command
#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Date strings to resolve
    #[arg(value_name = "DATE", required_unless_present = "stdin")]
    pub dates: Vec<String>,

    /// Read date strings from stdin, one per line
    #[arg(long, conflicts_with = "dates")]
    pub stdin: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Output dialect (default: from config)
    #[arg(short, long, value_name = "NAME")]
    pub dialect: Option<String>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the ambiguous month/year policy
    #[arg(long, value_enum, value_name = "POLICY")]
    pub ambiguous_month_year: Option<MonthYearPolicy>,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// One rendered line per input
    Text,
    /// JSON array of records with warnings and state
    Json,
}

/// CLI spelling of the ambiguous month/year policy
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum MonthYearPolicy {
    /// "1910-11" is November 1910
    AsMonth,
    /// "1910-11" is the range 1910-1911
    AsYear,
    /// Two small numbers read day-first
    AsDay,
}

impl From<MonthYearPolicy> for AmbiguousMonthYear {
    fn from(policy: MonthYearPolicy) -> Self {
        match policy {
            MonthYearPolicy::AsMonth => AmbiguousMonthYear::AsMonth,
            MonthYearPolicy::AsYear => AmbiguousMonthYear::AsYear,
            MonthYearPolicy::AsDay => AmbiguousMonthYear::AsDay,
        }
    }
}

impl ParseArgs {
    /// Execute the parse command
    pub fn execute(&self) -> Result<()> {
        let options = self.options()?;
        let dialect = dialect_for(options.target_dialect);

        let mut formatter: Box<dyn OutputFormatter> = match self.format {
            OutputFormat::Text => Box::new(TextFormatter::stdout()),
            OutputFormat::Json => Box::new(JsonFormatter::new(io::stdout())),
        };

        let inputs = self.inputs()?;
        log::info!("resolving {} date string(s)", inputs.len());
        for input in &inputs {
            let result = process(input, &options);
            let rendered = dialect.render_result(&result, &options);
            formatter.record(&result, &rendered)?;
        }
        formatter.finish()?;
        Ok(())
    }

    /// Assemble options from config file and flag overrides
    fn options(&self) -> Result<Options> {
        let mut options = match &self.config {
            Some(path) => config::load_options(path)?,
            None => Options::default(),
        };
        if let Some(name) = &self.dialect {
            options.target_dialect = parse_dialect(name)?;
        }
        if let Some(policy) = self.ambiguous_month_year {
            options.ambiguous_month_year = policy.into();
        }
        Ok(options)
    }

    fn inputs(&self) -> Result<Vec<String>> {
        if self.stdin {
            let mut lines = Vec::new();
            for line in io::stdin().lock().lines() {
                let line = line?;
                if !line.trim().is_empty() {
                    lines.push(line);
                }
            }
            Ok(lines)
        } else {
            Ok(self.dates.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuzzdate_core::DialectId;

    fn args(dates: &[&str]) -> ParseArgs {
        ParseArgs {
            dates: dates.iter().map(|s| s.to_string()).collect(),
            stdin: false,
            format: OutputFormat::Text,
            dialect: None,
            config: None,
            ambiguous_month_year: None,
        }
    }

    #[test]
    fn dialect_flag_overrides_config_default() {
        let mut parse_args = args(&["2002"]);
        parse_args.dialect = Some("lyrasis_pseudo_edtf".to_string());
        let options = parse_args.options().unwrap();
        assert_eq!(options.target_dialect, DialectId::LyrasisPseudoEdtf);
    }

    #[test]
    fn unknown_dialect_flag_is_rejected() {
        let mut parse_args = args(&["2002"]);
        parse_args.dialect = Some("marc".to_string());
        assert!(parse_args.options().is_err());
    }

    #[test]
    fn policy_flag_maps_onto_core_policy() {
        let mut parse_args = args(&["1910-11"]);
        parse_args.ambiguous_month_year = Some(MonthYearPolicy::AsMonth);
        let options = parse_args.options().unwrap();
        assert_eq!(options.ambiguous_month_year, AmbiguousMonthYear::AsMonth);
    }
}
