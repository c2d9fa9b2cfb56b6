//! CLI command implementations

use clap::Subcommand;

pub mod batch;
pub mod generate_config;
pub mod parse;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve date strings and print them in an output dialect
    Parse(parse::ParseArgs),

    /// Replay a CSV fixture and diff rendered output against expectations
    Batch(batch::BatchArgs),

    /// Write a commented default configuration file
    GenerateConfig(generate_config::GenerateConfigArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_debug_format() {
        let cmd = Commands::Parse(parse::ParseArgs {
            dates: vec!["2002".to_string()],
            stdin: false,
            format: parse::OutputFormat::Text,
            dialect: None,
            config: None,
            ambiguous_month_year: None,
        });
        let debug_str = format!("{:?}", cmd);
        assert!(debug_str.contains("Parse"));
        assert!(debug_str.contains("2002"));
    }
}
