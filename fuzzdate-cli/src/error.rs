//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// File not found or inaccessible
    FileNotFound(String),
    /// Configuration error
    ConfigError(String),
    /// Malformed batch fixture
    FixtureError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::FixtureError(msg) => write!(f, "Fixture error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_the_category() {
        let error = CliError::FileNotFound("dates.csv".to_string());
        assert_eq!(error.to_string(), "File not found: dates.csv");

        let error = CliError::ConfigError("bad dialect name".to_string());
        assert_eq!(error.to_string(), "Configuration error: bad dialect name");

        let error = CliError::FixtureError("row 3: missing input".to_string());
        assert_eq!(error.to_string(), "Fixture error: row 3: missing input");
    }

    #[test]
    fn error_trait_implementation() {
        let error = CliError::ConfigError("bad dialect name".to_string());
        let _: &dyn std::error::Error = &error;
    }
}
