//! Configuration file loading
//!
//! A config file is a TOML rendering of the pipeline [`Options`] bundle;
//! absent keys fall back to their defaults.

use crate::error::{CliError, CliResult};
use anyhow::Context;
use fuzzdate_core::{DialectId, Options};
use std::path::Path;

/// Load pipeline options from a TOML file
pub fn load_options(path: &Path) -> CliResult<Options> {
    let text = std::fs::read_to_string(path)
        .map_err(|_| CliError::FileNotFound(path.display().to_string()))?;
    let options: Options = toml::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    options
        .validate()
        .map_err(|e| CliError::ConfigError(e.to_string()))?;
    Ok(options)
}

/// Resolve a dialect name as written in configs and fixtures
pub fn parse_dialect(name: &str) -> Result<DialectId, CliError> {
    match name {
        "edtf" => Ok(DialectId::Edtf),
        "lyrasis_pseudo_edtf" => Ok(DialectId::LyrasisPseudoEdtf),
        "collectionspace_structured_date_xml" => {
            Ok(DialectId::CollectionspaceStructuredDateXml)
        }
        other => Err(CliError::ConfigError(format!(
            "unknown dialect {other:?} (expected edtf, lyrasis_pseudo_edtf, \
             or collectionspace_structured_date_xml)"
        ))),
    }
}

/// Commented default configuration template
pub fn default_toml() -> String {
    r#"# fuzzdate configuration
# Every key is optional; the values below are the defaults.

# How to read a 1-2 digit number that could be a month, day, or year
# fragment: "as_month", "as_year", or "as_day".
# Under "as_year", "1910-11" is the range 1910-1911; under "as_month" it
# is November 1910.
ambiguous_month_year = "as_year"

# Order of two small numbers next to a year anchor: "as_month_day" reads
# "10/11/2002" as October 11; "as_day_month" reads it as November 10.
ambiguous_month_day = "as_month_day"

# BCE year mapping: "naive" keeps the written year number (with a
# warning); "astronomical" stores year n BCE as the signed year 1-n.
bce_handling = "naive"

# "before X": "range" yields an open-started range ending at X; "point"
# yields the single date X.
before_date_treatment = "range"

# Rendering of explicit no-date values: "standard" uses each dialect's
# own marker; "custom" uses unknown_date_output_string.
unknown_date_output = "standard"
# unknown_date_output_string = "no date recorded"

# Output dialect: "edtf", "lyrasis_pseudo_edtf", or
# "collectionspace_structured_date_xml".
target_dialect = "edtf"

# Sentinel years bounding open ranges ("before 1950", "after 1950").
open_range_start_year = 1583
open_range_end_year = 2999
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuzzdate_core::AmbiguousMonthYear;

    #[test]
    fn default_template_round_trips_to_default_options() {
        let options: Options = toml::from_str(&default_toml()).unwrap();
        assert_eq!(options, Options::default());
    }

    #[test]
    fn partial_config_fills_the_rest_with_defaults() {
        let options: Options = toml::from_str(r#"ambiguous_month_year = "as_month""#).unwrap();
        assert_eq!(options.ambiguous_month_year, AmbiguousMonthYear::AsMonth);
        assert_eq!(options.open_range_end_year, 2999);
    }

    #[test]
    fn dialect_names() {
        assert_eq!(parse_dialect("edtf").unwrap(), DialectId::Edtf);
        assert_eq!(
            parse_dialect("lyrasis_pseudo_edtf").unwrap(),
            DialectId::LyrasisPseudoEdtf
        );
        assert!(parse_dialect("marc").is_err());
    }
}
