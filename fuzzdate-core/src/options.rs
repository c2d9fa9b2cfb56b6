//! Pipeline configuration
//!
//! One immutable `Options` value is passed by reference into the pipeline
//! entry point and threaded through every stage; nothing global, nothing
//! mutated mid-run.

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Policy for a 1-2 digit number that could be a month, day, or year fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguousMonthYear {
    /// Treat "1910-11" as November 1910
    AsMonth,
    /// Treat "1910-11" as the range 1910-1911
    #[default]
    AsYear,
    /// Like `AsMonth` for year-plus-number shapes; affects month/day order
    AsDay,
}

impl fmt::Display for AmbiguousMonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmbiguousMonthYear::AsMonth => write!(f, "as_month"),
            AmbiguousMonthYear::AsYear => write!(f, "as_year"),
            AmbiguousMonthYear::AsDay => write!(f, "as_day"),
        }
    }
}

/// Order of two ambiguous 1-2 digit numbers next to a year anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguousMonthDay {
    /// "10/11/2002" reads month first (October 11)
    #[default]
    AsMonthDay,
    /// "10/11/2002" reads day first (November 10)
    AsDayMonth,
}

impl fmt::Display for AmbiguousMonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmbiguousMonthDay::AsMonthDay => write!(f, "as_month_day"),
            AmbiguousMonthDay::AsDayMonth => write!(f, "as_day_month"),
        }
    }
}

/// How BCE years map onto the proleptic Gregorian axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BceHandling {
    /// Keep the literal year number, with a warning
    #[default]
    Naive,
    /// Map year n BCE to the signed astronomical year 1-n
    Astronomical,
}

/// Treatment of "before X" expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BeforeDateTreatment {
    /// Open-started range ending at X
    #[default]
    Range,
    /// Single point at X
    Point,
}

/// Rendering of known-unknown dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnknownDateOutput {
    /// Each dialect's own standard marker
    #[default]
    Standard,
    /// The caller-supplied `unknown_date_output_string`
    Custom,
}

/// Identifier of an output dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialectId {
    /// Extended Date/Time Format
    #[default]
    Edtf,
    /// Human-readable pseudo-EDTF
    LyrasisPseudoEdtf,
    /// CollectionSpace structured-date XML
    CollectionspaceStructuredDateXml,
}

impl fmt::Display for DialectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialectId::Edtf => write!(f, "edtf"),
            DialectId::LyrasisPseudoEdtf => write!(f, "lyrasis_pseudo_edtf"),
            DialectId::CollectionspaceStructuredDateXml => {
                write!(f, "collectionspace_structured_date_xml")
            }
        }
    }
}

/// Full configuration bundle for one pipeline invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Policy for month-vs-year-vs-day ambiguity
    pub ambiguous_month_year: AmbiguousMonthYear,
    /// Order policy for two small numbers next to a year anchor
    pub ambiguous_month_day: AmbiguousMonthDay,
    /// BCE year mapping
    pub bce_handling: BceHandling,
    /// "before X" treatment
    pub before_date_treatment: BeforeDateTreatment,
    /// Known-unknown rendering
    pub unknown_date_output: UnknownDateOutput,
    /// Custom known-unknown string, required when output is `Custom`
    pub unknown_date_output_string: Option<String>,
    /// Default output dialect
    pub target_dialect: DialectId,
    /// Sentinel year for the open start of "before" ranges
    pub open_range_start_year: i32,
    /// Sentinel year for the open end of "after" ranges
    pub open_range_end_year: i32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            ambiguous_month_year: AmbiguousMonthYear::default(),
            ambiguous_month_day: AmbiguousMonthDay::default(),
            bce_handling: BceHandling::default(),
            before_date_treatment: BeforeDateTreatment::default(),
            unknown_date_output: UnknownDateOutput::default(),
            unknown_date_output_string: None,
            target_dialect: DialectId::default(),
            open_range_start_year: 1583,
            open_range_end_year: 2999,
        }
    }
}

impl Options {
    /// Check the bundle for contradictions
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.unknown_date_output == UnknownDateOutput::Custom
            && self
                .unknown_date_output_string
                .as_deref()
                .map_or(true, str::is_empty)
        {
            return Err(PipelineError::Configuration(
                "unknown_date_output = custom requires unknown_date_output_string".to_string(),
            ));
        }
        if self.open_range_start_year >= self.open_range_end_year {
            return Err(PipelineError::Configuration(format!(
                "open range start year {} must precede end year {}",
                self.open_range_start_year, self.open_range_end_year
            )));
        }
        Ok(())
    }
}
