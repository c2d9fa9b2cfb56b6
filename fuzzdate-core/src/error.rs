//! Layered error types for the resolution pipeline
//!
//! Stage failures are deterministic and carry enough location detail to be
//! echoed back to a cataloger. Nothing in this module ever crosses the
//! pipeline boundary as a raw error; `process` folds every failure into the
//! returned result.

use thiserror::Error;

/// Invariant violations raised while building segments or date values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// A numeric segment was built from a lexeme containing non-digits
    #[error("numeric segment requires an all-digit lexeme, got {lexeme:?}")]
    NonDigitLexeme {
        /// The offending lexeme
        lexeme: String,
    },

    /// A derived segment was given no sources
    #[error("derived segment requires at least one source segment")]
    EmptyDerivation,

    /// Month outside 1-12
    #[error("month {month} out of range 1-12")]
    MonthOutOfRange {
        /// The rejected month value
        month: i32,
    },

    /// Day outside the stated month's length
    #[error("day {day} invalid for year {year}, month {month}")]
    DayOutOfRange {
        /// Year of the rejected date
        year: i32,
        /// Month of the rejected date
        month: u32,
        /// The rejected day value
        day: i32,
    },

    /// Century number must be positive
    #[error("century {century} out of range")]
    InvalidCentury {
        /// The rejected century number
        century: i32,
    },

    /// Range bounds were inverted
    #[error("range earliest bound {earliest} is after latest bound {latest}")]
    InvertedRange {
        /// Computed earliest bound
        earliest: String,
        /// Computed latest bound
        latest: String,
    },
}

/// Stage-level pipeline errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Lexer hit a character run it cannot classify
    #[error("unrecognized fragment {fragment:?} at column {column}")]
    Lex {
        /// The unrecognized substring
        fragment: String,
        /// Source column of the fragment
        column: usize,
    },

    /// Tagger could not resolve a role for an ambiguous token
    #[error("cannot resolve a date role for {lexeme:?} at column {column}")]
    Tag {
        /// The ambiguous lexeme
        lexeme: String,
        /// Source column of the lexeme
        column: usize,
    },

    /// Tagged sequence matched no grammar shape
    #[error("segment sequence [{types}] matches no known date pattern")]
    Parse {
        /// Comma-joined type names of the unmatched sequence
        types: String,
    },

    /// Date value invariant violation
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    /// Caller supplied an unsupported or contradictory option
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

/// Result type for pipeline stage operations
pub type Result<T> = std::result::Result<T, PipelineError>;
