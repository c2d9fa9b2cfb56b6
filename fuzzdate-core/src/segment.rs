//! Segments: lexical tokens and values derived by merging them
//!
//! A segment is the uniform unit flowing through every pipeline stage. The
//! lexer emits raw segments; later stages re-type them or merge ordered runs
//! into derived segments.

use crate::certainty::Certainty;
use crate::error::ConstructionError;
use smallvec::SmallVec;
use std::fmt;

/// Inline store for the qualifier tags a single segment carries
pub type CertaintySet = SmallVec<[Certainty; 2]>;

/// Source location of a segment: starting column plus lexeme length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    /// Zero-based column of the first character
    pub column: usize,
    /// Length of the lexeme in characters
    pub len: usize,
}

impl Location {
    /// Create a location
    pub fn new(column: usize, len: usize) -> Self {
        Self { column, len }
    }
}

/// Closed set of segment type tags
///
/// Covers lexical classes assigned by the lexer, word classes recognized
/// during normalization, and the semantic roles assigned by the tagger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentType {
    // Numeric, by digit count
    /// 1-2 digit number (ambiguous: month, day, or year fragment)
    Number1or2,
    /// Exactly 3 digits (short year)
    Number3,
    /// Exactly 4 digits (year candidate)
    Number4,
    /// Exactly 6 digits (compact year-month)
    Number6,
    /// Exactly 8 digits (compact year-month-day)
    Number8,
    /// Digits with trailing `u` uncertainty placeholders ("19uu", "192u")
    UncertaintyDigits,

    // Punctuation and separators
    /// One or more consecutive spaces
    Space,
    /// `,`
    Comma,
    /// `-`
    Hyphen,
    /// `/`
    Slash,
    /// `.`
    Dot,
    /// `?`
    Question,
    /// `[`
    SquareBracketOpen,
    /// `]`
    SquareBracketClose,
    /// `(`
    ParenOpen,
    /// `)`
    ParenClose,
    /// `'`
    Apostrophe,
    /// `&`
    Ampersand,

    // Word classes
    /// Month name or abbreviation
    MonthAlpha,
    /// Season name
    SeasonAlpha,
    /// Ordinal indicator following a number ("st", "nd", "rd", "th")
    OrdinalIndicator,
    /// "century" / "cent"
    CenturyWord,
    /// "decade"
    DecadeWord,
    /// Circa marker ("c", "ca", "circa", "about", "approximately")
    CircaWord,
    /// BCE era marker
    EraBce,
    /// CE era marker
    EraCe,
    /// "before"
    BeforeWord,
    /// "after"
    AfterWord,
    /// "and"
    AndWord,
    /// "or"
    OrWord,
    /// "to"
    ToWord,
    /// Explicit no-date marker ("unknown", "undated", "n.d.")
    UnknownDateWord,
    /// Unclassified word (deferred failure)
    Unknown,

    // Resolved roles assigned by the tagger
    /// Resolved year
    Year,
    /// Resolved numeric month
    NumberMonth,
    /// Resolved numeric day
    NumberDay,
    /// Resolved century expression
    Century,
    /// Resolved decade expression
    Decade,
}

impl fmt::Display for SegmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// One segment: a token or a merged derivation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Type tag
    pub ty: SegmentType,
    /// Exact source substring
    pub lexeme: String,
    /// Parsed integer value, when the segment is numeric
    pub literal: Option<i32>,
    /// Source location
    pub location: Location,
    /// Qualifier tags attached directly to this segment
    pub certainty: CertaintySet,
}

impl Segment {
    /// Non-numeric token with an explicit type
    pub fn token(ty: SegmentType, lexeme: impl Into<String>, column: usize) -> Self {
        let lexeme = lexeme.into();
        let len = lexeme.chars().count();
        Self {
            ty,
            lexeme,
            literal: None,
            location: Location::new(column, len),
            certainty: CertaintySet::new(),
        }
    }

    /// Numeric token, classified by digit count
    ///
    /// Lengths 1-2, 3, 4, 6 and 8 map to the corresponding numeric types;
    /// any other length is `Unknown` with no literal. A lexeme containing a
    /// non-digit character is rejected.
    pub fn number(lexeme: impl Into<String>, column: usize) -> Result<Self, ConstructionError> {
        let lexeme = lexeme.into();
        if lexeme.is_empty() || !lexeme.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConstructionError::NonDigitLexeme { lexeme });
        }
        let digits = lexeme.len();
        let ty = match digits {
            1 | 2 => SegmentType::Number1or2,
            3 => SegmentType::Number3,
            4 => SegmentType::Number4,
            6 => SegmentType::Number6,
            8 => SegmentType::Number8,
            _ => SegmentType::Unknown,
        };
        let literal = if ty == SegmentType::Unknown {
            None
        } else {
            // all-digit lexemes of <= 8 characters always fit in i32
            Some(lexeme.parse::<i32>().expect("digit lexeme parses"))
        };
        Ok(Self {
            ty,
            lexeme,
            literal,
            location: Location::new(column, digits),
            certainty: CertaintySet::new(),
        })
    }

    /// Merge an ordered run of source segments into one derived segment
    ///
    /// The lexeme is the in-order concatenation of source lexemes; the
    /// location starts at the earliest source and spans the summed lengths;
    /// the literal is carried over only from a single source; certainty is
    /// the sorted union of all source certainties. The type is always the
    /// caller's, never inherited. Callers are responsible for passing an
    /// ordered, adjacent source list.
    pub fn derived(ty: SegmentType, sources: &[Segment]) -> Result<Self, ConstructionError> {
        if sources.is_empty() {
            return Err(ConstructionError::EmptyDerivation);
        }
        let lexeme: String = sources.iter().map(|s| s.lexeme.as_str()).collect();
        let column = sources
            .iter()
            .map(|s| s.location.column)
            .min()
            .expect("sources is non-empty");
        let len = sources.iter().map(|s| s.location.len).sum();
        let literal = match sources {
            [only] => only.literal,
            _ => None,
        };
        let mut certainty = CertaintySet::new();
        for source in sources {
            for c in &source.certainty {
                certainty.push(*c);
            }
        }
        certainty.sort();
        certainty.dedup();
        Ok(Self {
            ty,
            lexeme,
            literal,
            location: Location::new(column, len),
            certainty,
        })
    }

    /// Replace the type tag, keeping everything else
    pub fn retype(mut self, ty: SegmentType) -> Self {
        self.ty = ty;
        self
    }

    /// Set the literal explicitly (derivations with multiple sources drop it)
    pub fn with_literal(mut self, literal: i32) -> Self {
        self.literal = Some(literal);
        self
    }

    /// Attach a qualifier tag, keeping the set sorted and deduplicated
    pub fn add_certainty(&mut self, certainty: Certainty) {
        if !self.certainty.contains(&certainty) {
            self.certainty.push(certainty);
            self.certainty.sort();
        }
    }
}
