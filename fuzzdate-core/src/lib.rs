//! Fuzzy date string resolution pipeline
//!
//! Normalizes free-form, often ambiguous date strings found in collection
//! records ("ca. 1882", "19th c.", "1910-11", "2020, Feb 15") into typed
//! date values carrying calendar bounds, certainty metadata and warnings.
//!
//! Processing is a fixed, synchronous stage sequence: lexing, token
//! normalization, date segmentation, date part tagging, shape parsing and
//! qualifier resolution. Each invocation owns its own state; batch callers
//! may process independent strings in parallel without coordination.
//!
//! ```
//! use fuzzdate_core::{process, Options};
//!
//! let result = process("circa 2002?", &Options::default());
//! assert!(result.is_ok());
//! assert!(!result.dates[0].is_certain());
//! ```

#![warn(missing_docs)]

pub mod certainty;
pub mod date_types;
pub mod error;
pub mod lexer;
pub mod normalize;
pub mod options;
pub mod parser;
pub mod qualify;
pub mod result;
pub mod segment;
pub mod segment_set;
pub mod segmenter;
pub mod tagger;

pub use certainty::{Certainty, Precision, Qualifier};
pub use date_types::{
    CenturyKind, DateValue, DecadeKind, Era, RangeSwitch, SetKind,
};
pub use error::{ConstructionError, PipelineError};
pub use options::{
    AmbiguousMonthDay, AmbiguousMonthYear, BceHandling, BeforeDateTreatment, DialectId, Options,
    UnknownDateOutput,
};
pub use result::{ProcessResult, ProcessState, ResolvedDate};
pub use segment::{Location, Segment, SegmentType};
pub use segment_set::SegmentSet;

use certainty::normalize_certainty;

/// Run the full pipeline over one input string
///
/// Never fails past this boundary: every stage error becomes a warning or
/// error entry on the returned result, and expressions that cannot be
/// resolved are reported as untokenizable without aborting their siblings.
pub fn process(input: &str, options: &Options) -> ProcessResult {
    if let Err(err) = options.validate() {
        return ProcessResult::failed(
            input,
            err.to_string(),
            "processing aborted by invalid configuration".to_string(),
        );
    }

    let lexed = match lexer::lex(input) {
        Ok(set) => set,
        Err(err) => {
            log::debug!("lex failure for {input:?}: {err}");
            return ProcessResult::failed(
                input,
                err.to_string(),
                format!("input {input:?} could not be tokenized"),
            );
        }
    };

    let normalized = normalize::normalize(lexed);
    let pieces = segmenter::segment_dates(normalized);
    let mut warnings: Vec<String> = Vec::new();
    let mut errors: Vec<String> = Vec::new();
    let mut members: Vec<ResolvedDate> = Vec::new();
    let mut alternate_set = false;

    for piece in pieces {
        let piece_lexeme = piece.lexeme();
        if piece.is_empty() {
            continue;
        }
        if piece.certainty.contains(&Certainty::OneOfSet) {
            alternate_set = true;
        }
        match tagger::tag(piece, options) {
            Ok(tagged) => {
                warnings.extend(tagged.warnings.iter().cloned());
                let qualifiers = qualify::qualifiers(&tagged);
                match parser::parse(&tagged, options) {
                    Ok(value) => members.push(ResolvedDate::new(value, qualifiers)),
                    Err(err) => {
                        untokenizable(&mut members, &mut warnings, &mut errors, &piece_lexeme, err)
                    }
                }
            }
            Err(err) => {
                untokenizable(&mut members, &mut warnings, &mut errors, &piece_lexeme, err)
            }
        }
    }

    if members.is_empty() {
        return ProcessResult::failed(
            input,
            "no date expression found".to_string(),
            format!("input {input:?} holds nothing resolvable"),
        );
    }

    let failed = members
        .iter()
        .all(|m| matches!(m.value, DateValue::Untokenizable { .. }));

    let dates = if members.len() > 1 {
        let kind = if alternate_set {
            SetKind::OneOf
        } else {
            SetKind::AllOf
        };
        let mut qualifiers: Vec<Qualifier> = Vec::new();
        let mut values: Vec<DateValue> = Vec::new();
        for member in members {
            qualifiers.extend(member.qualifiers.iter().copied());
            values.push(member.value);
        }
        certainty::normalize_qualifiers(&mut qualifiers);
        vec![ResolvedDate::new(DateValue::set(values, kind), qualifiers)]
    } else {
        members
    };

    let mut certainty: Vec<Certainty> = dates
        .iter()
        .flat_map(|d| d.certainty_tags())
        .collect();
    normalize_certainty(&mut certainty);

    ProcessResult {
        original: input.to_string(),
        dates,
        certainty,
        warnings,
        errors,
        state: if failed {
            ProcessState::Failed
        } else {
            ProcessState::Ok
        },
    }
}

/// Run the pipeline with default options
pub fn process_with_defaults(input: &str) -> ProcessResult {
    process(input, &Options::default())
}

fn untokenizable(
    members: &mut Vec<ResolvedDate>,
    warnings: &mut Vec<String>,
    errors: &mut Vec<String>,
    lexeme: &str,
    err: PipelineError,
) {
    log::debug!("untokenizable expression {lexeme:?}: {err}");
    errors.push(err.to_string());
    warnings.push(format!("untokenizable date expression {lexeme:?}"));
    members.push(ResolvedDate::new(
        DateValue::Untokenizable {
            lexeme: lexeme.to_string(),
        },
        Vec::new(),
    ));
}
