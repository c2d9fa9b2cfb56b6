//! Terminal result returned to translators
//!
//! One `ProcessResult` is produced per input string. It is the only surface
//! the translators and batch callers see; no pipeline state leaks past it,
//! and nothing mutates it after assembly.

use crate::certainty::{normalize_certainty, Certainty, Qualifier};
use crate::date_types::DateValue;
use serde::Serialize;

/// Whether processing resolved anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// At least one expression resolved
    Ok,
    /// Nothing resolved; `errors` is non-empty
    Failed,
}

/// One resolved value with its qualifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDate {
    /// The resolved value
    pub value: DateValue,
    /// Deduplicated, sorted qualifier tags
    pub qualifiers: Vec<Qualifier>,
}

impl ResolvedDate {
    /// New resolved date; qualifiers are assumed normalized by the resolver
    pub fn new(value: DateValue, qualifiers: Vec<Qualifier>) -> Self {
        Self { value, qualifiers }
    }

    /// A value is certain iff it carries no qualifiers
    pub fn is_certain(&self) -> bool {
        self.qualifiers.is_empty()
    }

    /// The certainty tags, without their precision scopes
    pub fn certainty_tags(&self) -> Vec<Certainty> {
        let mut tags: Vec<Certainty> = self.qualifiers.iter().map(|q| q.certainty).collect();
        normalize_certainty(&mut tags);
        tags
    }
}

/// Terminal record for one processed input string
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessResult {
    /// The input, echoed back verbatim
    pub original: String,
    /// Resolved values in source order
    pub dates: Vec<ResolvedDate>,
    /// Aggregated certainty across all values
    pub certainty: Vec<Certainty>,
    /// Ordered warnings from every stage
    pub warnings: Vec<String>,
    /// Human-readable errors; non-empty when `state` is `Failed`
    pub errors: Vec<String>,
    /// Processing state
    pub state: ProcessState,
}

impl ProcessResult {
    /// True when processing resolved at least one expression
    pub fn is_ok(&self) -> bool {
        self.state == ProcessState::Ok
    }

    /// Failed result echoing the input, with the input itself marked
    /// untokenizable so every dialect can still render something
    pub fn failed(original: &str, error: String, warning: String) -> Self {
        Self {
            original: original.to_string(),
            dates: vec![ResolvedDate::new(
                DateValue::Untokenizable {
                    lexeme: original.to_string(),
                },
                Vec::new(),
            )],
            certainty: Vec::new(),
            warnings: vec![warning],
            errors: vec![error],
            state: ProcessState::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certainty_tags_drop_precision_and_dedup() {
        use crate::certainty::{Precision, Qualifier};
        let date = ResolvedDate::new(
            DateValue::year(1920),
            vec![
                Qualifier::scoped(Certainty::Uncertain, Precision::Start),
                Qualifier::scoped(Certainty::Uncertain, Precision::End),
            ],
        );
        assert!(!date.is_certain());
        assert_eq!(date.certainty_tags(), vec![Certainty::Uncertain]);
    }

    #[test]
    fn failed_result_keeps_original_and_error() {
        let result = ProcessResult::failed("xyzzy", "boom".to_string(), "warned".to_string());
        assert!(!result.is_ok());
        assert_eq!(result.original, "xyzzy");
        assert!(!result.errors.is_empty());
        assert!(matches!(
            result.dates[0].value,
            DateValue::Untokenizable { .. }
        ));
    }
}
