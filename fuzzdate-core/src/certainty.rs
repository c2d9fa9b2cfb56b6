//! Certainty and qualifier tags
//!
//! A qualifier expresses doubt or partial specificity about a resolved date.
//! "circa", "ca." and "about" all normalize to [`Certainty::Approximate`];
//! the output vocabulary ("Circa", a `~` suffix) belongs to each dialect.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of certainty tags
///
/// The derive order drives the sorted, deduplicated exposure of qualifier
/// lists, so variants are declared in canonical display order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Certainty {
    /// Approximate value ("circa", "about", "approximately")
    Approximate,
    /// Value inferred by the cataloger (square brackets)
    Inferred,
    /// Uncertain value (trailing "?")
    Uncertain,
    /// Member of an inclusive "all of" date list
    AllOfSet,
    /// Member of an alternate "one of" date list
    OneOfSet,
}

impl fmt::Display for Certainty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Certainty::Approximate => write!(f, "approximate"),
            Certainty::Inferred => write!(f, "inferred"),
            Certainty::Uncertain => write!(f, "uncertain"),
            Certainty::AllOfSet => write!(f, "all_of_set"),
            Certainty::OneOfSet => write!(f, "one_of_set"),
        }
    }
}

/// Scope of a qualifier on a range expression
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    /// Applies to the whole value
    #[default]
    Whole,
    /// Applies only to the range's start sub-value
    Start,
    /// Applies only to the range's end sub-value
    End,
}

/// A certainty tag with its range scope
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Qualifier {
    /// The certainty tag
    pub certainty: Certainty,
    /// Where on the value the tag applies
    pub precision: Precision,
}

impl Qualifier {
    /// Whole-value qualifier
    pub fn whole(certainty: Certainty) -> Self {
        Self {
            certainty,
            precision: Precision::Whole,
        }
    }

    /// Qualifier scoped to part of a range
    pub fn scoped(certainty: Certainty, precision: Precision) -> Self {
        Self {
            certainty,
            precision,
        }
    }
}

/// Sort and deduplicate a qualifier list in place
pub fn normalize_qualifiers(qualifiers: &mut Vec<Qualifier>) {
    qualifiers.sort();
    qualifiers.dedup();
}

/// Sort and deduplicate a certainty list in place
pub fn normalize_certainty(certainty: &mut Vec<Certainty>) {
    certainty.sort();
    certainty.dedup();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualifiers_sort_and_dedup() {
        let mut quals = vec![
            Qualifier::whole(Certainty::Uncertain),
            Qualifier::whole(Certainty::Approximate),
            Qualifier::whole(Certainty::Uncertain),
        ];
        normalize_qualifiers(&mut quals);
        assert_eq!(
            quals,
            vec![
                Qualifier::whole(Certainty::Approximate),
                Qualifier::whole(Certainty::Uncertain),
            ]
        );
    }

    #[test]
    fn display_names_are_snake_case() {
        assert_eq!(Certainty::AllOfSet.to_string(), "all_of_set");
        assert_eq!(Certainty::Approximate.to_string(), "approximate");
    }

    #[test]
    fn scoped_qualifiers_with_distinct_precision_both_survive() {
        let mut quals = vec![
            Qualifier::scoped(Certainty::Uncertain, Precision::End),
            Qualifier::scoped(Certainty::Uncertain, Precision::Start),
        ];
        normalize_qualifiers(&mut quals);
        assert_eq!(quals.len(), 2);
    }
}
