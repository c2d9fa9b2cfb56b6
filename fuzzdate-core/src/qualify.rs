//! Certainty and qualifier resolution
//!
//! Scans an expression's marker tokens after tagging and turns them into
//! qualifier tags on the resolved value. For a range, a marker lexically
//! confined to one side scopes to that side; everything else applies to the
//! whole value.

use crate::certainty::{normalize_qualifiers, Certainty, Precision, Qualifier};
use crate::parser::range_separator_index;
use crate::segment::SegmentType;
use crate::segment_set::SegmentSet;

/// Collect the qualifiers an expression carries
pub fn qualifiers(set: &SegmentSet) -> Vec<Qualifier> {
    let segments = set.segments();
    let separator = range_separator_index(segments);
    let mut out: Vec<Qualifier> = Vec::new();
    // A bracket marks inference only when the pair encloses the whole
    // expression; a stray bracket is just noise the parser ignores.
    let inferred = segments
        .first()
        .is_some_and(|s| s.ty == SegmentType::SquareBracketOpen)
        && segments
            .last()
            .is_some_and(|s| s.ty == SegmentType::SquareBracketClose);

    for (i, segment) in segments.iter().enumerate() {
        match segment.ty {
            SegmentType::CircaWord => {
                out.push(Qualifier::scoped(
                    Certainty::Approximate,
                    scope(i, separator),
                ));
            }
            SegmentType::Question => {
                out.push(Qualifier::scoped(Certainty::Uncertain, scope(i, separator)));
            }
            _ => {}
        }
        for certainty in &segment.certainty {
            out.push(Qualifier::whole(*certainty));
        }
    }

    if inferred {
        out.push(Qualifier::whole(Certainty::Inferred));
    }
    for certainty in &set.certainty {
        out.push(Qualifier::whole(*certainty));
    }

    normalize_qualifiers(&mut out);
    out
}

fn scope(index: usize, separator: Option<usize>) -> Precision {
    match separator {
        None => Precision::Whole,
        Some(sep) if index < sep => Precision::Start,
        Some(_) => Precision::End,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use crate::normalize::normalize;
    use crate::options::Options;
    use crate::tagger::tag;

    fn quals(input: &str) -> Vec<Qualifier> {
        let tagged = tag(normalize(lex(input).unwrap()), &Options::default()).unwrap();
        qualifiers(&tagged)
    }

    #[test]
    fn plain_date_is_certain() {
        assert!(quals("2002").is_empty());
    }

    #[test]
    fn circa_and_question_can_coexist() {
        assert_eq!(
            quals("circa 2002?"),
            vec![
                Qualifier::whole(Certainty::Approximate),
                Qualifier::whole(Certainty::Uncertain),
            ]
        );
    }

    #[test]
    fn brackets_mean_inferred() {
        assert_eq!(quals("[2002]"), vec![Qualifier::whole(Certainty::Inferred)]);
    }

    #[test]
    fn stray_bracket_is_not_inferred() {
        assert!(quals("2002]").is_empty());
        assert!(quals("[2002 edition").is_empty());
    }

    #[test]
    fn bracketed_circa_combines() {
        assert_eq!(
            quals("[circa 2002]"),
            vec![
                Qualifier::whole(Certainty::Approximate),
                Qualifier::whole(Certainty::Inferred),
            ]
        );
    }

    #[test]
    fn marker_before_range_separator_scopes_to_start() {
        assert_eq!(
            quals("circa 1920 - 1930"),
            vec![Qualifier::scoped(Certainty::Approximate, Precision::Start)]
        );
        assert_eq!(
            quals("1920? - 1930"),
            vec![Qualifier::scoped(Certainty::Uncertain, Precision::Start)]
        );
    }

    #[test]
    fn marker_after_range_separator_scopes_to_end() {
        assert_eq!(
            quals("1920 - 1930?"),
            vec![Qualifier::scoped(Certainty::Uncertain, Precision::End)]
        );
    }

    #[test]
    fn duplicate_markers_dedup() {
        assert_eq!(
            quals("circa ca. 2002"),
            vec![Qualifier::whole(Certainty::Approximate)]
        );
    }
}
