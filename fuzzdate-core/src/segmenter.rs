//! Splitting a normalized token stream into independent date expressions
//!
//! Splits happen only at top-level multi-date separators. Whether a
//! separator is top-level is decided from the surrounding token types:
//! a comma, "and", "&" or "or" splits only when each side carries its own
//! date anchor, so "2020, Feb 15" stays one expression while "1667, 1668"
//! becomes two. Hyphens and slashes never split here; range handling belongs
//! to the parser.

use crate::certainty::Certainty;
use crate::segment::{Segment, SegmentType};
use crate::segment_set::SegmentSet;

/// Split one normalized set into per-expression sets
pub fn segment_dates(set: SegmentSet) -> Vec<SegmentSet> {
    let segments = set.segments();
    let mut splits: Vec<usize> = Vec::new();
    let mut alternate = false;
    let mut last_split = 0;

    for (i, segment) in segments.iter().enumerate() {
        if !is_separator(segment) {
            continue;
        }
        let left_anchored = segments[last_split..i].iter().any(is_anchor);
        let right_anchored = segments[i + 1..].iter().any(is_anchor);
        if left_anchored && right_anchored {
            if segment.ty == SegmentType::OrWord {
                alternate = true;
            }
            splits.push(i);
            last_split = i + 1;
        }
    }

    if splits.is_empty() {
        let mut only = set;
        only.trim_spaces();
        return vec![only];
    }

    let membership = if alternate {
        Certainty::OneOfSet
    } else {
        Certainty::AllOfSet
    };

    let mut pieces = Vec::with_capacity(splits.len() + 1);
    let mut start = 0;
    for boundary in splits.iter().copied().chain([segments.len()]) {
        let mut piece = SegmentSet {
            source: set.source.clone(),
            certainty: set.certainty.clone(),
            ..SegmentSet::default()
        };
        for segment in &segments[start..boundary] {
            piece.push(segment.clone());
        }
        piece.trim_spaces();
        piece.add_certainty(membership);
        if !piece.is_empty() {
            pieces.push(piece);
        }
        start = boundary + 1;
    }
    pieces
}

fn is_separator(segment: &Segment) -> bool {
    matches!(
        segment.ty,
        SegmentType::Comma
            | SegmentType::AndWord
            | SegmentType::OrWord
            | SegmentType::Ampersand
    )
}

/// A token that can anchor a date expression on its own
fn is_anchor(segment: &Segment) -> bool {
    matches!(
        segment.ty,
        SegmentType::Number4
            | SegmentType::Number3
            | SegmentType::Number6
            | SegmentType::Number8
            | SegmentType::UncertaintyDigits
            | SegmentType::Year
            | SegmentType::Century
            | SegmentType::Decade
            | SegmentType::UnknownDateWord
    )
}
