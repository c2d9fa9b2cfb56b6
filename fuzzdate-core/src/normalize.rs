//! Token normalizers: pure, order-preserving token-stream rewrites
//!
//! These run between the lexer and the segmenter and never resolve
//! cross-token ambiguity; they only canonicalize single tokens (month names)
//! or glue trivially adjacent pairs (a number and its ordinal indicator).

use crate::segment::{Segment, SegmentType};
use crate::segment_set::SegmentSet;

/// Run both normalizers in order
pub fn normalize(set: SegmentSet) -> SegmentSet {
    translate_ordinals(convert_alpha_months(set))
}

/// Rewrite month-name words into numeric month segments
///
/// The lexer already resolved the month number into the literal; this pass
/// only moves the segment into the numeric-month class, preserving lexeme,
/// location and certainty.
fn convert_alpha_months(set: SegmentSet) -> SegmentSet {
    set.map_segments(|s| {
        if s.ty == SegmentType::MonthAlpha {
            s.clone().retype(SegmentType::NumberMonth)
        } else {
            s.clone()
        }
    })
}

/// Merge a number and its trailing ordinal indicator into one segment
///
/// "19" + "th" becomes a single number segment spanning "19th"; the
/// indicator token is dropped. The merged segment keeps the number's literal
/// explicitly, since derivations from several sources do not carry one.
fn translate_ordinals(set: SegmentSet) -> SegmentSet {
    let mut out = SegmentSet {
        certainty: set.certainty.clone(),
        warnings: set.warnings.clone(),
        source: set.source.clone(),
        ..SegmentSet::default()
    };
    let segments = set.segments();
    let mut i = 0;
    while i < segments.len() {
        let current = &segments[i];
        let next = segments.get(i + 1);
        if current.literal.is_some()
            && next.is_some_and(|n| n.ty == SegmentType::OrdinalIndicator)
        {
            let next = next.expect("checked above");
            let literal = current.literal.expect("checked above");
            let merged = Segment::derived(current.ty, &[current.clone(), next.clone()])
                .expect("two sources is never empty")
                .with_literal(literal);
            out.push(merged);
            i += 2;
        } else {
            out.push(current.clone());
            i += 1;
        }
    }
    out
}
