//! Date part tagging: assigning semantic roles to ambiguous numeric tokens
//!
//! Rules apply in a fixed order: positional anchors and explicit markers
//! first, then the configured disambiguation policy, which always leaves a
//! warning naming itself. A token no rule can place keeps an unresolved type
//! and propagates toward an untokenizable result.

use crate::date_types::{CenturyKind, DecadeKind};
use crate::error::{PipelineError, Result};
use crate::options::{AmbiguousMonthDay, AmbiguousMonthYear, BceHandling, Options};
use crate::segment::{Segment, SegmentType};
use crate::segment_set::SegmentSet;

/// Resolve semantic roles for one expression's segments
pub fn tag(set: SegmentSet, options: &Options) -> Result<SegmentSet> {
    let mut set = merge_compound_numbers(set)?;
    retype_unambiguous_years(&mut set);
    apply_era_markers(&mut set, options);
    resolve_small_numbers(&mut set, options)?;
    Ok(set)
}

/// Century/decade kind recovered from a merged lexeme
///
/// "19th c." and "19th century" are named centuries; "1900s" is a plural;
/// "19uu" carries uncertainty digits.
pub(crate) fn century_kind(lexeme: &str) -> CenturyKind {
    let rest = lexeme.trim_start_matches(|c: char| c.is_ascii_digit());
    if !rest.is_empty() && rest.chars().all(|c| matches!(c, 'u' | 'U')) {
        CenturyKind::UncertaintyDigits
    } else if rest.eq_ignore_ascii_case("s") {
        CenturyKind::Plural
    } else {
        CenturyKind::Name
    }
}

/// Decade kind recovered from a merged lexeme
pub(crate) fn decade_kind(lexeme: &str) -> DecadeKind {
    let rest = lexeme.trim_start_matches(|c: char| c.is_ascii_digit());
    if !rest.is_empty() && rest.chars().all(|c| matches!(c, 'u' | 'U')) {
        DecadeKind::UncertaintyDigits
    } else {
        DecadeKind::Plural
    }
}

/// Merge multi-token century/decade spellings into single role segments
fn merge_compound_numbers(set: SegmentSet) -> Result<SegmentSet> {
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

        // "19uu" -> century, "192u" -> decade
        if current.ty == SegmentType::UncertaintyDigits {
            let digits: String = current
                .lexeme
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            let placeholders = current.lexeme.len() - digits.len();
            let value: i32 = digits.parse().map_err(|_| PipelineError::Tag {
                lexeme: current.lexeme.clone(),
                column: current.location.column,
            })?;
            match placeholders {
                2 => out.push(current.clone().retype(SegmentType::Century).with_literal(value)),
                1 => out.push(
                    current
                        .clone()
                        .retype(SegmentType::Decade)
                        .with_literal(value * 10),
                ),
                _ => out.push(current.clone().retype(SegmentType::Unknown)),
            }
            i += 1;
            continue;
        }

        // ordinal number followed by a century word: "19th century", "19th c."
        if current.ty == SegmentType::Number1or2 && current.literal.is_some() {
            if let Some((end, include_dot)) = century_word_after(segments, i) {
                let mut sources: Vec<Segment> = segments[i..=end].to_vec();
                if include_dot {
                    sources.push(segments[end + 1].clone());
                }
                let literal = current.literal.expect("checked above");
                let merged = Segment::derived(SegmentType::Century, &sources)
                    .expect("sources are non-empty")
                    .with_literal(literal);
                out.push(merged);
                i = if include_dot { end + 2 } else { end + 1 };
                continue;
            }
            // ordinal number followed by a decade word: "2nd decade" is 10-19
            if let Some(end) = decade_word_after(segments, i) {
                let ordinal = current.literal.expect("checked above");
                let merged = Segment::derived(SegmentType::Decade, &segments[i..=end])
                    .expect("sources are non-empty")
                    .with_literal((ordinal - 1) * 10);
                out.push(merged);
                i = end + 1;
                continue;
            }
        }

        // "1920s" / "1900s": a 4-digit number glued to a plural s
        if current.ty == SegmentType::Number4 {
            if let Some(next) = segments.get(i + 1) {
                if next.ty == SegmentType::Unknown
                    && next.lexeme.eq_ignore_ascii_case("s")
                    && current.location.column + current.location.len == next.location.column
                {
                    let year = current.literal.expect("4-digit numbers carry a literal");
                    let sources = [current.clone(), next.clone()];
                    let merged = if (year / 10) % 10 == 0 {
                        // "1900s" spans a century
                        Segment::derived(SegmentType::Century, &sources)
                            .expect("sources are non-empty")
                            .with_literal(year / 100)
                    } else {
                        Segment::derived(SegmentType::Decade, &sources)
                            .expect("sources are non-empty")
                            .with_literal(year)
                    };
                    out.push(merged);
                    i += 2;
                    continue;
                }
            }
        }

        out.push(current.clone());
        i += 1;
    }
    Ok(out)
}

/// Index of a century word following the number at `i`, skipping one space
///
/// A lone "c" after an ordinal number reads as the century abbreviation, not
/// circa; a directly trailing dot is folded into the merge ("19th c.").
fn century_word_after(segments: &[Segment], i: usize) -> Option<(usize, bool)> {
    let mut j = i + 1;
    if segments.get(j).map(|s| s.ty) == Some(SegmentType::Space) {
        j += 1;
    }
    let word = segments.get(j)?;
    let is_century_word = word.ty == SegmentType::CenturyWord
        || (word.ty == SegmentType::CircaWord && word.lexeme.eq_ignore_ascii_case("c"));
    if !is_century_word {
        return None;
    }
    let include_dot = segments.get(j + 1).map(|s| s.ty) == Some(SegmentType::Dot);
    Some((j, include_dot))
}

/// Index of a decade word following the number at `i`, skipping one space
fn decade_word_after(segments: &[Segment], i: usize) -> Option<usize> {
    let mut j = i + 1;
    if segments.get(j).map(|s| s.ty) == Some(SegmentType::Space) {
        j += 1;
    }
    (segments.get(j)?.ty == SegmentType::DecadeWord).then_some(j)
}

/// 3- and 4-digit numbers are always years
fn retype_unambiguous_years(set: &mut SegmentSet) {
    *set = set.map_segments(|s| {
        if matches!(s.ty, SegmentType::Number3 | SegmentType::Number4) {
            s.clone().retype(SegmentType::Year)
        } else {
            s.clone()
        }
    });
}

/// Bind era markers to the nearest preceding numeric segment
fn apply_era_markers(set: &mut SegmentSet, options: &Options) {
    let era_columns: Vec<usize> = set
        .iter()
        .enumerate()
        .filter(|(_, s)| matches!(s.ty, SegmentType::EraBce | SegmentType::EraCe))
        .map(|(i, _)| i)
        .collect();
    if era_columns.is_empty() {
        return;
    }
    let mut warnings: Vec<String> = Vec::new();
    for era_index in era_columns {
        let is_bce = set.segments()[era_index].ty == SegmentType::EraBce;
        let year_index = set.segments()[..era_index]
            .iter()
            .rposition(|s| matches!(s.ty, SegmentType::Year | SegmentType::Number1or2));
        let Some(year_index) = year_index else {
            continue;
        };
        let segment = set.segments()[year_index].clone();
        let Some(literal) = segment.literal else {
            continue;
        };
        let retyped = if is_bce {
            match options.bce_handling {
                BceHandling::Naive => {
                    warnings.push(format!(
                        "BCE year {literal} kept as-is per bce_handling = naive"
                    ));
                    segment.retype(SegmentType::Year)
                }
                BceHandling::Astronomical => segment
                    .retype(SegmentType::Year)
                    .with_literal(1 - literal),
            }
        } else {
            segment.retype(SegmentType::Year)
        };
        set.replace(year_index, retyped);
    }
    for warning in warnings {
        set.add_warning(warning);
    }
}

/// Resolve remaining 1-2 digit numbers via anchors, then policy
fn resolve_small_numbers(set: &mut SegmentSet, options: &Options) -> Result<()> {
    let small: Vec<usize> = set
        .iter()
        .enumerate()
        .filter(|(_, s)| s.ty == SegmentType::Number1or2)
        .map(|(i, _)| i)
        .collect();
    if small.is_empty() {
        return Ok(());
    }

    let has_year = set.iter().any(|s| s.ty == SegmentType::Year);
    let has_month = set.iter().any(|s| s.ty == SegmentType::NumberMonth);

    match (has_year, has_month, small.len()) {
        // month already known: the small number can only be a day
        (_, true, 1) => {
            let index = small[0];
            let segment = set.segments()[index].clone();
            let value = literal_of(&segment)?;
            if !(1..=31).contains(&value) {
                return Err(tag_error(&segment));
            }
            set.replace(index, segment.retype(SegmentType::NumberDay));
        }
        // year anchor plus one small number: month range check, then policy
        (true, false, 1) => {
            let index = small[0];
            let segment = set.segments()[index].clone();
            let value = literal_of(&segment)?;
            let anchor = year_anchor_literal(set);
            if value > 12 {
                // cannot be a month; reads as the short end of a year range
                if let Some(anchor) = anchor {
                    let expanded = expand_two_digit_year(anchor, value);
                    set.replace(index, segment.retype(SegmentType::Year).with_literal(expanded));
                    set.add_warning(format!(
                        "value {value} exceeds month range; treated as year {expanded}"
                    ));
                } else {
                    set.replace(index, segment.retype(SegmentType::Unknown));
                }
            } else {
                match options.ambiguous_month_year {
                    AmbiguousMonthYear::AsYear => {
                        let anchor = anchor.unwrap_or(value);
                        let expanded = expand_two_digit_year(anchor, value);
                        set.replace(
                            index,
                            segment.retype(SegmentType::Year).with_literal(expanded),
                        );
                        set.add_warning(format!(
                            "ambiguous value {value} treated as year {expanded} per ambiguous_month_year = as_year"
                        ));
                    }
                    policy @ (AmbiguousMonthYear::AsMonth | AmbiguousMonthYear::AsDay) => {
                        set.replace(index, segment.retype(SegmentType::NumberMonth));
                        set.add_warning(format!(
                            "ambiguous value {value} treated as month per ambiguous_month_year = {policy}"
                        ));
                    }
                }
            }
        }
        // year anchor plus two small numbers: month/day ordering
        (true, false, 2) => {
            let first = set.segments()[small[0]].clone();
            let second = set.segments()[small[1]].clone();
            let v1 = literal_of(&first)?;
            let v2 = literal_of(&second)?;
            let day_first = if v1 > 12 && v2 > 12 {
                return Err(tag_error(&first));
            } else if v1 > 12 {
                true
            } else if v2 > 12 {
                false
            } else if options.ambiguous_month_year == AmbiguousMonthYear::AsDay {
                set.add_warning(
                    "ambiguous month/day order read day-first per ambiguous_month_year = as_day"
                        .to_string(),
                );
                true
            } else {
                let day_first = options.ambiguous_month_day == AmbiguousMonthDay::AsDayMonth;
                set.add_warning(format!(
                    "ambiguous month/day order resolved per ambiguous_month_day = {}",
                    options.ambiguous_month_day
                ));
                day_first
            };
            let (day_seg, day_val, month_seg, month_val) = if day_first {
                (small[0], v1, small[1], v2)
            } else {
                (small[1], v2, small[0], v1)
            };
            if !(1..=31).contains(&day_val) {
                return Err(tag_error(&set.segments()[day_seg].clone()));
            }
            if !(1..=12).contains(&month_val) {
                return Err(tag_error(&set.segments()[month_seg].clone()));
            }
            let day = set.segments()[day_seg].clone();
            set.replace(day_seg, day.retype(SegmentType::NumberDay));
            let month = set.segments()[month_seg].clone();
            set.replace(month_seg, month.retype(SegmentType::NumberMonth));
        }
        // lone small number with no anchor at all: policy decides outright
        (false, false, 1) => {
            let index = small[0];
            let segment = set.segments()[index].clone();
            let value = literal_of(&segment)?;
            let (ty, role) = match options.ambiguous_month_year {
                AmbiguousMonthYear::AsYear => (SegmentType::Year, "year"),
                AmbiguousMonthYear::AsMonth if (1..=12).contains(&value) => {
                    (SegmentType::NumberMonth, "month")
                }
                AmbiguousMonthYear::AsDay if (1..=31).contains(&value) => {
                    (SegmentType::NumberDay, "day")
                }
                _ => (SegmentType::Unknown, "unknown"),
            };
            set.replace(index, segment.retype(ty));
            set.add_warning(format!(
                "unanchored value {value} treated as {role} per ambiguous_month_year = {}",
                options.ambiguous_month_year
            ));
        }
        // nothing fixes a role; leave the tokens unresolved
        _ => {
            *set = set.map_segments(|s| {
                if s.ty == SegmentType::Number1or2 {
                    s.clone().retype(SegmentType::Unknown)
                } else {
                    s.clone()
                }
            });
        }
    }
    Ok(())
}

fn literal_of(segment: &Segment) -> Result<i32> {
    segment.literal.ok_or_else(|| tag_error(segment))
}

fn tag_error(segment: &Segment) -> PipelineError {
    PipelineError::Tag {
        lexeme: segment.lexeme.clone(),
        column: segment.location.column,
    }
}

fn year_anchor_literal(set: &SegmentSet) -> Option<i32> {
    set.iter()
        .find(|s| s.ty == SegmentType::Year)
        .and_then(|s| s.literal)
}

/// Expand a 1-2 digit year against the anchor's century
///
/// "1910-11" expands 11 to 1911; an end short of the anchor's remainder
/// rolls into the next century ("1998-03" reads 2003).
fn expand_two_digit_year(anchor: i32, value: i32) -> i32 {
    let mut expanded = anchor - anchor.rem_euclid(100) + value;
    if expanded < anchor {
        expanded += 100;
    }
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use crate::normalize::normalize;
    use crate::options::Options;

    fn tagged(input: &str, options: &Options) -> SegmentSet {
        tag(normalize(lex(input).unwrap()), options).unwrap()
    }

    fn roles(set: &SegmentSet) -> Vec<SegmentType> {
        set.iter()
            .filter(|s| !matches!(s.ty, SegmentType::Space | SegmentType::Dot))
            .map(|s| s.ty)
            .collect()
    }

    #[test]
    fn four_digit_numbers_become_years() {
        let set = tagged("2002", &Options::default());
        assert_eq!(roles(&set), vec![SegmentType::Year]);
        assert_eq!(set.segments()[0].literal, Some(2002));
    }

    #[test]
    fn ordinal_century_merges() {
        let set = tagged("19th century", &Options::default());
        assert_eq!(roles(&set), vec![SegmentType::Century]);
        let seg = &set.segments()[0];
        assert_eq!(seg.literal, Some(19));
        assert_eq!(seg.lexeme, "19th century");
        assert_eq!(century_kind(&seg.lexeme), CenturyKind::Name);
    }

    #[test]
    fn abbreviated_century_with_dot_merges() {
        let set = tagged("19th c.", &Options::default());
        assert_eq!(set.len(), 1);
        let seg = &set.segments()[0];
        assert_eq!(seg.ty, SegmentType::Century);
        assert_eq!(seg.lexeme, "19th c.");
        assert_eq!(century_kind(&seg.lexeme), CenturyKind::Name);
    }

    #[test]
    fn ordinal_decade_merges() {
        let set = tagged("2nd decade", &Options::default());
        assert_eq!(roles(&set), vec![SegmentType::Decade]);
        let seg = &set.segments()[0];
        assert_eq!(seg.literal, Some(10));
        assert_eq!(seg.lexeme, "2nd decade");
    }

    #[test]
    fn plural_digits_make_decades_and_centuries() {
        let set = tagged("1920s", &Options::default());
        let seg = &set.segments()[0];
        assert_eq!(seg.ty, SegmentType::Decade);
        assert_eq!(seg.literal, Some(1920));
        assert_eq!(decade_kind(&seg.lexeme), DecadeKind::Plural);

        let set = tagged("1900s", &Options::default());
        let seg = &set.segments()[0];
        assert_eq!(seg.ty, SegmentType::Century);
        assert_eq!(seg.literal, Some(19));
        assert_eq!(century_kind(&seg.lexeme), CenturyKind::Plural);
    }

    #[test]
    fn uncertainty_digits_make_decades_and_centuries() {
        let set = tagged("19uu", &Options::default());
        let seg = &set.segments()[0];
        assert_eq!(seg.ty, SegmentType::Century);
        assert_eq!(seg.literal, Some(19));
        assert_eq!(century_kind(&seg.lexeme), CenturyKind::UncertaintyDigits);

        let set = tagged("192u", &Options::default());
        let seg = &set.segments()[0];
        assert_eq!(seg.ty, SegmentType::Decade);
        assert_eq!(seg.literal, Some(1920));
    }

    #[test]
    fn ambiguous_month_year_as_month() {
        let options = Options {
            ambiguous_month_year: AmbiguousMonthYear::AsMonth,
            ..Options::default()
        };
        let set = tagged("1910-11", &options);
        assert_eq!(
            roles(&set),
            vec![SegmentType::Year, SegmentType::Hyphen, SegmentType::NumberMonth]
        );
        assert!(set.warnings.iter().any(|w| w.contains("as_month")));
    }

    #[test]
    fn ambiguous_month_year_as_year_expands_century() {
        let options = Options {
            ambiguous_month_year: AmbiguousMonthYear::AsYear,
            ..Options::default()
        };
        let set = tagged("1910-11", &options);
        assert_eq!(
            roles(&set),
            vec![SegmentType::Year, SegmentType::Hyphen, SegmentType::Year]
        );
        assert_eq!(set.segments().last().unwrap().literal, Some(1911));
        assert!(set.warnings.iter().any(|w| w.contains("as_year")));
    }

    #[test]
    fn value_out_of_month_range_reads_as_year_without_policy() {
        let set = tagged("1910-50", &Options::default());
        assert_eq!(set.segments().last().unwrap().literal, Some(1950));
        assert!(set.warnings.iter().any(|w| w.contains("exceeds month range")));
    }

    #[test]
    fn known_month_makes_small_number_a_day() {
        let set = tagged("2020, Feb 15", &Options::default());
        assert_eq!(
            roles(&set),
            vec![
                SegmentType::Year,
                SegmentType::Comma,
                SegmentType::NumberMonth,
                SegmentType::NumberDay
            ]
        );
    }

    #[test]
    fn two_small_numbers_use_valid_range_checks_first() {
        // 15 cannot be a month, so order is fixed without policy
        let set = tagged("15/10/2002", &Options::default());
        assert_eq!(
            roles(&set),
            vec![
                SegmentType::NumberDay,
                SegmentType::Slash,
                SegmentType::NumberMonth,
                SegmentType::Slash,
                SegmentType::Year
            ]
        );
    }

    #[test]
    fn two_small_numbers_fall_back_to_order_policy() {
        let set = tagged("10/11/2002", &Options::default());
        assert_eq!(
            roles(&set),
            vec![
                SegmentType::NumberMonth,
                SegmentType::Slash,
                SegmentType::NumberDay,
                SegmentType::Slash,
                SegmentType::Year
            ]
        );
        assert!(set
            .warnings
            .iter()
            .any(|w| w.contains("ambiguous_month_day")));
    }

    #[test]
    fn both_numbers_out_of_month_range_is_a_tag_error() {
        let err = tag(
            normalize(lex("25/26/2002").unwrap()),
            &Options::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::Tag { .. }));
    }

    #[test]
    fn bce_naive_keeps_year_and_warns() {
        let set = tagged("100 bce", &Options::default());
        let year = set.iter().find(|s| s.ty == SegmentType::Year).unwrap();
        assert_eq!(year.literal, Some(100));
        assert!(set.warnings.iter().any(|w| w.contains("naive")));
    }

    #[test]
    fn bce_astronomical_maps_to_signed_year() {
        let options = Options {
            bce_handling: BceHandling::Astronomical,
            ..Options::default()
        };
        let set = tagged("100 bce", &options);
        let year = set.iter().find(|s| s.ty == SegmentType::Year).unwrap();
        assert_eq!(year.literal, Some(-99));
    }

    #[test]
    fn unresolvable_numbers_become_unknown() {
        let set = tagged("10-11", &Options::default());
        assert!(set.iter().all(|s| s.ty != SegmentType::Number1or2));
        assert!(set.iter().any(|s| s.ty == SegmentType::Unknown));
    }
}
