//! Grammar matching of role-tagged segment sequences
//!
//! The parser works on a closed table of recognized shapes, matched exactly
//! via the segment set's pattern extraction, longest shapes first. There is
//! no partial matching: a sequence outside the table is a parse failure the
//! caller turns into an untokenizable result.

use crate::date_types::{DateValue, Era, RangeSwitch};
use crate::error::{PipelineError, Result};
use crate::options::{BeforeDateTreatment, Options};
use crate::segment::{Segment, SegmentType};
use crate::segment_set::SegmentSet;
use crate::tagger::{century_kind, decade_kind};

/// Parse one tagged expression into a date value
pub fn parse(set: &SegmentSet, options: &Options) -> Result<DateValue> {
    let work: Vec<Segment> = set
        .iter()
        .filter(|s| !is_ignorable(s.ty))
        .cloned()
        .collect();
    parse_expression(&work, options)
}

/// Separators and qualifier markers play no part in shape matching
fn is_ignorable(ty: SegmentType) -> bool {
    matches!(
        ty,
        SegmentType::Space
            | SegmentType::Dot
            | SegmentType::Comma
            | SegmentType::Question
            | SegmentType::SquareBracketOpen
            | SegmentType::SquareBracketClose
            | SegmentType::ParenOpen
            | SegmentType::ParenClose
            | SegmentType::Apostrophe
            | SegmentType::CircaWord
    )
}

fn parse_expression(work: &[Segment], options: &Options) -> Result<DateValue> {
    if work.is_empty() {
        return Err(parse_error(work));
    }

    match work[0].ty {
        SegmentType::BeforeWord => {
            let end = parse_simple(&work[1..])?;
            return match options.before_date_treatment {
                BeforeDateTreatment::Range => {
                    let start = DateValue::year(options.open_range_start_year);
                    Ok(DateValue::range(start, end, Some(RangeSwitch::Before))?)
                }
                BeforeDateTreatment::Point => Ok(end),
            };
        }
        SegmentType::AfterWord => {
            let start = parse_simple(&work[1..])?;
            let end = DateValue::year(options.open_range_end_year);
            return Ok(DateValue::range(start, end, Some(RangeSwitch::After))?);
        }
        _ => {}
    }

    if let Some(sep) = range_separator_index(work) {
        let start = parse_simple(&work[..sep])?;
        let end = parse_simple(&work[sep + 1..])?;
        return Ok(DateValue::range(start, end, None)?);
    }

    parse_simple(work)
}

/// Index of a separator that joins two sides of a range
///
/// A hyphen, slash or "to" reads as a range separator only when an anchoring
/// date segment sits on each side of it; otherwise it is an in-date
/// separator and is ignored by shape matching.
pub(crate) fn range_separator_index(segments: &[Segment]) -> Option<usize> {
    segments.iter().enumerate().position(|(i, s)| {
        matches!(
            s.ty,
            SegmentType::Hyphen | SegmentType::Slash | SegmentType::ToWord
        ) && segments[..i].iter().any(|s| anchors_range_side(s.ty))
            && segments[i + 1..].iter().any(|s| anchors_range_side(s.ty))
    })
}

fn anchors_range_side(ty: SegmentType) -> bool {
    matches!(
        ty,
        SegmentType::Year
            | SegmentType::Century
            | SegmentType::Decade
            | SegmentType::Number6
            | SegmentType::Number8
    )
}

/// Match one side of a range, or a whole simple expression
fn parse_simple(work: &[Segment]) -> Result<DateValue> {
    use SegmentType::*;

    let filtered: SegmentSet = work
        .iter()
        .filter(|s| !matches!(s.ty, Hyphen | Slash | ToWord))
        .cloned()
        .collect();

    // longest shapes first; a pattern only counts when it consumes the
    // whole sequence
    const SHAPES: &[&[SegmentType]] = &[
        &[Year, NumberMonth, NumberDay],
        &[NumberMonth, NumberDay, Year],
        &[NumberDay, NumberMonth, Year],
        &[Year, NumberMonth],
        &[NumberMonth, Year],
        &[SeasonAlpha, Year],
        &[Year, SeasonAlpha],
        &[Year, EraBce],
        &[Year, EraCe],
        &[Year],
        &[Century],
        &[Decade],
        &[Number6],
        &[Number8],
        &[UnknownDateWord],
    ];

    for shape in SHAPES {
        let extracted = filtered.extract(shape);
        if extracted.len() != filtered.len() || extracted.is_empty() {
            continue;
        }
        return build(shape, extracted.segments());
    }
    Err(parse_error(filtered.segments()))
}

fn build(shape: &[SegmentType], segments: &[Segment]) -> Result<DateValue> {
    use SegmentType::*;

    let value = match shape {
        [Year, NumberMonth, NumberDay] => DateValue::year_month_day(
            literal(&segments[0])?,
            literal(&segments[1])?,
            literal(&segments[2])?,
        )?,
        [NumberMonth, NumberDay, Year] => DateValue::year_month_day(
            literal(&segments[2])?,
            literal(&segments[0])?,
            literal(&segments[1])?,
        )?,
        [NumberDay, NumberMonth, Year] => DateValue::year_month_day(
            literal(&segments[2])?,
            literal(&segments[1])?,
            literal(&segments[0])?,
        )?,
        [Year, NumberMonth] => {
            DateValue::year_month(literal(&segments[0])?, literal(&segments[1])?)?
        }
        [NumberMonth, Year] => {
            DateValue::year_month(literal(&segments[1])?, literal(&segments[0])?)?
        }
        [SeasonAlpha, Year] => season(literal(&segments[1])?, literal(&segments[0])?)?,
        [Year, SeasonAlpha] => season(literal(&segments[0])?, literal(&segments[1])?)?,
        [Year, EraBce] => DateValue::year_with_era(literal(&segments[0])?, Era::Bce),
        [Year, EraCe] => DateValue::year_with_era(literal(&segments[0])?, Era::Ce),
        [Year] => DateValue::year(literal(&segments[0])?),
        [Century] => DateValue::century(
            literal(&segments[0])?,
            century_kind(&segments[0].lexeme),
        )?,
        [Decade] => DateValue::decade(literal(&segments[0])?, decade_kind(&segments[0].lexeme)),
        [Number6] => {
            let packed = literal(&segments[0])?;
            DateValue::year_month(packed / 100, packed % 100)?
        }
        [Number8] => {
            let packed = literal(&segments[0])?;
            DateValue::year_month_day(packed / 10_000, (packed / 100) % 100, packed % 100)?
        }
        [UnknownDateWord] => DateValue::KnownUnknown,
        _ => return Err(parse_error(segments)),
    };
    Ok(value)
}

/// A season covers three calendar months; winter rolls into the next year
fn season(year: i32, start_month: i32) -> Result<DateValue> {
    let (end_year, end_month) = if start_month == 12 {
        (year + 1, 2)
    } else {
        (year, start_month + 2)
    };
    let start = DateValue::year_month(year, start_month)?;
    let end = DateValue::year_month(end_year, end_month)?;
    Ok(DateValue::range(start, end, None)?)
}

fn literal(segment: &Segment) -> Result<i32> {
    segment.literal.ok_or_else(|| PipelineError::Parse {
        types: segment.ty.to_string(),
    })
}

fn parse_error(segments: &[Segment]) -> PipelineError {
    let types = segments
        .iter()
        .map(|s| s.ty.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    PipelineError::Parse { types }
}
