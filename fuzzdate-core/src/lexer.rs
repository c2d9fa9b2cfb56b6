//! Lexical tokenization of raw date strings
//!
//! Every character of the input ends up in exactly one segment; spaces and
//! punctuation are their own segments so later stages can reason about
//! adjacency. Numeric runs are classified greedily by digit count. A word
//! that matches no known class lexes as `Unknown` rather than failing the
//! whole string; a character outside the supported alphabet fails with a
//! located `Lex` error.

use crate::error::{PipelineError, Result};
use crate::segment::{Segment, SegmentType};
use crate::segment_set::SegmentSet;

/// Tokenize `input` into an ordered segment set covering the whole string
pub fn lex(input: &str) -> Result<SegmentSet> {
    let mut set = SegmentSet::with_source(input);
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_ascii_digit() {
            i = lex_numeric(&chars, i, &mut set)?;
        } else if c.is_alphabetic() {
            i = lex_word(&chars, i, &mut set);
        } else {
            i = lex_punctuation(&chars, i, &mut set)?;
        }
    }

    Ok(set)
}

fn lex_numeric(chars: &[char], start: usize, set: &mut SegmentSet) -> Result<usize> {
    let mut i = start;
    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }
    // Trailing `u` placeholders mark uncertainty digits ("19uu", "192u")
    let mut placeholders = 0;
    while i < chars.len() && matches!(chars[i], 'u' | 'U') {
        placeholders += 1;
        i += 1;
    }
    if placeholders > 0 {
        if i < chars.len() && chars[i].is_alphanumeric() {
            // "19under" is a word glued to digits, not uncertainty digits
            while i < chars.len() && chars[i].is_alphanumeric() {
                i += 1;
            }
            let lexeme: String = chars[start..i].iter().collect();
            set.push(Segment::token(SegmentType::Unknown, lexeme, start));
        } else {
            let lexeme: String = chars[start..i].iter().collect();
            set.push(Segment::token(SegmentType::UncertaintyDigits, lexeme, start));
        }
        return Ok(i);
    }
    let lexeme: String = chars[start..i].iter().collect();
    let segment = Segment::number(lexeme, start)?;
    set.push(segment);
    Ok(i)
}

fn lex_word(chars: &[char], start: usize, set: &mut SegmentSet) -> usize {
    // "n.d." spans letters and dots, so it is matched before the word walk
    if matches_no_date_abbreviation(chars, start) {
        let lexeme: String = chars[start..start + 4].iter().collect();
        set.push(Segment::token(SegmentType::UnknownDateWord, lexeme, start));
        return start + 4;
    }

    let mut i = start;
    while i < chars.len() && chars[i].is_alphabetic() {
        i += 1;
    }
    let lexeme: String = chars[start..i].iter().collect();
    let lower = lexeme.to_lowercase();

    if let Some(month) = month_number(&lower) {
        set.push(Segment::token(SegmentType::MonthAlpha, lexeme, start).with_literal(month));
        return i;
    }
    if let Some(season_start) = season_start_month(&lower) {
        set.push(Segment::token(SegmentType::SeasonAlpha, lexeme, start).with_literal(season_start));
        return i;
    }

    let ty = match lower.as_str() {
        "st" | "nd" | "rd" | "th" if follows_number(set, start) => SegmentType::OrdinalIndicator,
        "c" | "ca" | "circ" | "circa" | "about" | "approx" | "approximately" => {
            SegmentType::CircaWord
        }
        "century" | "centuries" | "cent" => SegmentType::CenturyWord,
        "decade" | "decades" => SegmentType::DecadeWord,
        "bce" | "bc" => SegmentType::EraBce,
        "ce" | "ad" => SegmentType::EraCe,
        "before" | "pre" => SegmentType::BeforeWord,
        "after" | "post" => SegmentType::AfterWord,
        "and" => SegmentType::AndWord,
        "or" => SegmentType::OrWord,
        "to" => SegmentType::ToWord,
        // bare "nd" off a number is the loose "n.d." spelling
        "unknown" | "undated" | "nd" => SegmentType::UnknownDateWord,
        _ => SegmentType::Unknown,
    };
    set.push(Segment::token(ty, lexeme, start));
    i
}

fn lex_punctuation(chars: &[char], start: usize, set: &mut SegmentSet) -> Result<usize> {
    let c = chars[start];
    if c == ' ' || c == '\t' {
        let mut i = start;
        while i < chars.len() && (chars[i] == ' ' || chars[i] == '\t') {
            i += 1;
        }
        let lexeme: String = chars[start..i].iter().collect();
        set.push(Segment::token(SegmentType::Space, lexeme, start));
        return Ok(i);
    }
    let ty = match c {
        ',' => SegmentType::Comma,
        '-' | '\u{2013}' | '\u{2014}' => SegmentType::Hyphen,
        '/' => SegmentType::Slash,
        '.' => SegmentType::Dot,
        '?' => SegmentType::Question,
        '[' => SegmentType::SquareBracketOpen,
        ']' => SegmentType::SquareBracketClose,
        '(' => SegmentType::ParenOpen,
        ')' => SegmentType::ParenClose,
        '\'' | '\u{2019}' => SegmentType::Apostrophe,
        '&' => SegmentType::Ampersand,
        _ => {
            return Err(PipelineError::Lex {
                fragment: c.to_string(),
                column: start,
            })
        }
    };
    set.push(Segment::token(ty, c.to_string(), start));
    Ok(start + 1)
}

/// True when chars at `start` spell "n.d." (any case)
fn matches_no_date_abbreviation(chars: &[char], start: usize) -> bool {
    chars.len() >= start + 4
        && matches!(chars[start], 'n' | 'N')
        && chars[start + 1] == '.'
        && matches!(chars[start + 2], 'd' | 'D')
        && chars[start + 3] == '.'
}

/// True when the last lexed segment is a number directly adjacent to `column`
fn follows_number(set: &SegmentSet, column: usize) -> bool {
    set.segments().last().is_some_and(|s| {
        s.literal.is_some() && s.location.column + s.location.len == column
    })
}

fn month_number(lower: &str) -> Option<i32> {
    let month = match lower {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sept" | "sep" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn season_start_month(lower: &str) -> Option<i32> {
    let start = match lower {
        "spring" => 3,
        "summer" => 6,
        "autumn" | "fall" => 9,
        "winter" => 12,
        _ => return None,
    };
    Some(start)
}
