//! Property-based checks over segment construction and lexing

use fuzzdate_core::lexer::lex;
use fuzzdate_core::{Segment, SegmentType};
use proptest::prelude::*;

proptest! {
    /// Digit count alone decides the numeric type, and classified lexemes
    /// parse to their integer value.
    #[test]
    fn numeric_classification_follows_width(lexeme in "[0-9]{1,9}") {
        let seg = Segment::number(lexeme.clone(), 0).unwrap();
        let expected = match lexeme.len() {
            1 | 2 => SegmentType::Number1or2,
            3 => SegmentType::Number3,
            4 => SegmentType::Number4,
            6 => SegmentType::Number6,
            8 => SegmentType::Number8,
            _ => SegmentType::Unknown,
        };
        prop_assert_eq!(seg.ty, expected);
        if seg.ty == SegmentType::Unknown {
            prop_assert_eq!(seg.literal, None);
        } else {
            prop_assert_eq!(seg.literal, Some(lexeme.parse::<i32>().unwrap()));
        }
        prop_assert_eq!(seg.lexeme, lexeme);
    }

    /// A lexeme with any non-digit character never constructs a number.
    #[test]
    fn mixed_lexeme_is_rejected(prefix in "[0-9]{0,4}", tail in "[a-z]{1,4}") {
        let lexeme = format!("{prefix}{tail}");
        prop_assert!(Segment::number(lexeme, 0).is_err());
    }

    /// Derivation concatenates lexemes in order and spans the source run.
    #[test]
    fn derivation_preserves_text_and_span(widths in prop::collection::vec(1usize..4, 1..5)) {
        let mut sources = Vec::new();
        let mut column = 0;
        for (i, w) in widths.iter().enumerate() {
            let lexeme = i.to_string().repeat(*w);
            sources.push(Segment::token(SegmentType::Unknown, lexeme, column));
            column += w;
        }
        let merged = Segment::derived(SegmentType::Year, &sources).unwrap();
        let expected: String = sources.iter().map(|s| s.lexeme.as_str()).collect();
        prop_assert_eq!(merged.lexeme, expected);
        prop_assert_eq!(merged.location.column, 0);
        prop_assert_eq!(merged.location.len, widths.iter().sum::<usize>());
        prop_assert_eq!(merged.ty, SegmentType::Year);
    }

    /// Lexing over the supported alphabet never drops a character.
    #[test]
    fn lexing_covers_every_character(input in "[0-9a-z ,.?/&()\\[\\]'-]{1,40}") {
        let set = lex(&input).unwrap();
        prop_assert_eq!(set.lexeme(), input);
    }

    /// Re-extracting a pattern from its own extraction changes nothing.
    #[test]
    fn extraction_is_idempotent(input in "[0-9a-z ,.-]{1,30}") {
        let set = lex(&input).unwrap();
        let pattern = [SegmentType::Number4, SegmentType::Space, SegmentType::Number1or2];
        let first = set.extract(&pattern);
        let second = first.extract(&pattern);
        prop_assert_eq!(first.segments(), second.segments());
    }
}
