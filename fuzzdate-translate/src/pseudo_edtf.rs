//! Lyrasis pseudo-EDTF rendering
//!
//! A human-readable vocabulary: spans are written out ("1801 - 1900"),
//! imprecision as trailing parentheticals ("2002 (uncertain and
//! approximate)", "1920s (exact year unspecified)").

use crate::{century_year_span, Dialect, RenderContext};
use fuzzdate_core::{Certainty, CenturyKind, DateValue, DecadeKind, Era, RangeSwitch, SetKind};

const UNSPECIFIED_YEAR: &str = "(exact year unspecified)";

/// The Lyrasis pseudo-EDTF dialect
pub struct LyrasisPseudoEdtf;

impl LyrasisPseudoEdtf {
    /// Trailing parenthetical for the tags in scope, with its leading space
    fn parenthetical(&self, ctx: &RenderContext) -> String {
        // fixed display order, uncertain before approximate
        let words: Vec<&str> = [
            Certainty::Uncertain,
            Certainty::Approximate,
            Certainty::Inferred,
        ]
        .into_iter()
        .filter(|c| ctx.has(*c))
        .map(|c| self.qualifier_vocab(c))
        .collect();
        if words.is_empty() {
            String::new()
        } else {
            format!(" ({})", words.join(" and "))
        }
    }

    fn year_text(year: i32, era: Era) -> String {
        match era {
            Era::Bce => format!("{year} BCE"),
            Era::Ce => year.to_string(),
        }
    }
}

impl Dialect for LyrasisPseudoEdtf {
    fn year(&self, year: i32, era: Era, ctx: &RenderContext) -> String {
        format!("{}{}", Self::year_text(year, era), self.parenthetical(ctx))
    }

    fn year_month(&self, year: i32, month: u32, ctx: &RenderContext) -> String {
        format!("{year}-{month:02}{}", self.parenthetical(ctx))
    }

    fn year_month_day(&self, year: i32, month: u32, day: u32, ctx: &RenderContext) -> String {
        format!("{year}-{month:02}-{day:02}{}", self.parenthetical(ctx))
    }

    fn decade(&self, decade: i32, _kind: DecadeKind, ctx: &RenderContext) -> String {
        format!("{decade}s {UNSPECIFIED_YEAR}{}", self.parenthetical(ctx))
    }

    fn century(&self, century: i32, kind: CenturyKind, ctx: &RenderContext) -> String {
        let (first, last) = century_year_span(century, kind);
        format!(
            "{first} - {last} {UNSPECIFIED_YEAR}{}",
            self.parenthetical(ctx)
        )
    }

    fn range(
        &self,
        start: &DateValue,
        end: &DateValue,
        switch: Option<RangeSwitch>,
        ctx: &RenderContext,
    ) -> String {
        let start_ctx = ctx.narrowed(fuzzdate_core::Precision::Start);
        let end_ctx = ctx.narrowed(fuzzdate_core::Precision::End);
        match switch {
            Some(RangeSwitch::Before) => {
                format!("before {}", self.render_value(end, &end_ctx))
            }
            Some(RangeSwitch::After) => {
                format!("after {}", self.render_value(start, &start_ctx))
            }
            None => format!(
                "{} - {}",
                self.render_value(start, &start_ctx),
                self.render_value(end, &end_ctx)
            ),
        }
    }

    fn set(&self, members: &[DateValue], kind: SetKind, ctx: &RenderContext) -> String {
        let rendered: Vec<String> = members
            .iter()
            .map(|m| self.render_value(m, &ctx.bare()))
            .collect();
        match kind {
            SetKind::OneOf => rendered.join(" or "),
            SetKind::AllOf => rendered.join(", "),
        }
    }

    fn known_unknown(&self, ctx: &RenderContext) -> String {
        ctx.custom_unknown().unwrap_or("no date known").to_string()
    }

    fn untokenizable(&self, lexeme: &str, _ctx: &RenderContext) -> String {
        format!("{lexeme:?} is not a recognized date")
    }

    fn qualifier_vocab(&self, certainty: Certainty) -> &'static str {
        match certainty {
            Certainty::Approximate => "approximate",
            Certainty::Uncertain => "uncertain",
            Certainty::Inferred => "inferred",
            Certainty::AllOfSet | Certainty::OneOfSet => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuzzdate_core::{Options, Qualifier, ResolvedDate};

    fn render(value: DateValue, qualifiers: Vec<Qualifier>) -> String {
        LyrasisPseudoEdtf.render(&ResolvedDate::new(value, qualifiers), &Options::default())
    }

    #[test]
    fn named_century_span_wording() {
        let value = DateValue::century(19, CenturyKind::Name).unwrap();
        assert_eq!(render(value, vec![]), "1801 - 1900 (exact year unspecified)");
    }

    #[test]
    fn plural_century_span_wording() {
        let value = DateValue::century(19, CenturyKind::Plural).unwrap();
        assert_eq!(render(value, vec![]), "1900 - 1999 (exact year unspecified)");
    }

    #[test]
    fn decade_wording() {
        let value = DateValue::decade(1920, DecadeKind::Plural);
        assert_eq!(render(value, vec![]), "1920s (exact year unspecified)");
    }

    #[test]
    fn uncertain_and_approximate_wording() {
        let rendered = render(
            DateValue::year(2002),
            vec![
                Qualifier::whole(Certainty::Approximate),
                Qualifier::whole(Certainty::Uncertain),
            ],
        );
        assert_eq!(rendered, "2002 (uncertain and approximate)");
    }

    #[test]
    fn single_qualifier_wording() {
        assert_eq!(
            render(
                DateValue::year(2002),
                vec![Qualifier::whole(Certainty::Approximate)]
            ),
            "2002 (approximate)"
        );
        assert_eq!(
            render(
                DateValue::year(2002),
                vec![Qualifier::whole(Certainty::Inferred)]
            ),
            "2002 (inferred)"
        );
    }

    #[test]
    fn ranges_write_their_bounds_out() {
        let closed =
            DateValue::range(DateValue::year(1920), DateValue::year(1930), None).unwrap();
        assert_eq!(render(closed, vec![]), "1920 - 1930");

        let before = DateValue::range(
            DateValue::year(1583),
            DateValue::year(1950),
            Some(RangeSwitch::Before),
        )
        .unwrap();
        assert_eq!(render(before, vec![]), "before 1950");
    }

    #[test]
    fn alternate_set_joins_with_or() {
        let value = DateValue::set(
            vec![DateValue::year(1667), DateValue::year(1668)],
            SetKind::OneOf,
        );
        assert_eq!(render(value, vec![]), "1667 or 1668");
    }

    #[test]
    fn bce_year() {
        assert_eq!(render(DateValue::year_with_era(100, Era::Bce), vec![]), "100 BCE");
    }

    #[test]
    fn known_unknown_wording() {
        assert_eq!(render(DateValue::KnownUnknown, vec![]), "no date known");
    }

    #[test]
    fn untokenizable_names_the_text() {
        let value = DateValue::Untokenizable {
            lexeme: "sometime".to_string(),
        };
        assert_eq!(render(value, vec![]), "\"sometime\" is not a recognized date");
    }
}
