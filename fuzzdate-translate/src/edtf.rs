//! Extended Date/Time Format rendering
//!
//! Qualifier marks trail the value: `~` approximate, `?` uncertain, `%`
//! both. Unspecified trailing digits use `X` ("192X", "19XX"); a named
//! century has no compact form and renders as an interval over its year
//! span.

use crate::{century_year_span, Dialect, RenderContext};
use fuzzdate_core::date_types::format_year;
use fuzzdate_core::{Certainty, CenturyKind, DateValue, DecadeKind, Era, RangeSwitch, SetKind};

/// The EDTF dialect
pub struct Edtf;

impl Edtf {
    /// Qualifier mark for the tags in scope
    fn mark(ctx: &RenderContext) -> &'static str {
        let approximate = ctx.has(Certainty::Approximate);
        let uncertain = ctx.has(Certainty::Uncertain);
        match (approximate, uncertain) {
            (true, true) => "%",
            (true, false) => "~",
            (false, true) => "?",
            (false, false) => "",
        }
    }

    /// Signed astronomical year: year n BCE is year 1-n
    fn signed_year(year: i32, era: Era) -> i32 {
        match era {
            Era::Bce if year > 0 => 1 - year,
            _ => year,
        }
    }
}

impl Dialect for Edtf {
    fn year(&self, year: i32, era: Era, ctx: &RenderContext) -> String {
        format!("{}{}", format_year(Self::signed_year(year, era)), Self::mark(ctx))
    }

    fn year_month(&self, year: i32, month: u32, ctx: &RenderContext) -> String {
        format!("{}-{:02}{}", format_year(year), month, Self::mark(ctx))
    }

    fn year_month_day(&self, year: i32, month: u32, day: u32, ctx: &RenderContext) -> String {
        format!(
            "{}-{:02}-{:02}{}",
            format_year(year),
            month,
            day,
            Self::mark(ctx)
        )
    }

    fn decade(&self, decade: i32, _kind: DecadeKind, ctx: &RenderContext) -> String {
        format!("{}X{}", decade / 10, Self::mark(ctx))
    }

    fn century(&self, century: i32, kind: CenturyKind, ctx: &RenderContext) -> String {
        match kind {
            // "19th century" spans 1801-1900, which no XX form can express
            CenturyKind::Name => {
                let (first, last) = century_year_span(century, kind);
                format!(
                    "[{}..{}]{}",
                    format_year(first),
                    format_year(last),
                    Self::mark(ctx)
                )
            }
            CenturyKind::Plural | CenturyKind::UncertaintyDigits => {
                format!("{}XX{}", century, Self::mark(ctx))
            }
        }
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
                format!("../{}", self.render_value(end, &end_ctx))
            }
            Some(RangeSwitch::After) => {
                format!("{}/..", self.render_value(start, &start_ctx))
            }
            None => format!(
                "{}/{}",
                self.render_value(start, &start_ctx),
                self.render_value(end, &end_ctx)
            ),
        }
    }

    fn set(&self, members: &[DateValue], kind: SetKind, ctx: &RenderContext) -> String {
        let inner = members
            .iter()
            .map(|m| self.render_value(m, &ctx.bare()))
            .collect::<Vec<_>>()
            .join(", ");
        match kind {
            SetKind::OneOf => format!("[{inner}]"),
            SetKind::AllOf => format!("{{{inner}}}"),
        }
    }

    fn known_unknown(&self, ctx: &RenderContext) -> String {
        ctx.custom_unknown().unwrap_or("XXXX").to_string()
    }

    fn untokenizable(&self, _lexeme: &str, ctx: &RenderContext) -> String {
        self.known_unknown(ctx)
    }

    fn qualifier_vocab(&self, certainty: Certainty) -> &'static str {
        match certainty {
            Certainty::Approximate => "~",
            Certainty::Uncertain => "?",
            Certainty::Inferred | Certainty::AllOfSet | Certainty::OneOfSet => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuzzdate_core::{Options, Precision, Qualifier, ResolvedDate};

    fn render(value: DateValue, qualifiers: Vec<Qualifier>) -> String {
        Edtf.render(&ResolvedDate::new(value, qualifiers), &Options::default())
    }

    #[test]
    fn plain_scalars() {
        assert_eq!(render(DateValue::year(2002), vec![]), "2002");
        assert_eq!(
            render(DateValue::year_month(2002, 10).unwrap(), vec![]),
            "2002-10"
        );
        assert_eq!(
            render(DateValue::year_month_day(2002, 10, 5).unwrap(), vec![]),
            "2002-10-05"
        );
    }

    #[test]
    fn qualifier_marks() {
        assert_eq!(
            render(
                DateValue::year(2002),
                vec![Qualifier::whole(Certainty::Approximate)]
            ),
            "2002~"
        );
        assert_eq!(
            render(
                DateValue::year(2002),
                vec![Qualifier::whole(Certainty::Uncertain)]
            ),
            "2002?"
        );
        assert_eq!(
            render(
                DateValue::year(2002),
                vec![
                    Qualifier::whole(Certainty::Approximate),
                    Qualifier::whole(Certainty::Uncertain),
                ]
            ),
            "2002%"
        );
    }

    #[test]
    fn named_century_renders_as_interval() {
        let value = DateValue::century(19, CenturyKind::Name).unwrap();
        assert_eq!(render(value, vec![]), "[1801..1900]");
    }

    #[test]
    fn plural_century_and_decade_use_unspecified_digits() {
        let value = DateValue::century(19, CenturyKind::Plural).unwrap();
        assert_eq!(render(value, vec![]), "19XX");
        let value = DateValue::decade(1920, DecadeKind::Plural);
        assert_eq!(render(value, vec![]), "192X");
    }

    #[test]
    fn ranges_and_open_ranges() {
        let closed =
            DateValue::range(DateValue::year(1920), DateValue::year(1930), None).unwrap();
        assert_eq!(render(closed, vec![]), "1920/1930");

        let before = DateValue::range(
            DateValue::year(1583),
            DateValue::year(1950),
            Some(RangeSwitch::Before),
        )
        .unwrap();
        assert_eq!(render(before, vec![]), "../1950");

        let after = DateValue::range(
            DateValue::year(1950),
            DateValue::year(2999),
            Some(RangeSwitch::After),
        )
        .unwrap();
        assert_eq!(render(after, vec![]), "1950/..");
    }

    #[test]
    fn side_scoped_qualifier_marks_one_bound() {
        let value =
            DateValue::range(DateValue::year(1920), DateValue::year(1930), None).unwrap();
        let rendered = render(
            value,
            vec![Qualifier::scoped(Certainty::Uncertain, Precision::End)],
        );
        assert_eq!(rendered, "1920/1930?");
    }

    #[test]
    fn sets() {
        let one_of = DateValue::set(
            vec![DateValue::year(1667), DateValue::year(1668)],
            SetKind::OneOf,
        );
        assert_eq!(render(one_of, vec![]), "[1667, 1668]");
        let all_of = DateValue::set(
            vec![DateValue::year(1667), DateValue::year(1668)],
            SetKind::AllOf,
        );
        assert_eq!(render(all_of, vec![]), "{1667, 1668}");
    }

    #[test]
    fn bce_year_is_signed() {
        let value = DateValue::year_with_era(100, Era::Bce);
        assert_eq!(render(value, vec![]), "-0099");
    }

    #[test]
    fn known_unknown_standard_and_custom() {
        assert_eq!(render(DateValue::KnownUnknown, vec![]), "XXXX");
        let options = Options {
            unknown_date_output: fuzzdate_core::UnknownDateOutput::Custom,
            unknown_date_output_string: Some("no date".to_string()),
            ..Options::default()
        };
        let rendered = Edtf.render(
            &ResolvedDate::new(DateValue::KnownUnknown, vec![]),
            &options,
        );
        assert_eq!(rendered, "no date");
    }
}
