//! Output dialect renderers for resolved fuzzy dates
//!
//! Each dialect turns a [`ResolvedDate`] into a string in its own target
//! vocabulary. The [`Dialect`] trait has one required method per value
//! variant plus a qualifier vocabulary; rendering dispatch and result-level
//! iteration are provided.

#![warn(missing_docs)]

pub mod collectionspace;
pub mod edtf;
pub mod pseudo_edtf;

pub use collectionspace::CollectionSpaceXml;
pub use edtf::Edtf;
pub use pseudo_edtf::LyrasisPseudoEdtf;

use fuzzdate_core::{
    Certainty, CenturyKind, DateValue, DecadeKind, DialectId, Era, Options, Precision,
    ProcessResult, Qualifier, RangeSwitch, ResolvedDate, SetKind, UnknownDateOutput,
};

/// Per-render state handed down through value dispatch
///
/// Qualifiers are re-scoped as rendering descends into a range: a tag that
/// applies only to the start side becomes a whole-value tag of that side's
/// own context.
pub struct RenderContext<'a> {
    /// Configuration governing output choices
    pub options: &'a Options,
    /// Qualifier tags in scope for the value being rendered
    pub qualifiers: Vec<Qualifier>,
}

impl<'a> RenderContext<'a> {
    /// Context for a whole resolved date
    pub fn new(options: &'a Options, qualifiers: &[Qualifier]) -> Self {
        Self {
            options,
            qualifiers: qualifiers.to_vec(),
        }
    }

    /// Whether a certainty tag applies to the whole value in this scope
    pub fn has(&self, certainty: Certainty) -> bool {
        self.qualifiers
            .iter()
            .any(|q| q.certainty == certainty && q.precision == Precision::Whole)
    }

    /// Whole-scope certainty tags, in canonical order
    pub fn tags(&self) -> Vec<Certainty> {
        self.qualifiers
            .iter()
            .filter(|q| q.precision == Precision::Whole)
            .map(|q| q.certainty)
            .collect()
    }

    /// Narrow to one side of a range
    ///
    /// Tags scoped to `side` and whole-value tags both apply to the
    /// sub-value, as whole tags of the narrowed context.
    pub fn narrowed(&self, side: Precision) -> RenderContext<'a> {
        let qualifiers = self
            .qualifiers
            .iter()
            .filter(|q| q.precision == Precision::Whole || q.precision == side)
            .map(|q| Qualifier::whole(q.certainty))
            .collect();
        RenderContext {
            options: self.options,
            qualifiers,
        }
    }

    /// Context carrying no qualifiers, for set members and similar
    pub fn bare(&self) -> RenderContext<'a> {
        RenderContext {
            options: self.options,
            qualifiers: Vec::new(),
        }
    }

    /// The configured known-unknown string, when one overrides the standard
    pub fn custom_unknown(&self) -> Option<&str> {
        if self.options.unknown_date_output == UnknownDateOutput::Custom {
            self.options.unknown_date_output_string.as_deref()
        } else {
            None
        }
    }
}

/// One output dialect
///
/// Required methods cover every value variant; `render_value` dispatches
/// exhaustively and recursion into ranges and sets happens through it, so a
/// dialect never needs its own traversal.
pub trait Dialect {
    /// Render a single year
    fn year(&self, year: i32, era: Era, ctx: &RenderContext) -> String;
    /// Render a year and month
    fn year_month(&self, year: i32, month: u32, ctx: &RenderContext) -> String;
    /// Render a full calendar date
    fn year_month_day(&self, year: i32, month: u32, day: u32, ctx: &RenderContext) -> String;
    /// Render a decade span
    fn decade(&self, decade: i32, kind: DecadeKind, ctx: &RenderContext) -> String;
    /// Render a century span
    fn century(&self, century: i32, kind: CenturyKind, ctx: &RenderContext) -> String;
    /// Render a bounded or half-open range
    fn range(
        &self,
        start: &DateValue,
        end: &DateValue,
        switch: Option<RangeSwitch>,
        ctx: &RenderContext,
    ) -> String;
    /// Render an inclusive or alternate collection
    fn set(&self, members: &[DateValue], kind: SetKind, ctx: &RenderContext) -> String;
    /// Render an explicit no-date value
    fn known_unknown(&self, ctx: &RenderContext) -> String;
    /// Render an expression the pipeline could not resolve
    fn untokenizable(&self, lexeme: &str, ctx: &RenderContext) -> String;

    /// This dialect's word or mark for a certainty tag; empty when the tag
    /// has no surface form here
    fn qualifier_vocab(&self, certainty: Certainty) -> &'static str;

    /// Dispatch one value through the variant methods
    fn render_value(&self, value: &DateValue, ctx: &RenderContext) -> String {
        match value {
            DateValue::Year { year, era } => self.year(*year, *era, ctx),
            DateValue::YearMonth { year, month } => self.year_month(*year, *month, ctx),
            DateValue::YearMonthDay { year, month, day } => {
                self.year_month_day(*year, *month, *day, ctx)
            }
            DateValue::Decade { decade, kind } => self.decade(*decade, *kind, ctx),
            DateValue::Century { century, kind } => self.century(*century, *kind, ctx),
            DateValue::Range { start, end, switch } => self.range(start, end, *switch, ctx),
            DateValue::Set { members, kind } => self.set(members, *kind, ctx),
            DateValue::KnownUnknown => self.known_unknown(ctx),
            DateValue::Untokenizable { lexeme } => self.untokenizable(lexeme, ctx),
        }
    }

    /// Render one resolved date with its qualifiers
    fn render(&self, date: &ResolvedDate, options: &Options) -> String {
        let ctx = RenderContext::new(options, &date.qualifiers);
        self.render_value(&date.value, &ctx)
    }

    /// Render every resolved date of a pipeline result, in source order
    fn render_result(&self, result: &ProcessResult, options: &Options) -> Vec<String> {
        result
            .dates
            .iter()
            .map(|date| self.render(date, options))
            .collect()
    }
}

/// Look up the dialect implementation for a configured identifier
pub fn dialect_for(id: DialectId) -> Box<dyn Dialect> {
    match id {
        DialectId::Edtf => Box::new(Edtf),
        DialectId::LyrasisPseudoEdtf => Box::new(LyrasisPseudoEdtf),
        DialectId::CollectionspaceStructuredDateXml => Box::new(CollectionSpaceXml),
    }
}

/// First and last calendar years covered by a century expression
pub(crate) fn century_year_span(century: i32, kind: CenturyKind) -> (i32, i32) {
    match kind {
        CenturyKind::Name => ((century - 1) * 100 + 1, century * 100),
        CenturyKind::Plural | CenturyKind::UncertaintyDigits => {
            (century * 100, century * 100 + 99)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_covers_every_dialect_id() {
        for id in [
            DialectId::Edtf,
            DialectId::LyrasisPseudoEdtf,
            DialectId::CollectionspaceStructuredDateXml,
        ] {
            let dialect = dialect_for(id);
            let date = ResolvedDate::new(DateValue::year(2002), Vec::new());
            let rendered = dialect.render(&date, &Options::default());
            assert!(rendered.contains("2002"), "{id}: {rendered}");
        }
    }

    #[test]
    fn narrowed_context_promotes_side_tags() {
        let options = Options::default();
        let ctx = RenderContext::new(
            &options,
            &[
                Qualifier::scoped(Certainty::Uncertain, Precision::End),
                Qualifier::whole(Certainty::Approximate),
            ],
        );
        let start = ctx.narrowed(Precision::Start);
        assert!(start.has(Certainty::Approximate));
        assert!(!start.has(Certainty::Uncertain));
        let end = ctx.narrowed(Precision::End);
        assert!(end.has(Certainty::Uncertain));
    }

    #[test]
    fn century_spans() {
        assert_eq!(century_year_span(19, CenturyKind::Name), (1801, 1900));
        assert_eq!(century_year_span(19, CenturyKind::Plural), (1900, 1999));
        assert_eq!(
            century_year_span(19, CenturyKind::UncertaintyDigits),
            (1900, 1999)
        );
    }
}
