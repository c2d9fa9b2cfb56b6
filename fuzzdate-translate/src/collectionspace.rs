//! CollectionSpace structured-date XML rendering
//!
//! Each resolved date becomes a `<structuredDateGroup>` element carrying a
//! display string, earliest/latest scalar bounds, the bound fields broken
//! out by year, month and day, and a certainty term from the
//! CollectionSpace vocabulary. All text content is XML-escaped.

use crate::{century_year_span, Dialect, RenderContext};
use fuzzdate_core::{
    Certainty, CenturyKind, DateValue, DecadeKind, Era, Options, RangeSwitch, ResolvedDate,
    SetKind,
};

/// The CollectionSpace structured-date dialect
pub struct CollectionSpaceXml;

impl CollectionSpaceXml {
    /// Display-string adornment for the tags in scope
    fn adorn(ctx: &RenderContext, text: String) -> String {
        let mut out = text;
        if ctx.has(Certainty::Approximate) {
            out = format!("circa {out}");
        }
        if ctx.has(Certainty::Uncertain) {
            out.push('?');
        }
        out
    }

    /// First certainty term with a CollectionSpace surface form
    fn certainty_term(&self, ctx: &RenderContext) -> Option<&'static str> {
        ctx.tags()
            .into_iter()
            .map(|c| self.qualifier_vocab(c))
            .find(|term| !term.is_empty())
    }
}

impl Dialect for CollectionSpaceXml {
    fn year(&self, year: i32, era: Era, ctx: &RenderContext) -> String {
        let text = match era {
            Era::Bce => format!("{year} BCE"),
            Era::Ce => year.to_string(),
        };
        Self::adorn(ctx, text)
    }

    fn year_month(&self, year: i32, month: u32, ctx: &RenderContext) -> String {
        Self::adorn(ctx, format!("{year}-{month:02}"))
    }

    fn year_month_day(&self, year: i32, month: u32, day: u32, ctx: &RenderContext) -> String {
        Self::adorn(ctx, format!("{year}-{month:02}-{day:02}"))
    }

    fn decade(&self, decade: i32, _kind: DecadeKind, ctx: &RenderContext) -> String {
        Self::adorn(ctx, format!("{decade}s"))
    }

    fn century(&self, century: i32, kind: CenturyKind, ctx: &RenderContext) -> String {
        let (first, last) = century_year_span(century, kind);
        Self::adorn(ctx, format!("{first}-{last}"))
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
            Some(RangeSwitch::Before) => format!("before {}", self.render_value(end, &end_ctx)),
            Some(RangeSwitch::After) => format!("after {}", self.render_value(start, &start_ctx)),
            None => format!(
                "{}-{}",
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
        ctx.custom_unknown().unwrap_or("unknown").to_string()
    }

    fn untokenizable(&self, lexeme: &str, _ctx: &RenderContext) -> String {
        lexeme.to_string()
    }

    fn qualifier_vocab(&self, certainty: Certainty) -> &'static str {
        match certainty {
            Certainty::Approximate => "circa",
            Certainty::Uncertain => "possibly",
            Certainty::Inferred => "inferred",
            Certainty::AllOfSet | Certainty::OneOfSet => "",
        }
    }

    /// Wrap the display string and calendar bounds into a structured group
    fn render(&self, date: &ResolvedDate, options: &Options) -> String {
        let ctx = RenderContext::new(options, &date.qualifiers);
        let display = self.render_value(&date.value, &ctx);

        let mut xml = String::from("<structuredDateGroup>\n");
        push_element(&mut xml, "dateDisplayDate", &display);
        if let Some(earliest) = date.value.earliest() {
            push_element(&mut xml, "dateEarliestScalarValue", &earliest.to_string());
            push_element(&mut xml, "dateEarliestSingleYear", &year_of(earliest));
            push_element(&mut xml, "dateEarliestSingleMonth", &month_of(earliest));
            push_element(&mut xml, "dateEarliestSingleDay", &day_of(earliest));
        }
        if let Some(latest) = date.value.latest() {
            push_element(&mut xml, "dateLatestScalarValue", &latest.to_string());
            push_element(&mut xml, "dateLatestYear", &year_of(latest));
            push_element(&mut xml, "dateLatestMonth", &month_of(latest));
            push_element(&mut xml, "dateLatestDay", &day_of(latest));
        }
        if let Some(term) = self.certainty_term(&ctx) {
            push_element(&mut xml, "dateEarliestSingleCertainty", term);
        }
        xml.push_str("</structuredDateGroup>");
        xml
    }
}

fn push_element(xml: &mut String, tag: &str, content: &str) {
    xml.push_str("  <");
    xml.push_str(tag);
    xml.push('>');
    xml.push_str(&xml_escape(content));
    xml.push_str("</");
    xml.push_str(tag);
    xml.push_str(">\n");
}

fn year_of(date: chrono::NaiveDate) -> String {
    chrono::Datelike::year(&date).to_string()
}

fn month_of(date: chrono::NaiveDate) -> String {
    chrono::Datelike::month(&date).to_string()
}

fn day_of(date: chrono::NaiveDate) -> String {
    chrono::Datelike::day(&date).to_string()
}

/// Escape the five XML-reserved characters
fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}
