//! Resolved date values and their calendar bounds
//!
//! A `DateValue` is the closed family of things a date expression can
//! resolve to. Every bounded variant exposes inclusive earliest/latest
//! calendar bounds on the proleptic Gregorian calendar, plus bound strings
//! truncated to the value's own granularity.

use crate::error::ConstructionError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Era tag kept for rendering; bound math uses the stored year as-is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Era {
    /// Common era
    #[default]
    Ce,
    /// Before common era
    Bce,
}

/// How a century was written, which fixes its year span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CenturyKind {
    /// "19th century": years 1801-1900
    Name,
    /// "1900s": years 1900-1999
    Plural,
    /// "19uu": years 1900-1999
    UncertaintyDigits,
}

/// How a decade was written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecadeKind {
    /// "1920s"
    Plural,
    /// "192u"
    UncertaintyDigits,
}

/// Open-endedness marker on a range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeSwitch {
    /// "before X": the start bound is an open sentinel
    Before,
    /// "after X": the end bound is an open sentinel
    After,
}

/// Inclusive vs alternate date collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetKind {
    /// "1667 and 1668": all of
    AllOf,
    /// "1667 or 1668": one of
    OneOf,
}

/// Closed family of resolved date values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateValue {
    /// Single year
    Year {
        /// Signed proleptic year
        year: i32,
        /// Era tag for rendering
        era: Era,
    },
    /// Year and month
    YearMonth {
        /// Year
        year: i32,
        /// Month 1-12
        month: u32,
    },
    /// Full calendar date
    YearMonthDay {
        /// Year
        year: i32,
        /// Month 1-12
        month: u32,
        /// Day, valid for the month
        day: u32,
    },
    /// Ten-year span
    Decade {
        /// First year of the decade
        decade: i32,
        /// How the decade was written
        kind: DecadeKind,
    },
    /// Hundred-year span
    Century {
        /// Century number ("19th" stores 19)
        century: i32,
        /// How the century was written
        kind: CenturyKind,
    },
    /// Ordered pair of bounds
    Range {
        /// Earliest-bound sub-value
        start: Box<DateValue>,
        /// Latest-bound sub-value
        end: Box<DateValue>,
        /// Open-endedness marker
        switch: Option<RangeSwitch>,
    },
    /// Collection of sibling values
    Set {
        /// Member values in source order
        members: Vec<DateValue>,
        /// Inclusive or alternate
        kind: SetKind,
    },
    /// Explicit "no date known"
    KnownUnknown,
    /// Expression the pipeline could not resolve
    Untokenizable {
        /// The unresolvable source text
        lexeme: String,
    },
}

impl DateValue {
    /// Plain CE year
    pub fn year(year: i32) -> Self {
        DateValue::Year {
            year,
            era: Era::Ce,
        }
    }

    /// Year with an explicit era tag
    pub fn year_with_era(year: i32, era: Era) -> Self {
        DateValue::Year { year, era }
    }

    /// Year and month, month validated
    pub fn year_month(year: i32, month: i32) -> Result<Self, ConstructionError> {
        if !(1..=12).contains(&month) {
            return Err(ConstructionError::MonthOutOfRange { month });
        }
        Ok(DateValue::YearMonth {
            year,
            month: month as u32,
        })
    }

    /// Full date, day validated against the month's length
    pub fn year_month_day(year: i32, month: i32, day: i32) -> Result<Self, ConstructionError> {
        if !(1..=12).contains(&month) {
            return Err(ConstructionError::MonthOutOfRange { month });
        }
        let month_u = month as u32;
        if day < 1 || NaiveDate::from_ymd_opt(year, month_u, day as u32).is_none() {
            return Err(ConstructionError::DayOutOfRange { year, month: month_u, day });
        }
        Ok(DateValue::YearMonthDay {
            year,
            month: month_u,
            day: day as u32,
        })
    }

    /// Decade from its first year
    pub fn decade(decade: i32, kind: DecadeKind) -> Self {
        DateValue::Decade { decade, kind }
    }

    /// Century, number validated
    pub fn century(century: i32, kind: CenturyKind) -> Result<Self, ConstructionError> {
        if century < 1 {
            return Err(ConstructionError::InvalidCentury { century });
        }
        Ok(DateValue::Century { century, kind })
    }

    /// Range with the earliest-before-latest invariant enforced
    pub fn range(
        start: DateValue,
        end: DateValue,
        switch: Option<RangeSwitch>,
    ) -> Result<Self, ConstructionError> {
        if let (Some(earliest), Some(latest)) = (start.earliest(), end.latest()) {
            if earliest > latest {
                return Err(ConstructionError::InvertedRange {
                    earliest: earliest.to_string(),
                    latest: latest.to_string(),
                });
            }
        }
        Ok(DateValue::Range {
            start: Box::new(start),
            end: Box::new(end),
            switch,
        })
    }

    /// Collection of sibling values
    pub fn set(members: Vec<DateValue>, kind: SetKind) -> Self {
        DateValue::Set { members, kind }
    }

    /// Inclusive earliest calendar bound
    pub fn earliest(&self) -> Option<NaiveDate> {
        match self {
            DateValue::Year { year, .. } => NaiveDate::from_ymd_opt(*year, 1, 1),
            DateValue::YearMonth { year, month } => NaiveDate::from_ymd_opt(*year, *month, 1),
            DateValue::YearMonthDay { year, month, day } => {
                NaiveDate::from_ymd_opt(*year, *month, *day)
            }
            DateValue::Decade { decade, .. } => NaiveDate::from_ymd_opt(*decade, 1, 1),
            DateValue::Century { .. } => {
                NaiveDate::from_ymd_opt(self.first_century_year(), 1, 1)
            }
            DateValue::Range { start, .. } => start.earliest(),
            DateValue::Set { members, .. } => members.iter().filter_map(|m| m.earliest()).min(),
            DateValue::KnownUnknown | DateValue::Untokenizable { .. } => None,
        }
    }

    /// Inclusive latest calendar bound
    pub fn latest(&self) -> Option<NaiveDate> {
        match self {
            DateValue::Year { year, .. } => NaiveDate::from_ymd_opt(*year, 12, 31),
            DateValue::YearMonth { year, month } => last_day_of_month(*year, *month),
            DateValue::YearMonthDay { year, month, day } => {
                NaiveDate::from_ymd_opt(*year, *month, *day)
            }
            DateValue::Decade { decade, .. } => NaiveDate::from_ymd_opt(*decade + 9, 12, 31),
            DateValue::Century { .. } => {
                NaiveDate::from_ymd_opt(self.last_century_year(), 12, 31)
            }
            DateValue::Range { end, .. } => end.latest(),
            DateValue::Set { members, .. } => members.iter().filter_map(|m| m.latest()).max(),
            DateValue::KnownUnknown | DateValue::Untokenizable { .. } => None,
        }
    }

    /// Earliest bound truncated to the value's own granularity
    pub fn earliest_at_granularity(&self) -> Option<String> {
        match self {
            DateValue::Year { year, .. } => Some(format_year(*year)),
            DateValue::YearMonth { year, month } => {
                Some(format!("{}-{:02}", format_year(*year), month))
            }
            DateValue::YearMonthDay { .. } => self.earliest().map(|d| d.to_string()),
            DateValue::Decade { decade, .. } => Some(format_year(*decade)),
            DateValue::Century { .. } => Some(format_year(self.first_century_year())),
            DateValue::Range { start, .. } => start.earliest_at_granularity(),
            DateValue::Set { members, .. } => members
                .iter()
                .filter(|m| m.earliest().is_some())
                .min_by_key(|m| m.earliest())
                .and_then(|m| m.earliest_at_granularity()),
            DateValue::KnownUnknown | DateValue::Untokenizable { .. } => None,
        }
    }

    /// Latest bound truncated to the value's own granularity
    pub fn latest_at_granularity(&self) -> Option<String> {
        match self {
            DateValue::Year { year, .. } => Some(format_year(*year)),
            DateValue::YearMonth { year, month } => {
                Some(format!("{}-{:02}", format_year(*year), month))
            }
            DateValue::YearMonthDay { .. } => self.latest().map(|d| d.to_string()),
            DateValue::Decade { decade, .. } => Some(format_year(*decade + 9)),
            DateValue::Century { .. } => Some(format_year(self.last_century_year())),
            DateValue::Range { end, .. } => end.latest_at_granularity(),
            DateValue::Set { members, .. } => members
                .iter()
                .filter(|m| m.latest().is_some())
                .max_by_key(|m| m.latest())
                .and_then(|m| m.latest_at_granularity()),
            DateValue::KnownUnknown | DateValue::Untokenizable { .. } => None,
        }
    }

    fn first_century_year(&self) -> i32 {
        match self {
            DateValue::Century { century, kind } => match kind {
                CenturyKind::Name => (century - 1) * 100 + 1,
                CenturyKind::Plural | CenturyKind::UncertaintyDigits => century * 100,
            },
            _ => unreachable!("only called on Century"),
        }
    }

    fn last_century_year(&self) -> i32 {
        match self {
            DateValue::Century { century, kind } => match kind {
                CenturyKind::Name => century * 100,
                CenturyKind::Plural | CenturyKind::UncertaintyDigits => century * 100 + 99,
            },
            _ => unreachable!("only called on Century"),
        }
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    first_of_next.and_then(|d| d.pred_opt())
}

/// Year rendered at year granularity, zero-padded, sign-prefixed when negative
pub fn format_year(year: i32) -> String {
    if year < 0 {
        format!("-{:04}", -year)
    } else {
        format!("{:04}", year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn year_bounds_span_the_whole_year() {
        let value = DateValue::year(2021);
        assert_eq!(value.earliest(), Some(date(2021, 1, 1)));
        assert_eq!(value.latest(), Some(date(2021, 12, 31)));
    }

    #[test]
    fn named_century_bounds() {
        let value = DateValue::century(19, CenturyKind::Name).unwrap();
        assert_eq!(value.earliest(), Some(date(1801, 1, 1)));
        assert_eq!(value.latest(), Some(date(1900, 12, 31)));
    }

    #[test]
    fn plural_and_uncertainty_century_bounds() {
        for kind in [CenturyKind::Plural, CenturyKind::UncertaintyDigits] {
            let value = DateValue::century(19, kind).unwrap();
            assert_eq!(value.earliest(), Some(date(1900, 1, 1)), "{kind:?}");
            assert_eq!(value.latest(), Some(date(1999, 12, 31)), "{kind:?}");
        }
    }

    #[test]
    fn decade_bounds() {
        let value = DateValue::decade(1920, DecadeKind::Plural);
        assert_eq!(value.earliest(), Some(date(1920, 1, 1)));
        assert_eq!(value.latest(), Some(date(1929, 12, 31)));
    }

    #[test]
    fn year_month_latest_handles_month_length_and_leap_years() {
        let feb = DateValue::year_month(2020, 2).unwrap();
        assert_eq!(feb.latest(), Some(date(2020, 2, 29)));
        let feb = DateValue::year_month(2021, 2).unwrap();
        assert_eq!(feb.latest(), Some(date(2021, 2, 28)));
        let dec = DateValue::year_month(2021, 12).unwrap();
        assert_eq!(dec.latest(), Some(date(2021, 12, 31)));
    }

    #[test]
    fn invalid_day_is_rejected_not_clamped() {
        let err = DateValue::year_month_day(2001, 2, 29).unwrap_err();
        assert!(matches!(err, ConstructionError::DayOutOfRange { .. }));
        let err = DateValue::year_month(2001, 13).unwrap_err();
        assert!(matches!(err, ConstructionError::MonthOutOfRange { .. }));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err =
            DateValue::range(DateValue::year(1930), DateValue::year(1920), None).unwrap_err();
        assert!(matches!(err, ConstructionError::InvertedRange { .. }));
    }

    #[test]
    fn range_bounds_come_from_sub_values() {
        let range = DateValue::range(
            DateValue::year(1920),
            DateValue::year(1930),
            None,
        )
        .unwrap();
        assert_eq!(range.earliest(), Some(date(1920, 1, 1)));
        assert_eq!(range.latest(), Some(date(1930, 12, 31)));
    }

    #[test]
    fn set_bounds_span_all_members() {
        let set = DateValue::set(
            vec![DateValue::year(1668), DateValue::year(1667)],
            SetKind::OneOf,
        );
        assert_eq!(set.earliest(), Some(date(1667, 1, 1)));
        assert_eq!(set.latest(), Some(date(1668, 12, 31)));
    }

    #[test]
    fn granularity_bounds_stay_at_own_scale() {
        let century = DateValue::century(19, CenturyKind::Name).unwrap();
        assert_eq!(century.earliest_at_granularity(), Some("1801".to_string()));
        assert_eq!(century.latest_at_granularity(), Some("1900".to_string()));

        let ym = DateValue::year_month(2002, 10).unwrap();
        assert_eq!(ym.earliest_at_granularity(), Some("2002-10".to_string()));
    }

    #[test]
    fn unknown_variants_have_no_bounds() {
        assert_eq!(DateValue::KnownUnknown.earliest(), None);
        let untok = DateValue::Untokenizable {
            lexeme: "xyzzy".to_string(),
        };
        assert_eq!(untok.latest(), None);
        assert_eq!(untok.latest_at_granularity(), None);
    }

    #[test]
    fn invalid_century_number_rejected() {
        assert!(DateValue::century(0, CenturyKind::Name).is_err());
    }
}
