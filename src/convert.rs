//! Conversion helpers around the ordinal axis.
//!
//! Stateless utilities for code that consumes parsed dates (sorting,
//! plotting, arithmetic): turn a date, an ordinal or a description into an
//! ordinal, a calendar date or a fractional year, and format years for
//! display.

use chrono::{Datelike, NaiveDate};

use crate::api::{HdateParser, default_parser};
use crate::calendar;
use crate::{DateOrder, Era, Options, Ymd};

/// Mean Gregorian year, used for the (approximate) fractional years of BCE dates.
const MEAN_YEAR_DAYS: f64 = 365.2425;

/// Anything that can be placed on the ordinal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRef<'a> {
    Date(NaiveDate),
    Ymd(Ymd),
    Ordinal(i64),
    /// A description, placed at its mid date.
    Text(&'a str),
}

impl From<NaiveDate> for DateRef<'_> {
    fn from(date: NaiveDate) -> Self {
        DateRef::Date(date)
    }
}

impl From<Ymd> for DateRef<'_> {
    fn from(ymd: Ymd) -> Self {
        DateRef::Ymd(ymd)
    }
}

impl From<i64> for DateRef<'_> {
    fn from(ordinal: i64) -> Self {
        DateRef::Ordinal(ordinal)
    }
}

impl<'a> From<&'a str> for DateRef<'a> {
    fn from(text: &'a str) -> Self {
        DateRef::Text(text)
    }
}

impl DateRef<'_> {
    /// Ordinal of this reference; descriptions are parsed with `parser`.
    pub fn ordinal_with(&self, parser: &HdateParser) -> Option<i64> {
        match *self {
            DateRef::Date(date) => Some(i64::from(date.num_days_from_ce())),
            DateRef::Ymd(ymd) => ymd.ordinal(),
            DateRef::Ordinal(ordinal) => Some(ordinal),
            DateRef::Text(text) => parser.parse(text).ok().map(|triple| triple.mid.ordinal),
        }
    }
}

/// Ordinal of a date, an ordinal or a description (its mid date).
///
/// ```
/// use hdate::ordinal_of;
///
/// assert_eq!(ordinal_of("12 July 100 BC"), Some(-36332));
/// assert_eq!(ordinal_of(-36332_i64), Some(-36332));
/// assert_eq!(ordinal_of("not a date"), None);
/// ```
pub fn ordinal_of<'a>(input: impl Into<DateRef<'a>>) -> Option<i64> {
    input.into().ordinal_with(default_parser())
}

/// [`ordinal_of`] shifted by `delta` days.
pub fn ordinal_of_with_delta<'a>(input: impl Into<DateRef<'a>>, delta: i64) -> Option<i64> {
    ordinal_of(input)?.checked_add(delta)
}

/// Calendar date of an ordinal, BCE years negative.
pub fn calendar_date_of(ordinal: i64) -> Option<Ymd> {
    calendar::from_ordinal(ordinal)
}

/// Chrono date of an ordinal. `None` before 1 January 1 CE.
pub fn naive_date_of(ordinal: i64) -> Option<NaiveDate> {
    if ordinal < 1 {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(i32::try_from(ordinal).ok()?)
}

/// Continuous year value: `0.0` is 31 December 1 BCE, `1.0` is 31 December 1 CE.
///
/// CE dates are exact to the day within their year. BCE dates use a mean
/// year length, which is close enough for placing them on a chart.
pub fn years_of<'a>(input: impl Into<DateRef<'a>>) -> Option<f64> {
    let ordinal = ordinal_of(input)?;
    if ordinal < 1 {
        return Some(ordinal as f64 / MEAN_YEAR_DAYS);
    }

    let date = calendar::from_ordinal(ordinal)?;
    let first_day = calendar::to_ordinal(date.year, 1, 1, Era::Ce)?;
    let days_in_year = if calendar::is_leap_year(date.year, Era::Ce, true) { 366.0 } else { 365.0 };
    Some(f64::from(date.year) - 1.0 + (ordinal - first_day + 1) as f64 / days_in_year)
}

/// Inverse of the BCE branch of [`years_of`], truncated to a whole day.
pub fn years_to_ordinal(years: f64) -> i64 {
    (years * MEAN_YEAR_DAYS) as i64
}

/// Labels used by [`format_year`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearFormat {
    pub ad_text: String,
    pub bc_text: String,
    /// Print year 0 (1 BCE on a signed axis) as `1AD` rather than `0000`.
    pub show_zero_as_1ad: bool,
}

impl Default for YearFormat {
    fn default() -> Self {
        YearFormat { ad_text: "AD".to_string(), bc_text: "BC".to_string(), show_zero_as_1ad: true }
    }
}

/// Format a signed axis year for display: `1066` → `"1066"`, `87` → `"0087"`,
/// `-44` → `"44BC"`.
pub fn format_year(year: i64, format: &YearFormat) -> String {
    match year {
        1.. => format!("{year:04}"),
        0 if !format.show_zero_as_1ad => format!("{year:04}"),
        0 => format!("1{}", format.ad_text),
        _ => format!("{}{}", year.unsigned_abs(), format.bc_text),
    }
}

/// Mid ordinal of a description, or `None` if it does not parse.
///
/// Handy as a sort key for collections of mixed descriptions.
pub fn calc_mid_ordinal(text: &str, order: DateOrder) -> Option<i64> {
    let parser = HdateParser::new(Options { date_order: order, ..Options::default() });
    DateRef::Text(text).ordinal_with(&parser)
}

/// Mid date of a description as a chrono date. `None` if it does not parse
/// or falls before 1 CE.
pub fn calc_mid_date(text: &str, order: DateOrder) -> Option<NaiveDate> {
    naive_date_of(calc_mid_ordinal(text, order)?)
}
