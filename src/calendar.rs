//! Calendar arithmetic.
//!
//! Every date lives on one signed "ordinal" day axis. Day 1 is 1 January 1 CE
//! in the proleptic Gregorian calendar (the same numbering as
//! `NaiveDate::num_days_from_ce`), day 0 is 31 December 1 BCE, and the axis
//! keeps counting down through the BCE years without a year zero.
//!
//! ```text
//!   ... 1 Jan 1 BCE      31 Dec 1 BCE   1 Jan 1 CE ...
//!          -365    ...        0             1
//! ```
//!
//! BCE dates go through a proleptic Julian four-year cycle: 1 BCE, 5 BCE, ...
//! are leap years, so 1 BCE plays the part a year zero would. A BCE date is
//! shifted forward by whole cycles onto 1..=4 CE, converted there, and the
//! cycle length is subtracted again. CE years far beyond chrono's range are
//! folded the same way by whole 400-year Gregorian cycles.

use chrono::{Datelike, NaiveDate};

use crate::{Era, Ymd};

/// Last year in which February follows the Julian rule unless proleptic
/// Gregorian is asked for.
pub const GREGORIAN_ADOPTION_YEAR: i32 = 1752;

/// Days in four Julian years.
pub(crate) const DAYS_PER_JULIAN_CYCLE: i64 = 3 * 365 + 366;

/// Days in four hundred Gregorian years.
pub(crate) const DAYS_PER_GREGORIAN_CYCLE: i64 = 146_097;

const MONTH_LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Whether `year` (a positive year number within `era`) has a 29 February.
///
/// CE years follow the Julian rule up to [`GREGORIAN_ADOPTION_YEAR`] and the
/// Gregorian rule after it, or the Gregorian rule throughout when
/// `proleptic` is set. BCE years are leap when `year % 4 == 1`.
pub fn is_leap_year(year: i32, era: Era, proleptic: bool) -> bool {
    match era {
        Era::Bce => year.rem_euclid(4) == 1,
        Era::Ce => {
            let gregorian_exception = year % 100 == 0 && year % 400 != 0;
            year % 4 == 0 && !(gregorian_exception && (year > GREGORIAN_ADOPTION_YEAR || proleptic))
        }
    }
}

/// Number of days in `month` (1..=12) of `year`. Returns 0 for a month
/// outside 1..=12.
pub fn max_day_in_month(year: i32, month: u32, era: Era, proleptic: bool) -> u32 {
    match month {
        2 if is_leap_year(year, era, proleptic) => 29,
        1..=12 => MONTH_LENGTHS[month as usize - 1],
        _ => 0,
    }
}

/// Place a calendar date on the ordinal axis.
///
/// `year` is the positive year number within `era` (`487` with `Era::Bce`
/// for 487 BC). A day that exists in the Julian reckoning but not in the
/// proleptic Gregorian one (29 February 1700) lands on the month's last
/// proleptic day. Returns `None` for year 0, a month outside 1..=12 or day 0.
pub fn to_ordinal(year: i32, month: u32, day: u32, era: Era) -> Option<i64> {
    if year < 1 || !(1..=12).contains(&month) || day == 0 {
        return None;
    }
    let year = i64::from(year);

    match era {
        Era::Ce => {
            let cycles = (year - 1) / 400;
            let folded = year - cycles * 400;
            Some(days_from_ce(folded, month, day)? + cycles * DAYS_PER_GREGORIAN_CYCLE)
        }
        Era::Bce => {
            // 1 BCE lands on 4 CE, 2 BCE on 3 CE, ..., 5 BCE on 4 CE again.
            let cycles = (year + 3) / 4;
            let shifted = 1 - year + 4 * cycles;
            Some(days_from_ce(shifted, month, day)? - cycles * DAYS_PER_JULIAN_CYCLE)
        }
    }
}

/// Inverse of [`to_ordinal`]. BCE dates come back with a negative year
/// (`-487` for 487 BC). Returns `None` only when the year would not fit an
/// `i32`.
pub fn from_ordinal(ordinal: i64) -> Option<Ymd> {
    let (cycle_days, cycle_years, no_year_zero) =
        if ordinal >= 1 { (DAYS_PER_GREGORIAN_CYCLE, 400, 0) } else { (DAYS_PER_JULIAN_CYCLE, 4, 1) };

    let cycles = ordinal.checked_sub(1)?.div_euclid(cycle_days);
    let folded = ordinal - cycles * cycle_days;
    let date = NaiveDate::from_num_days_from_ce_opt(i32::try_from(folded).ok()?)?;

    let year = i64::from(date.year()) + cycle_years * cycles - no_year_zero;
    Some(Ymd { year: i32::try_from(year).ok()?, month: date.month(), day: date.day() })
}

fn days_from_ce(year: i64, month: u32, day: u32) -> Option<i64> {
    let year = i32::try_from(year).ok()?;
    let day = day.min(max_day_in_month(year, month, Era::Ce, true));
    NaiveDate::from_ymd_opt(year, month, day).map(|date| i64::from(date.num_days_from_ce()))
}
