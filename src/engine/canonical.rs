//! Raw capture → canonical form.
//!
//! Types every captured field, merges prefix and postfix components, checks
//! them against each other and settles the record's main calendar.

use tracing::debug;

use super::lexer;
use crate::calendar::max_day_in_month;
use crate::error::{ParseError, Result};
use crate::{CanonicalDate, CanonicalGroup, CircaLength, CircaUnit, Era, RawCapture, RawGroup, Role};

/// Which eras a group may hand on as the record's main calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Inherit {
    Any,
    /// An earliest date alone cannot make the record BCE: "after 500 BC"
    /// says nothing about the era of whatever else is written.
    CeOnly,
}

/// Groups consulted for the main calendar, first match wins.
const CALENDAR_SOURCES: [(Role, Inherit); 3] =
    [(Role::Mid, Inherit::Any), (Role::Late, Inherit::Any), (Role::Early, Inherit::CeOnly)];

impl TryFrom<&RawCapture> for CanonicalDate {
    type Error = ParseError;

    fn try_from(raw: &RawCapture) -> Result<Self> {
        canonicalize(raw)
    }
}

pub(crate) fn canonicalize(raw: &RawCapture) -> Result<CanonicalDate> {
    let mut canonical = CanonicalDate {
        circa: raw.circa.is_some(),
        ongoing: raw.ongoing.is_some(),
        circa_length: circa_length(raw)?,
        ..CanonicalDate::default()
    };

    for role in Role::ALL {
        *canonical.group_mut(role) = group(role, raw.group(role))?;
    }

    canonical.calendar = main_calendar(&canonical)?;
    let main = canonical.calendar;
    for role in Role::ALL {
        let group = canonical.group_mut(role);
        if group.calendar == Some(main) {
            group.calendar = None;
        }
    }

    for role in Role::ALL {
        check_day_in_month(&canonical, role)?;
    }

    debug!(calendar = %canonical.calendar, circa = canonical.circa, ongoing = canonical.ongoing, "canonicalized");
    Ok(canonical)
}

fn circa_length(raw: &RawCapture) -> Result<Option<CircaLength>> {
    let Some(magnitude) = raw.circa_len.as_deref() else {
        return Ok(None);
    };
    let unit_text = raw.circa_unit.as_deref().unwrap_or_default();
    let unit = CircaUnit::from_token(unit_text).ok_or_else(|| ParseError::CircaUnit { unit: unit_text.to_string() })?;
    let magnitude = magnitude.trim().parse().map_err(|_| ParseError::format(magnitude))?;
    Ok(Some(CircaLength { magnitude, unit }))
}

fn group(role: Role, raw: &RawGroup) -> Result<CanonicalGroup> {
    let month = match (raw.pre_month.as_deref(), raw.post_month.as_deref()) {
        (Some(_), Some(_)) => return Err(ParseError::ConflictingMonth { role }),
        (Some(text), None) | (None, Some(text)) => Some(month(role, text)?),
        (None, None) => None,
    };

    let day = match (raw.pre_day.as_deref(), raw.post_day.as_deref()) {
        (Some(_), Some(_)) => return Err(ParseError::ConflictingDay { role }),
        (Some(text), None) | (None, Some(text)) => {
            let day: u32 = number(text)?;
            if !(1..=31).contains(&day) {
                return Err(ParseError::DayOutOfRange { role, day, max: 31 });
            }
            Some(day)
        }
        (None, None) => None,
    };

    let year = match raw.year.as_deref() {
        Some(text) => {
            let year: i64 = number(text)?;
            let valid = i32::try_from(year).ok().filter(|&year| year >= 1);
            Some(valid.ok_or(ParseError::YearOutOfRange { role, year })?)
        }
        None => None,
    };

    let calendar = match raw.calendar.as_deref() {
        Some(text) => Some(Era::from_token(text.trim()).ok_or_else(|| ParseError::format(text))?),
        None => None,
    };

    Ok(CanonicalGroup { year, month, day, calendar })
}

/// A month given as a number or as an English name.
fn month(role: Role, text: &str) -> Result<u32> {
    let text = text.trim();
    let month = if text.bytes().all(|b| b.is_ascii_digit()) {
        number(text)?
    } else {
        lexer::month_number(text).ok_or_else(|| ParseError::format(text))?
    };
    if !(1..=12).contains(&month) {
        return Err(ParseError::MonthOutOfRange { role, month });
    }
    Ok(month)
}

fn number<T: std::str::FromStr>(text: &str) -> Result<T> {
    text.trim().parse().map_err(|_| ParseError::format(text))
}

fn main_calendar(canonical: &CanonicalDate) -> Result<Era> {
    for (role, inherit) in CALENDAR_SOURCES {
        match (canonical.group(role).calendar, inherit) {
            (None, _) => continue,
            (Some(Era::Bce), Inherit::CeOnly) => return Err(ParseError::AmbiguousEra),
            (Some(era), _) => return Ok(era),
        }
    }
    Ok(Era::Ce)
}

/// Days are checked with the calendar in use at the time: 29 Feb 1700 is a
/// real date, 29 Feb 1800 is not.
fn check_day_in_month(canonical: &CanonicalDate, role: Role) -> Result<()> {
    let group = canonical.group(role);
    let (Some(year), Some(month), Some(day)) = (group.year, group.month, group.day) else {
        return Ok(());
    };
    let max = max_day_in_month(year, month, canonical.era_of(role), false);
    if day > max {
        return Err(ParseError::DayOutOfRange { role, day, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DateOrder;
    use crate::engine::Grammar;

    fn canonical(input: &str) -> Result<CanonicalDate> {
        canonical_in(DateOrder::Default, input)
    }

    fn canonical_in(order: DateOrder, input: &str) -> Result<CanonicalDate> {
        CanonicalDate::try_from(&Grammar::new(order).capture(input)?)
    }

    fn ymd(year: i32, month: u32, day: u32) -> CanonicalGroup {
        CanonicalGroup { year: Some(year), month: Some(month), day: Some(day), calendar: None }
    }

    #[test]
    fn prefix_and_postfix_components_merge() {
        assert_eq!(canonical("25 Dec 1066").unwrap().mid, ymd(1066, 12, 25));
        assert_eq!(canonical("1066-12-25").unwrap().mid, ymd(1066, 12, 25));
        assert_eq!(canonical_in(DateOrder::Mdy, "12/25/1066").unwrap().mid, ymd(1066, 12, 25));
        assert_eq!(canonical_in(DateOrder::Dmy, "25.12.1066").unwrap().mid, ymd(1066, 12, 25));
    }

    #[test]
    fn conflicting_components_are_rejected() {
        assert_eq!(canonical("Dec 1066-12"), Err(ParseError::ConflictingMonth { role: Role::Mid }));
        assert_eq!(canonical("after 25 Dec 1066-12-25"), Err(ParseError::ConflictingMonth { role: Role::Early }));
    }

    #[test]
    fn out_of_range_components_are_rejected() {
        assert_eq!(canonical("1066-13"), Err(ParseError::MonthOutOfRange { role: Role::Mid, month: 13 }));
        assert_eq!(canonical("0"), Err(ParseError::YearOutOfRange { role: Role::Mid, year: 0 }));
        assert_eq!(canonical("31 Apr 1066"), Err(ParseError::DayOutOfRange { role: Role::Mid, day: 31, max: 30 }));
        assert_eq!(canonical("1800-2-29"), Err(ParseError::DayOutOfRange { role: Role::Mid, day: 29, max: 28 }));
        assert!(canonical("1700-2-29").is_ok());
        assert!(canonical("29 Feb 45 BC").is_ok());
        assert!(canonical("29 Feb 44 BC").is_err());
    }

    #[test]
    fn main_calendar_comes_from_mid_then_late() {
        let date = canonical("between 500 and 400BC").unwrap();
        assert_eq!(date.calendar, Era::Bce);
        assert_eq!(date.late.calendar, None);
        assert_eq!(date.era_of(Role::Early), Era::Bce);

        let date = canonical("10 bc latest 10 ad").unwrap();
        assert_eq!(date.calendar, Era::Bce);
        assert_eq!(date.late.calendar, Some(Era::Ce));

        let date = canonical("after 100 ad").unwrap();
        assert_eq!(date.calendar, Era::Ce);
        assert_eq!(date.early.calendar, None);
    }

    #[test]
    fn bce_earliest_date_alone_is_ambiguous() {
        assert_eq!(canonical("after 500 bc"), Err(ParseError::AmbiguousEra));
        assert_eq!(canonical("between 500 bc and 400"), Err(ParseError::AmbiguousEra));
        assert!(canonical("between 500 bc and 400 bc").is_ok());
    }

    #[test]
    fn circa_length_is_typed() {
        let date = canonical("circa18m 1066").unwrap();
        assert!(date.circa);
        assert_eq!(date.circa_length, Some(CircaLength { magnitude: 18, unit: CircaUnit::Month }));
        assert_eq!(date.circa_interval_days(), 547);

        let raw = RawCapture {
            circa: Some("c".into()),
            circa_len: Some("3".into()),
            circa_unit: Some("w".into()),
            mid: RawGroup { year: Some("1066".into()), ..RawGroup::default() },
            ..RawCapture::default()
        };
        assert_eq!(CanonicalDate::try_from(&raw), Err(ParseError::CircaUnit { unit: "w".into() }));
    }
}
