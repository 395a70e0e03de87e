//! Grammar for historical date descriptions.
//!
//! ```text
//! description := "ongoing"
//!              | [circa [length]] [date:mid] [early-kw date:early] [late-kw date:late]
//! circa       := "circa" | "c" | "c." | "about" | "estimated"
//! length      := digits{1,8} ("y" | "m" | "d")
//! early-kw    := "earliest" | "after" | "between"
//! late-kw     := "latest" | "before" | "and"
//! date        := [prefix sep] year ["-" mm ["-" dd]] [era]
//! prefix      := default:  [day sep] month-name
//!                dmy:      [day sep] month
//!                mdy:      month [sep day]
//! day         := digits{1,2} ["st" | "nd" | "rd" | "th"]
//! month       := month-name | 1..=12
//! sep         := ws* ["/" | "-" | "." | ","] ws*
//! ```
//!
//! The whole trimmed input has to match and at least one date needs a year.
//! Each date commits to the first prefix shape that yields a year, tried
//! longest first; text left over after that makes the whole match fail.
//! A year followed by `-MM[-DD]` is read as such before any prefix shape,
//! so `10-6` means June of year 10 in every order.

use tracing::{debug, trace};

use super::lexer::{self, Cursor};
use super::trigger::InputFeatures;
use crate::error::{ParseError, Result};
use crate::{DateOrder, RawCapture, RawGroup, Role};

pub(crate) const EARLY_KEYWORDS: &[&str] = &["earliest", "after", "between"];
pub(crate) const LATE_KEYWORDS: &[&str] = &["latest", "before", "and"];

const MAX_YEAR_DIGITS: usize = 8;
const MAX_DAY_DIGITS: usize = 2;

/// What may stand in front of a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prefix {
    DayMonth,
    MonthDay,
    Month,
    Bare,
}

/// Matches descriptions written in one [`DateOrder`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Grammar {
    order: DateOrder,
}

impl Grammar {
    pub fn new(order: DateOrder) -> Self {
        Grammar { order }
    }

    pub fn order(&self) -> DateOrder {
        self.order
    }

    /// Match `input` and return the raw text of every group.
    pub fn capture(&self, input: &str) -> Result<RawCapture> {
        let features = InputFeatures::scan(input);
        self.capture_scanned(input, features)
    }

    pub(crate) fn capture_scanned(&self, input: &str, features: InputFeatures) -> Result<RawCapture> {
        let text = input.trim();

        if features.contains(InputFeatures::ONGOING) && text.eq_ignore_ascii_case("ongoing") {
            return Ok(RawCapture { ongoing: Some(text.to_string()), ..RawCapture::default() });
        }
        if !features.contains(InputFeatures::HAS_DIGITS) {
            trace!(input = text, "no digits, cannot contain a year");
            return Err(ParseError::format(input));
        }

        let matcher = Matcher { order: self.order, features };
        match matcher.description(Cursor::new(text)) {
            Some(raw) => {
                debug!(input = text, order = %self.order, fields = raw.fields().len(), "captured");
                Ok(raw)
            }
            None => {
                trace!(input = text, order = %self.order, "no alternative matched");
                Err(ParseError::format(input))
            }
        }
    }
}

/// One matching run: the grammar plus what the trigger scan found.
struct Matcher {
    order: DateOrder,
    features: InputFeatures,
}

impl Matcher {
    fn description(&self, cursor: Cursor<'_>) -> Option<RawCapture> {
        if !self.features.contains(InputFeatures::CIRCA_MARKER) {
            return self.dates(cursor);
        }

        let mut after_marker = cursor;
        let Some(marker) = lexer::circa_marker(&mut after_marker) else {
            return self.dates(cursor);
        };

        let mut after_length = after_marker;
        if let Some((magnitude, unit)) = lexer::circa_length(&mut after_length) {
            if let Some(mut raw) = self.dates(after_length) {
                raw.circa = Some(marker.to_string());
                raw.circa_len = Some(magnitude.to_string());
                raw.circa_unit = Some(unit.to_string());
                return Some(raw);
            }
        }

        let mut raw = self.dates(after_marker)?;
        raw.circa = Some(marker.to_string());
        Some(raw)
    }

    /// `[date:mid] [early-kw date:early] [late-kw date:late]` up to the end of input.
    fn dates(&self, mut cursor: Cursor<'_>) -> Option<RawCapture> {
        let mut raw = RawCapture::default();

        cursor.skip_whitespace();
        if let Some(group) = self.date(&mut cursor) {
            raw.mid = group;
        }

        if self.features.contains(InputFeatures::RANGE_KEYWORD) {
            for (role, keywords) in [(Role::Early, EARLY_KEYWORDS), (Role::Late, LATE_KEYWORDS)] {
                let mut attempt = cursor;
                attempt.skip_whitespace();
                if lexer::keyword(&mut attempt, keywords).is_none() || !attempt.skip_whitespace() {
                    continue;
                }
                if let Some(group) = self.date(&mut attempt) {
                    *raw.group_mut(role) = group;
                    cursor = attempt;
                }
            }
        }

        cursor.skip_whitespace();
        if !cursor.is_at_end() {
            trace!(at = cursor.position(), rest = cursor.rest(), "unmatched text");
        }
        let has_year = Role::ALL.into_iter().any(|role| raw.group(role).year.is_some());
        (cursor.is_at_end() && has_year).then_some(raw)
    }

    /// One date, trying the prefix shapes of the current order in turn.
    fn date(&self, cursor: &mut Cursor<'_>) -> Option<RawGroup> {
        let mut attempt = *cursor;
        if let Some(group) = self.date_with(Prefix::Bare, &mut attempt).filter(|group| group.post_month.is_some()) {
            *cursor = attempt;
            return Some(group);
        }

        let prefixes: &[Prefix] = match self.order {
            DateOrder::Default if !self.features.contains(InputFeatures::MONTHISH) => &[Prefix::Bare],
            DateOrder::Default | DateOrder::Dmy => &[Prefix::DayMonth, Prefix::Month, Prefix::Bare],
            DateOrder::Mdy => &[Prefix::MonthDay, Prefix::Month, Prefix::Bare],
        };

        prefixes.iter().find_map(|&prefix| {
            let mut attempt = *cursor;
            let group = self.date_with(prefix, &mut attempt)?;
            *cursor = attempt;
            Some(group)
        })
    }

    fn date_with(&self, prefix: Prefix, cursor: &mut Cursor<'_>) -> Option<RawGroup> {
        let mut group = RawGroup::default();

        match prefix {
            Prefix::DayMonth => {
                group.pre_day = Some(self.day(cursor)?);
                lexer::separator(cursor);
                group.pre_month = Some(self.month(cursor)?);
                lexer::separator(cursor);
            }
            Prefix::MonthDay => {
                group.pre_month = Some(self.month(cursor)?);
                lexer::separator(cursor);
                group.pre_day = Some(self.day(cursor)?);
                lexer::separator(cursor);
            }
            Prefix::Month => {
                group.pre_month = Some(self.month(cursor)?);
                lexer::separator(cursor);
            }
            Prefix::Bare => {}
        }

        group.year = Some(lexer::number(cursor, MAX_YEAR_DIGITS)?.to_string());
        if let Some((month, day)) = lexer::numeric_suffix(cursor) {
            group.post_month = Some(month.to_string());
            group.post_day = day.map(str::to_string);
        }
        group.calendar = lexer::era(cursor).map(str::to_string);

        Some(group)
    }

    fn day(&self, cursor: &mut Cursor<'_>) -> Option<String> {
        let mut attempt = *cursor;
        let day = lexer::number(&mut attempt, MAX_DAY_DIGITS)?;
        lexer::ordinal_suffix(&mut attempt);
        *cursor = attempt;
        Some(day.to_string())
    }

    fn month(&self, cursor: &mut Cursor<'_>) -> Option<String> {
        if let Some(name) = lexer::month_name(cursor) {
            return Some(name.to_string());
        }
        if !self.order.allows_numeric_month() {
            return None;
        }

        let mut attempt = *cursor;
        let digits = lexer::number(&mut attempt, 2)?;
        let month: u32 = digits.parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        *cursor = attempt;
        Some(digits.to_string())
    }
}
