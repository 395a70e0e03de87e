use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::calendar;
use crate::{Era, Precision, Role};

const MONTH_ABBREVIATIONS: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

// --- Raw capture -------------------------------------------------------------

/// Text captured for one date group, exactly as it appeared in the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawGroup {
    /// Day written before the month (`25` in "25th Dec 1066").
    pub pre_day: Option<String>,
    /// Month written before the year: a name, or a number under `dmy`/`mdy`.
    pub pre_month: Option<String>,
    pub year: Option<String>,
    /// Month in the `YYYY-MM[-DD]` suffix.
    pub post_month: Option<String>,
    /// Day in the `YYYY-MM-DD` suffix.
    pub post_day: Option<String>,
    /// Era marker (`ad`, `ce`, `bc`, `bce`).
    pub calendar: Option<String>,
}

impl RawGroup {
    pub fn is_empty(&self) -> bool {
        *self == RawGroup::default()
    }

    fn field(&self, suffix: &str) -> Option<&str> {
        let value = match suffix {
            "preday" => &self.pre_day,
            "premon" => &self.pre_month,
            "year" => &self.year,
            "postmon" => &self.post_month,
            "postday" => &self.post_day,
            "calendar" => &self.calendar,
            _ => return None,
        };
        value.as_deref()
    }
}

/// Flat result of one match attempt against the whole input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawCapture {
    pub ongoing: Option<String>,
    /// The circa marker as written (`circa`, `c.`, `about`, ...).
    pub circa: Option<String>,
    /// Magnitude of an explicit circa interval (`2` in "circa2y").
    pub circa_len: Option<String>,
    /// Unit of an explicit circa interval (`y`, `m` or `d`).
    pub circa_unit: Option<String>,
    pub early: RawGroup,
    pub mid: RawGroup,
    pub late: RawGroup,
}

impl RawCapture {
    pub fn group(&self, role: Role) -> &RawGroup {
        match role {
            Role::Early => &self.early,
            Role::Mid => &self.mid,
            Role::Late => &self.late,
        }
    }

    pub fn group_mut(&mut self, role: Role) -> &mut RawGroup {
        match role {
            Role::Early => &mut self.early,
            Role::Mid => &mut self.mid,
            Role::Late => &mut self.late,
        }
    }

    /// Look a capture up by its flat field name: `ongoing`, `circa`, `clen`,
    /// `clentype`, or a role prefix followed by `preday`, `premon`, `year`,
    /// `postmon`, `postday` or `calendar` (`midyear`, `latecalendar`, ...).
    pub fn get(&self, name: &str) -> Option<&str> {
        match name {
            "ongoing" => self.ongoing.as_deref(),
            "circa" => self.circa.as_deref(),
            "clen" => self.circa_len.as_deref(),
            "clentype" => self.circa_unit.as_deref(),
            _ => Role::ALL
                .into_iter()
                .find_map(|role| name.strip_prefix(role.prefix()).map(|suffix| (role, suffix)))
                .and_then(|(role, suffix)| self.group(role).field(suffix)),
        }
    }

    /// All fields that were captured, as `(flat name, text)` pairs.
    pub fn fields(&self) -> Vec<(String, &str)> {
        const GROUP_FIELDS: [&str; 6] = ["preday", "premon", "year", "postmon", "postday", "calendar"];

        let mut fields: Vec<(String, &str)> = ["ongoing", "circa", "clen", "clentype"]
            .into_iter()
            .filter_map(|name| self.get(name).map(|value| (name.to_string(), value)))
            .collect();
        for role in [Role::Mid, Role::Early, Role::Late] {
            for suffix in GROUP_FIELDS {
                if let Some(value) = self.group(role).field(suffix) {
                    fields.push((format!("{}{}", role.prefix(), suffix), value));
                }
            }
        }
        fields
    }
}

// --- Canonical form ----------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CircaUnit {
    Day,
    Month,
    Year,
}

impl CircaUnit {
    pub fn from_token(token: &str) -> Option<CircaUnit> {
        match token.to_ascii_lowercase().as_str() {
            "d" => Some(CircaUnit::Day),
            "m" => Some(CircaUnit::Month),
            "y" => Some(CircaUnit::Year),
            _ => None,
        }
    }
}

/// Explicit width of a circa interval ("circa2y" → 2 years).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CircaLength {
    pub magnitude: i64,
    pub unit: CircaUnit,
}

impl CircaLength {
    /// Width in whole days: months and years use a mean year of 365.25 days.
    pub fn days(&self) -> i64 {
        let magnitude = self.magnitude as f64;
        match self.unit {
            CircaUnit::Day => self.magnitude,
            CircaUnit::Month => (magnitude * 365.25 / 12.0) as i64,
            CircaUnit::Year => (magnitude * 365.25) as i64,
        }
    }
}

/// One typed date group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CanonicalGroup {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    /// Era written on this group, kept only when it differs from the
    /// record's main calendar.
    pub calendar: Option<Era>,
}

/// Normalised, typed form of a [`RawCapture`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CanonicalDate {
    pub circa: bool,
    pub ongoing: bool,
    pub circa_length: Option<CircaLength>,
    pub early: CanonicalGroup,
    pub mid: CanonicalGroup,
    pub late: CanonicalGroup,
    /// Main calendar of the record.
    pub calendar: Era,
}

impl CanonicalDate {
    /// Days in the default circa interval: five mean years.
    pub const DEFAULT_CIRCA_DAYS: i64 = (5.0 * 365.25) as i64;

    pub fn group(&self, role: Role) -> &CanonicalGroup {
        match role {
            Role::Early => &self.early,
            Role::Mid => &self.mid,
            Role::Late => &self.late,
        }
    }

    pub(crate) fn group_mut(&mut self, role: Role) -> &mut CanonicalGroup {
        match role {
            Role::Early => &mut self.early,
            Role::Mid => &mut self.mid,
            Role::Late => &mut self.late,
        }
    }

    /// Era a group's year is counted in.
    pub fn era_of(&self, role: Role) -> Era {
        self.group(role).calendar.unwrap_or(self.calendar)
    }

    pub fn circa_interval_days(&self) -> i64 {
        self.circa_length.map_or(Self::DEFAULT_CIRCA_DAYS, |length| length.days())
    }
}

// --- Resolved output ---------------------------------------------------------

/// A calendar date with a signed year: negative years are BCE (`-487` is
/// 487 BC) and there is no year zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Ymd {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl Ymd {
    pub fn era(&self) -> Era {
        if self.year < 0 { Era::Bce } else { Era::Ce }
    }

    pub fn ordinal(&self) -> Option<i64> {
        let year = i32::try_from(self.year.unsigned_abs()).ok()?;
        calendar::to_ordinal(year, self.month, self.day, self.era())
    }

    /// The same date as a chrono date. CE only.
    pub fn naive_date(&self) -> Option<NaiveDate> {
        if self.year < 1 {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for Ymd {
    fn from(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Ymd { year: date.year(), month: date.month(), day: date.day() }
    }
}

/// Formats as `25 Dec 1066` or `12 Jul 100 BCE`, which parses back to the
/// same day.
impl fmt::Display for Ymd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month = self.month.checked_sub(1).and_then(|idx| MONTH_ABBREVIATIONS.get(idx as usize)).unwrap_or(&"???");
        write!(f, "{} {} {}", self.day, month, self.year.unsigned_abs())?;
        if self.year < 0 {
            f.write_str(" BCE")?;
        }
        Ok(())
    }
}

/// One point of a resolved triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedDate {
    /// Calendar form of `ordinal`. Left empty for BCE dates when the parser
    /// was built without native BCE date support.
    pub calendar_date: Option<Ymd>,
    pub ordinal: i64,
    pub precision: Precision,
}

impl ResolvedDate {
    pub fn naive_date(&self) -> Option<NaiveDate> {
        self.calendar_date.and_then(|ymd| ymd.naive_date())
    }
}

/// Final (early, mid, late) estimate for one description.
///
/// Always ordered: `early.ordinal <= mid.ordinal <= late.ordinal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedTriple {
    pub early: ResolvedDate,
    pub mid: ResolvedDate,
    pub late: ResolvedDate,
}

impl ResolvedTriple {
    pub fn get(&self, role: Role) -> &ResolvedDate {
        match role {
            Role::Early => &self.early,
            Role::Mid => &self.mid,
            Role::Late => &self.late,
        }
    }

    pub fn is_ongoing(&self) -> bool {
        self.mid.precision == Precision::Ongoing
    }

    pub fn ordinals(&self) -> (i64, i64, i64) {
        (self.early.ordinal, self.mid.ordinal, self.late.ordinal)
    }
}
