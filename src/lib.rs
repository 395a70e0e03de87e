//! Historical date parsing.
//!
//! Turns loose descriptions of historical dates ("circa 1066-6-24",
//! "487 BC", "between 500 and 400BC", "ongoing") into an (early, mid, late)
//! triple of days on one continuous ordinal axis that spans both eras.
//!
//! ```
//! use hdate::{Precision, parse};
//!
//! let triple = parse("487 bc").unwrap();
//! assert_eq!(triple.mid.ordinal, -177711);
//! assert_eq!(triple.mid.precision, Precision::Year);
//! ```

#[macro_use]
mod macros;
mod api;
mod calendar;
mod convert;
mod engine;
mod error;
mod event;
mod hdate_expr;

pub use api::{Context, HdateParser, Options, ParseDetails, parse, parse_verbose_with, parse_with};
pub use calendar::{from_ordinal, is_leap_year, max_day_in_month, to_ordinal};
pub use convert::{
    DateRef, YearFormat, calc_mid_date, calc_mid_ordinal, calendar_date_of, format_year, naive_date_of, ordinal_of,
    ordinal_of_with_delta, years_of, years_to_ordinal,
};
pub use engine::{Grammar, InputFeatures, StageMetrics};
pub use error::{ErrorKind, ParseError, Result};
pub use event::{DateOrdinals, Event, EventOrdinals};
pub use hdate_expr::{
    CanonicalDate, CanonicalGroup, CircaLength, CircaUnit, RawCapture, RawGroup, ResolvedDate, ResolvedTriple, Ymd,
};

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

// --- Shared vocabulary ------------------------------------------------------

/// One of the three date groups a description can carry.
///
/// `Mid` is the best estimate; `Early`/`Late` bound it ("after ..",
/// "before ..").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Early,
    Mid,
    Late,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Early, Role::Mid, Role::Late];

    /// Prefix used for this group's raw capture field names (`midyear`, `earlypremon`, ...).
    pub fn prefix(self) -> &'static str {
        match self {
            Role::Early => "early",
            Role::Mid => "mid",
            Role::Late => "late",
        }
    }

    /// Month assumed when only a year is known.
    pub(crate) fn default_month(self) -> u32 {
        match self {
            Role::Early => 1,
            Role::Mid => 6,
            Role::Late => 12,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Calendar era. There is no year zero between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Era {
    #[default]
    #[serde(rename = "CE")]
    Ce,
    #[serde(rename = "BCE")]
    Bce,
}

impl Era {
    /// Map an era marker (`ad`, `ce`, `bc`, `bce`; any case) to an era.
    pub fn from_token(token: &str) -> Option<Era> {
        match token.to_ascii_lowercase().as_str() {
            "ad" | "ce" => Some(Era::Ce),
            "bc" | "bce" => Some(Era::Bce),
            _ => None,
        }
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Era::Ce => f.write_str("CE"),
            Era::Bce => f.write_str("BCE"),
        }
    }
}

/// How exactly a resolved date is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    Year,
    Month,
    Day,
    /// Derived from a circa interval rather than stated.
    Circa,
    /// Open-ended, anchored to the parse's "today".
    Ongoing,
}

impl Precision {
    /// Single-letter code (`y`, `m`, `d`, `c`, `o`) used in compact output.
    pub fn code(self) -> char {
        match self {
            Precision::Year => 'y',
            Precision::Month => 'm',
            Precision::Day => 'd',
            Precision::Circa => 'c',
            Precision::Ongoing => 'o',
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Precision::Year => "year",
            Precision::Month => "month",
            Precision::Day => "day",
            Precision::Circa => "circa",
            Precision::Ongoing => "ongoing",
        };
        f.write_str(name)
    }
}

/// Order of the day and month components before the year.
///
/// `Default` only accepts spelled-out months (`25 Dec 1066`). `Dmy`/`Mdy`
/// additionally accept numeric months in the given order (`25/12/1066`,
/// `12/25/1066`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DateOrder {
    #[default]
    Default,
    Dmy,
    Mdy,
}

impl DateOrder {
    pub(crate) fn allows_numeric_month(self) -> bool {
        !matches!(self, DateOrder::Default)
    }
}

impl fmt::Display for DateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DateOrder::Default => "default",
            DateOrder::Dmy => "dmy",
            DateOrder::Mdy => "mdy",
        };
        f.write_str(name)
    }
}

impl FromStr for DateOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "default" | "none" => Ok(DateOrder::Default),
            "dmy" => Ok(DateOrder::Dmy),
            "mdy" => Ok(DateOrder::Mdy),
            other => Err(format!("unknown date order '{other}' (expected default, dmy or mdy)")),
        }
    }
}
