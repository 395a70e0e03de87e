use crate::{Era, Role};
use thiserror::Error;

/// Everything that can go wrong turning text into a resolved triple.
///
/// A failed parse never yields a partial result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("illegal date format: {input:?}")]
    Format { input: String },
    #[error("description contains no date")]
    NoDate,
    #[error("{role} date has both a prefix month and a postfix month")]
    ConflictingMonth { role: Role },
    #[error("{role} date has both a prefix day and a postfix day")]
    ConflictingDay { role: Role },
    #[error("an earliest date in BCE needs an explicit era on the main or latest date")]
    AmbiguousEra,
    #[error("{role} month {month} is outside 1..=12")]
    MonthOutOfRange { role: Role, month: u32 },
    #[error("{role} day {day} exceeds the {max} days of its month")]
    DayOutOfRange { role: Role, day: u32, max: u32 },
    #[error("{role} year {year} is not a valid year")]
    YearOutOfRange { role: Role, year: i64 },
    #[error("bounds are out of order: early {early}, mid {mid}, late {late}")]
    BoundsOutOfOrder { early: i64, mid: i64, late: i64 },
    #[error("unsupported circa length unit {unit:?} (expected y, m or d)")]
    CircaUnit { unit: String },
    #[error("{day}/{month}/{year} {era} cannot be placed on the ordinal axis")]
    Unrepresentable { year: i32, month: u32, day: u32, era: Era },
}

/// Coarse classification of [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The text matches none of the recognised shapes.
    Format,
    /// The text matched, but its parts contradict each other.
    Validation,
    /// A value could not be converted (unknown unit, out-of-range date).
    Value,
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Format { .. } | ParseError::NoDate => ErrorKind::Format,
            ParseError::ConflictingMonth { .. }
            | ParseError::ConflictingDay { .. }
            | ParseError::AmbiguousEra
            | ParseError::MonthOutOfRange { .. }
            | ParseError::DayOutOfRange { .. }
            | ParseError::YearOutOfRange { .. }
            | ParseError::BoundsOutOfOrder { .. } => ErrorKind::Validation,
            ParseError::CircaUnit { .. } | ParseError::Unrepresentable { .. } => ErrorKind::Value,
        }
    }

    pub(crate) fn format(input: &str) -> Self {
        ParseError::Format { input: input.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
