//! Event-level aggregation.
//!
//! An event on a timeline carries up to four descriptions: when it started
//! and ended, and for a person, birth and death. This module parses them all
//! and derives the span the event covers plus a single date to label it at.

use serde::Serialize;

use crate::api::{Context, HdateParser, Options};
use crate::error::Result;

/// Date descriptions attached to one event. Absent fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Event {
    pub start: Option<String>,
    pub end: Option<String>,
    pub birth: Option<String>,
    pub death: Option<String>,
}

/// Ordinals of one parsed description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateOrdinals {
    pub early: i64,
    pub mid: i64,
    pub late: i64,
    pub ongoing: bool,
}

/// Ordinals of every description in an [`Event`], plus the derived span
/// and label position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventOrdinals {
    pub start: Option<DateOrdinals>,
    pub end: Option<DateOrdinals>,
    pub birth: Option<DateOrdinals>,
    pub death: Option<DateOrdinals>,
    /// Smallest ordinal across all descriptions.
    pub earliest: i64,
    /// Largest ordinal across all descriptions.
    pub latest: i64,
    /// Where to place the event's label.
    pub label: i64,
}

impl EventOrdinals {
    fn dates(&self) -> impl Iterator<Item = &DateOrdinals> {
        [&self.start, &self.end, &self.birth, &self.death].into_iter().flatten()
    }
}

impl HdateParser {
    /// Parse every description of `event`.
    ///
    /// An empty description contributes nothing, except for an empty death
    /// date after a known birth date, which reads as "still alive" (ongoing).
    /// Returns `Ok(None)` when no description yields a date; any description
    /// that fails to parse fails the whole event.
    pub fn event_ordinals(&self, event: &Event, context: &Context) -> Result<Option<EventOrdinals>> {
        let start = self.date_ordinals(event.start.as_deref(), context)?;
        let end = self.date_ordinals(event.end.as_deref(), context)?;
        let birth = self.date_ordinals(event.birth.as_deref(), context)?;
        let death = if birth.is_some() {
            let lenient = HdateParser::new(Options { missing_as_ongoing: true, ..*self.options() });
            lenient.date_ordinals(event.death.as_deref(), context)?
        } else {
            self.date_ordinals(event.death.as_deref(), context)?
        };

        let mut ordinals = EventOrdinals { start, end, birth, death, earliest: 0, latest: 0, label: 0 };
        let Some(earliest) = ordinals.dates().map(|date| date.early.min(date.mid).min(date.late)).min() else {
            return Ok(None);
        };
        ordinals.earliest = earliest;
        ordinals.latest = ordinals.dates().map(|date| date.early.max(date.mid).max(date.late)).max().unwrap_or(earliest);
        ordinals.label = label(&ordinals);

        Ok(Some(ordinals))
    }

    fn date_ordinals(&self, text: Option<&str>, context: &Context) -> Result<Option<DateOrdinals>> {
        let Some(text) = text else {
            return Ok(None);
        };
        if text.trim().is_empty() && !self.options().missing_as_ongoing {
            return Ok(None);
        }

        let triple = self.parse_at(text, context)?;
        let (early, mid, late) = triple.ordinals();
        Ok(Some(DateOrdinals { early, mid, late, ongoing: triple.is_ongoing() }))
    }
}

fn label(ordinals: &EventOrdinals) -> i64 {
    let midpoint = |from: i64, to: i64| from + (to - from) / 2;
    let mid = |date: Option<DateOrdinals>| date.map(|date| date.mid);

    match (mid(ordinals.start), mid(ordinals.end), mid(ordinals.birth), mid(ordinals.death)) {
        (Some(start), Some(end), _, _) => midpoint(start, end),
        (Some(start), None, _, _) => start,
        (None, _, Some(birth), Some(death)) => midpoint(birth, death),
        (None, _, Some(birth), None) => birth,
        (None, Some(end), None, _) => end,
        (None, None, None, Some(death)) => death,
        (None, None, None, None) => ordinals.earliest,
    }
}
