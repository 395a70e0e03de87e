//! Canonical form → (early, mid, late) triple.
//!
//! Resolution runs in three steps:
//!
//! ```text
//! CanonicalDate
//!   ├─ ongoing? ── today, today, today + interval ──────────────┐
//!   │                                                           │
//!   ├─ state each group: fill month/day defaults, or borrow     │
//!   │  the mid date when a bound has no year of its own         │
//!   ├─ fill the remaining gaps from the circa interval          │
//!   │                                                           v
//!   └──────────────────────────────────────────────────> ResolvedTriple
//! ```

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::calendar::{self, max_day_in_month};
use crate::error::{ParseError, Result};
use crate::{
    CanonicalDate, CanonicalGroup, Context, Era, Options, Precision, ResolvedDate, ResolvedTriple, Role, Ymd,
};

/// A date that is known before gap filling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Point {
    ordinal: i64,
    precision: Precision,
}

#[derive(Debug, Clone, Copy, Default)]
struct Points {
    early: Option<Point>,
    mid: Option<Point>,
    late: Option<Point>,
}

pub(crate) fn resolve(canonical: &CanonicalDate, context: &Context, options: &Options) -> Result<ResolvedTriple> {
    let interval = canonical.circa_interval_days();

    let points = if canonical.ongoing {
        ongoing(context.today, interval)
    } else {
        let mut points = Points {
            early: stated(canonical, Role::Early)?,
            mid: stated(canonical, Role::Mid)?,
            late: stated(canonical, Role::Late)?,
        };
        fill_gaps(&mut points, interval);
        points
    };

    let (Some(early), Some(mid), Some(late)) = (points.early, points.mid, points.late) else {
        return Err(ParseError::NoDate);
    };
    if early.ordinal > mid.ordinal || mid.ordinal > late.ordinal {
        trace!(early = early.ordinal, mid = mid.ordinal, late = late.ordinal, "bounds out of order");
        return Err(ParseError::BoundsOutOfOrder { early: early.ordinal, mid: mid.ordinal, late: late.ordinal });
    }
    let triple = ResolvedTriple { early: finish(early, options), mid: finish(mid, options), late: finish(late, options) };

    debug!(
        early = triple.early.ordinal,
        mid = triple.mid.ordinal,
        late = triple.late.ordinal,
        precision = %triple.mid.precision,
        "resolved"
    );
    Ok(triple)
}

fn ongoing(today: NaiveDate, interval: i64) -> Points {
    let today = Ymd::from(today).ordinal().unwrap_or_default();
    let point = |ordinal| Some(Point { ordinal, precision: Precision::Ongoing });
    Points { early: point(today), mid: point(today), late: point(today + interval) }
}

/// The point a group states, either from its own year or, for a bound with
/// no year, borrowed from the mid date.
fn stated(canonical: &CanonicalDate, role: Role) -> Result<Option<Point>> {
    let own = canonical.group(role);
    let point = if own.year.is_some() {
        let point = point_of(own, role, canonical.era_of(role))?;
        match point {
            Some(point) if canonical.circa && role == Role::Mid => Some(Point { precision: Precision::Circa, ..point }),
            other => other,
        }
    } else if canonical.circa || role == Role::Mid {
        None
    } else {
        point_of(&canonical.mid, role, canonical.era_of(Role::Mid))?
    };
    Ok(point)
}

/// Place a group on the axis, defaulting month and day for `role`.
fn point_of(group: &CanonicalGroup, role: Role, era: Era) -> Result<Option<Point>> {
    let Some(year) = group.year else {
        return Ok(None);
    };
    let month = group.month.unwrap_or(role.default_month());
    let day = group.day.unwrap_or_else(|| default_day(role, year, month, era));
    let precision = match (group.month, group.day) {
        (_, Some(_)) => Precision::Day,
        (Some(_), None) => Precision::Month,
        (None, None) => Precision::Year,
    };

    let ordinal = calendar::to_ordinal(year, month, day, era).ok_or(ParseError::Unrepresentable { year, month, day, era })?;
    Ok(Some(Point { ordinal, precision }))
}

fn default_day(role: Role, year: i32, month: u32, era: Era) -> u32 {
    match role {
        Role::Early => 1,
        Role::Mid => 15,
        Role::Late => max_day_in_month(year, month, era, false),
    }
}

/// Fill missing points from the ones present, always in this order.
fn fill_gaps(points: &mut Points, interval: i64) {
    let circa = |ordinal| Some(Point { ordinal, precision: Precision::Circa });

    if let Some(mid) = points.mid {
        if points.early.is_none() {
            points.early = circa(mid.ordinal - interval);
        }
        if points.late.is_none() {
            points.late = circa(mid.ordinal + interval);
        }
        return;
    }

    match (points.early, points.late) {
        (Some(early), Some(late)) => {
            points.mid = circa(early.ordinal + (late.ordinal - early.ordinal).div_euclid(2));
        }
        (Some(early), None) => {
            points.mid = circa(early.ordinal + interval);
            points.late = circa(early.ordinal + 2 * interval);
        }
        (None, Some(late)) => {
            points.mid = circa(late.ordinal - interval);
            points.early = circa(late.ordinal - 2 * interval);
        }
        (None, None) => {}
    }
}

fn finish(point: Point, options: &Options) -> ResolvedDate {
    let calendar_date = if point.ordinal <= 0 && !options.supports_native_bce_date {
        None
    } else {
        calendar::from_ordinal(point.ordinal)
    };
    ResolvedDate { calendar_date, ordinal: point.ordinal, precision: point.precision }
}
