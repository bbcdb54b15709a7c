//! Free-time interval construction and busy-time subtraction.
//!
//! A schedule becomes one or two base intervals on a concrete date (two when a
//! break splits the day). Busy intervals are then removed one at a time, each
//! pass re-splitting every surviving fragment it overlaps. Fragments are never
//! re-merged; slot packing only needs correctly bounded pieces.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::dst::{local_to_utc, DstPolicy};
use crate::error::Result;
use crate::model::TimeInterval;
use crate::schedule::EffectiveSchedule;

/// Build the base free intervals for `date` from a resolved schedule.
///
/// Returns an empty list when close is not after open. A break is clamped to
/// the open hours first; a break that collapses to nothing leaves the day
/// whole.
///
/// # Errors
/// Returns `EngineError::NonexistentLocalTime` when a boundary falls in a DST
/// gap under [`DstPolicy::Skip`].
pub fn build_base_intervals(
    date: NaiveDate,
    schedule: &EffectiveSchedule,
    tz: Tz,
    policy: DstPolicy,
) -> Result<Vec<TimeInterval>> {
    let open = local_to_utc(date, schedule.open, tz, policy)?;
    let close = local_to_utc(date, schedule.close, tz, policy)?;
    if close <= open {
        return Ok(Vec::new());
    }

    if let Some((break_start, break_end)) = schedule.break_window {
        let break_start = local_to_utc(date, break_start, tz, policy)?.clamp(open, close);
        let break_end = local_to_utc(date, break_end, tz, policy)?.clamp(open, close);
        if break_end > break_start {
            return Ok([
                TimeInterval::new(open, break_start),
                TimeInterval::new(break_end, close),
            ]
            .into_iter()
            .flatten()
            .collect());
        }
    }

    Ok(TimeInterval::new(open, close).into_iter().collect())
}

/// Remove one busy interval from every free interval.
///
/// Intervals that do not overlap `busy` pass through untouched; overlapping
/// ones keep only their positive-length parts before and after it.
pub fn subtract(free: &[TimeInterval], busy: &TimeInterval) -> Vec<TimeInterval> {
    let mut result = Vec::with_capacity(free.len() + 1);
    for interval in free {
        if !interval.overlaps(busy) {
            result.push(*interval);
            continue;
        }
        result.extend(TimeInterval::new(interval.start(), busy.start()));
        result.extend(TimeInterval::new(busy.end(), interval.end()));
    }
    result
}

/// Fold [`subtract`] over every busy interval in order.
pub fn subtract_all<I>(free: Vec<TimeInterval>, busy: I) -> Vec<TimeInterval>
where
    I: IntoIterator<Item = TimeInterval>,
{
    busy.into_iter().fold(free, |remaining, b| subtract(&remaining, &b))
}

/// Restrict `interval` to `[day_start, day_end)`. `None` when nothing is left.
pub fn clamp(
    interval: &TimeInterval,
    day_start: DateTime<Utc>,
    day_end: DateTime<Utc>,
) -> Option<TimeInterval> {
    TimeInterval::new(interval.start().max(day_start), interval.end().min(day_end))
}
