//! Anchoring wall-clock schedule times to instants across DST transitions.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Policy for schedule times that fall inside a DST gap (spring forward).
///
/// Times repeated by a fall-back transition always take the earlier instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DstPolicy {
    /// Refuse the time; the day yields no capacity for that professional.
    Skip,
    /// Move the time forward by the length of the gap (02:30 becomes 03:30).
    #[default]
    ShiftForward,
}

// Far enough back to land before any real-world transition gap.
const GAP_LOOKBACK_HOURS: i64 = 3;

/// Combine `date` and `time` in `tz` into a UTC instant.
///
/// # Errors
/// Returns `EngineError::NonexistentLocalTime` when the local time falls in a
/// DST gap and `policy` is [`DstPolicy::Skip`].
pub fn local_to_utc(
    date: NaiveDate,
    time: NaiveTime,
    tz: Tz,
    policy: DstPolicy,
) -> Result<DateTime<Utc>> {
    let naive = date.and_time(time);
    if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
        return Ok(dt.with_timezone(&Utc));
    }

    let nonexistent =
        || EngineError::NonexistentLocalTime(naive.to_string(), tz.name().to_string());
    match policy {
        DstPolicy::Skip => Err(nonexistent()),
        DstPolicy::ShiftForward => {
            // Read the wall time with the offset in force before the gap.
            let before_gap = naive - Duration::hours(GAP_LOOKBACK_HOURS);
            let offset = tz
                .offset_from_local_datetime(&before_gap)
                .earliest()
                .ok_or_else(nonexistent)?;
            let seconds = i64::from(offset.fix().local_minus_utc());
            Ok(Utc.from_utc_datetime(&(naive - Duration::seconds(seconds))))
        }
    }
}

/// Whether `instant` is what its own wall-clock reading in `tz` resolves to.
///
/// False only for the second pass through an hour repeated by a fall-back
/// transition, where the wall-clock label points at the earlier instant.
pub fn is_canonical(instant: DateTime<Utc>, tz: Tz) -> bool {
    let local = instant.with_timezone(&tz).naive_local();
    tz.from_local_datetime(&local)
        .earliest()
        .is_some_and(|dt| dt.with_timezone(&Utc) == instant)
}

/// The `[local midnight, next local midnight)` bounds of `date` in `tz`.
pub fn day_bounds(date: NaiveDate, tz: Tz) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let next = date
        .succ_opt()
        .ok_or_else(|| EngineError::InvalidConfig(format!("no day after {date}")))?;
    let start = local_to_utc(date, NaiveTime::MIN, tz, DstPolicy::ShiftForward)?;
    let end = local_to_utc(next, NaiveTime::MIN, tz, DstPolicy::ShiftForward)?;
    Ok((start, end))
}
