//! Packing free intervals into fixed-length bookable slots.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::dst::is_canonical;
use crate::model::TimeInterval;

/// Cut each free interval into back-to-back slots of `duration_minutes`.
///
/// Each interval is packed from its own start; a trailing remainder shorter
/// than the duration is dropped. Slots from different intervals are never
/// joined, even when contiguous. A non-positive duration yields no slots.
pub fn split_into_slots(free: &[TimeInterval], duration_minutes: i64) -> Vec<TimeInterval> {
    if duration_minutes <= 0 {
        return Vec::new();
    }
    let Some(step) = Duration::try_minutes(duration_minutes) else {
        return Vec::new();
    };

    let mut slots = Vec::new();
    for interval in free {
        let mut cursor = interval.start();
        while let Some(slot_end) = cursor.checked_add_signed(step) {
            if slot_end > interval.end() {
                break;
            }
            slots.extend(TimeInterval::new(cursor, slot_end));
            cursor = slot_end;
        }
    }
    slots
}

/// Drop slots that have already ended when `date` is today in `tz`.
///
/// On any other date the slots are returned unchanged. A slot ending exactly
/// at `now` counts as past; one starting at `now` is kept.
pub fn filter_past_slots(
    slots: Vec<TimeInterval>,
    date: NaiveDate,
    now: DateTime<Utc>,
    tz: Tz,
) -> Vec<TimeInterval> {
    if now.with_timezone(&tz).date_naive() != date {
        return slots;
    }
    slots.into_iter().filter(|slot| slot.end() > now).collect()
}

/// Drop slots whose wall-clock start or end, read back in `tz`, names a
/// different instant.
///
/// On a fall-back day the repeated hour is offered once, on its first pass;
/// a slot that starts or ends in the second pass could not be booked back by
/// its `"HH:mm"` label.
pub fn drop_ambiguous_slots(slots: Vec<TimeInterval>, tz: Tz) -> Vec<TimeInterval> {
    slots
        .into_iter()
        .filter(|slot| is_canonical(slot.start(), tz) && is_canonical(slot.end(), tz))
        .collect()
}
