//! Working-hours resolution: which schedule applies to a professional on a
//! given weekday.
//!
//! A professional's own record for a weekday always wins over the business
//! default, even when it grants less time (including "closed"). The two are
//! never blended. Missing configuration is not an error; it simply means the
//! day has no capacity.

use chrono::NaiveTime;

use crate::error::{EngineError, Result};
use crate::model::WorkingHoursRecord;

/// The working hours actually used for one professional on one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveSchedule {
    pub open: NaiveTime,
    pub close: NaiveTime,
    /// `(break_start, break_end)`, present only when both ends are configured.
    pub break_window: Option<(NaiveTime, NaiveTime)>,
}

impl EffectiveSchedule {
    /// Interpret a stored record. `Ok(None)` for a closed day or a day without
    /// open/close times; an error only for a time string that does not parse.
    pub fn from_record(record: &WorkingHoursRecord) -> Result<Option<Self>> {
        if record.closed {
            return Ok(None);
        }
        let (Some(open), Some(close)) = (&record.open_time, &record.close_time) else {
            return Ok(None);
        };

        let break_window = match (&record.break_start, &record.break_end) {
            (Some(start), Some(end)) => Some((parse_hhmm(start)?, parse_hhmm(end)?)),
            _ => None,
        };

        Ok(Some(Self {
            open: parse_hhmm(open)?,
            close: parse_hhmm(close)?,
            break_window,
        }))
    }

    /// Minutes of working time net of the break. Zero for a malformed
    /// schedule where close is not after open.
    pub fn free_minutes(&self) -> i64 {
        if self.close <= self.open {
            return 0;
        }
        let total = (self.close - self.open).num_minutes();
        let lost = self
            .break_window
            .map(|(start, end)| {
                let start = start.clamp(self.open, self.close);
                let end = end.clamp(self.open, self.close);
                if end > start {
                    (end - start).num_minutes()
                } else {
                    0
                }
            })
            .unwrap_or(0);
        total - lost
    }
}

/// Parse a wall-clock `"HH:mm"` string. `"HH:mm:ss"`, as SQL `time` columns
/// render it, is accepted too.
pub fn parse_hhmm(value: &str) -> Result<NaiveTime> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| EngineError::InvalidTime(value.to_string()))
}

/// Pick the effective schedule for `day_of_week` (0 = Sunday).
///
/// # Arguments
/// - `professional` -- the professional's own records (may be empty)
/// - `business` -- the business-wide default records
/// - `day_of_week` -- Sunday-based weekday index
///
/// # Errors
/// Returns `EngineError::InvalidTime` when the chosen record carries a time
/// string that is neither `"HH:mm"` nor `"HH:mm:ss"`.
pub fn resolve(
    professional: &[WorkingHoursRecord],
    business: &[WorkingHoursRecord],
    day_of_week: u8,
) -> Result<Option<EffectiveSchedule>> {
    let own = professional.iter().find(|r| r.day_of_week == day_of_week);
    let record = match own {
        Some(record) => record,
        None => match business.iter().find(|r| r.day_of_week == day_of_week) {
            Some(record) => record,
            None => return Ok(None),
        },
    };
    EffectiveSchedule::from_record(record)
}
