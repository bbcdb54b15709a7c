//! Input data shapes handed to the engine by the surrounding booking system.
//!
//! Working-hours records, appointments and blackouts come from storage that
//! this crate does not own. The types here mirror the camelCase shape those
//! stores produce, so a caller can deserialize them directly.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Day-of-week index used by working-hours records (0 = Sunday).
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Map a Sunday-based day index back to a [`Weekday`]. Returns `None` above 6.
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// One weekday's schedule for a business or a professional.
///
/// Times are wall-clock `"HH:mm"` strings. When `closed` is true the other
/// fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHoursRecord {
    pub day_of_week: u8,
    #[serde(default)]
    pub open_time: Option<String>,
    #[serde(default)]
    pub close_time: Option<String>,
    #[serde(default)]
    pub break_start: Option<String>,
    #[serde(default)]
    pub break_end: Option<String>,
    #[serde(default)]
    pub closed: bool,
}

impl WorkingHoursRecord {
    /// An open day from `open` to `close` with no break.
    pub fn open(day_of_week: u8, open: &str, close: &str) -> Self {
        Self {
            day_of_week,
            open_time: Some(open.to_string()),
            close_time: Some(close.to_string()),
            ..Self::default()
        }
    }

    /// A day marked closed.
    pub fn closed(day_of_week: u8) -> Self {
        Self {
            day_of_week,
            closed: true,
            ..Self::default()
        }
    }

    pub fn with_break(mut self, start: &str, end: &str) -> Self {
        self.break_start = Some(start.to_string());
        self.break_end = Some(end.to_string());
        self
    }
}

/// A concrete `[start, end)` range. `end > start` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawInterval> for TimeInterval {
    type Error = String;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        TimeInterval::new(raw.start, raw.end)
            .ok_or_else(|| format!("interval end {} is not after start {}", raw.end, raw.start))
    }
}

impl TimeInterval {
    /// Build an interval, or `None` when `end <= start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (end > start).then_some(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Half-open overlap test. Touching intervals do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True when `other` lies entirely inside `self`.
    pub fn contains(&self, other: &TimeInterval) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Where a busy interval came from. Only used for ordering and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BusyKind {
    Appointment,
    Blackout,
}

/// Appointment lifecycle states as reported by the appointment store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    NoShow,
    Cancelled,
}

impl AppointmentStatus {
    pub fn is_cancelled(self) -> bool {
        matches!(self, AppointmentStatus::Cancelled)
    }
}

/// A time range already consumed by an appointment or a manual blackout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub kind: BusyKind,
    pub range: TimeInterval,
}

impl BusyInterval {
    /// Busy time from a booked appointment. Cancelled appointments and empty
    /// ranges consume nothing and yield `None`.
    pub fn appointment(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: AppointmentStatus,
    ) -> Option<Self> {
        if status.is_cancelled() {
            return None;
        }
        TimeInterval::new(start, end).map(|range| Self {
            kind: BusyKind::Appointment,
            range,
        })
    }

    /// Busy time from a manually entered unavailability block.
    pub fn blackout(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        TimeInterval::new(start, end).map(|range| Self {
            kind: BusyKind::Blackout,
            range,
        })
    }
}

fn default_active() -> bool {
    true
}

/// A professional, hydrated with their own working hours and every busy
/// interval relevant to the dates being queried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Professional {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Per-weekday overrides. Empty means the business default applies.
    #[serde(default)]
    pub working_hours: Vec<WorkingHoursRecord>,
    #[serde(default)]
    pub busy: Vec<BusyInterval>,
}

impl Professional {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            specialties: Vec::new(),
            active: true,
            working_hours: Vec::new(),
            busy: Vec::new(),
        }
    }
}
