//! Per-professional slot lists and the rolling multi-day capacity scan.
//!
//! For one professional on one date the pipeline is: resolve the effective
//! schedule, build base intervals, subtract the day's busy time (appointments
//! first, then blackouts, each clamped to the day), pack slots, then drop slots
//! already over when the date is today. Slots whose `"HH:mm"` labels would
//! not read back to the same instants (the repeated hour of a fall-back day)
//! are not offered.
//!
//! Aggregation never fails as a whole. A professional whose computation errors
//! on some date contributes zero slots for that date and the scan moves on.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::dst::day_bounds;
use crate::error::Result;
use crate::interval::{build_base_intervals, clamp, subtract_all};
use crate::label::display_label;
use crate::model::{day_of_week, BusyKind, Professional, TimeInterval, WorkingHoursRecord};
use crate::schedule::resolve;
use crate::slots::{drop_ambiguous_slots, filter_past_slots, split_into_slots};

/// A bookable slot as wall-clock `"HH:mm"` times in the business timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub start: String,
    pub end: String,
}

impl Slot {
    pub fn from_interval(interval: &TimeInterval, config: &EngineConfig) -> Self {
        let tz = config.timezone;
        Self {
            start: interval.start().with_timezone(&tz).format("%H:%M").to_string(),
            end: interval.end().with_timezone(&tz).format("%H:%M").to_string(),
        }
    }
}

/// One professional's slots for a single date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalAvailability {
    pub id: String,
    pub name: String,
    pub specialties: Vec<String>,
    pub slots: Vec<Slot>,
}

/// Every active professional's slots for a single date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub slot_duration_minutes: i64,
    pub professionals: Vec<ProfessionalAvailability>,
}

/// A date with at least one bookable slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityDay {
    pub date: NaiveDate,
    pub display_label: String,
    pub slot_count: usize,
}

/// Whose capacity a multi-day scan measures.
#[derive(Debug, Clone, Copy)]
pub enum ScanTarget<'a> {
    /// A single professional, active or not.
    Professional(&'a Professional),
    /// All active professionals of a business, slot counts summed per date.
    Business(&'a [Professional]),
}

/// Compute the slot intervals for one professional on one date.
///
/// # Errors
/// Propagates schedule parse failures and unresolvable DST boundaries.
pub fn slots_for_day(
    professional: &Professional,
    business_hours: &[WorkingHoursRecord],
    date: NaiveDate,
    duration_minutes: i64,
    now: DateTime<Utc>,
    config: &EngineConfig,
) -> Result<Vec<TimeInterval>> {
    let Some(schedule) = resolve(&professional.working_hours, business_hours, day_of_week(date))?
    else {
        debug!(professional = %professional.id, %date, "no working hours, day closed");
        return Ok(Vec::new());
    };

    let base = build_base_intervals(date, &schedule, config.timezone, config.dst_policy)?;
    if base.is_empty() {
        debug!(professional = %professional.id, %date, "schedule yields no free time");
        return Ok(base);
    }

    let (day_start, day_end) = day_bounds(date, config.timezone)?;
    let appointments = professional
        .busy
        .iter()
        .filter(|b| b.kind == BusyKind::Appointment);
    let blackouts = professional
        .busy
        .iter()
        .filter(|b| b.kind == BusyKind::Blackout);
    let busy = appointments
        .chain(blackouts)
        .filter_map(|b| clamp(&b.range, day_start, day_end));

    let free = subtract_all(base, busy);
    let slots = split_into_slots(&free, duration_minutes);
    let slots = drop_ambiguous_slots(slots, config.timezone);
    Ok(filter_past_slots(slots, date, now, config.timezone))
}

/// Slots for one professional on one date, formatted for the booking API.
///
/// A failed computation is logged and reported as zero slots.
pub fn availability_for_professional_on_day(
    professional: &Professional,
    business_hours: &[WorkingHoursRecord],
    date: NaiveDate,
    duration_minutes: i64,
    now: DateTime<Utc>,
    config: &EngineConfig,
) -> ProfessionalAvailability {
    let slots = isolated_slots(professional, business_hours, date, duration_minutes, now, config);
    ProfessionalAvailability {
        id: professional.id.clone(),
        name: professional.name.clone(),
        specialties: professional.specialties.clone(),
        slots: slots
            .iter()
            .map(|interval| Slot::from_interval(interval, config))
            .collect(),
    }
}

/// Slots for every active professional of a business on one date.
pub fn business_availability_on_day(
    professionals: &[Professional],
    business_hours: &[WorkingHoursRecord],
    date: NaiveDate,
    duration_minutes: i64,
    now: DateTime<Utc>,
    config: &EngineConfig,
) -> DayAvailability {
    let professionals = professionals
        .iter()
        .filter(|p| p.active)
        .map(|p| {
            availability_for_professional_on_day(
                p,
                business_hours,
                date,
                duration_minutes,
                now,
                config,
            )
        })
        .collect();

    DayAvailability {
        date,
        slot_duration_minutes: duration_minutes,
        professionals,
    }
}

/// Scan consecutive dates for capacity.
///
/// Starts at `start_date` (today in the business timezone when `None`) and
/// walks `window_days` dates (the configured default when `None`), skipping
/// the configured weekdays. Dates with zero slots are left out.
///
/// # Arguments
///
/// * `target` -- One professional, or every active professional of a business.
/// * `business_hours` -- The business-wide default working hours.
/// * `start_date` -- First date scanned, inclusive.
/// * `window_days` -- Number of consecutive dates scanned.
/// * `duration_minutes` -- Slot length.
/// * `now` -- Current instant; decides which of today's slots are past.
/// * `config` -- Timezone, skipped weekdays and label locale.
pub fn find_available_days(
    target: ScanTarget<'_>,
    business_hours: &[WorkingHoursRecord],
    start_date: Option<NaiveDate>,
    window_days: Option<u32>,
    duration_minutes: i64,
    now: DateTime<Utc>,
    config: &EngineConfig,
) -> Vec<AvailabilityDay> {
    let start = start_date.unwrap_or_else(|| now.with_timezone(&config.timezone).date_naive());
    let window = window_days.unwrap_or(config.default_window_days);

    (0..i64::from(window))
        .filter_map(|offset| start.checked_add_signed(Duration::days(offset)))
        .filter(|date| !config.skips(*date))
        .filter_map(|date| {
            let slot_count = match target {
                ScanTarget::Professional(p) => {
                    count_slots(p, business_hours, date, duration_minutes, now, config)
                }
                ScanTarget::Business(all) => all
                    .iter()
                    .filter(|p| p.active)
                    .map(|p| count_slots(p, business_hours, date, duration_minutes, now, config))
                    .sum(),
            };
            (slot_count > 0).then(|| AvailabilityDay {
                date,
                display_label: display_label(date, config.label_locale),
                slot_count,
            })
        })
        .collect()
}

fn count_slots(
    professional: &Professional,
    business_hours: &[WorkingHoursRecord],
    date: NaiveDate,
    duration_minutes: i64,
    now: DateTime<Utc>,
    config: &EngineConfig,
) -> usize {
    isolated_slots(professional, business_hours, date, duration_minutes, now, config).len()
}

fn isolated_slots(
    professional: &Professional,
    business_hours: &[WorkingHoursRecord],
    date: NaiveDate,
    duration_minutes: i64,
    now: DateTime<Utc>,
    config: &EngineConfig,
) -> Vec<TimeInterval> {
    match slots_for_day(professional, business_hours, date, duration_minutes, now, config) {
        Ok(slots) => slots,
        Err(e) => {
            warn!(professional = %professional.id, %date, "availability failed, counting zero: {e}");
            Vec::new()
        }
    }
}
