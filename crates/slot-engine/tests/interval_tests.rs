//! Tests for base interval construction, subtraction and clamping.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use slot_engine::dst::{local_to_utc, DstPolicy};
use slot_engine::error::EngineError;
use slot_engine::interval::{build_base_intervals, clamp, subtract, subtract_all};
use slot_engine::model::TimeInterval;
use slot_engine::schedule::EffectiveSchedule;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 21).unwrap()
}

fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 21, h, m, 0).unwrap()
}

fn iv(h1: u32, m1: u32, h2: u32, m2: u32) -> TimeInterval {
    TimeInterval::new(at(h1, m1), at(h2, m2)).unwrap()
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

type HourMinute = (u32, u32);

fn schedule(
    open: HourMinute,
    close: HourMinute,
    brk: Option<(HourMinute, HourMinute)>,
) -> EffectiveSchedule {
    EffectiveSchedule {
        open: t(open.0, open.1),
        close: t(close.0, close.1),
        break_window: brk.map(|(s, e)| (t(s.0, s.1), t(e.0, e.1))),
    }
}

fn base(s: &EffectiveSchedule) -> Vec<TimeInterval> {
    build_base_intervals(date(), s, Tz::UTC, DstPolicy::ShiftForward).unwrap()
}

// ── Base intervals ──────────────────────────────────────────────────────────

#[test]
fn break_splits_day_in_two() {
    let s = schedule((9, 0), (18, 0), Some(((12, 0), (13, 0))));
    assert_eq!(base(&s), vec![iv(9, 0, 12, 0), iv(13, 0, 18, 0)]);
}

#[test]
fn no_break_gives_whole_day() {
    let s = schedule((9, 0), (18, 0), None);
    assert_eq!(base(&s), vec![iv(9, 0, 18, 0)]);
}

#[test]
fn inverted_hours_give_nothing() {
    let s = schedule((18, 0), (9, 0), None);
    assert!(base(&s).is_empty());
    let s = schedule((9, 0), (9, 0), None);
    assert!(base(&s).is_empty());
}

#[test]
fn break_at_opening_leaves_only_afternoon() {
    let s = schedule((9, 0), (18, 0), Some(((8, 0), (10, 0))));
    assert_eq!(base(&s), vec![iv(10, 0, 18, 0)]);
}

#[test]
fn break_past_closing_leaves_only_morning() {
    let s = schedule((9, 0), (18, 0), Some(((17, 0), (19, 0))));
    assert_eq!(base(&s), vec![iv(9, 0, 17, 0)]);
}

#[test]
fn break_covering_whole_day_leaves_nothing() {
    let s = schedule((9, 0), (18, 0), Some(((8, 0), (19, 0))));
    assert!(base(&s).is_empty());
}

#[test]
fn degenerate_break_is_ignored() {
    let s = schedule((9, 0), (18, 0), Some(((13, 0), (12, 0))));
    assert_eq!(base(&s), vec![iv(9, 0, 18, 0)]);
    let s = schedule((9, 0), (18, 0), Some(((19, 0), (20, 0))));
    assert_eq!(base(&s), vec![iv(9, 0, 18, 0)]);
}

#[test]
fn schedule_is_read_in_business_timezone() {
    let tz: Tz = "America/Sao_Paulo".parse().unwrap();
    let s = schedule((9, 0), (18, 0), None);
    let intervals = build_base_intervals(date(), &s, tz, DstPolicy::ShiftForward).unwrap();
    // Sao Paulo is UTC-3 with no DST in 2026.
    assert_eq!(intervals, vec![iv(12, 0, 21, 0)]);
}

// ── DST ─────────────────────────────────────────────────────────────────────

#[test]
fn shift_forward_moves_gap_time_past_transition() {
    let tz: Tz = "America/New_York".parse().unwrap();
    let day = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
    let instant = local_to_utc(day, t(2, 30), tz, DstPolicy::ShiftForward).unwrap();
    // 02:30 does not exist; read with the EST offset it lands on 03:30 EDT.
    assert_eq!(instant, Utc.with_ymd_and_hms(2026, 3, 8, 7, 30, 0).unwrap());
}

#[test]
fn skip_policy_rejects_gap_time() {
    let tz: Tz = "America/New_York".parse().unwrap();
    let day = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
    let err = local_to_utc(day, t(2, 30), tz, DstPolicy::Skip).unwrap_err();
    assert!(matches!(err, EngineError::NonexistentLocalTime(_, _)));
}

#[test]
fn ambiguous_time_takes_earliest_instant() {
    let tz: Tz = "America/New_York".parse().unwrap();
    let day = NaiveDate::from_ymd_opt(2026, 11, 1).unwrap();
    let instant = local_to_utc(day, t(1, 30), tz, DstPolicy::Skip).unwrap();
    // First 01:30 is still EDT (UTC-4).
    assert_eq!(instant, Utc.with_ymd_and_hms(2026, 11, 1, 5, 30, 0).unwrap());
}

// ── Subtraction ─────────────────────────────────────────────────────────────

#[test]
fn disjoint_busy_passes_through() {
    let free = vec![iv(9, 0, 12, 0)];
    assert_eq!(subtract(&free, &iv(13, 0, 14, 0)), free);
    assert_eq!(subtract(&free, &iv(7, 0, 9, 0)), free);
    assert_eq!(subtract(&free, &iv(12, 0, 13, 0)), free);
}

#[test]
fn busy_in_the_middle_splits_interval() {
    let free = vec![iv(9, 0, 12, 0)];
    assert_eq!(
        subtract(&free, &iv(10, 0, 10, 30)),
        vec![iv(9, 0, 10, 0), iv(10, 30, 12, 0)]
    );
}

#[test]
fn busy_overlapping_an_edge_trims_it() {
    let free = vec![iv(9, 0, 12, 0)];
    assert_eq!(subtract(&free, &iv(8, 0, 10, 0)), vec![iv(10, 0, 12, 0)]);
    assert_eq!(subtract(&free, &iv(11, 0, 13, 0)), vec![iv(9, 0, 11, 0)]);
}

#[test]
fn busy_covering_interval_removes_it() {
    let free = vec![iv(9, 0, 12, 0), iv(13, 0, 18, 0)];
    assert_eq!(subtract(&free, &iv(8, 0, 12, 30)), vec![iv(13, 0, 18, 0)]);
}

#[test]
fn busy_spanning_the_break_hits_both_halves() {
    let free = vec![iv(9, 0, 12, 0), iv(13, 0, 18, 0)];
    assert_eq!(
        subtract(&free, &iv(11, 0, 14, 0)),
        vec![iv(9, 0, 11, 0), iv(14, 0, 18, 0)]
    );
}

#[test]
fn sequential_passes_refragment() {
    let free = vec![iv(9, 0, 18, 0)];
    let busy = [iv(10, 0, 11, 0), iv(10, 30, 12, 0), iv(15, 0, 15, 30)];
    assert_eq!(
        subtract_all(free, busy),
        vec![iv(9, 0, 10, 0), iv(12, 0, 15, 0), iv(15, 30, 18, 0)]
    );
}

#[test]
fn adjacent_fragments_are_not_merged() {
    let free = vec![iv(9, 0, 10, 0), iv(10, 0, 11, 0)];
    assert_eq!(subtract_all(free.clone(), Vec::new()), free);
}

// ── Clamping ────────────────────────────────────────────────────────────────

#[test]
fn clamp_cuts_multi_day_blackout_to_the_day() {
    let day_start = at(0, 0);
    let day_end = Utc.with_ymd_and_hms(2026, 10, 22, 0, 0, 0).unwrap();
    let blackout = TimeInterval::new(
        Utc.with_ymd_and_hms(2026, 10, 20, 15, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 10, 23, 9, 0, 0).unwrap(),
    )
    .unwrap();

    let clamped = clamp(&blackout, day_start, day_end).unwrap();
    assert_eq!(clamped.start(), day_start);
    assert_eq!(clamped.end(), day_end);
}

#[test]
fn clamp_outside_the_day_is_none() {
    let day_start = at(0, 0);
    let day_end = Utc.with_ymd_and_hms(2026, 10, 22, 0, 0, 0).unwrap();
    let yesterday = TimeInterval::new(
        Utc.with_ymd_and_hms(2026, 10, 20, 22, 0, 0).unwrap(),
        day_start,
    )
    .unwrap();
    assert_eq!(clamp(&yesterday, day_start, day_end), None);
}

#[test]
fn clamp_keeps_part_straddling_midnight() {
    let day_start = at(0, 0);
    let day_end = Utc.with_ymd_and_hms(2026, 10, 22, 0, 0, 0).unwrap();
    let after_midnight = Utc.with_ymd_and_hms(2026, 10, 22, 0, 30, 0).unwrap();
    let late = TimeInterval::new(at(23, 30), after_midnight).unwrap();
    assert_eq!(clamp(&late, day_start, day_end), TimeInterval::new(at(23, 30), day_end));
}

#[test]
fn interval_rejects_non_positive_length() {
    assert_eq!(TimeInterval::new(at(10, 0), at(10, 0)), None);
    assert_eq!(TimeInterval::new(at(10, 0), at(9, 0)), None);
}
