//! Engine configuration: the business timezone and scan rules.
//!
//! Loadable from any serde format. The raw shape keeps the timezone as a
//! string and weekdays as Sunday-based indexes; conversion validates both, so
//! a bad configuration fails when it is loaded rather than mid-scan.

use chrono::{Datelike, NaiveDate, Weekday};
use chrono_tz::Tz;
use serde::Deserialize;

use crate::dst::DstPolicy;
use crate::error::{EngineError, Result};
use crate::label::LabelLocale;
use crate::model::weekday_from_index;

pub const DEFAULT_WINDOW_DAYS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawEngineConfig")]
pub struct EngineConfig {
    /// Zone in which schedules are read and "today" is decided.
    pub timezone: Tz,
    /// Weekdays the multi-day scan never reports, whatever the working hours say.
    pub skip_weekdays: Vec<Weekday>,
    pub dst_policy: DstPolicy,
    pub label_locale: LabelLocale,
    pub default_window_days: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            skip_weekdays: vec![Weekday::Sun],
            dst_policy: DstPolicy::default(),
            label_locale: LabelLocale::default(),
            default_window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

impl EngineConfig {
    /// Defaults in the given IANA timezone.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidTimezone` if `timezone` is not a valid IANA
    /// identifier.
    pub fn new(timezone: &str) -> Result<Self> {
        let timezone: Tz = timezone
            .parse()
            .map_err(|_| EngineError::InvalidTimezone(timezone.to_string()))?;
        Ok(Self {
            timezone,
            ..Self::default()
        })
    }

    pub fn with_skip_weekdays(mut self, weekdays: Vec<Weekday>) -> Self {
        self.skip_weekdays = weekdays;
        self
    }

    pub fn with_dst_policy(mut self, policy: DstPolicy) -> Self {
        self.dst_policy = policy;
        self
    }

    pub fn with_label_locale(mut self, locale: LabelLocale) -> Self {
        self.label_locale = locale;
        self
    }

    pub fn with_default_window_days(mut self, days: u32) -> Self {
        self.default_window_days = days;
        self
    }

    /// Whether the multi-day scan skips `date` outright.
    pub fn skips(&self, date: NaiveDate) -> bool {
        self.skip_weekdays.contains(&date.weekday())
    }
}

fn default_skip_weekdays() -> Vec<u8> {
    vec![0]
}

fn default_window_days() -> u32 {
    DEFAULT_WINDOW_DAYS
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEngineConfig {
    timezone: String,
    #[serde(default = "default_skip_weekdays")]
    skip_weekdays: Vec<u8>,
    #[serde(default)]
    dst_policy: DstPolicy,
    #[serde(default)]
    label_locale: LabelLocale,
    #[serde(default = "default_window_days")]
    default_window_days: u32,
}

impl TryFrom<RawEngineConfig> for EngineConfig {
    type Error = EngineError;

    fn try_from(raw: RawEngineConfig) -> Result<Self> {
        let skip_weekdays = raw
            .skip_weekdays
            .iter()
            .map(|&index| {
                weekday_from_index(index).ok_or_else(|| {
                    EngineError::InvalidConfig(format!("skipWeekdays: {index} is not in 0..=6"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(EngineConfig::new(&raw.timezone)?
            .with_skip_weekdays(skip_weekdays)
            .with_dst_policy(raw.dst_policy)
            .with_label_locale(raw.label_locale)
            .with_default_window_days(raw.default_window_days))
    }
}
