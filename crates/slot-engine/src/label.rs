//! Short display labels for availability days.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Language of the weekday abbreviation in [`display_label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelLocale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "pt-BR")]
    PtBr,
}

// Indexed by days from Sunday.
const EN_WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const PT_BR_WEEKDAYS: [&str; 7] = ["dom", "seg", "ter", "qua", "qui", "sex", "sáb"];

/// `"<weekday> dd/MM"`, e.g. `"Wed 21/10"`.
pub fn display_label(date: NaiveDate, locale: LabelLocale) -> String {
    let names = match locale {
        LabelLocale::En => &EN_WEEKDAYS,
        LabelLocale::PtBr => &PT_BR_WEEKDAYS,
    };
    let weekday = names[date.weekday().num_days_from_sunday() as usize];
    format!("{} {:02}/{:02}", weekday, date.day(), date.month())
}
