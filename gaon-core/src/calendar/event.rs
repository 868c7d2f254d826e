//! Calendar event records.
//!
//! Events are plain records keyed by id. Dates are kept as the `YYYY-MM-DD`
//! strings they were entered with and hours as `HH` strings, so records that
//! never parse still round-trip through storage untouched.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Hour pre-filled in the event form and used for school events.
pub const DEFAULT_TIME: &str = "09";

/// Colour pre-filled in the event form.
pub const DEFAULT_COLOR: &str = "#4a90e2";

/// Colour used for every school-sourced event.
pub const SCHOOL_COLOR: &str = "#e74c3c";

/// Where an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventOrigin {
    /// Created by the user through the event form
    #[default]
    Personal,
    /// Fetched from the school calendar
    School,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    /// YYYY-MM-DD
    pub date: String,
    /// Hour of day, "HH"
    #[serde(deserialize_with = "string_or_number")]
    pub time: String,
    pub color: String,
    #[serde(rename = "type", default)]
    pub origin: EventOrigin,
}

impl CalendarEvent {
    /// Parsed date, if well-formed.
    pub fn date_value(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }

    /// Integer hour read from the leading digits, so "9", "09", "09:00"
    /// and "9am" are all hour 9.
    pub fn hour(&self) -> Option<u32> {
        parse_hour(&self.time)
    }

    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        self.date == format_date(date)
    }

    pub fn occurs_at(&self, date: NaiveDate, hour: u32) -> bool {
        self.occurs_on(date) && self.hour() == Some(hour)
    }

    pub fn is_school(&self) -> bool {
        self.origin == EventOrigin::School
    }
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a date the way event records store it.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Leading ASCII digits after optional whitespace, ignoring any trailer.
pub fn parse_hour(time: &str) -> Option<u32> {
    let time = time.trim_start();
    let end = time
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(time.len());
    time[..end].parse().ok()
}

/// Ids and hours were historically written both as JSON strings and numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Integer(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    })
}
