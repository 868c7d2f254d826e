pub mod calendar;
pub mod chat;
pub mod config;
pub mod profile;
pub mod school;
pub mod theme;

use anyhow::{Context, Result};
use chrono::NaiveDate;

/// Parse an optional YYYY-MM-DD argument, defaulting to today.
pub fn date_or_today(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date format '{}'. Expected YYYY-MM-DD", s)),
        None => Ok(today()),
    }
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            date_or_today(Some("2025-03-20")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()
        );
    }

    #[test]
    fn rejects_other_formats() {
        assert!(date_or_today(Some("20/03/2025")).is_err());
    }

    #[test]
    fn missing_date_is_today() {
        assert_eq!(date_or_today(None).unwrap(), today());
    }
}
