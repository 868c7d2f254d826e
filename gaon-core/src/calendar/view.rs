//! View mode and navigation over the calendar's current date.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which layout the calendar shows, and how far one navigation step goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [ViewMode::Day, ViewMode::Week, ViewMode::Month, ViewMode::Year];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Day => "day",
            ViewMode::Week => "week",
            ViewMode::Month => "month",
            ViewMode::Year => "year",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown view '{}'. Expected day, week, month or year", s))
    }
}

/// Current date and view mode. Lives only as long as the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub current_date: NaiveDate,
    pub current_view: ViewMode,
}

impl ViewState {
    pub fn new(current_date: NaiveDate) -> Self {
        ViewState {
            current_date,
            current_view: ViewMode::default(),
        }
    }

    /// Move one step forward (`direction > 0`) or back (`direction < 0`) in
    /// units of the active view: a day, a week, a month or a year.
    ///
    /// Returns true when the step changed the displayed month.
    pub fn navigate(&mut self, direction: i32) -> bool {
        let before = self.current_date;

        let shifted = match self.current_view {
            ViewMode::Day => shift_days(before, i64::from(direction)),
            ViewMode::Week => shift_days(before, i64::from(direction) * 7),
            ViewMode::Month => shift_months(before, direction),
            ViewMode::Year => shift_months(before, direction.saturating_mul(12)),
        };

        if let Some(date) = shifted {
            self.current_date = date;
        }

        !same_month(before, self.current_date)
    }

    pub fn switch_view(&mut self, view: ViewMode) {
        self.current_view = view;
    }

    /// Jump back to `today`. Returns true when the month view needs a fresh
    /// school-event fetch.
    pub fn go_to_today(&mut self, today: NaiveDate) -> bool {
        self.current_date = today;
        self.current_view == ViewMode::Month
    }
}

fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

/// Shift by whole months, clamping the day to the target month's length.
fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    }
}

pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state(view: ViewMode, current: NaiveDate) -> ViewState {
        ViewState {
            current_date: current,
            current_view: view,
        }
    }

    #[test]
    fn default_view_is_month() {
        assert_eq!(ViewState::new(date(2025, 3, 20)).current_view, ViewMode::Month);
    }

    #[test]
    fn day_view_moves_one_day() {
        let mut s = state(ViewMode::Day, date(2025, 3, 31));
        assert!(s.navigate(1));
        assert_eq!(s.current_date, date(2025, 4, 1));
        assert!(s.navigate(-1));
        assert_eq!(s.current_date, date(2025, 3, 31));
        assert!(!s.navigate(-1));
        assert_eq!(s.current_date, date(2025, 3, 30));
    }

    #[test]
    fn week_forward_then_back_is_identity() {
        let start = date(2025, 12, 29);
        let mut s = state(ViewMode::Week, start);
        s.navigate(1);
        assert_eq!(s.current_date, date(2026, 1, 5));
        s.navigate(-1);
        assert_eq!(s.current_date, start);
    }

    #[test]
    fn month_view_clamps_to_month_end() {
        let mut s = state(ViewMode::Month, date(2024, 1, 31));
        assert!(s.navigate(1));
        assert_eq!(s.current_date, date(2024, 2, 29));
        assert!(s.navigate(-1));
        assert_eq!(s.current_date, date(2024, 1, 29));
    }

    #[test]
    fn year_view_moves_one_year() {
        let mut s = state(ViewMode::Year, date(2024, 2, 29));
        s.navigate(1);
        assert_eq!(s.current_date, date(2025, 2, 28));
        s.navigate(-2);
        assert_eq!(s.current_date, date(2023, 2, 28));
    }

    #[test]
    fn go_to_today_only_fetches_in_month_view() {
        let today = date(2025, 6, 1);
        let mut s = state(ViewMode::Week, date(2025, 1, 1));
        assert!(!s.go_to_today(today));
        assert_eq!(s.current_date, today);

        s.switch_view(ViewMode::Month);
        assert!(s.go_to_today(today));
    }

    #[test]
    fn view_mode_parses_case_insensitively() {
        assert_eq!("Week".parse::<ViewMode>().unwrap(), ViewMode::Week);
        assert_eq!(" year ".parse::<ViewMode>().unwrap(), ViewMode::Year);
        assert!("fortnight".parse::<ViewMode>().is_err());
    }
}
