//! Layout model for the four calendar views.
//!
//! `render` is a pure function of the view state, the merged event list and
//! today's date. Front ends draw the returned `CalendarLayout`; nothing here
//! knows about terminals or markup.

use chrono::{Datelike, Days, NaiveDate};

use crate::calendar::event::CalendarEvent;
use crate::calendar::modal::ModalTarget;
use crate::calendar::view::{ViewMode, ViewState};

/// First hour row of the day and week grids (07:00).
pub const FIRST_HOUR: u32 = 7;
/// Last hour row of the day and week grids (15:00).
pub const LAST_HOUR: u32 = 15;
/// Six weeks of seven days.
pub const MONTH_GRID_CELLS: usize = 42;

pub const WEEKDAY_LABELS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

#[derive(Debug, Clone)]
pub struct CalendarLayout {
    pub view: ViewMode,
    /// e.g. "2025년 3월"
    pub title: String,
    pub body: LayoutBody,
}

#[derive(Debug, Clone)]
pub enum LayoutBody {
    /// Day and week views
    TimeGrid(TimeGrid),
    Month(MonthGrid),
    Year(YearGrid),
}

#[derive(Debug, Clone)]
pub struct TimeGrid {
    pub columns: Vec<DayColumn>,
    pub rows: Vec<HourRow>,
}

#[derive(Debug, Clone)]
pub struct DayColumn {
    pub date: NaiveDate,
    /// "MON" in week view, "MONDAY" in day view
    pub label: String,
    pub is_today: bool,
}

#[derive(Debug, Clone)]
pub struct HourRow {
    pub hour: u32,
    /// "7 AM", "12 PM", "3 PM"
    pub label: String,
    /// One cell per column
    pub cells: Vec<HourCell>,
}

#[derive(Debug, Clone)]
pub struct HourCell {
    pub date: NaiveDate,
    pub hour: u32,
    pub is_today: bool,
    pub events: Vec<CalendarEvent>,
}

impl HourCell {
    /// Form target when this cell is clicked.
    pub fn modal_target(&self) -> ModalTarget {
        ModalTarget::new(self.date, self.hour)
    }
}

#[derive(Debug, Clone)]
pub struct MonthGrid {
    pub weekday_labels: [&'static str; 7],
    pub cells: Vec<MonthCell>,
}

#[derive(Debug, Clone)]
pub struct MonthCell {
    pub date: NaiveDate,
    pub is_other_month: bool,
    pub is_today: bool,
    pub events: Vec<CalendarEvent>,
}

impl MonthCell {
    pub fn modal_target(&self) -> ModalTarget {
        ModalTarget::for_date(self.date)
    }
}

#[derive(Debug, Clone)]
pub struct YearGrid {
    pub months: Vec<MiniMonth>,
}

/// A read-only month card of the year view.
#[derive(Debug, Clone)]
pub struct MiniMonth {
    pub month: u32,
    /// English month name, e.g. "March"
    pub name: String,
    /// 42 dates starting from the Sunday on/before the 1st
    pub days: Vec<NaiveDate>,
}

pub fn render(state: &ViewState, events: &[CalendarEvent], today: NaiveDate) -> CalendarLayout {
    let date = state.current_date;

    let body = match state.current_view {
        ViewMode::Day => LayoutBody::TimeGrid(time_grid(&[date], "%A", events, today)),
        ViewMode::Week => {
            let start = week_start(date);
            let days: Vec<NaiveDate> = start.iter_days().take(7).collect();
            LayoutBody::TimeGrid(time_grid(&days, "%a", events, today))
        }
        ViewMode::Month => LayoutBody::Month(month_grid(date, events, today)),
        ViewMode::Year => LayoutBody::Year(year_grid(date.year())),
    };

    CalendarLayout {
        view: state.current_view,
        title: format!("{}년 {}월", date.year(), date.month()),
        body,
    }
}

/// Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// The 42 dates of the grid for the month containing `date`.
pub fn month_grid_dates(date: NaiveDate) -> Vec<NaiveDate> {
    let first = date.with_day(1).unwrap_or(date);
    week_start(first).iter_days().take(MONTH_GRID_CELLS).collect()
}

/// "7 AM", "12 PM", "1 PM"
pub fn hour_label(hour: u32) -> String {
    match hour {
        0 => "12 AM".to_string(),
        12 => "12 PM".to_string(),
        h if h > 12 => format!("{} PM", h - 12),
        h => format!("{} AM", h),
    }
}

fn time_grid(days: &[NaiveDate], weekday_format: &str, events: &[CalendarEvent], today: NaiveDate) -> TimeGrid {
    let columns = days
        .iter()
        .map(|&date| DayColumn {
            date,
            label: date.format(weekday_format).to_string().to_uppercase(),
            is_today: date == today,
        })
        .collect();

    let rows = (FIRST_HOUR..=LAST_HOUR)
        .map(|hour| HourRow {
            hour,
            label: hour_label(hour),
            cells: days
                .iter()
                .map(|&date| HourCell {
                    date,
                    hour,
                    is_today: date == today,
                    events: events.iter().filter(|e| e.occurs_at(date, hour)).cloned().collect(),
                })
                .collect(),
        })
        .collect();

    TimeGrid { columns, rows }
}

fn month_grid(date: NaiveDate, events: &[CalendarEvent], today: NaiveDate) -> MonthGrid {
    let cells = month_grid_dates(date)
        .into_iter()
        .map(|day| MonthCell {
            date: day,
            is_other_month: day.month() != date.month(),
            is_today: day == today,
            events: events.iter().filter(|e| e.occurs_on(day)).cloned().collect(),
        })
        .collect();

    MonthGrid {
        weekday_labels: WEEKDAY_LABELS,
        cells,
    }
}

fn year_grid(year: i32) -> YearGrid {
    let months = (1..=12)
        .filter_map(|month| NaiveDate::from_ymd_opt(year, month, 1))
        .map(|first| MiniMonth {
            month: first.month(),
            name: first.format("%B").to_string(),
            days: month_grid_dates(first),
        })
        .collect();

    YearGrid { months }
}
