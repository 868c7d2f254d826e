//! Terminal rendering for gaon-core layouts.
//!
//! Extension traits that turn the calendar layout model and the smaller
//! widgets' records into coloured text using owo_colors.

use chrono::Datelike;
use gaon_core::calendar::render::{MiniMonth, MonthGrid, TimeGrid, YearGrid};
use gaon_core::calendar::{CalendarEvent, CalendarLayout, LayoutBody};
use gaon_core::chat::{ChatMessage, ChatSession, Sender};
use owo_colors::OwoColorize;

/// Width of one day column in the day and week grids
const HOUR_CELL_WIDTH: usize = 14;
/// Width of the hour label column
const HOUR_LABEL_WIDTH: usize = 6;
/// Width of one day column in the month grid
const MONTH_CELL_WIDTH: usize = 12;
/// Year view cards per line
const YEAR_CARDS_PER_LINE: usize = 3;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for CalendarLayout {
    fn render(&self) -> String {
        let body = match &self.body {
            LayoutBody::TimeGrid(grid) => grid.render(),
            LayoutBody::Month(grid) => grid.render(),
            LayoutBody::Year(grid) => grid.render(),
        };

        format!("{}  {}\n\n{}", self.title.bold(), format!("({})", self.view).dimmed(), body)
    }
}

impl Render for CalendarEvent {
    fn render(&self) -> String {
        paint_event(self, &self.title)
    }
}

impl Render for TimeGrid {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        let mut header = " ".repeat(HOUR_LABEL_WIDTH + 1);
        for column in &self.columns {
            let text = fit(&format!("{} {}", column.label, column.date.day()), HOUR_CELL_WIDTH);
            if column.is_today {
                header.push_str(&text.cyan().bold().to_string());
            } else {
                header.push_str(&text);
            }
        }
        lines.push(header);

        for row in &self.rows {
            let mut line = format!("{:>width$} ", row.label, width = HOUR_LABEL_WIDTH)
                .dimmed()
                .to_string();

            for cell in &row.cells {
                line.push_str(&render_cell_events(&cell.events, HOUR_CELL_WIDTH, cell.is_today));
            }
            lines.push(line);
        }

        lines.join("\n")
    }
}

impl Render for MonthGrid {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        lines.push(
            self.weekday_labels
                .iter()
                .map(|label| fit(label, MONTH_CELL_WIDTH))
                .collect::<String>()
                .dimmed()
                .to_string(),
        );

        for week in self.cells.chunks(7) {
            let mut numbers = String::new();
            for cell in week {
                let text = fit(&cell.date.day().to_string(), MONTH_CELL_WIDTH);
                let text = if cell.is_today {
                    text.cyan().bold().to_string()
                } else if cell.is_other_month {
                    text.dimmed().to_string()
                } else {
                    text
                };
                numbers.push_str(&text);
            }
            lines.push(numbers);

            let depth = week.iter().map(|c| c.events.len()).max().unwrap_or(0);
            for i in 0..depth {
                let line: String = week
                    .iter()
                    .map(|cell| match cell.events.get(i) {
                        Some(event) => paint_event(event, &fit(&event.title, MONTH_CELL_WIDTH)),
                        None => " ".repeat(MONTH_CELL_WIDTH),
                    })
                    .collect();
                lines.push(line);
            }
        }

        lines.join("\n")
    }
}

impl Render for YearGrid {
    fn render(&self) -> String {
        let cards: Vec<Vec<String>> = self.months.iter().map(render_mini_month).collect();
        let card_width = 7 * 3;
        let mut lines = Vec::new();

        for group in cards.chunks(YEAR_CARDS_PER_LINE) {
            let height = group.iter().map(Vec::len).max().unwrap_or(0);
            for i in 0..height {
                let line = group
                    .iter()
                    .map(|card| {
                        card.get(i)
                            .cloned()
                            .unwrap_or_else(|| " ".repeat(card_width))
                    })
                    .collect::<Vec<_>>()
                    .join("   ");
                lines.push(line.trim_end().to_string());
            }
            lines.push(String::new());
        }

        lines.join("\n").trim_end().to_string()
    }
}

impl Render for ChatMessage {
    fn render(&self) -> String {
        match self.sender {
            Sender::Ai => format!("{} {}", "AI ".magenta().bold(), self.text),
            Sender::User => format!("{} {}", "You".blue().bold(), self.text),
        }
    }
}

impl Render for ChatSession {
    fn render(&self) -> String {
        format!("{} {}", self.title, format!("({} messages)", self.messages.len()).dimmed())
    }
}

fn render_mini_month(month: &MiniMonth) -> Vec<String> {
    let mut lines = vec![format!("{:^21}", month.name).bold().to_string()];
    lines.push("Su Mo Tu We Th Fr Sa ".dimmed().to_string());

    for week in month.days.chunks(7) {
        let line: String = week
            .iter()
            .map(|day| {
                let text = format!("{:>2} ", day.day());
                if day.month() == month.month {
                    text
                } else {
                    text.dimmed().to_string()
                }
            })
            .collect();
        lines.push(line);
    }

    lines
}

/// First event of a cell, with a "+N" marker when more share the slot.
fn render_cell_events(events: &[CalendarEvent], width: usize, is_today: bool) -> String {
    match events {
        [] => {
            let dot = fit("·", width);
            if is_today { dot.cyan().to_string() } else { dot.dimmed().to_string() }
        }
        [only] => paint_event(only, &fit(&only.title, width)),
        [first, rest @ ..] => {
            let more = format!(" +{}", rest.len());
            let title_width = width.saturating_sub(more.chars().count());
            let text = format!("{}{}", fit(&first.title, title_width).trim_end(), more);
            paint_event(first, &fit(&text, width))
        }
    }
}

/// Colour `text` with the event's hex colour, falling back to plain text.
fn paint_event(event: &CalendarEvent, text: &str) -> String {
    match parse_hex_color(&event.color) {
        Some((r, g, b)) => text.truecolor(r, g, b).to_string(),
        None => text.to_string(),
    }
}

/// Truncate or pad to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count > width && width < 2 {
        text.chars().take(width).collect()
    } else if count > width {
        let head: String = text.chars().take(width.saturating_sub(2)).collect();
        format!("{head}… ")
    } else {
        format!("{text}{}", " ".repeat(width - count))
    }
}

/// "#rgb" or "#rrggbb"
fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    match hex.len() {
        6 => Some((
            u8::from_str_radix(hex.get(0..2)?, 16).ok()?,
            u8::from_str_radix(hex.get(2..4)?, 16).ok()?,
            u8::from_str_radix(hex.get(4..6)?, 16).ok()?,
        )),
        3 => {
            let mut channels = hex.chars().map(|c| c.to_digit(16).map(|v| (v * 17) as u8));
            Some((channels.next()??, channels.next()??, channels.next()??))
        }
        _ => None,
    }
}
