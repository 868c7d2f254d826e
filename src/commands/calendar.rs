use anyhow::Result;
use dialoguer::Input;
use gaon_core::calendar::event::DEFAULT_TIME;
use gaon_core::calendar::{CalendarWidget, ModalTarget, ViewMode};
use owo_colors::OwoColorize;

use crate::App;
use crate::commands::{date_or_today, today};
use crate::render::Render;
use crate::utils::tui::create_spinner;

pub async fn show(app: &App, view: ViewMode, date: Option<&str>, offset: i32) -> Result<()> {
    let today = today();
    let start = date_or_today(date)?;

    let mut widget = CalendarWidget::new(app.storage.clone(), app.client.clone(), start);
    widget.switch_view(view);

    app.client.ping_timetable();

    let spinner = create_spinner("Loading school events");
    widget.load().await;
    for _ in 0..offset.unsigned_abs() {
        widget.navigate(offset.signum()).await;
    }
    spinner.finish_and_clear();

    println!("{}", widget.render(today).render());

    let school_count = widget.school_events().len();
    if school_count > 0 {
        println!();
        println!("{}", format!("{} school event(s) this month", school_count).dimmed());
    }

    Ok(())
}

pub fn add(
    app: &App,
    title: Option<String>,
    date: Option<String>,
    time: Option<String>,
    color: Option<String>,
) -> Result<()> {
    let today = today();
    let mut widget = CalendarWidget::new(app.storage.clone(), app.client.clone(), today);

    let draft = match date {
        Some(date) => widget.open_modal(ModalTarget {
            date,
            time: DEFAULT_TIME.to_string(),
        }),
        None => widget.open_add_event(today),
    };

    if let Some(time) = time {
        draft.time = time;
    }
    if let Some(color) = color {
        draft.color = color;
    }

    draft.title = match title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt(format!("  Title ({} {}:00)", draft.date, draft.time))
            .allow_empty(true)
            .interact_text()?,
    };

    match widget.submit_modal()? {
        Some(event) => {
            println!(
                "{} {}",
                "  Created:".green(),
                format!("{} {} {}:00", event.render(), event.date, event.time)
            );
        }
        None => {
            widget.close_modal();
            println!("{}", "  Nothing saved: title and date are required".dimmed());
        }
    }

    Ok(())
}
