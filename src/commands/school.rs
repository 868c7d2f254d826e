use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use crate::App;
use crate::commands::date_or_today;
use crate::utils::tui::create_spinner;

pub async fn meal(app: &App, day: Option<&str>) -> Result<()> {
    let day = date_or_today(day)?.format("%Y-%m-%d").to_string();

    let spinner = create_spinner("Loading meals");
    let meals = app.client.school_meal(&day).await;
    spinner.finish_and_clear();
    let meals = meals.context("Failed to load meals")?;

    print_heading(&meals.date, meals.school_name.as_deref());
    if meals.items.is_empty() {
        println!("{}", "  No meals".dimmed());
    }
    for meal in &meals.items {
        println!("  {} {}", format!("{:<10}", meal.kind).bold(), meal.dish);
        let details: Vec<&str> = [meal.calories.as_deref(), meal.nutrients.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if !details.is_empty() {
            println!("  {:<10} {}", "", details.join(" · ").dimmed());
        }
    }

    Ok(())
}

pub async fn timetable(app: &App, day: Option<&str>) -> Result<()> {
    let day = date_or_today(day)?.format("%Y-%m-%d").to_string();

    let spinner = create_spinner("Loading timetable");
    let timetable = app.client.school_timetable(&day).await;
    spinner.finish_and_clear();
    let timetable = timetable.context("Failed to load timetable")?;

    print_heading(&timetable.date, timetable.school_name.as_deref());
    if timetable.items.is_empty() {
        println!("{}", "  No classes".dimmed());
    }
    for entry in &timetable.items {
        let extra = [entry.teacher.as_deref(), entry.classroom.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "  {} {} {}",
            format!("{:>2}교시", entry.period).bold(),
            entry.subject,
            extra.dimmed()
        );
    }

    Ok(())
}

fn print_heading(date: &str, school: Option<&str>) {
    match school {
        Some(name) => println!("{} {}", date.bold(), name.dimmed()),
        None => println!("{}", date.bold()),
    }
}
