use anyhow::Result;
use gaon_core::theme::{Theme, ThemeToggle};
use owo_colors::OwoColorize;

use crate::App;

fn label(theme: Theme) -> String {
    match theme {
        Theme::Dark => theme.to_string().white().on_black().to_string(),
        Theme::Light => theme.to_string().black().on_white().to_string(),
    }
}

pub fn show(app: &App) -> Result<()> {
    let toggle = ThemeToggle::load(app.storage.clone());
    println!("{}", label(toggle.theme()));
    Ok(())
}

pub fn toggle(app: &App) -> Result<()> {
    let mut toggle = ThemeToggle::load(app.storage.clone());
    let theme = toggle.toggle()?;
    println!("{} {}", "Theme:".dimmed(), label(theme));
    Ok(())
}
