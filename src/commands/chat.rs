use anyhow::Result;
use gaon_core::chat::ChatWidget;
use owo_colors::OwoColorize;

use crate::App;
use crate::render::Render;
use crate::utils::tui::create_spinner;

pub async fn send(app: &App, message: &str, session: Option<&str>) -> Result<()> {
    let mut widget = ChatWidget::load(app.storage.clone(), app.client.clone())?;

    if let Some(id) = session {
        if widget.load_session(id).is_none() {
            anyhow::bail!("Conversation '{}' not found", id);
        }
    }

    let spinner = create_spinner("AI");
    let reply = widget.send_message(message).await?;
    spinner.finish_and_clear();

    match reply {
        Some(_) => {
            if let Some(session) = widget.current_session() {
                // The question and its answer
                for msg in session.messages.iter().rev().take(2).rev() {
                    println!("{}", msg.render());
                }
            }
        }
        None => println!("{}", "Nothing to send".dimmed()),
    }

    Ok(())
}

pub fn new(app: &App) -> Result<()> {
    let mut widget = ChatWidget::load(app.storage.clone(), app.client.clone())?;
    let session = widget.start_new_chat()?;

    println!("{} {}", "Started".green(), session.id.dimmed());
    for msg in &session.messages {
        println!("{}", msg.render());
    }

    Ok(())
}

pub fn list(app: &App) -> Result<()> {
    let widget = ChatWidget::load(app.storage.clone(), app.client.clone())?;
    let current = widget.current_session().map(|s| s.id.clone());

    for session in widget.sessions() {
        let marker = if Some(&session.id) == current.as_ref() { "*" } else { " " };
        println!("{} {} {}", marker.green(), session.id.dimmed(), session.render());
    }

    Ok(())
}

pub fn show(app: &App, id: Option<&str>) -> Result<()> {
    let mut widget = ChatWidget::load(app.storage.clone(), app.client.clone())?;

    let session = match id {
        Some(id) => widget
            .load_session(id)
            .ok_or_else(|| anyhow::anyhow!("Conversation '{}' not found", id))?,
        None => widget
            .current_session()
            .ok_or_else(|| anyhow::anyhow!("No conversations yet"))?,
    };

    println!("{}", session.title.bold());
    println!();
    for msg in &session.messages {
        println!("{}", msg.render());
    }

    Ok(())
}
