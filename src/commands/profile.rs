use anyhow::Result;
use dialoguer::Confirm;
use gaon_core::profile::ProfileEditor;
use owo_colors::OwoColorize;

use crate::App;
use crate::utils::tui::create_spinner;

pub async fn show(app: &App) -> Result<()> {
    let profile = ProfileEditor::load(app.storage.clone(), app.client.clone()).await;
    println!("{}", profile.display_name().bold());
    Ok(())
}

pub async fn edit(app: &App, nickname: &str) -> Result<()> {
    let mut profile = ProfileEditor::load(app.storage.clone(), app.client.clone()).await;
    profile.begin_edit();

    let spinner = create_spinner("Saving");
    let result = profile.finish_edit(nickname).await;
    spinner.finish_and_clear();

    match result {
        Ok(name) => {
            println!("{}", "프로필이 저장되었습니다!".green());
            println!("{}", name.bold());
        }
        Err(e) => {
            tracing::warn!(error = %e, "profile save failed");
            eprintln!("{}", "저장 실패!".red());
        }
    }

    Ok(())
}

pub async fn logout(app: &App, yes: bool) -> Result<()> {
    let confirmed = yes
        || Confirm::new()
            .with_prompt("로그아웃 하시겠습니까?")
            .default(false)
            .interact()?;

    if !confirmed {
        return Ok(());
    }

    let profile = ProfileEditor::load(app.storage.clone(), app.client.clone()).await;
    profile.logout()?;
    println!("{}", "Logged out".dimmed());

    Ok(())
}
