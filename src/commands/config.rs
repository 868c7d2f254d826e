use anyhow::Result;
use gaon_core::config::GaonConfig;
use owo_colors::OwoColorize;

pub fn show() -> Result<()> {
    let config = GaonConfig::load()?;
    println!("{} {}", "config:".dimmed(), GaonConfig::config_path()?.display());
    println!("{} {}", "server_url:".dimmed(), config.server_url);
    println!("{} {}", "data_dir:".dimmed(), config.data_path().display());
    Ok(())
}

pub fn set_server(url: &str) -> Result<()> {
    let mut config = GaonConfig::load()?;
    config.server_url = url.trim_end_matches('/').to_string();
    config.save()?;
    println!("{} {}", "server_url:".dimmed(), config.server_url.green());
    Ok(())
}
