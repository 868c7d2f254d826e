//! Portal client configuration.

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{GaonError, GaonResult};

static DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5001";
static DEFAULT_DATA_DIR: &str = "~/.local/share/gaon";

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_server_url(s: &String) -> bool {
    s == DEFAULT_SERVER_URL
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

/// Configuration at ~/.config/gaon/config.toml
///
/// Every key can be overridden from the environment with a `GAON_` prefix,
/// e.g. `GAON_SERVER_URL`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GaonConfig {
    #[serde(default = "default_server_url", skip_serializing_if = "is_default_server_url")]
    pub server_url: String,

    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for GaonConfig {
    fn default() -> Self {
        GaonConfig {
            server_url: default_server_url(),
            data_dir: default_data_dir(),
        }
    }
}

impl GaonConfig {
    /// Load the config file, creating a commented default on first run.
    pub fn load() -> GaonResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> GaonResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("GAON"))
            .build()
            .map_err(|e| GaonError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| GaonError::Config(e.to_string()))
    }

    pub fn config_path() -> GaonResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| GaonError::Config("Could not determine config directory".into()))?
            .join("gaon");

        Ok(config_dir.join("config.toml"))
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Save the current config to ~/.config/gaon/config.toml
    pub fn save(&self) -> GaonResult<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> GaonResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| GaonError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| GaonError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> GaonResult<()> {
        let contents = format!(
            "\
# gaon configuration

# Portal backend:
# server_url = \"{}\"

# Where events, chat sessions and preferences are kept:
# data_dir = \"{}\"
",
            DEFAULT_SERVER_URL, DEFAULT_DATA_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                GaonError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| GaonError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
