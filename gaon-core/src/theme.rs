//! Light/dark theme preference.

use std::fmt;

use crate::error::GaonResult;
use crate::storage::{SharedStorage, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct ThemeToggle {
    storage: SharedStorage,
    theme: Theme,
}

impl ThemeToggle {
    /// Only a stored "dark" selects the dark theme.
    pub fn load(storage: SharedStorage) -> Self {
        let theme = match storage.get(THEME_KEY) {
            Ok(Some(value)) if value == Theme::Dark.as_str() => Theme::Dark,
            Ok(_) => Theme::Light,
            Err(e) => {
                tracing::warn!(error = %e, "could not read theme preference");
                Theme::Light
            }
        };

        ThemeToggle { storage, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme and persist the new value.
    pub fn toggle(&mut self) -> GaonResult<Theme> {
        self.theme = self.theme.toggled();
        self.storage.set(THEME_KEY, self.theme.as_str())?;
        Ok(self.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, Storage};
    use std::sync::Arc;

    #[test]
    fn defaults_to_light() {
        let toggle = ThemeToggle::load(Arc::new(MemoryStorage::new()));
        assert_eq!(toggle.theme(), Theme::Light);
    }

    #[test]
    fn unknown_value_is_light() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(THEME_KEY, "sepia").unwrap();
        assert_eq!(ThemeToggle::load(storage).theme(), Theme::Light);
    }

    #[test]
    fn toggle_persists_across_reload() {
        let storage = Arc::new(MemoryStorage::new());
        let mut toggle = ThemeToggle::load(storage.clone());

        assert_eq!(toggle.toggle().unwrap(), Theme::Dark);
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(ThemeToggle::load(storage.clone()).theme(), Theme::Dark);

        assert_eq!(toggle.toggle().unwrap(), Theme::Light);
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }
}
