#[cfg(test)]
#[path = "theme_test.rs"]
mod tests;

use std::fmt::Display;

use eyre::{Context, Result};

use crate::storage::{ArcStorage, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

/// What the user asked for. `System` follows the terminal and is stored as
/// the absence of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Clone)]
pub struct ThemeState {
    storage: ArcStorage,
    preference: ThemePreference,
    system_dark: bool,
}

impl ThemeState {
    /// Reads the stored preference and normalises storage to match it, so
    /// a garbage value is dropped.
    pub async fn load(storage: ArcStorage, system_dark: bool) -> Result<Self> {
        let stored = storage
            .get(THEME_KEY)
            .await
            .wrap_err("loading theme preference")?;
        let state = Self {
            storage,
            preference: ThemePreference::parse(stored.as_deref()),
            system_dark,
        };
        state.sync_storage().await?;
        Ok(state)
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    pub fn theme(&self) -> Theme {
        match self.preference {
            ThemePreference::Light => Theme::Light,
            ThemePreference::Dark => Theme::Dark,
            ThemePreference::System if self.system_dark => Theme::Dark,
            ThemePreference::System => Theme::Light,
        }
    }

    /// Pins the opposite of the current theme, leaving `System` behind.
    pub async fn toggle(&mut self) -> Result<Theme> {
        self.preference = match self.theme() {
            Theme::Dark => ThemePreference::Light,
            Theme::Light => ThemePreference::Dark,
        };
        self.sync_storage().await?;
        Ok(self.theme())
    }

    /// Records a change of the terminal's colour scheme. Returns true when
    /// the resolved theme changed.
    pub fn set_system_dark(&mut self, dark: bool) -> bool {
        let before = self.theme();
        self.system_dark = dark;
        before != self.theme()
    }

    async fn sync_storage(&self) -> Result<()> {
        match self.preference {
            ThemePreference::System => self.storage.remove(THEME_KEY).await,
            ThemePreference::Light => self.storage.set(THEME_KEY, "light").await,
            ThemePreference::Dark => self.storage.set(THEME_KEY, "dark").await,
        }
        .wrap_err("saving theme preference")
    }
}

impl ThemePreference {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("light") => ThemePreference::Light,
            Some("dark") => ThemePreference::Dark,
            _ => ThemePreference::System,
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

/// Guesses whether the terminal background is dark from `COLORFGBG`.
pub fn detect_system_dark() -> bool {
    std::env::var("COLORFGBG")
        .map(|value| dark_background(&value))
        .unwrap_or(false)
}

/// `COLORFGBG` is `fg;bg` or `fg;default;bg`; the last field is the
/// background colour index.
fn dark_background(value: &str) -> bool {
    match value.rsplit(';').next().map(str::parse::<u8>) {
        Some(Ok(bg)) => bg < 7 || bg == 8,
        _ => false,
    }
}
