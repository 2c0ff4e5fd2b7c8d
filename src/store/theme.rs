use crate::error::{ExplorerError, Result};
use crate::storage::KeyValueStorage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

/// Storage key holding the theme preference
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ExplorerError::StorageError(format!(
                "Unknown theme '{}'",
                other
            ))),
        }
    }
}

/// Theme preference mirrored into durable storage
#[derive(Debug, Clone)]
pub struct ThemeStore {
    theme: Theme,
    storage: Arc<dyn KeyValueStorage>,
}

impl ThemeStore {
    /// Read the stored preference, defaulting to light when nothing usable
    /// is stored
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Result<Self> {
        let theme = match storage.get(THEME_KEY)? {
            Some(raw) => raw.parse::<Theme>().unwrap_or_else(|_| {
                warn!(stored = %raw, "ignoring unknown stored theme");
                Theme::default()
            }),
            None => Theme::default(),
        };

        Ok(Self { theme, storage })
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark_theme(&self) -> bool {
        self.theme == Theme::Dark
    }

    /// Flip between light and dark and persist the result.
    ///
    /// The in-memory value changes even when the write fails.
    pub fn toggle_theme(&mut self) -> Result<Theme> {
        self.theme = self.theme.toggled();
        self.storage.set(THEME_KEY, self.theme.as_str())?;
        info!(theme = %self.theme, "theme.toggle");
        Ok(self.theme)
    }
}
