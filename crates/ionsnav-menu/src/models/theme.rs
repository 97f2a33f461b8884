//! Light/dark colour theme

use crate::error::MenuError;
use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default storage key for the persisted theme
pub const DEFAULT_THEME_KEY: &str = "ionsnav-theme";

/// Colour theme of the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark theme (default)
    #[default]
    Dark,
    /// Light theme
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Label of the toggle button, which names the theme it switches *to*
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Theme::Dark => "Switch to light mode",
            Theme::Light => "Switch to dark mode",
        }
    }

    /// Read the persisted theme; missing or unknown values fall back to dark
    pub fn load(store: &impl KeyValueStore, key: &str) -> Self {
        store
            .get(key)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn persist(&self, store: &mut impl KeyValueStore, key: &str) {
        store.set(key, self.as_str());
    }
}

impl FromStr for Theme {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(MenuError::UnknownTheme {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_load_defaults_to_dark() {
        let store = MemoryStore::new();
        assert_eq!(Theme::load(&store, DEFAULT_THEME_KEY), Theme::Dark);
    }

    #[test]
    fn test_load_ignores_garbage() {
        let mut store = MemoryStore::new();
        store.set(DEFAULT_THEME_KEY, "sepia");
        assert_eq!(Theme::load(&store, DEFAULT_THEME_KEY), Theme::Dark);
    }

    #[test]
    fn test_persist_then_load() {
        let mut store = MemoryStore::new();
        Theme::Light.persist(&mut store, DEFAULT_THEME_KEY);
        assert_eq!(store.get(DEFAULT_THEME_KEY).as_deref(), Some("light"));
        assert_eq!(Theme::load(&store, DEFAULT_THEME_KEY), Theme::Light);
    }

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }
}
