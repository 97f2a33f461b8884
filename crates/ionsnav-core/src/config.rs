//! Header configuration (`ionsnav.toml`)
//!
//! Every field has a default, so an absent file yields a working header.
//! Relative paths resolve against the directory holding the config file.

use crate::error::CoreError;
use anyhow::{Context, Result};
use ionsnav_menu::models::DEFAULT_THEME_KEY;
use ionsnav_menu::render::SearchSettings;
use ionsnav_menu::search::DEFAULT_QUERY_PARAMS;
use ionsnav_menu::Timings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Conventional config file name
pub const CONFIG_FILE: &str = "ionsnav.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub brand: String,
    /// Initials for the placeholder logo (derived from `brand` when unset)
    pub brand_initials: Option<String>,
    pub home_url: String,
    /// Menu data file (.json, .yaml, .yml or .toml); built-in menu when unset
    pub menu_path: Option<PathBuf>,
    /// URL the stylesheet is linked from when found on disk
    pub stylesheet_href: String,
    /// Candidate stylesheet locations, first existing wins
    pub stylesheet_paths: Vec<PathBuf>,
    /// URL the logo is served from when found on disk
    pub logo_href: String,
    /// Candidate logo locations, first existing wins
    pub logo_paths: Vec<PathBuf>,
    pub search: SearchConfig,
    pub signup_url: Option<String>,
    /// Browser storage key of the persisted theme
    pub theme_storage_key: String,
    pub timings: Timings,

    /// Directory relative paths resolve against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub endpoint: String,
    pub param: String,
    /// Incoming query parameters checked for a pre-fill, in order
    pub query_params: Vec<String>,
    pub placeholder: String,
    /// Render the search control even without a search marker in the menu
    pub in_nav: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let settings = SearchSettings::default();
        Self {
            endpoint: settings.endpoint,
            param: settings.param,
            query_params: DEFAULT_QUERY_PARAMS.iter().map(|p| p.to_string()).collect(),
            placeholder: settings.placeholder,
            in_nav: true,
        }
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            brand: "IONS".to_string(),
            brand_initials: None,
            home_url: "/".to_string(),
            menu_path: None,
            stylesheet_href: "/assets/ionsnav.css".to_string(),
            stylesheet_paths: [
                "ionsnav.css",
                "assets/ionsnav.css",
                "css/ionsnav.css",
                "static/ionsnav.css",
            ]
            .iter()
            .map(PathBuf::from)
            .collect(),
            logo_href: "/assets/logo".to_string(),
            logo_paths: [
                "logo.svg",
                "logo.png",
                "assets/logo.svg",
                "assets/logo.png",
                "images/logo.svg",
                "images/logo.png",
            ]
            .iter()
            .map(PathBuf::from)
            .collect(),
            search: SearchConfig::default(),
            signup_url: None,
            theme_storage_key: DEFAULT_THEME_KEY.to_string(),
            timings: Timings::default(),
            base_dir: PathBuf::from("."),
        }
    }
}

impl NavConfig {
    /// Load `path`; a missing file yields defaults, a malformed one is an error
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                return Ok(Self::default().with_base_dir(parent_dir(path)));
            }
            Err(e) => return Err(CoreError::from_io(path, e)),
        };

        let config: NavConfig = toml::from_str(&content).map_err(|e| CoreError::TomlParse {
            path: path.to_path_buf(),
            message: e.message().to_string(),
            source: e,
        })?;
        config.validate()?;
        debug!(path = %path.display(), "Config loaded");
        Ok(config.with_base_dir(parent_dir(path)))
    }

    /// Find the config file: explicit path, then `./ionsnav.toml`, then the
    /// user config directory
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), CoreError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(CoreError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let candidates = std::iter::once(PathBuf::from(CONFIG_FILE))
            .chain(dirs::config_dir().map(|dir| dir.join("ionsnav").join(CONFIG_FILE)));
        for candidate in candidates {
            if candidate.is_file() {
                return Ok((Self::load(&candidate)?, Some(candidate)));
            }
        }
        Ok((Self::default(), None))
    }

    /// Persist as TOML, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let invalid = |message: &str| {
            Err(CoreError::InvalidConfig {
                message: message.to_string(),
            })
        };
        if self.theme_storage_key.trim().is_empty() {
            return invalid("theme_storage_key must not be empty");
        }
        if self.search.param.trim().is_empty() {
            return invalid("search.param must not be empty");
        }
        if self.search.query_params.is_empty() {
            return invalid("search.query_params needs at least one name");
        }
        if self.timings.mobile_breakpoint == 0 {
            return invalid("timings.mobile_breakpoint must be positive");
        }
        Ok(())
    }

    /// Resolve a configured path against `base_dir`
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Absolute location of the menu file, if one is configured
    pub fn menu_file(&self) -> Option<PathBuf> {
        self.menu_path.as_deref().map(|p| self.resolve(p))
    }

    /// Placeholder logo text: `brand_initials`, else the first letter of
    /// each word of a multi-word brand, else a one-word brand as is
    pub fn initials(&self) -> String {
        if let Some(initials) = self.brand_initials.as_deref().map(str::trim) {
            if !initials.is_empty() {
                return initials.to_string();
            }
        }

        let words: Vec<&str> = self.brand.split_whitespace().collect();
        match words.as_slice() {
            [word] => word.to_string(),
            _ => words
                .iter()
                .filter_map(|word| word.chars().find(|c| c.is_alphanumeric()))
                .collect(),
        }
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            endpoint: self.search.endpoint.clone(),
            param: self.search.param.clone(),
            query_params: self.search.query_params.clone(),
            placeholder: self.search.placeholder.clone(),
            force_in_nav: self.search.in_nav,
        }
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ionsnav_menu::render::icons::placeholder_logo_svg;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_initials_from_brand() {
        let config = |brand: &str| NavConfig {
            brand: brand.to_string(),
            ..NavConfig::default()
        };
        assert_eq!(config("Noetic Research Lab").initials(), "NRL");
        assert_eq!(config("IONS").initials(), "IONS");
        assert_eq!(config("Arts & Letters").initials(), "AL");

        let explicit = NavConfig {
            brand_initials: Some(" IoNS ".to_string()),
            ..config("Institute of Noetic Sciences")
        };
        assert_eq!(explicit.initials(), "IoNS");
    }

    #[test]
    fn test_placeholder_logo_shows_brand_initials() {
        let config = NavConfig {
            brand: "Noetic Research Lab".to_string(),
            ..NavConfig::default()
        };
        assert!(placeholder_logo_svg(&config.initials()).contains(">NRL</text>"));
        assert!(placeholder_logo_svg(&NavConfig::default().initials()).contains(">IONS</text>"));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = NavConfig::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config.brand, "IONS");
        assert_eq!(config.base_dir, dir.path());
        assert_eq!(config.theme_storage_key, "ionsnav-theme");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            r#"
brand = "Institute"
menu_path = "menu.yaml"

[search]
endpoint = "https://search.example.org/"

[timings]
flyout_close = 250
"#,
        )
        .unwrap();

        let config = NavConfig::load(&path).unwrap();
        assert_eq!(config.brand, "Institute");
        assert_eq!(config.search.endpoint, "https://search.example.org/");
        assert_eq!(config.search.param, "q");
        assert_eq!(config.timings.flyout_close, Duration::from_millis(250));
        assert_eq!(config.timings.mobile_breakpoint, 768);
        assert_eq!(config.menu_file(), Some(dir.path().join("menu.yaml")));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "brand = [").unwrap();
        assert!(matches!(
            NavConfig::load(&path),
            Err(CoreError::TomlParse { .. })
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "theme_storage_key = \"  \"").unwrap();
        assert!(matches!(
            NavConfig::load(&path),
            Err(CoreError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let config = NavConfig {
            signup_url: Some("/join".to_string()),
            ..NavConfig::default()
        };
        config.save(&path).unwrap();

        let loaded = NavConfig::load(&path).unwrap();
        assert_eq!(loaded.signup_url.as_deref(), Some("/join"));
        assert_eq!(loaded.stylesheet_paths, config.stylesheet_paths);
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            NavConfig::discover(Some(&missing)),
            Err(CoreError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let config = NavConfig::default().with_base_dir("/srv/site");
        assert_eq!(
            config.resolve(Path::new("/etc/menu.json")),
            PathBuf::from("/etc/menu.json")
        );
        assert_eq!(
            config.resolve(Path::new("menu.json")),
            PathBuf::from("/srv/site/menu.json")
        );
    }
}
