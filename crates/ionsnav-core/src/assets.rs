//! Stylesheet and logo resolution
//!
//! Each asset is looked up at a list of conventional paths. A missing
//! stylesheet is replaced by the built-in one, inlined into the page; a
//! missing logo by a generated SVG of the brand initials.

use crate::config::NavConfig;
use crate::error::{CoreError, LoadError, LoadReport};
use ionsnav_menu::{LogoSource, StylesheetSource};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Stylesheet compiled into the binary
pub const DEFAULT_STYLESHEET: &str = include_str!("../assets/ionsnav.css");

/// Stylesheet text and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylesheetAsset {
    /// File on disk, `None` for the built-in stylesheet
    pub path: Option<PathBuf>,
    pub css: String,
}

/// Logo image found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoAsset {
    pub path: PathBuf,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Resolved assets for one configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assets {
    pub stylesheet: StylesheetAsset,
    pub logo: Option<LogoAsset>,
}

impl Default for Assets {
    fn default() -> Self {
        Self {
            stylesheet: StylesheetAsset {
                path: None,
                css: DEFAULT_STYLESHEET.to_string(),
            },
            logo: None,
        }
    }
}

impl Assets {
    /// Link the stylesheet when it exists on disk, inline it otherwise
    pub fn stylesheet_source(&self, href: &str) -> StylesheetSource {
        match self.stylesheet.path {
            Some(_) => StylesheetSource::Linked(href.to_string()),
            None => StylesheetSource::Inline(self.stylesheet.css.clone()),
        }
    }

    pub fn logo_source(&self, href: &str, initials: &str) -> LogoSource {
        match self.logo {
            Some(_) => LogoSource::Url(href.to_string()),
            None => LogoSource::Placeholder {
                initials: initials.to_string(),
            },
        }
    }

    /// Every file the resolved assets were read from
    pub fn watched_paths(&self) -> Vec<PathBuf> {
        self.stylesheet
            .path
            .iter()
            .chain(self.logo.as_ref().map(|logo| &logo.path))
            .cloned()
            .collect()
    }
}

/// Finds assets on disk for a [`NavConfig`]
pub struct AssetResolver<'a> {
    config: &'a NavConfig,
}

impl<'a> AssetResolver<'a> {
    pub fn new(config: &'a NavConfig) -> Self {
        Self { config }
    }

    /// Resolve both assets, recording every fallback in `report`
    pub async fn resolve(&self, report: &mut LoadReport) -> Assets {
        Assets {
            stylesheet: self.resolve_stylesheet(report).await,
            logo: self.resolve_logo(report).await,
        }
    }

    /// Candidate paths in lookup order, resolved against the config directory
    pub fn candidates(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        paths.iter().map(|p| self.config.resolve(p)).collect()
    }

    async fn resolve_stylesheet(&self, report: &mut LoadReport) -> StylesheetAsset {
        for path in self.candidates(&self.config.stylesheet_paths) {
            match read_optional(&path).await {
                Ok(Some(bytes)) => match String::from_utf8(bytes) {
                    Ok(css) => {
                        debug!(path = %path.display(), "Stylesheet found");
                        return StylesheetAsset {
                            path: Some(path),
                            css,
                        };
                    }
                    Err(_) => {
                        warn!(path = %path.display(), "Stylesheet is not UTF-8, skipping");
                        report.add_error(LoadError::error(
                            "stylesheet",
                            format!("{} is not valid UTF-8", path.display()),
                        ));
                    }
                },
                Ok(None) => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Stylesheet unreadable, skipping");
                    report.add_error(LoadError::from_core_error("stylesheet", &e));
                }
            }
        }

        report.stylesheet_inlined = true;
        report.add_error(
            LoadError::warning("stylesheet", "No stylesheet found; inlining built-in styles")
                .with_suggestion(format!(
                    "Place ionsnav.css at one of: {}",
                    display_list(&self.config.stylesheet_paths)
                )),
        );
        StylesheetAsset {
            path: None,
            css: DEFAULT_STYLESHEET.to_string(),
        }
    }

    async fn resolve_logo(&self, report: &mut LoadReport) -> Option<LogoAsset> {
        for path in self.candidates(&self.config.logo_paths) {
            match read_optional(&path).await {
                Ok(Some(bytes)) => {
                    let Some(content_type) = logo_content_type(&path) else {
                        report.add_warning(
                            "logo",
                            format!("{} is not a supported image type", path.display()),
                        );
                        continue;
                    };
                    debug!(path = %path.display(), %content_type, "Logo found");
                    return Some(LogoAsset {
                        path,
                        content_type,
                        bytes,
                    });
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Logo unreadable, skipping");
                    report.add_error(LoadError::from_core_error("logo", &e));
                }
            }
        }

        report.logo_placeholder = true;
        report.add_warning("logo", "No logo found; using generated placeholder");
        None
    }
}

/// Read a file, treating "not found" as absent
async fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, CoreError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) => match CoreError::from_io(path, e) {
            CoreError::FileNotFound { .. } => Ok(None),
            other => Err(other),
        },
    }
}

/// MIME type guessed from the extension, if it names an image
pub fn logo_content_type(path: &Path) -> Option<String> {
    mime_guess::from_path(path)
        .first()
        .filter(|mime| mime.type_() == mime_guess::mime::IMAGE)
        .map(|mime| mime.essence_str().to_string())
}

fn display_list(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
