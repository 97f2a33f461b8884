//! Error types for ionsnav-core
//!
//! Loading never fails the page: every problem is recorded in a
//! [`LoadReport`] and the store falls back to built-in defaults.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for ionsnav operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // IO Errors
    // ===================
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    // ===================
    // Parse Errors
    // ===================
    #[error("Failed to parse JSON in {path}: {message}")]
    JsonParse {
        path: PathBuf,
        message: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse YAML in {path}: {message}")]
    YamlParse {
        path: PathBuf,
        message: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to parse TOML in {path}: {message}")]
    TomlParse {
        path: PathBuf,
        message: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Unsupported menu format for {path}: expected .json, .yaml, .yml or .toml")]
    UnsupportedFormat { path: PathBuf },

    // ===================
    // Watch Errors
    // ===================
    #[error("File watcher error: {message}")]
    WatchError {
        message: String,
        #[source]
        source: Option<notify::Error>,
    },

    // ===================
    // Config Errors
    // ===================
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl CoreError {
    /// Map an io error on `path`, keeping "not found" distinct
    pub fn from_io(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        let path = path.into();
        if error.kind() == std::io::ErrorKind::NotFound {
            CoreError::FileNotFound { path }
        } else {
            CoreError::FileRead {
                path,
                source: error,
            }
        }
    }
}

/// Severity level for errors during load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Non-critical, continuing with a fallback
    Warning,
    /// Significant but not fatal
    Error,
    /// Cannot continue
    Fatal,
}

impl ErrorSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorSeverity::Warning => "warning",
            ErrorSeverity::Error => "error",
            ErrorSeverity::Fatal => "fatal",
        }
    }
}

/// Individual error entry in load report
#[derive(Debug, Clone)]
pub struct LoadError {
    pub source: String,
    pub message: String,
    pub severity: ErrorSeverity,
    /// Actionable suggestion for user (optional)
    pub suggestion: Option<String>,
}

impl LoadError {
    pub fn warning(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            severity: ErrorSeverity::Warning,
            suggestion: None,
        }
    }

    pub fn error(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            severity: ErrorSeverity::Error,
            suggestion: None,
        }
    }

    pub fn fatal(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            severity: ErrorSeverity::Fatal,
            suggestion: None,
        }
    }

    /// Add an actionable suggestion to this error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Create user-friendly error from CoreError with context-aware suggestions
    pub fn from_core_error(source: impl Into<String>, error: &CoreError) -> Self {
        let source = source.into();
        let (message, suggestion) = match error {
            CoreError::FileNotFound { path } => (
                format!("File not found: {}", path.display()),
                Some(format!("Check the configured path: ls {}", path.display())),
            ),
            CoreError::FileRead { path, .. } => (
                format!("Cannot read file: {}", path.display()),
                Some(format!("Check permissions: chmod +r {}", path.display())),
            ),
            CoreError::JsonParse { path, message, .. } => (
                format!("Invalid JSON in {}: {}", path.display(), message),
                Some("Validate JSON syntax with: jq . <file>".to_string()),
            ),
            CoreError::YamlParse { path, message, .. } => (
                format!("Invalid YAML in {}: {}", path.display(), message),
                Some("Check indentation and list markers".to_string()),
            ),
            CoreError::TomlParse { path, message, .. } => (
                format!("Invalid TOML in {}: {}", path.display(), message),
                Some("Menu TOML files hold an `items` array of tables".to_string()),
            ),
            CoreError::UnsupportedFormat { path } => (
                error.to_string(),
                Some(format!(
                    "Rename {} with a .json, .yaml or .toml extension",
                    path.display()
                )),
            ),
            _ => (error.to_string(), None),
        };

        Self {
            source,
            message,
            severity: ErrorSeverity::Error,
            suggestion,
        }
    }
}

/// Report of problems encountered while loading the menu and assets
///
/// Enables graceful degradation by tracking partial failures
/// instead of failing the render on any error.
#[derive(Debug, Default, Clone)]
pub struct LoadReport {
    pub errors: Vec<LoadError>,
    /// Menu file read and parsed
    pub menu_loaded: bool,
    /// Built-in default menu in use
    pub used_fallback_menu: bool,
    /// Nodes dropped for exceeding the depth limit
    pub pruned_nodes: usize,
    /// No stylesheet on disk; defaults are inlined
    pub stylesheet_inlined: bool,
    /// No logo on disk; generated placeholder in use
    pub logo_placeholder: bool,
}

impl LoadReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, error: LoadError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, source: impl Into<String>, message: impl Into<String>) {
        self.errors.push(LoadError::warning(source, message));
    }

    pub fn add_fatal(&mut self, source: impl Into<String>, message: impl Into<String>) {
        self.errors.push(LoadError::fatal(source, message));
    }

    /// Returns true if there are any fatal errors
    pub fn has_fatal_errors(&self) -> bool {
        self.errors
            .iter()
            .any(|e| e.severity == ErrorSeverity::Fatal)
    }

    /// Returns true if there are any errors (including warnings)
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns only warnings
    pub fn warnings(&self) -> impl Iterator<Item = &LoadError> {
        self.errors
            .iter()
            .filter(|e| e.severity == ErrorSeverity::Warning)
    }

    /// Returns count by severity
    pub fn error_count(&self) -> (usize, usize, usize) {
        let count = |severity: ErrorSeverity| {
            self.errors
                .iter()
                .filter(|e| e.severity == severity)
                .count()
        };
        (
            count(ErrorSeverity::Warning),
            count(ErrorSeverity::Error),
            count(ErrorSeverity::Fatal),
        )
    }

    /// Merge another report into this one
    pub fn merge(&mut self, other: LoadReport) {
        self.errors.extend(other.errors);
        self.menu_loaded = self.menu_loaded || other.menu_loaded;
        self.used_fallback_menu = self.used_fallback_menu || other.used_fallback_menu;
        self.pruned_nodes += other.pruned_nodes;
        self.stylesheet_inlined = self.stylesheet_inlined || other.stylesheet_inlined;
        self.logo_placeholder = self.logo_placeholder || other.logo_placeholder;
    }

    /// Which parts are running on fallbacks
    pub fn degraded_state(&self) -> DegradedState {
        let mut fallbacks = Vec::new();
        if self.used_fallback_menu {
            fallbacks.push("menu".to_string());
        }
        if self.stylesheet_inlined {
            fallbacks.push("stylesheet".to_string());
        }
        if self.logo_placeholder {
            fallbacks.push("logo".to_string());
        }

        if fallbacks.is_empty() {
            DegradedState::Healthy
        } else {
            DegradedState::Fallback {
                reason: format!("Using built-in {}", fallbacks.join(", ")),
                fallbacks,
            }
        }
    }
}

/// Degraded state indicator for the menu store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradedState {
    /// Everything loaded from disk
    Healthy,
    /// Some parts replaced by built-in defaults, header still renders
    Fallback {
        fallbacks: Vec<String>,
        reason: String,
    },
}

impl DegradedState {
    pub fn is_healthy(&self) -> bool {
        matches!(self, DegradedState::Healthy)
    }

    pub fn is_degraded(&self) -> bool {
        !self.is_healthy()
    }

    /// Short status word for health endpoints
    pub fn status(&self) -> &'static str {
        match self {
            DegradedState::Healthy => "healthy",
            DegradedState::Fallback { .. } => "degraded",
        }
    }
}
