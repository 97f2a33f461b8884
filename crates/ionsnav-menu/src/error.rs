//! Error types for ionsnav-menu

use thiserror::Error;

/// Errors raised by the pure menu layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    #[error("Unknown theme value: {value}")]
    UnknownTheme { value: String },

    #[error("Search query is empty")]
    BlankQuery,

    #[error("Top-level index {index} is out of range ({len} items)")]
    IndexOutOfRange { index: usize, len: usize },
}
