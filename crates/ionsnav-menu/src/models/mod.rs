//! Data models for the navigation header

pub mod menu;
pub mod theme;

pub use menu::{is_placeholder_url, MenuNode, MenuTree, PrunedNode, MAX_DEPTH, PLACEHOLDER_URL};
pub use theme::{Theme, DEFAULT_THEME_KEY};
