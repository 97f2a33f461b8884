//! ionsnav-core - Core library for ionsnav
//!
//! Provides configuration, menu loading, asset resolution, the menu store
//! and the file watcher used by the server and the CLI.

pub mod assets;
pub mod config;
pub mod error;
pub mod event;
pub mod loader;
pub mod store;
pub mod watcher;

pub use assets::{AssetResolver, Assets, DEFAULT_STYLESHEET};
pub use config::{NavConfig, SearchConfig, CONFIG_FILE};
pub use error::{CoreError, DegradedState, ErrorSeverity, LoadError, LoadReport};
pub use event::{EventBus, NavEvent};
pub use loader::{MenuFormat, MenuLoader};
pub use store::MenuStore;
pub use watcher::{MenuWatcher, WatcherConfig};
