//! ionsnav-menu - Menu tree, renderer and disclosure state machine
//!
//! This crate contains everything that has to run on both sides of the
//! wire without heavy dependencies. No tokio, no filesystem access.
//!
//! Used by:
//! - ionsnav-core (loading, assets, live reload)
//! - ionsnav-web (server rendering and the wasm DOM driver)
//! - ionsnav (CLI)

pub mod disclosure;
pub mod error;
pub mod ident;
pub mod label;
pub mod models;
pub mod render;
pub mod search;
pub mod storage;

pub use disclosure::{
    DisclosureController, DisclosureState, Effect, HeadlessDriver, Overlay, TimerId, TimerKind,
    Timings, UiEvent,
};
pub use error::MenuError;
pub use ident::{NodeId, Scope};
pub use label::{format_label, FormattedLabel, LabelSegment};
pub use models::{MenuNode, MenuTree, Theme, MAX_DEPTH};
pub use render::{HeaderContext, HeaderView, LogoSource, Renderer, StylesheetSource};
pub use storage::{KeyValueStore, MemoryStore};

pub use maud::Markup;
