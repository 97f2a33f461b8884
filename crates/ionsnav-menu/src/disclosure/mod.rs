//! Disclosure controller
//!
//! Owns the transient UI state of one page view and maps user gestures
//! to state transitions. Every transition is a plain method call on an
//! owned [`DisclosureState`]; side effects come back as [`Effect`]s for
//! the caller (the DOM driver or [`HeadlessDriver`]) to carry out.

mod controller;
mod driver;
mod event;
mod state;
mod timer;

pub use controller::DisclosureController;
pub use driver::HeadlessDriver;
pub use event::{Effect, UiEvent};
pub use state::{DisclosureState, Overlay, SearchPhase};
pub use timer::{TimerId, TimerKind, TimerSlots, Timings};
