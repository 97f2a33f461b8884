//! Cancelable scheduled tasks owned by the controller

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// What a scheduled task does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKind {
    /// Close the flyout after the pointer left it
    FlyoutClose,
    /// Hide the theme-change indicator
    ThemeIndicator,
    /// Apply the latest viewport width after resizing settles
    ResizeSettle,
    /// Clear the error highlight on the search input
    SearchErrorFlash,
    /// Focus the search input once the expand transition finished
    SearchFocus,
}

/// Handle of one scheduled task
///
/// Only the most recent id of each kind is live; a fired id that no
/// longer matches is stale and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId {
    pub kind: TimerKind,
    pub seq: u64,
}

/// Delays and thresholds of the controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Hover bridge between a trigger and its flyout
    #[serde(with = "millis")]
    pub flyout_close: Duration,
    #[serde(with = "millis")]
    pub theme_indicator: Duration,
    #[serde(with = "millis")]
    pub resize_debounce: Duration,
    #[serde(with = "millis")]
    pub search_error_flash: Duration,
    /// Length of the search expand transition
    #[serde(with = "millis")]
    pub search_focus: Duration,
    /// Widths at or below this are treated as mobile
    pub mobile_breakpoint: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            flyout_close: Duration::from_millis(150),
            theme_indicator: Duration::from_millis(2000),
            resize_debounce: Duration::from_millis(120),
            search_error_flash: Duration::from_millis(2000),
            search_focus: Duration::from_millis(300),
            mobile_breakpoint: 768,
        }
    }
}

impl Timings {
    pub fn delay(&self, kind: TimerKind) -> Duration {
        match kind {
            TimerKind::FlyoutClose => self.flyout_close,
            TimerKind::ThemeIndicator => self.theme_indicator,
            TimerKind::ResizeSettle => self.resize_debounce,
            TimerKind::SearchErrorFlash => self.search_error_flash,
            TimerKind::SearchFocus => self.search_focus,
        }
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Live timer per kind
#[derive(Debug, Clone, Default)]
pub struct TimerSlots {
    live: HashMap<TimerKind, TimerId>,
    next_seq: u64,
}

impl TimerSlots {
    /// Allocate a fresh id for `kind`, returning the id it supersedes
    pub fn arm(&mut self, kind: TimerKind) -> (TimerId, Option<TimerId>) {
        self.next_seq += 1;
        let id = TimerId {
            kind,
            seq: self.next_seq,
        };
        (id, self.live.insert(kind, id))
    }

    /// Forget the live timer of `kind`, returning it if there was one
    pub fn disarm(&mut self, kind: TimerKind) -> Option<TimerId> {
        self.live.remove(&kind)
    }

    /// Consume a fired id; false when it is stale
    pub fn fire(&mut self, id: TimerId) -> bool {
        if self.live.get(&id.kind) == Some(&id) {
            self.live.remove(&id.kind);
            true
        } else {
            false
        }
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.live.contains_key(&kind)
    }
}
