//! In-memory driver with a virtual clock

use super::controller::DisclosureController;
use super::event::{Effect, UiEvent};
use super::state::DisclosureState;
use super::timer::{TimerId, Timings};
use crate::models::{MenuTree, Theme};
use crate::storage::KeyValueStore;
use std::time::Duration;

/// Runs a [`DisclosureController`] without a browser
///
/// Timers are kept on a virtual clock that only moves through
/// [`advance`](Self::advance). Navigations, focus requests and theme
/// notifications are recorded instead of performed.
#[derive(Debug)]
pub struct HeadlessDriver<S: KeyValueStore> {
    controller: DisclosureController,
    tree: MenuTree,
    timings: Timings,
    store: S,
    theme_key: String,
    now: Duration,
    pending: Vec<(Duration, TimerId)>,
    navigations: Vec<String>,
    focus_requests: usize,
    theme_events: Vec<(Theme, Theme)>,
}

impl<S: KeyValueStore> HeadlessDriver<S> {
    /// Start a page view, reading the persisted theme from `store`
    pub fn new(tree: MenuTree, timings: Timings, store: S, theme_key: impl Into<String>) -> Self {
        let theme_key = theme_key.into();
        let theme = Theme::load(&store, &theme_key);
        Self {
            controller: DisclosureController::new(&tree, timings.clone(), theme),
            tree,
            timings,
            store,
            theme_key,
            now: Duration::ZERO,
            pending: Vec::new(),
            navigations: Vec::new(),
            focus_requests: 0,
            theme_events: Vec::new(),
        }
    }

    pub fn with_search(mut self, endpoint: &str, param: &str) -> Self {
        self.controller = self.controller.with_search(endpoint, param);
        self
    }

    pub fn state(&self) -> &DisclosureState {
        self.controller.state()
    }

    pub fn dispatch(&mut self, event: UiEvent) {
        let effects = self.controller.handle(event);
        self.apply(effects);
    }

    /// Move the clock forward, firing every timer that comes due on the way
    ///
    /// Timers fire in due order; a timer scheduled by a fired timer fires
    /// too if it falls inside the window.
    pub fn advance(&mut self, by: Duration) {
        let target = self.now + by;
        while let Some(pos) = self.next_due(target) {
            let (due, timer) = self.pending.remove(pos);
            self.now = due;
            self.dispatch(UiEvent::TimerFired(timer));
        }
        self.now = target;
    }

    /// Simulate a fresh page load sharing the same storage
    pub fn reload(&mut self) {
        let theme = Theme::load(&self.store, &self.theme_key);
        self.controller = DisclosureController::new(&self.tree, self.timings.clone(), theme);
        self.pending.clear();
        self.navigations.clear();
        self.focus_requests = 0;
        self.theme_events.clear();
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_timers(&self) -> usize {
        self.pending.len()
    }

    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    pub fn focus_requests(&self) -> usize {
        self.focus_requests
    }

    /// `(theme, previous)` pairs in emission order
    pub fn theme_events(&self) -> &[(Theme, Theme)] {
        &self.theme_events
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn next_due(&self, target: Duration) -> Option<usize> {
        self.pending
            .iter()
            .enumerate()
            .filter(|(_, (due, _))| *due <= target)
            .min_by_key(|(_, (due, timer))| (*due, timer.seq))
            .map(|(pos, _)| pos)
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Navigate(url) => self.navigations.push(url),
                Effect::FocusSearchInput => self.focus_requests += 1,
                Effect::PersistTheme(theme) => theme.persist(&mut self.store, &self.theme_key),
                Effect::ThemeChanged { theme, previous } => {
                    self.theme_events.push((theme, previous))
                }
                Effect::Schedule { timer, delay } => self.pending.push((self.now + delay, timer)),
                Effect::Cancel(timer) => self.pending.retain(|(_, t)| *t != timer),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MenuNode;
    use crate::storage::MemoryStore;

    fn driver() -> HeadlessDriver<MemoryStore> {
        let tree = MenuTree::new(vec![MenuNode::branch(
            "Research",
            "/research",
            vec![MenuNode::leaf("Labs", "/labs")],
        )]);
        HeadlessDriver::new(tree, Timings::default(), MemoryStore::new(), "theme")
    }

    #[test]
    fn test_advance_fires_due_timers_only() {
        let mut d = driver();
        d.dispatch(UiEvent::PointerEnterTopItem { index: 0 });
        d.dispatch(UiEvent::PointerLeave);
        assert_eq!(d.pending_timers(), 1);

        d.advance(Duration::from_millis(100));
        assert_eq!(d.state().active_flyout(), Some(0));

        d.advance(Duration::from_millis(50));
        assert_eq!(d.state().active_flyout(), None);
        assert_eq!(d.now(), Duration::from_millis(150));
    }

    #[test]
    fn test_cancel_removes_pending_timer() {
        let mut d = driver();
        d.dispatch(UiEvent::PointerEnterTopItem { index: 0 });
        d.dispatch(UiEvent::PointerLeave);
        d.dispatch(UiEvent::PointerEnterFlyout);
        assert_eq!(d.pending_timers(), 0);

        d.advance(Duration::from_secs(1));
        assert_eq!(d.state().active_flyout(), Some(0));
    }

    #[test]
    fn test_theme_survives_reload() {
        let mut d = driver();
        d.dispatch(UiEvent::ThemeToggleClicked);
        assert_eq!(d.theme_events(), &[(Theme::Light, Theme::Dark)]);

        d.reload();
        assert_eq!(d.state().theme(), Theme::Light);
        assert!(d.theme_events().is_empty());
    }
}
