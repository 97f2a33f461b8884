//! Transition logic

use super::event::{Effect, UiEvent};
use super::state::{DisclosureState, Overlay, SearchPhase};
use super::timer::{TimerId, TimerKind, TimerSlots, Timings};
use crate::ident::NodeId;
use crate::models::{is_placeholder_url, MenuTree, Theme};
use crate::render::flyout_indices;
use crate::render::SearchSettings;
use crate::search::{search_url, validate_query};
use std::collections::{BTreeSet, HashSet};

/// Single-threaded state machine behind the header
///
/// Each call to [`handle`](Self::handle) runs one transition to
/// completion and returns the effects it requested, in order.
#[derive(Debug, Clone)]
pub struct DisclosureController {
    state: DisclosureState,
    timers: TimerSlots,
    timings: Timings,
    flyout_triggers: HashSet<usize>,
    search_endpoint: String,
    search_param: String,
}

impl DisclosureController {
    pub fn new(tree: &MenuTree, timings: Timings, theme: Theme) -> Self {
        Self::from_triggers(flyout_indices(tree), timings, theme)
    }

    /// Controller for an already rendered header, given the positions of
    /// the top-level items that own a flyout
    pub fn from_triggers(
        triggers: impl IntoIterator<Item = usize>,
        timings: Timings,
        theme: Theme,
    ) -> Self {
        let search = SearchSettings::default();
        Self {
            state: DisclosureState::new(theme),
            timers: TimerSlots::default(),
            timings,
            flyout_triggers: triggers.into_iter().collect(),
            search_endpoint: search.endpoint,
            search_param: search.param,
        }
    }

    /// Redirect target of the search form
    pub fn with_search(mut self, endpoint: impl Into<String>, param: impl Into<String>) -> Self {
        self.search_endpoint = endpoint.into();
        self.search_param = param.into();
        self
    }

    /// Viewport width known at load time (applied without debounce)
    pub fn with_viewport(mut self, width: u32) -> Self {
        self.state.viewport_width = Some(width);
        self
    }

    pub fn state(&self) -> &DisclosureState {
        &self.state
    }

    /// True while a flyout close is pending
    pub fn flyout_closing(&self) -> bool {
        self.timers.is_armed(TimerKind::FlyoutClose)
    }

    pub fn handle(&mut self, event: UiEvent) -> Vec<Effect> {
        let mut effects = Vec::new();
        match event {
            UiEvent::PointerEnterTopItem { index } => self.on_enter_top_item(index, &mut effects),
            UiEvent::PointerLeave => self.on_pointer_leave(&mut effects),
            UiEvent::PointerEnterFlyout => {
                if self.state.active_flyout().is_some() {
                    self.cancel(TimerKind::FlyoutClose, &mut effects);
                }
            }
            UiEvent::TimerFired(id) => self.on_timer(id, &mut effects),
            UiEvent::FlyoutBranchClicked(id) => {
                if self.state.active_flyout().is_some() {
                    toggle(&mut self.state.expanded_flyout, id);
                }
            }
            UiEvent::LeafClicked { url } => {
                if !is_placeholder_url(&url) {
                    effects.push(Effect::Navigate(url));
                }
            }
            UiEvent::MobileMenuButtonClicked => self.on_open_mobile_menu(&mut effects),
            UiEvent::MobileMenuCloseClicked | UiEvent::ClickOutsideMobilePanel => {
                if self.state.mobile_menu_open() {
                    self.state.overlay = Overlay::Closed;
                }
            }
            UiEvent::MobileBranchClicked(id) => toggle(&mut self.state.expanded_mobile, id),
            UiEvent::SearchTriggerClicked => {
                if self.state.search_expanded() {
                    self.collapse_search(&mut effects);
                } else {
                    self.expand_search(&mut effects);
                }
            }
            UiEvent::SearchCloseClicked | UiEvent::SearchBackdropClicked => {
                if self.state.search_expanded() {
                    self.collapse_search(&mut effects);
                }
            }
            UiEvent::SearchSubmitted { input } => self.on_search_submitted(&input, &mut effects),
            UiEvent::ThemeToggleClicked => self.on_toggle_theme(&mut effects),
            UiEvent::EscapePressed => match self.state.overlay {
                Overlay::MobileMenu => self.state.overlay = Overlay::Closed,
                Overlay::Search(_) => self.collapse_search(&mut effects),
                Overlay::Closed | Overlay::Flyout { .. } => {}
            },
            UiEvent::ViewportResized { width } => {
                self.state.pending_width = Some(width);
                self.schedule(TimerKind::ResizeSettle, &mut effects);
            }
        }
        effects
    }

    fn on_enter_top_item(&mut self, index: usize, effects: &mut Vec<Effect>) {
        if !self.flyout_triggers.contains(&index) {
            return;
        }
        // Mobile menu and search suppress hover
        if matches!(self.state.overlay, Overlay::MobileMenu | Overlay::Search(_)) {
            return;
        }
        if self.is_mobile_viewport() {
            return;
        }

        self.cancel(TimerKind::FlyoutClose, effects);
        if self.state.active_flyout() != Some(index) {
            // Swap in place: no intermediate closed state
            self.state.overlay = Overlay::Flyout { index };
            self.state.expanded_flyout.clear();
        }
    }

    fn on_pointer_leave(&mut self, effects: &mut Vec<Effect>) {
        if self.state.active_flyout().is_some() {
            self.schedule(TimerKind::FlyoutClose, effects);
        }
    }

    fn on_timer(&mut self, id: TimerId, effects: &mut Vec<Effect>) {
        if !self.timers.fire(id) {
            return;
        }
        match id.kind {
            TimerKind::FlyoutClose => self.close_flyout(effects),
            TimerKind::ThemeIndicator => self.state.theme_indicator = None,
            TimerKind::SearchErrorFlash => self.state.search_error = false,
            TimerKind::SearchFocus => {
                if self.state.overlay == Overlay::Search(SearchPhase::Open) {
                    effects.push(Effect::FocusSearchInput);
                }
            }
            TimerKind::ResizeSettle => self.on_resize_settled(effects),
        }
    }

    fn on_open_mobile_menu(&mut self, effects: &mut Vec<Effect>) {
        // Controls behind an expanded search are inert
        if self.state.search_expanded() {
            return;
        }
        self.close_flyout(effects);
        self.state.overlay = Overlay::MobileMenu;
    }

    fn expand_search(&mut self, effects: &mut Vec<Effect>) {
        self.close_flyout(effects);
        self.state.overlay = Overlay::Search(SearchPhase::Open);
        self.schedule(TimerKind::SearchFocus, effects);
    }

    fn collapse_search(&mut self, effects: &mut Vec<Effect>) {
        self.state.overlay = Overlay::Closed;
        self.state.search_error = false;
        self.cancel(TimerKind::SearchFocus, effects);
        self.cancel(TimerKind::SearchErrorFlash, effects);
    }

    fn on_search_submitted(&mut self, input: &str, effects: &mut Vec<Effect>) {
        if self.state.search_busy() {
            return;
        }
        match validate_query(input) {
            Err(_) => {
                self.state.search_error = true;
                self.schedule(TimerKind::SearchErrorFlash, effects);
                effects.push(Effect::FocusSearchInput);
            }
            Ok(query) => {
                self.close_flyout(effects);
                self.state.search_error = false;
                self.cancel(TimerKind::SearchErrorFlash, effects);
                self.cancel(TimerKind::SearchFocus, effects);
                self.state.overlay = Overlay::Search(SearchPhase::Submitting);
                effects.push(Effect::Navigate(search_url(
                    &self.search_endpoint,
                    &self.search_param,
                    query,
                )));
            }
        }
    }

    fn on_toggle_theme(&mut self, effects: &mut Vec<Effect>) {
        if self.state.controls_dimmed() {
            return;
        }
        let previous = self.state.theme;
        let theme = previous.toggled();
        self.state.theme = theme;
        self.state.theme_indicator = Some(theme);
        effects.push(Effect::PersistTheme(theme));
        effects.push(Effect::ThemeChanged { theme, previous });
        self.schedule(TimerKind::ThemeIndicator, effects);
    }

    fn on_resize_settled(&mut self, effects: &mut Vec<Effect>) {
        let Some(width) = self.state.pending_width.take() else {
            return;
        };
        self.state.viewport_width = Some(width);

        if width > self.timings.mobile_breakpoint {
            if self.state.mobile_menu_open() {
                self.state.overlay = Overlay::Closed;
            }
            self.state.expanded_mobile.clear();
        } else {
            self.close_flyout(effects);
        }
    }

    fn close_flyout(&mut self, effects: &mut Vec<Effect>) {
        self.cancel(TimerKind::FlyoutClose, effects);
        if self.state.active_flyout().is_some() {
            self.state.overlay = Overlay::Closed;
            self.state.expanded_flyout.clear();
        }
    }

    fn is_mobile_viewport(&self) -> bool {
        self.state
            .viewport_width
            .map(|width| width <= self.timings.mobile_breakpoint)
            .unwrap_or(false)
    }

    /// Arm `kind`, cancelling the timer it supersedes
    fn schedule(&mut self, kind: TimerKind, effects: &mut Vec<Effect>) {
        let (timer, superseded) = self.timers.arm(kind);
        if let Some(old) = superseded {
            effects.push(Effect::Cancel(old));
        }
        effects.push(Effect::Schedule {
            timer,
            delay: self.timings.delay(kind),
        });
    }

    fn cancel(&mut self, kind: TimerKind, effects: &mut Vec<Effect>) {
        if let Some(timer) = self.timers.disarm(kind) {
            effects.push(Effect::Cancel(timer));
        }
    }
}

fn toggle(set: &mut BTreeSet<NodeId>, id: NodeId) {
    if !set.remove(&id) {
        set.insert(id);
    }
}
