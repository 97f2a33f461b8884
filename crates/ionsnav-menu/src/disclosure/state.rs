//! Transient disclosure state of one page view

use crate::ident::NodeId;
use crate::models::Theme;
use std::collections::BTreeSet;

/// Phase of the expanded search control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Expanded, waiting for input
    Open,
    /// Submitted; submit control disabled until the page navigates away
    Submitting,
}

/// The one overlay disclosure that may be active
///
/// Flyout, mobile menu and search exclude each other. Hover never
/// preempts the mobile menu or search; an explicit click replaces
/// whatever overlay was showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    Closed,
    /// Flyout of the top-level item at `index`
    Flyout { index: usize },
    MobileMenu,
    Search(SearchPhase),
}

/// Everything the DOM reflects
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisclosureState {
    pub(super) overlay: Overlay,
    pub(super) expanded_mobile: BTreeSet<NodeId>,
    pub(super) expanded_flyout: BTreeSet<NodeId>,
    pub(super) theme: Theme,
    pub(super) theme_indicator: Option<Theme>,
    pub(super) search_error: bool,
    pub(super) viewport_width: Option<u32>,
    pub(super) pending_width: Option<u32>,
}

impl DisclosureState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    /// Top-level position of the open flyout
    pub fn active_flyout(&self) -> Option<usize> {
        match self.overlay {
            Overlay::Flyout { index } => Some(index),
            _ => None,
        }
    }

    pub fn mobile_menu_open(&self) -> bool {
        self.overlay == Overlay::MobileMenu
    }

    pub fn search_expanded(&self) -> bool {
        matches!(self.overlay, Overlay::Search(_))
    }

    /// Submit control disabled with a busy label
    pub fn search_busy(&self) -> bool {
        self.overlay == Overlay::Search(SearchPhase::Submitting)
    }

    /// Search input currently flashing its error highlight
    pub fn search_error(&self) -> bool {
        self.search_error
    }

    pub fn expanded_mobile_nodes(&self) -> &BTreeSet<NodeId> {
        &self.expanded_mobile
    }

    pub fn expanded_flyout_children(&self) -> &BTreeSet<NodeId> {
        &self.expanded_flyout
    }

    pub fn is_mobile_expanded(&self, id: &NodeId) -> bool {
        self.expanded_mobile.contains(id)
    }

    pub fn is_flyout_child_expanded(&self, id: &NodeId) -> bool {
        self.expanded_flyout.contains(id)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Theme announced by the transient indicator, while it is visible
    pub fn theme_indicator(&self) -> Option<Theme> {
        self.theme_indicator
    }

    /// Page scroll is locked behind the mobile menu and the search
    pub fn scroll_locked(&self) -> bool {
        matches!(self.overlay, Overlay::MobileMenu | Overlay::Search(_))
    }

    /// Navigation controls are dimmed and inert while search is expanded
    pub fn controls_dimmed(&self) -> bool {
        self.search_expanded()
    }

    /// Last settled viewport width, if any resize was seen
    pub fn viewport_width(&self) -> Option<u32> {
        self.viewport_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_inert() {
        let state = DisclosureState::default();
        assert_eq!(state.active_flyout(), None);
        assert!(!state.mobile_menu_open());
        assert!(!state.search_expanded());
        assert!(!state.scroll_locked());
        assert_eq!(state.theme(), Theme::Dark);
    }

    #[test]
    fn test_derived_flags_follow_overlay() {
        let mut state = DisclosureState::new(Theme::Light);

        state.overlay = Overlay::Search(SearchPhase::Submitting);
        assert!(state.search_expanded());
        assert!(state.search_busy());
        assert!(state.controls_dimmed());
        assert!(state.scroll_locked());

        state.overlay = Overlay::Flyout { index: 2 };
        assert_eq!(state.active_flyout(), Some(2));
        assert!(!state.scroll_locked());
        assert!(!state.mobile_menu_open());
    }
}
