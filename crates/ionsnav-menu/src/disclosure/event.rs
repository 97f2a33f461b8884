//! Controller inputs and outputs

use super::timer::TimerId;
use crate::ident::NodeId;
use crate::models::Theme;
use std::time::Duration;

/// User gesture or timer delivered to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Pointer entered the top-level item at this position
    PointerEnterTopItem { index: usize },
    /// Pointer left a top-level item or the open flyout
    PointerLeave,
    /// Pointer entered the flyout panel region
    PointerEnterFlyout,
    /// A scheduled task came due
    TimerFired(TimerId),
    /// Branch header clicked inside an open flyout
    FlyoutBranchClicked(NodeId),
    /// Leaf clicked in the desktop bar, a flyout or the mobile menu
    LeafClicked { url: String },
    MobileMenuButtonClicked,
    MobileMenuCloseClicked,
    /// Click landed on the overlay outside the mobile panel
    ClickOutsideMobilePanel,
    /// Branch header clicked in the mobile accordion
    MobileBranchClicked(NodeId),
    SearchTriggerClicked,
    SearchCloseClicked,
    SearchBackdropClicked,
    /// Search form submitted with the raw input value
    SearchSubmitted { input: String },
    ThemeToggleClicked,
    EscapePressed,
    /// Raw viewport width; applied once resizing settles
    ViewportResized { width: u32 },
}

/// Side effect requested by a transition
///
/// Pure state (classes, aria attributes, scroll lock) is not an effect:
/// the driver projects it from [`super::DisclosureState`] after every
/// transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Redirect the page
    Navigate(String),
    /// Move keyboard focus to the search input
    FocusSearchInput,
    /// Write the theme to durable client storage
    PersistTheme(Theme),
    /// Notify theme observers
    ThemeChanged { theme: Theme, previous: Theme },
    /// Start a one-shot timer that reports back with `TimerFired(timer)`
    Schedule { timer: TimerId, delay: Duration },
    /// Cancel a previously scheduled timer
    Cancel(TimerId),
}
