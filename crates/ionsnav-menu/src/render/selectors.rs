//! Element ids, data attributes and state classes shared by the renderer
//! and the browser client

pub const HEADER_ROOT: &str = "ionsnav-header";
pub const FLYOUT_REGION: &str = "ionsnav-flyout";

pub const MOBILE_BUTTON: &str = "ionsnav-mobile-button";
pub const MOBILE_OVERLAY: &str = "ionsnav-mobile-overlay";
pub const MOBILE_PANEL: &str = "ionsnav-mobile-panel";
pub const MOBILE_CLOSE: &str = "ionsnav-mobile-close";

pub const SEARCH_ROOT: &str = "ionsnav-search";
pub const SEARCH_TRIGGER: &str = "ionsnav-search-trigger";
pub const SEARCH_FORM: &str = "ionsnav-search-form";
pub const SEARCH_INPUT: &str = "ionsnav-search-input";
pub const SEARCH_SUBMIT: &str = "ionsnav-search-submit";
pub const SEARCH_CLOSE: &str = "ionsnav-search-close";
pub const SEARCH_BACKDROP: &str = "ionsnav-search-backdrop";

pub const THEME_TOGGLE: &str = "ionsnav-theme-toggle";
pub const THEME_INDICATOR: &str = "ionsnav-theme-indicator";

/// Top-level item that opens a flyout; value is the item's position
pub const DATA_FLYOUT_TRIGGER: &str = "flyout-trigger";
/// Flyout panel; value is the owning item's position
pub const DATA_FLYOUT_PANEL: &str = "flyout-panel";
/// Branch header inside a flyout; value is the branch's node id
pub const DATA_FLYOUT_TOGGLE: &str = "flyout-toggle";
/// Branch header inside the mobile accordion; value is the node id
pub const DATA_MOBILE_TOGGLE: &str = "mobile-toggle";
/// Leaf link handled by the controller
pub const DATA_NAV_LINK: &str = "nav-link";
/// Text shown on the submit button while a search is submitting
pub const DATA_BUSY_LABEL: &str = "busy-label";
/// On the header root: storage key of the persisted theme
pub const DATA_THEME_KEY: &str = "theme-key";
/// On the header root: controller timings as JSON
pub const DATA_TIMINGS: &str = "timings";

/// `data-*` attribute selector for querySelector calls
pub fn data_selector(name: &str) -> String {
    format!("[data-{name}]")
}

pub fn data_attr(name: &str) -> String {
    format!("data-{name}")
}

pub const CLASS_ACTIVE: &str = "is-active";
pub const CLASS_OPEN: &str = "is-open";
pub const CLASS_EXPANDED: &str = "is-expanded";
pub const CLASS_DIMMED: &str = "is-dimmed";
pub const CLASS_ERROR: &str = "has-error";
pub const CLASS_BUSY: &str = "is-busy";
pub const CLASS_VISIBLE: &str = "is-visible";
pub const CLASS_SCROLL_LOCK: &str = "ionsnav-scroll-lock";
