//! Full header composition
//!
//! Combines the three menu fragments with the logo, search control,
//! theme toggle, sign-up action and mobile overlay.

use super::icons;
use super::selectors::*;
use super::Renderer;
use crate::disclosure::Timings;
use crate::models::{MenuTree, Theme, DEFAULT_THEME_KEY};
use crate::search::DEFAULT_QUERY_PARAMS;
use maud::{html, Markup, PreEscaped};

/// Where the logo image comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoSource {
    /// Image found on disk, served at this URL
    Url(String),
    /// No image available: generated SVG with the brand initials
    Placeholder { initials: String },
}

impl LogoSource {
    pub fn src(&self) -> String {
        match self {
            LogoSource::Url(url) => url.clone(),
            LogoSource::Placeholder { initials } => icons::placeholder_logo_data_uri(initials),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, LogoSource::Placeholder { .. })
    }
}

/// How the companion stylesheet reaches the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StylesheetSource {
    /// Linked with `<link rel="stylesheet">`
    Linked(String),
    /// Inlined in a `<style>` element
    Inline(String),
}

/// Search form settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    /// External endpoint the form redirects to
    pub endpoint: String,
    /// Query parameter name used on the endpoint
    pub param: String,
    /// Incoming parameters checked for a pre-fill value, in order
    pub query_params: Vec<String>,
    pub placeholder: String,
    /// Render the search control even without a search marker in the menu
    pub force_in_nav: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: "/search".to_string(),
            param: "q".to_string(),
            query_params: DEFAULT_QUERY_PARAMS.iter().map(|p| p.to_string()).collect(),
            placeholder: "Search…".to_string(),
            force_in_nav: false,
        }
    }
}

/// Everything the header needs besides the menu tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderContext {
    pub brand: String,
    pub home_url: String,
    pub logo: LogoSource,
    pub stylesheet: Option<StylesheetSource>,
    pub search: SearchSettings,
    /// Pre-fill value for the search input (already trimmed)
    pub query: Option<String>,
    pub signup_url: Option<String>,
    /// Theme rendered server side; the client replaces it with the stored one
    pub theme: Theme,
    /// Handed to the browser client through `data-*` attributes
    pub timings: Timings,
    pub theme_key: String,
}

impl Default for HeaderContext {
    fn default() -> Self {
        Self {
            brand: "IONS".to_string(),
            home_url: "/".to_string(),
            logo: LogoSource::Placeholder {
                initials: "IONS".to_string(),
            },
            stylesheet: None,
            search: SearchSettings::default(),
            query: None,
            signup_url: None,
            theme: Theme::default(),
            timings: Timings::default(),
            theme_key: DEFAULT_THEME_KEY.to_string(),
        }
    }
}

/// Complete header for one menu tree and context
pub struct HeaderView<'a> {
    renderer: Renderer<'a>,
    ctx: &'a HeaderContext,
}

impl<'a> HeaderView<'a> {
    pub fn new(tree: &'a MenuTree, ctx: &'a HeaderContext) -> Self {
        Self {
            renderer: Renderer::new(tree),
            ctx,
        }
    }

    pub fn render(&self) -> Markup {
        let ctx = self.ctx;
        html! {
            @match &ctx.stylesheet {
                Some(StylesheetSource::Linked(href)) => {
                    link rel="stylesheet" href=(href);
                }
                // A stylesheet must not close its own <style> element
                Some(StylesheetSource::Inline(css)) => {
                    style { (PreEscaped(css.replace("</", "<\\/"))) }
                }
                None => {}
            }
            header.ionsnav-header id=(HEADER_ROOT) data-theme=(ctx.theme.as_str())
                data-theme-key=(ctx.theme_key) data-timings=(timings_json(&ctx.timings)) {
                div.ionsnav-bar {
                    (self.logo())
                    (self.renderer.desktop_bar())
                    div.ionsnav-actions {
                        (self.search())
                        (self.theme_toggle())
                        (self.signup())
                        (self.mobile_button())
                    }
                }
                div.flyout-region id=(FLYOUT_REGION) { (self.renderer.flyout_panels()) }
                (self.mobile_overlay())
                div.search-backdrop id=(SEARCH_BACKDROP) {}
                div.theme-indicator id=(THEME_INDICATOR) role="status" aria-live="polite" {}
            }
        }
    }

    fn logo(&self) -> Markup {
        let logo = &self.ctx.logo;
        html! {
            a.ionsnav-logo href=(self.ctx.home_url) {
                img.logo-placeholder[logo.is_placeholder()] src=(logo.src()) alt=(self.ctx.brand) height="40";
            }
        }
    }

    fn search(&self) -> Markup {
        let settings = &self.ctx.search;
        if !settings.force_in_nav && !self.renderer.tree().has_search_marker() {
            return html! {};
        }

        html! {
            div.ionsnav-search id=(SEARCH_ROOT) {
                button.search-trigger id=(SEARCH_TRIGGER) type="button" aria-label="Open search"
                    aria-expanded="false" aria-controls=(SEARCH_FORM) {
                    (icons::search())
                }
                form.search-form id=(SEARCH_FORM) action=(settings.endpoint) method="get" role="search" {
                    input.search-input id=(SEARCH_INPUT) type="search" name=(settings.param)
                        placeholder=(settings.placeholder) autocomplete="off" aria-label="Search"
                        value=[self.ctx.query.as_deref()];
                    button.search-submit id=(SEARCH_SUBMIT) type="submit" data-busy-label="Searching…" {
                        "Search"
                    }
                    button.search-close id=(SEARCH_CLOSE) type="button" aria-label="Close search" {
                        (icons::close())
                    }
                }
            }
        }
    }

    fn theme_toggle(&self) -> Markup {
        html! {
            button.theme-toggle id=(THEME_TOGGLE) type="button"
                aria-label=(self.ctx.theme.toggle_label()) {
                (icons::sun())
                (icons::moon())
            }
        }
    }

    fn signup(&self) -> Markup {
        html! {
            @if let Some(url) = &self.ctx.signup_url {
                a.signup-button href=(url) data-nav-link="" { "Sign Up" }
            }
        }
    }

    fn mobile_button(&self) -> Markup {
        html! {
            button.mobile-menu-button id=(MOBILE_BUTTON) type="button" aria-label="Open menu"
                aria-expanded="false" aria-controls=(MOBILE_PANEL) {
                (icons::menu())
            }
        }
    }

    fn mobile_overlay(&self) -> Markup {
        html! {
            div.mobile-overlay id=(MOBILE_OVERLAY) {
                aside.mobile-panel id=(MOBILE_PANEL) aria-label="Menu" {
                    div.mobile-panel-header {
                        (self.logo())
                        button.mobile-close id=(MOBILE_CLOSE) type="button" aria-label="Close menu" {
                            (icons::close())
                        }
                    }
                    (self.renderer.mobile_accordion())
                    (self.signup())
                }
            }
        }
    }
}

/// Timings as compact JSON for the client; `{}` keeps its defaults
fn timings_json(timings: &Timings) -> String {
    serde_json::to_string(timings).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MenuNode;
    use crate::render::attr_values;

    fn tree() -> MenuTree {
        MenuTree::new(vec![
            MenuNode::branch(
                "Research",
                "/research",
                vec![MenuNode::leaf("Publications", "/publications")],
            ),
            MenuNode::leaf("Shop", "/shop"),
            MenuNode::search_marker(),
        ])
    }

    fn render(tree: &MenuTree, ctx: &HeaderContext) -> String {
        HeaderView::new(tree, ctx).render().into_string()
    }

    #[test]
    fn test_header_contains_every_control() {
        let ctx = HeaderContext {
            signup_url: Some("/signup".to_string()),
            ..HeaderContext::default()
        };
        let html = render(&tree(), &ctx);
        let ids = attr_values(&html, "id");

        for id in [
            HEADER_ROOT,
            FLYOUT_REGION,
            MOBILE_BUTTON,
            MOBILE_OVERLAY,
            MOBILE_PANEL,
            MOBILE_CLOSE,
            SEARCH_TRIGGER,
            SEARCH_FORM,
            SEARCH_INPUT,
            SEARCH_SUBMIT,
            SEARCH_CLOSE,
            SEARCH_BACKDROP,
            THEME_TOGGLE,
            THEME_INDICATOR,
        ] {
            assert!(ids.iter().any(|found| found == id), "missing #{id}");
        }
        assert_eq!(html.matches("class=\"signup-button\"").count(), 2);
    }

    #[test]
    fn test_client_data_attributes_are_rendered() {
        let html = render(&tree(), &HeaderContext::default());
        for name in [
            DATA_FLYOUT_TRIGGER,
            DATA_FLYOUT_PANEL,
            DATA_NAV_LINK,
            DATA_BUSY_LABEL,
            DATA_THEME_KEY,
            DATA_TIMINGS,
        ] {
            let attr = format!(" {}=\"", data_attr(name));
            assert!(html.contains(&attr), "missing {attr}");
        }

        let nested = MenuTree::new(vec![MenuNode::branch(
            "Learn",
            "/learn",
            vec![MenuNode::branch("Courses", "/courses", vec![MenuNode::leaf("Online", "/o")])],
        )]);
        let html = render(&nested, &HeaderContext::default());
        for name in [DATA_FLYOUT_TOGGLE, DATA_MOBILE_TOGGLE] {
            assert!(!attr_values(&html, &data_attr(name)).is_empty(), "missing {name}");
        }
    }

    #[test]
    fn test_query_prefill_is_escaped() {
        let ctx = HeaderContext {
            query: Some("\"><script>alert(1)</script>".to_string()),
            ..HeaderContext::default()
        };
        let html = render(&tree(), &ctx);
        assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;alert(1)&lt;/script&gt;\""));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_input_has_no_value_without_query() {
        let html = render(&tree(), &HeaderContext::default());
        assert!(attr_values(&html, "value").is_empty());
    }

    #[test]
    fn test_inline_stylesheet_precedes_header() {
        let ctx = HeaderContext {
            stylesheet: Some(StylesheetSource::Inline(".ionsnav-bar > a{display:flex}".into())),
            ..HeaderContext::default()
        };
        let html = render(&tree(), &ctx);
        assert!(html.starts_with("<style>.ionsnav-bar > a{display:flex}</style><header"));
    }

    #[test]
    fn test_inline_stylesheet_cannot_break_out() {
        let ctx = HeaderContext {
            stylesheet: Some(StylesheetSource::Inline("a{} </style><script>".into())),
            ..HeaderContext::default()
        };
        let html = render(&tree(), &ctx);
        assert!(html.starts_with("<style>a{} <\\/style><script></style><header"));
    }

    #[test]
    fn test_linked_stylesheet() {
        let ctx = HeaderContext {
            stylesheet: Some(StylesheetSource::Linked("/assets/ionsnav.css".into())),
            ..HeaderContext::default()
        };
        let html = render(&tree(), &ctx);
        assert!(html.starts_with("<link rel=\"stylesheet\" href=\"/assets/ionsnav.css\"><header"));
    }

    #[test]
    fn test_placeholder_logo() {
        let html = render(&tree(), &HeaderContext::default());
        let sources = attr_values(&html, "src");
        assert!(sources[0].starts_with("data:image/svg+xml,"));
        assert!(html.contains("logo-placeholder"));

        let ctx = HeaderContext {
            logo: LogoSource::Url("/assets/logo".to_string()),
            ..HeaderContext::default()
        };
        let html = render(&tree(), &ctx);
        assert_eq!(attr_values(&html, "src")[0], "/assets/logo");
        assert!(!html.contains("logo-placeholder"));
    }

    #[test]
    fn test_theme_attribute() {
        let ctx = HeaderContext {
            theme: Theme::Light,
            ..HeaderContext::default()
        };
        let html = render(&tree(), &ctx);
        assert_eq!(attr_values(&html, "data-theme"), vec!["light"]);
    }

    #[test]
    fn test_client_settings_travel_as_data_attributes() {
        let ctx = HeaderContext {
            theme_key: "site-theme".to_string(),
            ..HeaderContext::default()
        };
        let html = render(&tree(), &ctx);
        assert_eq!(attr_values(&html, "data-theme-key"), vec!["site-theme"]);

        // The JSON is attribute-escaped; undo the quotes before parsing
        let raw = attr_values(&html, "data-timings").remove(0).replace("&quot;", "\"");
        let timings: Timings = serde_json::from_str(&raw).unwrap();
        assert_eq!(timings, Timings::default());
    }

    #[test]
    fn test_search_follows_marker_or_setting() {
        let plain = MenuTree::new(vec![MenuNode::leaf("Shop", "/shop")]);
        let html = render(&plain, &HeaderContext::default());
        assert!(!attr_values(&html, "id").iter().any(|id| id == SEARCH_FORM));

        let mut ctx = HeaderContext::default();
        ctx.search.force_in_nav = true;
        let html = render(&plain, &ctx);
        assert!(attr_values(&html, "id").iter().any(|id| id == SEARCH_FORM));
    }

    #[test]
    fn test_one_panel_per_branch() {
        let html = render(&tree(), &HeaderContext::default());
        assert_eq!(attr_values(&html, "data-flyout-panel"), vec!["0"]);
    }
}
