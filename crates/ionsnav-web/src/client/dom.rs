//! Element lookup and state projection
//!
//! Elements are located once, by the ids and `data-*` attributes the
//! renderer emits. Anything missing is logged and skipped; the rest of
//! the header keeps working.

use ionsnav_menu::render::selectors::*;
use ionsnav_menu::{DisclosureState, NodeId, Theme};
use leptos::logging::{log, warn};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, CustomEventInit, Document, Element, HtmlElement, HtmlInputElement};

/// Name of the document event fired after a theme change
pub const THEME_CHANGE_EVENT: &str = "themechange";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThemeChangeDetail {
    theme: Theme,
    previous_theme: Theme,
}

pub struct HeaderDom {
    pub document: Document,
    pub root: Element,
    body: Option<HtmlElement>,

    pub flyout_region: Option<Element>,
    pub flyout_triggers: Vec<(usize, Element)>,
    flyout_panels: Vec<(usize, Element)>,
    pub flyout_toggles: Vec<(NodeId, Element)>,

    pub mobile_button: Option<Element>,
    pub mobile_overlay: Option<Element>,
    pub mobile_close: Option<Element>,
    pub mobile_toggles: Vec<(NodeId, Element)>,

    pub search: Option<SearchDom>,

    pub theme_toggle: Option<Element>,
    theme_indicator: Option<Element>,

    pub nav_links: Vec<Element>,
    /// Controls dimmed while search is expanded
    dimmable: Vec<Element>,
}

/// Search control; rendered only when the menu asks for it
pub struct SearchDom {
    root: Element,
    pub trigger: Element,
    pub form: Element,
    pub input: HtmlInputElement,
    submit: Element,
    submit_label: String,
    busy_label: String,
    pub close: Element,
    pub backdrop: Option<Element>,
}

impl HeaderDom {
    /// Locate the header in the document, `None` if it was not rendered
    pub fn locate(document: Document) -> Option<Self> {
        let root = document.get_element_by_id(HEADER_ROOT)?;

        let flyout_triggers = indexed(&root, DATA_FLYOUT_TRIGGER);
        let flyout_panels = indexed(&root, DATA_FLYOUT_PANEL);
        if flyout_triggers.len() != flyout_panels.len() {
            warn!(
                "{} flyout triggers but {} panels",
                flyout_triggers.len(),
                flyout_panels.len()
            );
        }

        let theme_toggle = required(&document, THEME_TOGGLE);
        let mobile_button = required(&document, MOBILE_BUTTON);
        let mut dimmable: Vec<Element> =
            query_all(&root, ".ionsnav-desktop, .ionsnav-actions > .signup-button");
        dimmable.extend(theme_toggle.clone());
        dimmable.extend(mobile_button.clone());

        Some(Self {
            body: document.body(),
            flyout_region: required(&document, FLYOUT_REGION),
            flyout_triggers,
            flyout_panels,
            flyout_toggles: identified(&root, DATA_FLYOUT_TOGGLE),
            mobile_button,
            mobile_overlay: required(&document, MOBILE_OVERLAY),
            mobile_close: required(&document, MOBILE_CLOSE),
            mobile_toggles: identified(&root, DATA_MOBILE_TOGGLE),
            search: SearchDom::locate(&document),
            theme_toggle,
            theme_indicator: required(&document, THEME_INDICATOR),
            nav_links: query_all(&root, &data_selector(DATA_NAV_LINK)),
            dimmable,
            document,
            root,
        })
    }

    /// Setting read from a `data-*` attribute of the header root
    pub fn setting(&self, name: &str) -> Option<String> {
        self.root.get_attribute(&data_attr(name))
    }

    /// Reflect the controller state onto classes and ARIA attributes
    pub fn project(&self, state: &DisclosureState) {
        let active = state.active_flyout();
        for (index, item) in &self.flyout_triggers {
            let open = active == Some(*index);
            toggle_class(item, CLASS_ACTIVE, open);
            if let Some(link) = item.first_element_child() {
                set_attr(&link, "aria-expanded", bool_str(open));
            }
        }
        for (index, panel) in &self.flyout_panels {
            toggle_class(panel, CLASS_OPEN, active == Some(*index));
        }
        for (id, toggle) in &self.flyout_toggles {
            let expanded = state.is_flyout_child_expanded(id);
            set_attr(toggle, "aria-expanded", bool_str(expanded));
            if let Ok(Some(group)) = toggle.closest(".flyout-group") {
                toggle_class(&group, CLASS_EXPANDED, expanded);
            }
        }

        let mobile_open = state.mobile_menu_open();
        if let Some(overlay) = &self.mobile_overlay {
            toggle_class(overlay, CLASS_OPEN, mobile_open);
        }
        if let Some(button) = &self.mobile_button {
            set_attr(button, "aria-expanded", bool_str(mobile_open));
        }
        for (id, toggle) in &self.mobile_toggles {
            let expanded = state.is_mobile_expanded(id);
            set_attr(toggle, "aria-expanded", bool_str(expanded));
            if let Ok(Some(branch)) = toggle.closest(".mobile-branch") {
                toggle_class(&branch, CLASS_EXPANDED, expanded);
            }
        }

        if let Some(search) = &self.search {
            search.project(state);
        }

        let dimmed = state.controls_dimmed();
        for control in &self.dimmable {
            toggle_class(control, CLASS_DIMMED, dimmed);
            set_attr(control, "aria-disabled", bool_str(dimmed));
        }

        if let Some(body) = &self.body {
            toggle_class(body, CLASS_SCROLL_LOCK, state.scroll_locked());
        }

        let theme = state.theme();
        set_attr(&self.root, "data-theme", theme.as_str());
        if let Some(html) = self.document.document_element() {
            set_attr(&html, "data-theme", theme.as_str());
        }
        if let Some(toggle) = &self.theme_toggle {
            set_attr(toggle, "aria-label", theme.toggle_label());
        }
        if let Some(indicator) = &self.theme_indicator {
            match state.theme_indicator() {
                Some(shown) => {
                    indicator.set_text_content(Some(indicator_text(shown)));
                    toggle_class(indicator, CLASS_VISIBLE, true);
                }
                None => toggle_class(indicator, CLASS_VISIBLE, false),
            }
        }
    }

    pub fn navigate(&self, url: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href(url) {
            warn!("Navigation to {} failed: {:?}", url, e);
        }
    }

    pub fn focus_search(&self) {
        if let Some(search) = &self.search {
            if let Err(e) = search.input.focus() {
                warn!("Could not focus search input: {:?}", e);
            }
        }
    }

    /// Fire `themechange` on the document with `{theme, previousTheme}`
    pub fn announce_theme(&self, theme: Theme, previous: Theme) {
        let detail = ThemeChangeDetail {
            theme,
            previous_theme: previous,
        };
        let detail = match serde_wasm_bindgen::to_value(&detail) {
            Ok(value) => value,
            Err(e) => {
                warn!("Theme change detail not serializable: {}", e);
                JsValue::NULL
            }
        };

        let init = CustomEventInit::new();
        init.set_bubbles(true);
        init.set_detail(&detail);
        match CustomEvent::new_with_event_init_dict(THEME_CHANGE_EVENT, &init) {
            Ok(event) => {
                if let Err(e) = self.document.dispatch_event(&event) {
                    warn!("themechange dispatch failed: {:?}", e);
                }
            }
            Err(e) => warn!("Could not create themechange event: {:?}", e),
        }
    }
}

impl SearchDom {
    fn locate(document: &Document) -> Option<Self> {
        let Some(root) = document.get_element_by_id(SEARCH_ROOT) else {
            log!("Search control not rendered");
            return None;
        };
        let input = required(document, SEARCH_INPUT)?
            .dyn_into::<HtmlInputElement>()
            .ok()?;
        let submit = required(document, SEARCH_SUBMIT)?;
        let submit_label = submit.text_content().unwrap_or_default();
        let busy_label = submit
            .get_attribute(&data_attr(DATA_BUSY_LABEL))
            .unwrap_or_else(|| submit_label.clone());

        Some(Self {
            trigger: required(document, SEARCH_TRIGGER)?,
            form: required(document, SEARCH_FORM)?,
            close: required(document, SEARCH_CLOSE)?,
            backdrop: required(document, SEARCH_BACKDROP),
            root,
            input,
            submit,
            submit_label,
            busy_label,
        })
    }

    /// Form action and input name, as rendered
    pub fn target(&self) -> Option<(String, String)> {
        let endpoint = self.form.get_attribute("action")?;
        let param = self.input.get_attribute("name")?;
        Some((endpoint, param))
    }

    fn project(&self, state: &DisclosureState) {
        let expanded = state.search_expanded();
        toggle_class(&self.root, CLASS_EXPANDED, expanded);
        set_attr(&self.trigger, "aria-expanded", bool_str(expanded));
        if let Some(backdrop) = &self.backdrop {
            toggle_class(backdrop, CLASS_VISIBLE, expanded);
        }

        let error = state.search_error();
        toggle_class(&self.input, CLASS_ERROR, error);
        set_attr(&self.input, "aria-invalid", bool_str(error));

        let busy = state.search_busy();
        toggle_class(&self.submit, CLASS_BUSY, busy);
        let label = if busy { &self.busy_label } else { &self.submit_label };
        self.submit.set_text_content(Some(label));
        let result = if busy {
            self.submit.set_attribute("disabled", "")
        } else {
            self.submit.remove_attribute("disabled")
        };
        if let Err(e) = result {
            warn!("Could not update search button: {:?}", e);
        }
    }
}

fn indicator_text(theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => "Dark mode",
        Theme::Light => "Light mode",
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Element by id, logging when it is missing
fn required(document: &Document, id: &str) -> Option<Element> {
    let element = document.get_element_by_id(id);
    if element.is_none() {
        warn!("#{} not found, skipping", id);
    }
    element
}

fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(nodes) = root.query_selector_all(selector) else {
        warn!("Invalid selector {}", selector);
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Elements carrying `data-{name}` with a numeric value
fn indexed(root: &Element, name: &str) -> Vec<(usize, Element)> {
    let attr = data_attr(name);
    query_all(root, &data_selector(name))
        .into_iter()
        .filter_map(|element| {
            let value = element.get_attribute(&attr)?;
            match value.parse() {
                Ok(index) => Some((index, element)),
                Err(_) => {
                    warn!("Ignoring {}=\"{}\"", attr, value);
                    None
                }
            }
        })
        .collect()
}

/// Elements carrying `data-{name}` with a node id
fn identified(root: &Element, name: &str) -> Vec<(NodeId, Element)> {
    let attr = data_attr(name);
    query_all(root, &data_selector(name))
        .into_iter()
        .filter_map(|element| {
            let id = element.get_attribute(&attr)?;
            Some((NodeId::from(id), element))
        })
        .collect()
}

fn toggle_class(element: &Element, class: &str, on: bool) {
    if let Err(e) = element.class_list().toggle_with_force(class, on) {
        warn!("classList.toggle({}) failed: {:?}", class, e);
    }
}

fn set_attr(element: &Element, name: &str, value: &str) {
    if let Err(e) = element.set_attribute(name, value) {
        warn!("setAttribute({}) failed: {:?}", name, e);
    }
}
