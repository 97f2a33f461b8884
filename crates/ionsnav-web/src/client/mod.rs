//! Browser client
//!
//! Binds a [`DisclosureController`] to the header rendered by the
//! server. Settings come from `data-*` attributes on the header root;
//! the menu tree itself is never sent to the browser.

mod bindings;
mod dom;
mod driver;
mod live;
mod storage;

pub use dom::THEME_CHANGE_EVENT;

use crate::LIVE_RELOAD_ATTR;
use bindings::viewport_width;
use dom::HeaderDom;
use driver::DomDriver;
use ionsnav_menu::models::DEFAULT_THEME_KEY;
use ionsnav_menu::render::selectors::{DATA_THEME_KEY, DATA_TIMINGS};
use ionsnav_menu::{DisclosureController, Theme, Timings};
use leptos::logging::{log, warn};
use storage::LocalStorage;

/// Wire up the header on the current page
pub fn start() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        warn!("No document, ionsnav client not started");
        return;
    };
    let Some(dom) = HeaderDom::locate(document) else {
        warn!("No ionsnav header on this page");
        return;
    };

    let timings = dom
        .setting(DATA_TIMINGS)
        .and_then(|json| match serde_json::from_str::<Timings>(&json) {
            Ok(timings) => Some(timings),
            Err(e) => {
                warn!("Ignoring malformed timings: {}", e);
                None
            }
        })
        .unwrap_or_default();
    let theme_key = dom
        .setting(DATA_THEME_KEY)
        .unwrap_or_else(|| DEFAULT_THEME_KEY.to_string());

    let storage = LocalStorage::open();
    let theme = Theme::load(&storage, &theme_key);

    let triggers: Vec<usize> = dom.flyout_triggers.iter().map(|(index, _)| *index).collect();
    let mut controller = DisclosureController::from_triggers(triggers, timings, theme);
    if let Some((endpoint, param)) = dom.search.as_ref().and_then(|search| search.target()) {
        controller = controller.with_search(endpoint, param);
    }
    if let Some(width) = viewport_width() {
        controller = controller.with_viewport(width);
    }

    let live_reload = dom
        .document
        .body()
        .and_then(|body| body.get_attribute(LIVE_RELOAD_ATTR))
        .is_some_and(|value| value == "true");

    let driver = DomDriver::new(controller, storage, theme_key, dom);
    bindings::bind(&driver);
    driver.render();
    log!("ionsnav header ready ({} theme)", theme);

    if live_reload {
        live::follow("/api/events");
    }
}
