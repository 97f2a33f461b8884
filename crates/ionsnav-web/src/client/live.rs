//! Live reload of the demo page when the menu or assets change

use leptos::logging::{log, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventSource};

/// Server events that make the rendered header stale
const RELOAD_EVENTS: [&str; 2] = ["menu_reloaded", "assets_changed"];

/// Follow `/api/events` and reload the page on relevant changes
pub fn follow(url: &str) {
    let source = match EventSource::new(url) {
        Ok(source) => source,
        Err(e) => {
            warn!("Live reload unavailable: {:?}", e);
            return;
        }
    };

    let on_change = Closure::wrap(Box::new(move |event: Event| {
        log!("{} received, reloading", event.type_());
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().reload() {
                warn!("Reload failed: {:?}", e);
            }
        }
    }) as Box<dyn FnMut(Event)>);

    for kind in RELOAD_EVENTS {
        if let Err(e) =
            source.add_event_listener_with_callback(kind, on_change.as_ref().unchecked_ref())
        {
            warn!("Could not listen for {}: {:?}", kind, e);
        }
    }
    on_change.forget();
}
