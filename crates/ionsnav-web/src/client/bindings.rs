//! DOM listeners translating gestures into controller events

use super::driver::DomDriver;
use ionsnav_menu::UiEvent;
use leptos::leptos_dom::helpers::window_event_listener;
use leptos::logging::warn;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, MouseEvent};

/// Attach every listener the header needs
pub fn bind(driver: &Rc<DomDriver>) {
    let dom = &driver.dom;

    for (index, item) in &dom.flyout_triggers {
        let index = *index;
        on_raw(driver, item, "mouseenter", move |_| Some(UiEvent::PointerEnterTopItem { index }));
        on_raw(driver, item, "mouseleave", |_| Some(UiEvent::PointerLeave));
    }
    if let Some(region) = &dom.flyout_region {
        on_raw(driver, region, "mouseenter", |_| Some(UiEvent::PointerEnterFlyout));
        on_raw(driver, region, "mouseleave", |_| Some(UiEvent::PointerLeave));
    }
    for (id, toggle) in &dom.flyout_toggles {
        let id = id.clone();
        on(driver, toggle, "click", move |_| Some(UiEvent::FlyoutBranchClicked(id.clone())));
    }

    if let Some(button) = &dom.mobile_button {
        on(driver, button, "click", |_| Some(UiEvent::MobileMenuButtonClicked));
    }
    if let Some(close) = &dom.mobile_close {
        on(driver, close, "click", |_| Some(UiEvent::MobileMenuCloseClicked));
    }
    if let Some(overlay) = &dom.mobile_overlay {
        let overlay_target: EventTarget = overlay.clone().into();
        on_raw(driver, overlay, "click", move |event| {
            // Clicks inside the panel bubble up here too
            let on_backdrop = event.target().is_some_and(|target| target == overlay_target);
            on_backdrop.then_some(UiEvent::ClickOutsideMobilePanel)
        });
    }
    for (id, toggle) in &dom.mobile_toggles {
        let id = id.clone();
        on(driver, toggle, "click", move |_| Some(UiEvent::MobileBranchClicked(id.clone())));
    }

    for link in &dom.nav_links {
        let href_source = link.clone();
        on_raw(driver, link, "click", move |event| {
            if opens_elsewhere(event) {
                return None;
            }
            event.prevent_default();
            let url = href_source.get_attribute("href").unwrap_or_default();
            Some(UiEvent::LeafClicked { url })
        });
    }

    if let Some(search) = &dom.search {
        on(driver, &search.trigger, "click", |_| Some(UiEvent::SearchTriggerClicked));
        on(driver, &search.close, "click", |_| Some(UiEvent::SearchCloseClicked));
        if let Some(backdrop) = &search.backdrop {
            on(driver, backdrop, "click", |_| Some(UiEvent::SearchBackdropClicked));
        }
        let input = search.input.clone();
        on(driver, &search.form, "submit", move |_| {
            Some(UiEvent::SearchSubmitted { input: input.value() })
        });
    }

    if let Some(toggle) = &dom.theme_toggle {
        on(driver, toggle, "click", |_| Some(UiEvent::ThemeToggleClicked));
    }

    let keydown_driver = Rc::clone(driver);
    let _ = window_event_listener(leptos::ev::keydown, move |event| {
        if event.key() == "Escape" {
            keydown_driver.dispatch(UiEvent::EscapePressed);
        }
    });

    let resize_driver = Rc::clone(driver);
    let _ = window_event_listener(leptos::ev::resize, move |_| {
        if let Some(width) = viewport_width() {
            resize_driver.dispatch(UiEvent::ViewportResized { width });
        }
    });
}

/// Current `window.innerWidth` in CSS pixels
pub fn viewport_width() -> Option<u32> {
    let width = web_sys::window()?.inner_width().ok()?.as_f64()?;
    Some(width.max(0.0) as u32)
}

/// Listener that prevents the default action and dispatches the mapped event
fn on<F>(driver: &Rc<DomDriver>, element: &Element, kind: &str, map: F)
where
    F: Fn(&Event) -> Option<UiEvent> + 'static,
{
    on_raw(driver, element, kind, move |event| {
        event.prevent_default();
        map(event)
    });
}

/// Listener that leaves the default action to `map`
fn on_raw<F>(driver: &Rc<DomDriver>, element: &Element, kind: &str, map: F)
where
    F: Fn(&Event) -> Option<UiEvent> + 'static,
{
    let driver = Rc::clone(driver);
    let listener = Closure::wrap(Box::new(move |event: Event| {
        if let Some(ui_event) = map(&event) {
            driver.dispatch(ui_event);
        }
    }) as Box<dyn FnMut(Event)>);

    if let Err(e) =
        element.add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())
    {
        warn!("Could not listen for {}: {:?}", kind, e);
    }
    // Listeners live as long as the page
    listener.forget();
}

/// Modified clicks open a new tab or window; leave them to the browser
fn opens_elsewhere(event: &Event) -> bool {
    event.dyn_ref::<MouseEvent>().is_some_and(|click| {
        click.meta_key() || click.ctrl_key() || click.shift_key() || click.button() != 0
    })
}
