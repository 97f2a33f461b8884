//! Runs the disclosure controller against the live DOM

use super::dom::HeaderDom;
use super::storage::LocalStorage;
use ionsnav_menu::{DisclosureController, Effect, TimerId, UiEvent};
use leptos::leptos_dom::helpers::{set_timeout_with_handle, TimeoutHandle};
use leptos::logging::warn;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// One per page view; shared by every event listener
pub struct DomDriver {
    controller: RefCell<DisclosureController>,
    timers: RefCell<HashMap<TimerId, TimeoutHandle>>,
    storage: RefCell<LocalStorage>,
    theme_key: String,
    pub dom: HeaderDom,
}

impl DomDriver {
    pub fn new(
        controller: DisclosureController,
        storage: LocalStorage,
        theme_key: String,
        dom: HeaderDom,
    ) -> Rc<Self> {
        Rc::new(Self {
            controller: RefCell::new(controller),
            timers: RefCell::new(HashMap::new()),
            storage: RefCell::new(storage),
            theme_key,
            dom,
        })
    }

    /// Run one transition, carry out its effects, then redraw
    ///
    /// No borrow is held while effects run, so an effect that synchronously
    /// re-enters (a `themechange` listener clicking the toggle) is safe.
    pub fn dispatch(self: &Rc<Self>, event: UiEvent) {
        if let UiEvent::TimerFired(id) = &event {
            self.timers.borrow_mut().remove(id);
        }

        let effects = self.controller.borrow_mut().handle(event);
        for effect in effects {
            self.apply(effect);
        }
        self.render();
    }

    pub fn render(&self) {
        self.dom.project(self.controller.borrow().state());
    }

    fn apply(self: &Rc<Self>, effect: Effect) {
        match effect {
            Effect::Navigate(url) => self.dom.navigate(&url),
            Effect::FocusSearchInput => self.dom.focus_search(),
            Effect::PersistTheme(theme) => {
                theme.persist(&mut *self.storage.borrow_mut(), &self.theme_key);
            }
            Effect::ThemeChanged { theme, previous } => self.dom.announce_theme(theme, previous),
            Effect::Schedule { timer, delay } => {
                let driver = Rc::clone(self);
                let fire = move || driver.dispatch(UiEvent::TimerFired(timer));
                match set_timeout_with_handle(fire, delay) {
                    Ok(handle) => {
                        self.timers.borrow_mut().insert(timer, handle);
                    }
                    Err(e) => warn!("setTimeout failed for {:?}: {:?}", timer.kind, e),
                }
            }
            Effect::Cancel(timer) => {
                if let Some(handle) = self.timers.borrow_mut().remove(&timer) {
                    handle.clear();
                }
            }
        }
    }
}
