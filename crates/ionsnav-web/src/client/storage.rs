//! `window.localStorage` behind the [`KeyValueStore`] seam

use ionsnav_menu::KeyValueStore;
use leptos::logging::warn;
use web_sys::Storage;

/// Browser storage; private browsing modes may refuse access, in which
/// case reads miss and writes are dropped
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|window| match window.local_storage() {
            Ok(storage) => storage,
            Err(e) => {
                warn!("localStorage unavailable: {:?}", e);
                None
            }
        });
        Self { storage }
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.set_item(key, value) {
                warn!("Failed to persist {}: {:?}", key, e);
            }
        }
    }
}
