//! Menu store with parking_lot::RwLock
//!
//! Holds the current menu tree and resolved assets. Readers take cheap
//! clones; reloads swap the whole value under a short write lock.

use crate::assets::{AssetResolver, Assets};
use crate::config::NavConfig;
use crate::error::{DegradedState, LoadReport};
use crate::event::{EventBus, NavEvent};
use crate::loader::{MenuLoader, MENU_SOURCE};
use ionsnav_menu::search::extract_query;
use ionsnav_menu::{HeaderContext, HeaderView, Markup, MenuTree};
use parking_lot::RwLock;
use std::path::PathBuf;
use tracing::{debug, info};

/// Central store for the header
///
/// Thread-safe; shared behind an `Arc` between the HTTP handlers and the
/// file watcher.
pub struct MenuStore {
    config: NavConfig,

    /// Current menu (fallback until the first load)
    tree: RwLock<MenuTree>,

    /// Resolved stylesheet and logo
    assets: RwLock<Assets>,

    /// Report of the most recent load
    last_report: RwLock<LoadReport>,

    /// Event bus for notifying subscribers
    event_bus: EventBus,

    degraded_state: RwLock<DegradedState>,
}

impl MenuStore {
    pub fn new(config: NavConfig) -> Self {
        Self {
            config,
            tree: RwLock::new(MenuTree::fallback()),
            assets: RwLock::new(Assets::default()),
            last_report: RwLock::new(LoadReport::new()),
            event_bus: EventBus::default_capacity(),
            degraded_state: RwLock::new(DegradedState::Healthy),
        }
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Get the event bus for subscribing to updates
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn degraded_state(&self) -> DegradedState {
        self.degraded_state.read().clone()
    }

    pub fn tree(&self) -> MenuTree {
        self.tree.read().clone()
    }

    pub fn assets(&self) -> Assets {
        self.assets.read().clone()
    }

    pub fn last_report(&self) -> LoadReport {
        self.last_report.read().clone()
    }

    /// Absolute path of the configured menu file
    pub fn menu_path(&self) -> Option<PathBuf> {
        self.config.menu_file()
    }

    /// Load menu and assets, never failing
    pub async fn initial_load(&self) -> LoadReport {
        info!(base_dir = %self.config.base_dir.display(), "Starting initial load");

        let mut report = LoadReport::new();
        self.load_menu(&mut report).await;
        self.load_assets(&mut report).await;
        self.finish(&report);

        self.event_bus.publish(NavEvent::LoadCompleted);

        let (warnings, errors, fatal) = report.error_count();
        info!(
            menu_loaded = report.menu_loaded,
            fallback_menu = report.used_fallback_menu,
            stylesheet_inlined = report.stylesheet_inlined,
            logo_placeholder = report.logo_placeholder,
            warnings,
            errors,
            fatal,
            "Initial load complete"
        );
        report
    }

    /// Re-read the menu file after a change on disk
    pub async fn reload_menu(&self) -> LoadReport {
        let mut report = LoadReport::new();
        self.load_menu(&mut report).await;

        // Asset state is unchanged; carry it into the new report
        {
            let previous = self.last_report.read();
            report.stylesheet_inlined = previous.stylesheet_inlined;
            report.logo_placeholder = previous.logo_placeholder;
            report.errors.extend(
                previous
                    .errors
                    .iter()
                    .filter(|e| e.source != MENU_SOURCE)
                    .cloned(),
            );
        }
        self.finish(&report);

        let items = self.tree.read().len();
        self.event_bus.publish(NavEvent::MenuReloaded { items });
        report
    }

    /// Re-resolve stylesheet and logo after a change on disk
    pub async fn reload_assets(&self) -> LoadReport {
        let mut report = LoadReport::new();
        self.load_assets(&mut report).await;
        {
            let previous = self.last_report.read();
            report.menu_loaded = previous.menu_loaded;
            report.used_fallback_menu = previous.used_fallback_menu;
            report.pruned_nodes = previous.pruned_nodes;
            let mut errors: Vec<_> = previous
                .errors
                .iter()
                .filter(|e| e.source == MENU_SOURCE)
                .cloned()
                .collect();
            errors.append(&mut report.errors);
            report.errors = errors;
        }
        self.finish(&report);

        self.event_bus.publish(NavEvent::AssetsChanged);
        report
    }

    async fn load_menu(&self, report: &mut LoadReport) {
        let path = self.menu_path();
        let tree = MenuLoader::new()
            .load_graceful(path.as_deref(), report)
            .await;
        *self.tree.write() = tree;
        debug!("Menu swapped in");
    }

    async fn load_assets(&self, report: &mut LoadReport) {
        let assets = AssetResolver::new(&self.config).resolve(report).await;
        *self.assets.write() = assets;
    }

    fn finish(&self, report: &LoadReport) {
        *self.degraded_state.write() = report.degraded_state();
        *self.last_report.write() = report.clone();
    }

    // ===================
    // Rendering
    // ===================

    /// Header context for one request, pre-filling the search input from
    /// the incoming query parameters
    pub fn header_context<I, K, V>(&self, params: I) -> HeaderContext
    where
        I: IntoIterator<Item = (K, V)> + Clone,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let search = self.config.search_settings();
        let names: Vec<&str> = search.query_params.iter().map(String::as_str).collect();
        let query = extract_query(params, &names);

        let assets = self.assets.read();
        HeaderContext {
            brand: self.config.brand.clone(),
            home_url: self.config.home_url.clone(),
            logo: assets.logo_source(&self.config.logo_href, &self.config.initials()),
            stylesheet: Some(assets.stylesheet_source(&self.config.stylesheet_href)),
            search,
            query,
            signup_url: self.config.signup_url.clone(),
            theme: Default::default(),
            timings: self.config.timings.clone(),
            theme_key: self.config.theme_storage_key.clone(),
        }
    }

    /// Render the complete header for one request
    pub fn render_header<I, K, V>(&self, params: I) -> Markup
    where
        I: IntoIterator<Item = (K, V)> + Clone,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let ctx = self.header_context(params);
        let tree = self.tree.read();
        HeaderView::new(&tree, &ctx).render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const NO_PARAMS: [(&str, &str); 0] = [];

    #[tokio::test]
    async fn test_store_starts_with_fallback() {
        let store = MenuStore::new(NavConfig::default());
        assert_eq!(store.tree(), MenuTree::fallback());
        assert!(store.degraded_state().is_healthy());
    }

    #[tokio::test]
    async fn test_initial_load_publishes_completion() {
        let dir = TempDir::new().unwrap();
        let store = MenuStore::new(NavConfig::default().with_base_dir(dir.path()));
        let mut rx = store.event_bus().subscribe();

        let report = store.initial_load().await;
        assert!(report.used_fallback_menu);
        assert_eq!(rx.recv().await.unwrap(), NavEvent::LoadCompleted);
        assert_eq!(store.degraded_state().status(), "degraded");
    }

    #[tokio::test]
    async fn test_reload_picks_up_new_menu() {
        let dir = TempDir::new().unwrap();
        let menu = dir.path().join("menu.json");
        std::fs::write(&menu, r#"[{"name": "One", "url": "/1"}]"#).unwrap();

        let config = NavConfig {
            menu_path: Some(PathBuf::from("menu.json")),
            ..NavConfig::default()
        }
        .with_base_dir(dir.path());
        let store = MenuStore::new(config);
        store.initial_load().await;
        assert_eq!(store.tree().len(), 1);

        let mut rx = store.event_bus().subscribe();
        std::fs::write(
            &menu,
            r#"[{"name": "One", "url": "/1"}, {"name": "Two", "url": "/2"}]"#,
        )
        .unwrap();
        let report = store.reload_menu().await;

        assert!(report.menu_loaded);
        assert!(report.stylesheet_inlined, "asset state carried over");
        assert_eq!(store.tree().len(), 2);
        assert_eq!(rx.recv().await.unwrap(), NavEvent::MenuReloaded { items: 2 });
    }

    #[tokio::test]
    async fn test_partial_reloads_keep_other_warnings() {
        let dir = TempDir::new().unwrap();
        let config = NavConfig {
            menu_path: Some(PathBuf::from("missing.json")),
            ..NavConfig::default()
        }
        .with_base_dir(dir.path());
        let store = MenuStore::new(config);
        let initial = store.initial_load().await;
        let sources = |report: &LoadReport| {
            report
                .errors
                .iter()
                .map(|e| e.source.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(sources(&initial), ["menu", "stylesheet", "logo"]);

        let after_menu = store.reload_menu().await;
        assert_eq!(sources(&after_menu), sources(&initial));
        assert_eq!(after_menu.error_count(), initial.error_count());
        assert_eq!(store.degraded_state(), initial.degraded_state());

        let after_assets = store.reload_assets().await;
        assert_eq!(sources(&after_assets), sources(&initial));
        assert_eq!(store.last_report().error_count(), initial.error_count());
    }

    #[tokio::test]
    async fn test_render_header_prefills_query() {
        let dir = TempDir::new().unwrap();
        let store = MenuStore::new(NavConfig::default().with_base_dir(dir.path()));
        store.initial_load().await;

        let html = store
            .render_header([("s", "  ions  "), ("page", "2")])
            .into_string();
        assert!(html.contains("value=\"ions\""));
        assert!(html.starts_with("<style>"));

        let html = store.render_header(NO_PARAMS).into_string();
        assert!(!html.contains("value="));
    }
}
