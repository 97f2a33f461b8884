//! Integration tests for loading, fallbacks and live reload

use ionsnav_core::{MenuStore, MenuWatcher, NavConfig, NavEvent, WatcherConfig};
use ionsnav_menu::MenuTree;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const NO_PARAMS: [(&str, &str); 0] = [];

fn config_in(dir: &TempDir, menu: &str) -> NavConfig {
    NavConfig {
        menu_path: Some(PathBuf::from(menu)),
        ..NavConfig::default()
    }
    .with_base_dir(dir.path())
}

#[tokio::test]
async fn test_absent_menu_renders_fallback() {
    let dir = TempDir::new().unwrap();
    let store = MenuStore::new(config_in(&dir, "does-not-exist.json"));
    let report = store.initial_load().await;

    assert!(report.used_fallback_menu);
    assert!(!report.has_fatal_errors());
    assert_eq!(store.tree(), MenuTree::fallback());

    let html = store.render_header(NO_PARAMS).into_string();
    for (name, url) in [("Home", "/"), ("About", "/about"), ("Contact", "/contact")] {
        assert!(html.contains(name), "missing {name}");
        assert!(html.contains(&format!("href=\"{url}\"")), "missing {url}");
    }
}

#[tokio::test]
async fn test_missing_assets_degrade_but_render() {
    let dir = TempDir::new().unwrap();
    let store = MenuStore::new(NavConfig::default().with_base_dir(dir.path()));
    store.initial_load().await;

    let html = store.render_header(NO_PARAMS).into_string();
    // Built-in styles inlined, placeholder logo embedded
    assert!(html.starts_with("<style>"));
    assert!(html.contains("data:image/svg+xml,"));
    assert!(!html.contains("<link rel=\"stylesheet\""));
}

#[tokio::test]
async fn test_assets_on_disk_are_linked() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("ionsnav.css"), ".x{}").unwrap();
    std::fs::write(dir.path().join("logo.svg"), "<svg/>").unwrap();

    let store = MenuStore::new(NavConfig::default().with_base_dir(dir.path()));
    let report = store.initial_load().await;
    assert!(!report.stylesheet_inlined);
    assert!(!report.logo_placeholder);

    let html = store.render_header(NO_PARAMS).into_string();
    assert!(html.starts_with("<link rel=\"stylesheet\" href=\"/assets/ionsnav.css\">"));
    assert!(html.contains("src=\"/assets/logo\""));
}

#[tokio::test]
async fn test_watcher_reloads_changed_menu() {
    let dir = TempDir::new().unwrap();
    let menu = dir.path().join("menu.json");
    std::fs::write(&menu, r#"[{"name": "One", "url": "/1"}]"#).unwrap();

    let store = Arc::new(MenuStore::new(config_in(&dir, "menu.json")));
    store.initial_load().await;
    let mut rx = store.event_bus().subscribe();

    let watcher = MenuWatcher::start(
        store.clone(),
        WatcherConfig {
            debounce_delay: Duration::from_millis(50),
        },
    )
    .await
    .unwrap();

    std::fs::write(
        &menu,
        r#"[{"name": "One", "url": "/1"}, {"name": "Two", "url": "/2"}]"#,
    )
    .unwrap();

    let event = tokio::time::timeout(Duration::from_secs(10), async {
        loop {
            match rx.recv().await {
                // A half-written file may reload as the fallback first
                Ok(event @ NavEvent::MenuReloaded { items: 2 }) => break event,
                Ok(_) => continue,
                Err(e) => panic!("event bus closed: {e}"),
            }
        }
    })
    .await
    .expect("no reload within 10s");

    assert_eq!(event, NavEvent::MenuReloaded { items: 2 });
    assert_eq!(store.tree().items()[1].name, "Two");
    watcher.stop().await;
}

#[tokio::test]
async fn test_demo_configuration_loads_cleanly() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/ionsnav.toml");
    let (config, source) = NavConfig::discover(Some(&path)).unwrap();
    assert_eq!(source.as_deref(), Some(path.as_path()));
    assert_eq!(config.signup_url.as_deref(), Some("/signup"));

    let store = MenuStore::new(config);
    let report = store.initial_load().await;
    assert!(report.menu_loaded);
    assert_eq!(report.pruned_nodes, 0);
    assert_eq!(store.tree().navigable().count(), 4);
    assert!(store.tree().has_search_marker());
}
