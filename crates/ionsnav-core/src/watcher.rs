//! File watcher for menu and asset changes
//!
//! Uses notify-debouncer-mini so editors that write a file in several
//! steps trigger a single reload.

use crate::error::CoreError;
use crate::event::NavEvent;
use crate::store::MenuStore;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, DebouncedEvent, Debouncer};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, trace};

/// Configuration for the file watcher
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Quiet period before a burst of changes is reported
    pub debounce_delay: Duration,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            debounce_delay: Duration::from_millis(300),
        }
    }
}

/// What a changed path means for the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChangeKind {
    Menu,
    Assets,
}

/// Files the watcher reacts to
#[derive(Debug, Clone, Default)]
pub struct WatchTargets {
    menu: Option<PathBuf>,
    assets: Vec<PathBuf>,
}

impl WatchTargets {
    /// Menu file plus every asset candidate, so a newly created stylesheet
    /// or logo is picked up too
    pub fn for_store(store: &MenuStore) -> Self {
        let config = store.config();
        let assets = config
            .stylesheet_paths
            .iter()
            .chain(&config.logo_paths)
            .map(|p| config.resolve(p))
            .collect();
        Self {
            menu: store.menu_path(),
            assets,
        }
    }

    pub fn new(menu: Option<PathBuf>, assets: Vec<PathBuf>) -> Self {
        Self { menu, assets }
    }

    /// Directories to watch (non-recursively)
    pub fn directories(&self) -> BTreeSet<PathBuf> {
        self.menu
            .iter()
            .chain(&self.assets)
            .filter_map(|p| p.parent())
            .map(|dir| {
                if dir.as_os_str().is_empty() {
                    PathBuf::from(".")
                } else {
                    dir.to_path_buf()
                }
            })
            .filter(|dir| dir.is_dir())
            .collect()
    }

    pub fn classify(&self, path: &Path) -> Option<ChangeKind> {
        if self.menu.as_deref().is_some_and(|menu| same_file(menu, path)) {
            return Some(ChangeKind::Menu);
        }
        if self.assets.iter().any(|asset| same_file(asset, path)) {
            return Some(ChangeKind::Assets);
        }
        None
    }
}

/// Compare paths as the watcher reports them (absolute) with configured ones
fn same_file(configured: &Path, reported: &Path) -> bool {
    if configured == reported {
        return true;
    }
    match (configured.parent().and_then(|p| p.canonicalize().ok()), reported.parent()) {
        (Some(dir), Some(reported_dir)) => {
            let reported_dir = reported_dir
                .canonicalize()
                .unwrap_or_else(|_| reported_dir.to_path_buf());
            dir == reported_dir && configured.file_name() == reported.file_name()
        }
        _ => false,
    }
}

/// Watches the menu file and asset candidates, reloading the store
pub struct MenuWatcher {
    _debouncer: Debouncer<notify::RecommendedWatcher>,

    /// Shutdown signal
    shutdown_tx: mpsc::Sender<()>,
}

impl MenuWatcher {
    pub async fn start(store: Arc<MenuStore>, config: WatcherConfig) -> Result<Self, CoreError> {
        let targets = WatchTargets::for_store(&store);
        let (event_tx, mut event_rx) = mpsc::channel::<DebounceEventResult>(32);
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let mut debouncer = new_debouncer(config.debounce_delay, move |res: DebounceEventResult| {
            let _ = event_tx.blocking_send(res);
        })
        .map_err(watch_error)?;

        for dir in targets.directories() {
            debouncer
                .watcher()
                .watch(&dir, RecursiveMode::NonRecursive)
                .map_err(watch_error)?;
            debug!(path = %dir.display(), "Watching directory");
        }

        info!(menu = ?targets.menu, "Menu watcher started");

        let event_bus = store.event_bus().clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    Some(result) = event_rx.recv() => {
                        match result {
                            Ok(events) => {
                                for kind in Self::changes(&events, &targets) {
                                    debug!(?kind, "Reloading after file change");
                                    match kind {
                                        ChangeKind::Menu => { store.reload_menu().await; }
                                        ChangeKind::Assets => { store.reload_assets().await; }
                                    }
                                }
                            }
                            Err(e) => {
                                error!(error = %e, "File watcher error");
                                event_bus.publish(NavEvent::WatcherError(e.to_string()));
                            }
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        info!("Menu watcher shutting down");
                        break;
                    }
                }
            }
        });

        Ok(Self {
            _debouncer: debouncer,
            shutdown_tx,
        })
    }

    /// Distinct reloads needed for one debounced batch
    fn changes(events: &[DebouncedEvent], targets: &WatchTargets) -> BTreeSet<ChangeKind> {
        events
            .iter()
            .filter_map(|event| {
                trace!(path = %event.path.display(), "Processing file event");
                targets.classify(&event.path)
            })
            .collect()
    }

    /// Stop the watcher
    pub async fn stop(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

fn watch_error(e: notify::Error) -> CoreError {
    CoreError::WatchError {
        message: e.to_string(),
        source: Some(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify_debouncer_mini::DebouncedEventKind;
    use tempfile::TempDir;

    fn event(path: PathBuf) -> DebouncedEvent {
        DebouncedEvent {
            path,
            kind: DebouncedEventKind::Any,
        }
    }

    #[test]
    fn test_classify_paths() {
        let targets = WatchTargets::new(
            Some(PathBuf::from("/srv/site/menu.json")),
            vec![PathBuf::from("/srv/site/assets/ionsnav.css")],
        );
        assert_eq!(
            targets.classify(Path::new("/srv/site/menu.json")),
            Some(ChangeKind::Menu)
        );
        assert_eq!(
            targets.classify(Path::new("/srv/site/assets/ionsnav.css")),
            Some(ChangeKind::Assets)
        );
        assert_eq!(targets.classify(Path::new("/srv/site/README.md")), None);
    }

    #[test]
    fn test_batch_collapses_to_distinct_reloads() {
        let dir = TempDir::new().unwrap();
        let menu = dir.path().join("menu.yaml");
        let css = dir.path().join("ionsnav.css");
        let targets = WatchTargets::new(Some(menu.clone()), vec![css.clone()]);

        let events = vec![
            event(menu.clone()),
            event(menu),
            event(dir.path().join("other.txt")),
            event(css),
        ];
        let changes = MenuWatcher::changes(&events, &targets);
        assert_eq!(
            changes.into_iter().collect::<Vec<_>>(),
            vec![ChangeKind::Menu, ChangeKind::Assets]
        );
    }

    #[test]
    fn test_directories_skip_missing() {
        let dir = TempDir::new().unwrap();
        let targets = WatchTargets::new(
            Some(dir.path().join("menu.json")),
            vec![
                dir.path().join("ionsnav.css"),
                dir.path().join("missing").join("logo.svg"),
            ],
        );
        let dirs = targets.directories();
        assert_eq!(dirs.len(), 1);
        assert!(dirs.contains(dir.path()));
    }
}
