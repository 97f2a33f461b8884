//! Menu file loader with graceful degradation

use crate::error::{CoreError, LoadError, LoadReport};
use ionsnav_menu::{MenuNode, MenuTree, MAX_DEPTH};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Report source for everything the menu loader records
pub const MENU_SOURCE: &str = "menu";

/// On-disk menu format, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuFormat {
    Json,
    Yaml,
    Toml,
}

impl MenuFormat {
    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(MenuFormat::Json),
            Some("yaml") | Some("yml") => Ok(MenuFormat::Yaml),
            Some("toml") => Ok(MenuFormat::Toml),
            _ => Err(CoreError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// TOML has no top-level arrays, so menus live under `items`
#[derive(Deserialize)]
struct TomlMenu {
    #[serde(default)]
    items: Vec<MenuNode>,
}

/// Parser for menu data files
pub struct MenuLoader;

impl Default for MenuLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parse menu text in the given format
    pub fn parse_str(
        &self,
        content: &str,
        format: MenuFormat,
        path: &Path,
    ) -> Result<MenuTree, CoreError> {
        match format {
            MenuFormat::Json => serde_json::from_str(content).map_err(|e| CoreError::JsonParse {
                path: path.to_path_buf(),
                message: e.to_string(),
                source: e,
            }),
            MenuFormat::Yaml => serde_yaml::from_str(content).map_err(|e| CoreError::YamlParse {
                path: path.to_path_buf(),
                message: e.to_string(),
                source: e,
            }),
            MenuFormat::Toml => toml::from_str::<TomlMenu>(content)
                .map(|menu| MenuTree::new(menu.items))
                .map_err(|e| CoreError::TomlParse {
                    path: path.to_path_buf(),
                    message: e.message().to_string(),
                    source: e,
                }),
        }
    }

    /// Read and parse a menu file
    pub async fn parse(&self, path: &Path) -> Result<MenuTree, CoreError> {
        let format = MenuFormat::from_path(path)?;
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CoreError::from_io(path, e))?;
        self.parse_str(&content, format, path)
    }

    /// Load the menu, falling back to the built-in one on any failure
    ///
    /// Levels below the grandchildren are pruned with one warning each.
    pub async fn load_graceful(&self, path: Option<&Path>, report: &mut LoadReport) -> MenuTree {
        let Some(path) = path else {
            debug!("No menu file configured, using built-in menu");
            report.used_fallback_menu = true;
            return MenuTree::fallback();
        };

        let tree = match self.parse(path).await {
            Ok(tree) => tree,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Menu unavailable, using built-in menu");
                let mut entry = LoadError::from_core_error(MENU_SOURCE, &e);
                if matches!(e, CoreError::FileNotFound { .. }) {
                    entry.severity = crate::error::ErrorSeverity::Warning;
                }
                report.add_error(entry);
                report.used_fallback_menu = true;
                return MenuTree::fallback();
            }
        };
        report.menu_loaded = true;

        let (tree, pruned) = tree.normalized(MAX_DEPTH);
        for node in &pruned {
            warn!(path = %node.display_path(), dropped = node.dropped, "Pruned menu entry");
            report.add_warning(
                MENU_SOURCE,
                format!(
                    "Dropped {} ({} node(s)): menus render at most {} levels",
                    node.display_path(),
                    node.dropped,
                    MAX_DEPTH
                ),
            );
            report.pruned_nodes += node.dropped;
        }

        if tree.navigable().next().is_none() {
            report.add_warning(MENU_SOURCE, format!("{} has no navigable items", path.display()));
        }

        info!(
            path = %path.display(),
            items = tree.len(),
            nodes = tree.node_count(),
            "Menu loaded"
        );
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorSeverity;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(MenuFormat::from_path(Path::new("m.JSON")).unwrap(), MenuFormat::Json);
        assert_eq!(MenuFormat::from_path(Path::new("m.yml")).unwrap(), MenuFormat::Yaml);
        assert_eq!(MenuFormat::from_path(Path::new("m.toml")).unwrap(), MenuFormat::Toml);
        assert!(matches!(
            MenuFormat::from_path(Path::new("menu.txt")),
            Err(CoreError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_parse_every_format() {
        let loader = MenuLoader::new();
        let path = PathBuf::from("menu");

        let json = r#"[{"name": "Research", "url": "/r", "children": [{"name": "Labs", "url": "/l"}]},
                       {"name": "", "isSearchMarker": true}]"#;
        let yaml = "- name: Research\n  url: /r\n  children:\n    - name: Labs\n      url: /l\n- name: ''\n  isSearchMarker: true\n";
        let toml = "[[items]]\nname = \"Research\"\nurl = \"/r\"\n[[items.children]]\nname = \"Labs\"\nurl = \"/l\"\n\n[[items]]\nname = \"\"\nisSearchMarker = true\n";

        for (content, format) in [
            (json, MenuFormat::Json),
            (yaml, MenuFormat::Yaml),
            (toml, MenuFormat::Toml),
        ] {
            let tree = loader.parse_str(content, format, &path).unwrap();
            assert_eq!(tree.len(), 2, "{format:?}");
            assert_eq!(tree.items()[0].children[0].name, "Labs");
            assert!(tree.has_search_marker());
        }
    }

    #[tokio::test]
    async fn test_unconfigured_menu_uses_fallback() {
        let mut report = LoadReport::new();
        let tree = MenuLoader::new().load_graceful(None, &mut report).await;
        assert_eq!(tree, MenuTree::fallback());
        assert!(report.used_fallback_menu);
        assert!(!report.has_errors());
    }

    #[tokio::test]
    async fn test_missing_file_is_a_warning() {
        let dir = TempDir::new().unwrap();
        let mut report = LoadReport::new();
        let tree = MenuLoader::new()
            .load_graceful(Some(&dir.path().join("menu.json")), &mut report)
            .await;

        assert_eq!(tree.len(), 3);
        assert!(report.used_fallback_menu);
        assert!(!report.menu_loaded);
        assert_eq!(report.errors[0].severity, ErrorSeverity::Warning);
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("menu.json");
        std::fs::write(&path, "[{").unwrap();

        let mut report = LoadReport::new();
        let tree = MenuLoader::new().load_graceful(Some(&path), &mut report).await;

        assert_eq!(tree, MenuTree::fallback());
        assert_eq!(report.error_count(), (0, 1, 0));
        assert!(report.errors[0].suggestion.is_some());
    }

    #[tokio::test]
    async fn test_deep_levels_are_pruned() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("menu.yaml");
        std::fs::write(
            &path,
            r#"
- name: A
  url: /a
  children:
    - name: B
      url: /b
      children:
        - name: C
          url: /c
          children:
            - name: D
              url: /d
"#,
        )
        .unwrap();

        let mut report = LoadReport::new();
        let tree = MenuLoader::new().load_graceful(Some(&path), &mut report).await;

        assert!(report.menu_loaded);
        assert_eq!(tree.depth(), 3);
        assert_eq!(report.pruned_nodes, 1);
        assert!(report.errors[0].message.contains("A > B > C > D"));
    }
}
