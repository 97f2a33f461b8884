//! Menu renderer
//!
//! Pure functions of a [`MenuTree`] producing [`Markup`] for the three
//! presentations of the menu. Each fragment is built independently; none
//! of them shares state with another.

mod desktop;
mod flyout;
mod header;
pub mod icons;
mod mobile;
pub mod selectors;

pub use header::{HeaderContext, HeaderView, LogoSource, SearchSettings, StylesheetSource};

use crate::error::MenuError;
use crate::label::format_label;
use crate::models::{MenuNode, MenuTree};
use maud::{html, Markup};

/// Renders the menu tree into markup fragments
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    tree: &'a MenuTree,
}

impl<'a> Renderer<'a> {
    pub fn new(tree: &'a MenuTree) -> Self {
        Self { tree }
    }

    pub fn tree(&self) -> &'a MenuTree {
        self.tree
    }

    /// Desktop top bar
    pub fn desktop_bar(&self) -> Markup {
        desktop::render(self.tree)
    }

    /// Flyout content for the top-level item at `index`
    ///
    /// Returns `Ok(None)` for leaves and search markers, which have no flyout.
    pub fn flyout_content(&self, index: usize) -> Result<Option<Markup>, MenuError> {
        let node = self.tree.get(index).ok_or(MenuError::IndexOutOfRange {
            index,
            len: self.tree.len(),
        })?;
        if node.is_search_marker || node.is_leaf() {
            return Ok(None);
        }
        Ok(Some(flyout::panel(node, index)))
    }

    /// Every flyout panel, inactive, in menu order
    pub fn flyout_panels(&self) -> Markup {
        html! {
            @for index in self.flyout_indices() {
                @if let Some(node) = self.tree.get(index) {
                    (flyout::panel(node, index))
                }
            }
        }
    }

    /// Mobile accordion
    pub fn mobile_accordion(&self) -> Markup {
        mobile::render(self.tree)
    }

    /// Positions of top-level items that open a flyout
    pub fn flyout_indices(&self) -> Vec<usize> {
        flyout_indices(self.tree)
    }
}

/// Positions of top-level items that open a flyout
pub fn flyout_indices(tree: &MenuTree) -> Vec<usize> {
    tree.navigable()
        .filter(|(_, node)| node.has_children())
        .map(|(index, _)| index)
        .collect()
}

/// Leaf link shared by every presentation
fn nav_link(node: &MenuNode, class: &str) -> Markup {
    html! {
        a.(class) href=(node.url) data-nav-link="" { (format_label(&node.name)) }
    }
}

/// Values of every `name="…"` attribute in `html`, in document order
#[cfg(test)]
pub(crate) fn attr_values(html: &str, name: &str) -> Vec<String> {
    let needle = format!(" {name}=\"");
    html.match_indices(&needle)
        .filter_map(|(at, _)| {
            let rest = &html[at + needle.len()..];
            rest.find('"').map(|end| rest[..end].to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flyout_content_out_of_range() {
        let tree = MenuTree::fallback();
        let renderer = Renderer::new(&tree);
        assert!(matches!(
            renderer.flyout_content(9),
            Err(MenuError::IndexOutOfRange { index: 9, len: 3 })
        ));
    }

    #[test]
    fn test_leaf_has_no_flyout() {
        let tree = MenuTree::fallback();
        assert!(Renderer::new(&tree).flyout_content(0).unwrap().is_none());
    }

    #[test]
    fn test_nav_link_escapes_url() {
        let node = MenuNode::leaf("Go", "/x?a=1&b=\"><script>");
        let html = nav_link(&node, "nav-link").into_string();
        assert!(html.contains("href=\"/x?a=1&amp;b=&quot;&gt;&lt;script&gt;\""));
        assert!(!html.contains("<script>"));
        assert_eq!(attr_values(&html, "data-nav-link"), vec![""]);
    }

    #[test]
    fn test_attr_values_in_document_order() {
        let html = r#"<li id="a"><span data-id="x"></span></li><li id="b"></li>"#;
        assert_eq!(attr_values(html, "id"), vec!["a", "b"]);
    }
}
