//! Menu tree models
//!
//! The menu is a small, hand-authored forest of `{name, url, children}`
//! records, at most three levels deep.

use serde::{Deserialize, Serialize};

/// Maximum number of levels rendered (top level, children, grandchildren)
pub const MAX_DEPTH: usize = 3;

/// URL used by entries that should not navigate anywhere
pub const PLACEHOLDER_URL: &str = "#";

/// A single entry in the menu tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuNode {
    /// Display name (may contain the "ION" highlight substring)
    pub name: String,

    /// Navigation target; `"#"` means "no navigation"
    #[serde(default = "placeholder_url")]
    pub url: String,

    /// Ordered children (empty for leaves)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuNode>,

    /// Marks the slot where the search control lives; never rendered as a link
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_search_marker: bool,
}

fn placeholder_url() -> String {
    PLACEHOLDER_URL.to_string()
}

impl MenuNode {
    /// Create a leaf entry
    pub fn leaf(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            children: Vec::new(),
            is_search_marker: false,
        }
    }

    /// Create a branch entry
    pub fn branch(
        name: impl Into<String>,
        url: impl Into<String>,
        children: Vec<MenuNode>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            children,
            is_search_marker: false,
        }
    }

    /// Create the search slot marker
    pub fn search_marker() -> Self {
        Self {
            name: "Search".to_string(),
            url: PLACEHOLDER_URL.to_string(),
            children: Vec::new(),
            is_search_marker: true,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// True when clicking this entry must not navigate
    pub fn is_placeholder(&self) -> bool {
        is_placeholder_url(&self.url)
    }

    /// Depth of the subtree rooted here (a leaf has depth 1)
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(MenuNode::depth).max().unwrap_or(0)
    }
}

/// `"#"` (or an empty string) is the "stay on this page" placeholder
pub fn is_placeholder_url(url: &str) -> bool {
    let url = url.trim();
    url.is_empty() || url == PLACEHOLDER_URL
}

/// Subtree removed by [`MenuTree::normalized`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrunedNode {
    /// Names from the top-level ancestor down to the pruned node
    pub path: Vec<String>,
    /// Number of nodes dropped, including the pruned node itself
    pub dropped: usize,
}

impl PrunedNode {
    pub fn display_path(&self) -> String {
        self.path.join(" > ")
    }
}

/// Ordered forest of top-level menu entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuTree {
    items: Vec<MenuNode>,
}

impl MenuTree {
    pub fn new(items: Vec<MenuNode>) -> Self {
        Self { items }
    }

    /// Built-in menu used when no menu source is available
    pub fn fallback() -> Self {
        Self::new(vec![
            MenuNode::leaf("Home", "/"),
            MenuNode::leaf("About", "/about"),
            MenuNode::leaf("Contact", "/contact"),
        ])
    }

    /// All top-level entries, search markers included
    pub fn items(&self) -> &[MenuNode] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&MenuNode> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Top-level entries that render as navigation, with their original position
    pub fn navigable(&self) -> impl Iterator<Item = (usize, &MenuNode)> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, node)| !node.is_search_marker)
    }

    pub fn has_search_marker(&self) -> bool {
        self.items.iter().any(|node| node.is_search_marker)
    }

    /// Deepest level present in the tree (0 for an empty tree)
    pub fn depth(&self) -> usize {
        self.items.iter().map(MenuNode::depth).max().unwrap_or(0)
    }

    /// Total number of nodes, search markers included
    pub fn node_count(&self) -> usize {
        fn count(node: &MenuNode) -> usize {
            1 + node.children.iter().map(count).sum::<usize>()
        }
        self.items.iter().map(count).sum()
    }

    /// Drop every level below `max_depth`, reporting what was removed
    ///
    /// Search markers nested below the top level are meaningless and are
    /// dropped as well.
    pub fn normalized(mut self, max_depth: usize) -> (Self, Vec<PrunedNode>) {
        let mut pruned = Vec::new();
        for node in &mut self.items {
            let mut path = vec![node.name.clone()];
            prune(node, 1, max_depth.max(1), &mut path, &mut pruned);
        }
        (self, pruned)
    }
}

fn prune(
    node: &mut MenuNode,
    level: usize,
    max_depth: usize,
    path: &mut Vec<String>,
    pruned: &mut Vec<PrunedNode>,
) {
    node.children.retain(|child| {
        if child.is_search_marker {
            let mut child_path = path.clone();
            child_path.push(child.name.clone());
            pruned.push(PrunedNode {
                path: child_path,
                dropped: 1,
            });
            false
        } else {
            true
        }
    });

    if level >= max_depth {
        for child in node.children.drain(..) {
            let mut child_path = path.clone();
            child_path.push(child.name.clone());
            pruned.push(PrunedNode {
                path: child_path,
                dropped: MenuTree::new(vec![child]).node_count(),
            });
        }
        return;
    }

    for child in &mut node.children {
        path.push(child.name.clone());
        prune(child, level + 1, max_depth, path, pruned);
        path.pop();
    }
}

impl From<Vec<MenuNode>> for MenuTree {
    fn from(items: Vec<MenuNode>) -> Self {
        Self::new(items)
    }
}
