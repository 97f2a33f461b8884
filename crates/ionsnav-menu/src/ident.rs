//! Element identifiers for menu nodes
//!
//! One scheme is shared by the renderer and the client: an id is the
//! sanitised name plus the node's position among its siblings, prefixed
//! by the parent's id. Positions count every sibling, so two siblings
//! that sanitise to the same base still get distinct ids.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Base used when a name has no alphanumeric characters at all
const EMPTY_BASE: &str = "item";

/// Separator between a parent id and a child segment
const LEVEL_SEPARATOR: &str = "--";

/// Presentation a node id belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Desktop top bar
    Nav,
    /// Hover flyout panel
    Flyout,
    /// Mobile accordion
    Mobile,
}

impl Scope {
    pub fn prefix(&self) -> &'static str {
        match self {
            Scope::Nav => "nav",
            Scope::Flyout => "flyout",
            Scope::Mobile => "mobile",
        }
    }
}

/// Deterministic element id of a rendered node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Id of a top-level node
    pub fn root(scope: Scope, name: &str, position: usize) -> Self {
        Self(format!("{}-{}-{}", scope.prefix(), sanitize_base(name), position))
    }

    /// Id of a child of `self`
    pub fn child(&self, name: &str, position: usize) -> Self {
        Self(format!(
            "{}{}{}-{}",
            self.0,
            LEVEL_SEPARATOR,
            sanitize_base(name),
            position
        ))
    }

    /// Id of the region this node expands (its child list)
    pub fn region(&self) -> String {
        format!("{}-items", self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of levels encoded in the id (1 for top level)
    pub fn level(&self) -> usize {
        self.0.matches(LEVEL_SEPARATOR).count() + 1
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Lower-cased ASCII alphanumerics; everything else collapses to single `-`
pub fn sanitize_base(name: &str) -> String {
    let mut base = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !base.is_empty() {
                base.push('-');
            }
            pending_dash = false;
            base.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if base.is_empty() {
        EMPTY_BASE.to_string()
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_non_alphanumerics() {
        assert_eq!(sanitize_base("About Us"), "about-us");
        assert_eq!(sanitize_base("Connect.IONS"), "connect-ions");
        assert_eq!(sanitize_base("  R&D -- Labs! "), "r-d-labs");
        assert_eq!(sanitize_base("Café"), "caf");
    }

    #[test]
    fn test_sanitize_empty_name() {
        assert_eq!(sanitize_base("???"), "item");
        assert_eq!(sanitize_base(""), "item");
    }

    #[test]
    fn test_same_base_siblings_do_not_collide() {
        // "About Us" and "About-Us" sanitise to the same base
        let a = NodeId::root(Scope::Mobile, "About Us", 0);
        let b = NodeId::root(Scope::Mobile, "About-Us", 1);
        assert_ne!(a, b);
        assert_eq!(a.as_str(), "mobile-about-us-0");
        assert_eq!(b.as_str(), "mobile-about-us-1");
    }

    #[test]
    fn test_same_name_under_different_parents_does_not_collide() {
        let first = NodeId::root(Scope::Flyout, "Programs", 0).child("Overview", 0);
        let second = NodeId::root(Scope::Flyout, "Programs", 1).child("Overview", 0);
        assert_ne!(first, second);
        assert_eq!(first.as_str(), "flyout-programs-0--overview-0");
    }

    #[test]
    fn test_levels_and_region() {
        let id = NodeId::root(Scope::Nav, "Learn", 2).child("Courses", 0).child("Online", 3);
        assert_eq!(id.level(), 3);
        assert_eq!(id.region(), "nav-learn-2--courses-0--online-3-items");
    }

    #[test]
    fn test_ids_are_deterministic() {
        assert_eq!(
            NodeId::root(Scope::Nav, "Shop", 4),
            NodeId::root(Scope::Nav, "Shop", 4)
        );
    }
}
