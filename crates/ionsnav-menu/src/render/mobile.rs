//! Mobile accordion

use super::icons;
use super::nav_link;
use crate::ident::{NodeId, Scope};
use crate::label::format_label;
use crate::models::{MenuNode, MenuTree, MAX_DEPTH};
use maud::{html, Markup};

pub(super) fn render(tree: &MenuTree) -> Markup {
    html! {
        nav.ionsnav-mobile-nav aria-label="Mobile navigation" {
            ul.mobile-menu-list {
                @for (index, node) in tree.navigable() {
                    (item(node, NodeId::root(Scope::Mobile, &node.name, index), 1))
                }
            }
        }
    }
}

fn item(node: &MenuNode, id: NodeId, level: usize) -> Markup {
    if node.is_leaf() || level >= MAX_DEPTH {
        return html! {
            li.mobile-item { (nav_link(node, "mobile-link")) }
        };
    }

    let region = id.region();
    html! {
        li.mobile-item.mobile-branch.(format!("mobile-level-{level}")) id=(id.as_str()) {
            button.mobile-toggle type="button" data-mobile-toggle=(id.as_str())
                aria-expanded="false" aria-controls=(region) {
                span.mobile-label { (format_label(&node.name)) }
                (icons::chevron("mobile-chevron"))
            }
            ul.mobile-sublist id=(region) {
                @for (position, child) in node.children.iter().enumerate() {
                    (item(child, id.child(&child.name, position), level + 1))
                }
            }
        }
    }
}
