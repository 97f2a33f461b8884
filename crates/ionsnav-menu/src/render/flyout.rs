//! Hover flyout (mega menu) panels

use super::icons;
use super::nav_link;
use crate::ident::{NodeId, Scope};
use crate::label::format_label;
use crate::models::MenuNode;
use maud::{html, Markup};

/// Panel for the top-level `node` at `index`, rendered inactive
pub(super) fn panel(node: &MenuNode, index: usize) -> Markup {
    let root = NodeId::root(Scope::Flyout, &node.name, index);

    html! {
        div.flyout-panel id=(format!("flyout-panel-{index}")) data-flyout-panel=(index) {
            div.flyout-heading { (nav_link(node, "flyout-title")) }
            ul.flyout-columns {
                @for (position, child) in node.children.iter().enumerate() {
                    (column(child, root.child(&child.name, position)))
                }
            }
        }
    }
}

fn column(child: &MenuNode, id: NodeId) -> Markup {
    if child.is_leaf() {
        return html! {
            li.flyout-item { (nav_link(child, "flyout-link")) }
        };
    }

    let region = id.region();
    // Grandchildren are the last rendered level
    html! {
        li.flyout-item.flyout-group {
            button.flyout-toggle type="button" id=(id.as_str()) data-flyout-toggle=(id.as_str())
                aria-expanded="false" aria-controls=(region) {
                span.flyout-toggle-label { (format_label(&child.name)) }
                (icons::chevron("flyout-chevron"))
            }
            ul.flyout-sublist id=(region) {
                @for grandchild in &child.children {
                    li.flyout-subitem { (nav_link(grandchild, "flyout-sublink")) }
                }
            }
        }
    }
}
