//! Desktop top bar

use super::icons;
use super::nav_link;
use crate::ident::{NodeId, Scope};
use crate::label::format_label;
use crate::models::MenuTree;
use maud::{html, Markup};

pub(super) fn render(tree: &MenuTree) -> Markup {
    html! {
        nav.ionsnav-desktop aria-label="Main navigation" {
            ul.nav-menu {
                @for (index, node) in tree.navigable() {
                    @let id = NodeId::root(Scope::Nav, &node.name, index);
                    @if node.has_children() {
                        li.nav-item.has-flyout id=(id.as_str()) data-flyout-trigger=(index) {
                            a.nav-link href=(node.url) data-nav-link="" aria-haspopup="true" {
                                (format_label(&node.name))
                                (icons::chevron("nav-chevron"))
                            }
                        }
                    } @else {
                        li.nav-item id=(id.as_str()) {
                            (nav_link(node, "nav-link"))
                        }
                    }
                }
            }
        }
    }
}
