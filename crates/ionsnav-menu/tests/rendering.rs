//! Rendering properties over whole menu trees

use ionsnav_menu::render::selectors::{data_attr, DATA_FLYOUT_TOGGLE, DATA_MOBILE_TOGGLE};
use ionsnav_menu::{
    format_label, HeaderContext, HeaderView, LabelSegment, MenuNode, MenuTree, Renderer,
};
use maud::Render;
use std::collections::HashSet;

fn attr_values(html: &str, name: &str) -> Vec<String> {
    let needle = format!(" {name}=\"");
    html.match_indices(&needle)
        .filter_map(|(at, _)| {
            let rest = &html[at + needle.len()..];
            rest.find('"').map(|end| rest[..end].to_string())
        })
        .collect()
}

#[test]
fn test_every_ion_is_emphasised() {
    let label = format_label("IONIZATION");
    assert_eq!(label.emphasis_count(), 2);
    assert_eq!(label.plain_text(), "IONIZATION");
    assert_eq!(
        label.segments(),
        &[
            LabelSegment::Emphasis("ION".to_string()),
            LabelSegment::Plain("IZAT".to_string()),
            LabelSegment::Emphasis("ION".to_string()),
        ]
    );

    // Case sensitive
    assert_eq!(format_label("Ionic").emphasis_count(), 0);
}

#[test]
fn test_connect_ions_uses_the_fixed_form() {
    let label = format_label("Connect.IONS");
    assert_eq!(
        label.segments(),
        &[
            LabelSegment::Plain("CONNECT.".to_string()),
            LabelSegment::Emphasis("IONS".to_string()),
        ]
    );
    let html = label.render().into_string();
    assert_eq!(html.matches("ion-highlight").count(), 1);
}

#[test]
fn test_colliding_sibling_names_get_distinct_ids() {
    let tree = MenuTree::new(vec![
        MenuNode::branch(
            "Data & Tools",
            "/a",
            vec![
                MenuNode::branch("Q&A", "/qa1", vec![MenuNode::leaf("x", "/x")]),
                MenuNode::branch("Q A", "/qa2", vec![MenuNode::leaf("y", "/y")]),
                MenuNode::branch("q-a", "/qa3", vec![MenuNode::leaf("z", "/z")]),
            ],
        ),
        MenuNode::branch("Data Tools", "/b", vec![MenuNode::leaf("w", "/w")]),
    ]);
    let renderer = Renderer::new(&tree);

    let mobile = renderer.mobile_accordion().into_string();
    let ids = attr_values(&mobile, &data_attr(DATA_MOBILE_TOGGLE));
    assert_eq!(ids.len(), 5);
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 5);

    let flyout = renderer.flyout_panels().into_string();
    let ids = attr_values(&flyout, &data_attr(DATA_FLYOUT_TOGGLE));
    assert_eq!(ids.len(), 3);
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 3);
}

#[test]
fn test_element_ids_are_unique_across_the_header() {
    let tree = MenuTree::new(vec![
        MenuNode::branch(
            "About",
            "/about",
            vec![MenuNode::branch(
                "About",
                "/about/about",
                vec![MenuNode::leaf("About", "/about/about/about")],
            )],
        ),
        MenuNode::branch("About", "/about-2", vec![MenuNode::leaf("About", "/x")]),
    ]);
    let ctx = HeaderContext::default();
    let html = HeaderView::new(&tree, &ctx).render().into_string();

    let ids = attr_values(&html, "id");
    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(ids.len(), unique.len(), "duplicate ids in {ids:?}");
}

#[test]
fn test_sibling_order_is_preserved_everywhere() {
    let names = ["Zeta", "Alpha", "Mu"];
    let tree = MenuTree::new(
        names
            .iter()
            .map(|n| MenuNode::leaf(*n, format!("/{n}")))
            .collect(),
    );
    let renderer = Renderer::new(&tree);

    for html in [
        renderer.desktop_bar().into_string(),
        renderer.mobile_accordion().into_string(),
    ] {
        let positions: Vec<usize> = names.iter().filter_map(|n| html.find(n)).collect();
        assert_eq!(positions.len(), 3);
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{html}");
    }
}

#[test]
fn test_hostile_names_and_urls_are_escaped() {
    let tree = MenuTree::new(vec![MenuNode::branch(
        "<img src=x onerror=alert(1)>",
        "javascript:\"><b>",
        vec![MenuNode::leaf("A & B", "/a?x=1&y=2")],
    )]);
    let ctx = HeaderContext::default();
    let html = HeaderView::new(&tree, &ctx).render().into_string();

    assert!(!html.contains("<img src=x"));
    assert!(!html.contains("\"><b>"));
    assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
    assert!(html.contains("A &amp; B"));
    assert!(html.contains("/a?x=1&amp;y=2"));
}

#[test]
fn test_search_marker_is_not_rendered_as_navigation() {
    let tree = MenuTree::new(vec![
        MenuNode::leaf("Home", "/"),
        MenuNode::search_marker(),
    ]);
    let renderer = Renderer::new(&tree);
    let desktop = renderer.desktop_bar().into_string();
    assert_eq!(desktop.matches("<li ").count(), 1);
    let mobile = renderer.mobile_accordion().into_string();
    assert_eq!(mobile.matches("<li ").count(), 1);
}

#[test]
fn test_fallback_menu_renders_three_items() {
    let tree = MenuTree::fallback();
    let desktop = Renderer::new(&tree).desktop_bar().into_string();
    for name in ["Home", "About", "Contact"] {
        assert!(desktop.contains(&format!(">{name}</a>")), "missing {name}");
    }
    assert_eq!(desktop.matches("<li ").count(), 3);
}
