//! Inline Lucide-style SVG icons

use crate::search::percent_encode;
use maud::{html, Markup};

fn svg(class: &str, body: Markup) -> Markup {
    html! {
        svg.(class) xmlns="http://www.w3.org/2000/svg" width="20" height="20"
            viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"
            stroke-linecap="round" stroke-linejoin="round" aria-hidden="true" {
            (body)
        }
    }
}

// SVG children need explicit close tags inside HTML
fn path(d: &str) -> Markup {
    html! { path d=(d) {} }
}

fn circle(cx: u8, cy: u8, r: u8) -> Markup {
    html! { circle cx=(cx) cy=(cy) r=(r) {} }
}

/// Disclosure chevron; CSS rotates it when the owner is expanded
pub fn chevron(class: &str) -> Markup {
    svg(class, path("m6 9 6 6 6-6"))
}

pub fn search() -> Markup {
    svg(
        "icon-search",
        html! {
            (circle(11, 11, 8))
            (path("m21 21-4.3-4.3"))
        },
    )
}

pub fn close() -> Markup {
    svg(
        "icon-close",
        html! {
            (path("M18 6 6 18"))
            (path("m6 6 12 12"))
        },
    )
}

pub fn menu() -> Markup {
    svg(
        "icon-menu",
        html! {
            (path("M4 6h16"))
            (path("M4 12h16"))
            (path("M4 18h16"))
        },
    )
}

pub fn sun() -> Markup {
    svg(
        "icon-sun",
        html! {
            (circle(12, 12, 4))
            (path("M12 2v2M12 20v2m-7.07-2.93 1.41-1.41m11.32-11.32 1.41-1.41M2 12h2m16 0h2M4.93 4.93l1.41 1.41m11.32 11.32 1.41 1.41"))
        },
    )
}

pub fn moon() -> Markup {
    svg("icon-moon", path("M12 3a6 6 0 0 0 9 9 9 9 0 1 1-9-9Z"))
}

/// Longest initials that still fit the placeholder box
const MAX_INITIALS: usize = 4;

/// Placeholder logo: brand initials on a rounded square
pub fn placeholder_logo_svg(initials: &str) -> String {
    let initials: String = initials
        .chars()
        .filter(|c| c.is_alphanumeric())
        .take(MAX_INITIALS)
        .collect::<String>()
        .to_uppercase();
    let text = if initials.is_empty() { "?".to_string() } else { initials };

    html! {
        svg xmlns="http://www.w3.org/2000/svg" width="120" height="40" viewBox="0 0 120 40" {
            rect width="120" height="40" rx="6" fill="#1d2b53" {}
            text x="60" y="26" text-anchor="middle" font-family="Helvetica, Arial, sans-serif"
                font-size="18" font-weight="700" fill="#f5c84c" { (text) }
        }
    }
    .into_string()
}

/// `data:` URI for [`placeholder_logo_svg`], usable as an `<img src>`
pub fn placeholder_logo_data_uri(initials: &str) -> String {
    format!(
        "data:image/svg+xml,{}",
        percent_encode(&placeholder_logo_svg(initials))
    )
}
