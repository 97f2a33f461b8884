//! Brand-aware label formatting
//!
//! Every case-sensitive "ION" in a menu name is emphasised. The exact
//! label "Connect.IONS" is an override with its own fixed form and is
//! checked before the substring rule.

use maud::{html, Markup, Render};

/// Substring emphasised wherever it appears
pub const HIGHLIGHT: &str = "ION";

/// Label rendered with a fixed custom form
pub const CONNECT_IONS: &str = "Connect.IONS";

/// CSS class of the emphasis span
pub const HIGHLIGHT_CLASS: &str = "ion-highlight";

/// A run of label text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelSegment {
    Plain(String),
    Emphasis(String),
}

/// Label split into plain and emphasised runs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormattedLabel {
    segments: Vec<LabelSegment>,
}

impl FormattedLabel {
    pub fn segments(&self) -> &[LabelSegment] {
        &self.segments
    }

    /// Concatenated text with emphasis dropped
    pub fn plain_text(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                LabelSegment::Plain(text) | LabelSegment::Emphasis(text) => text.as_str(),
            })
            .collect()
    }

    pub fn emphasis_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|segment| matches!(segment, LabelSegment::Emphasis(_)))
            .count()
    }

    fn push_plain(&mut self, text: &str) {
        if !text.is_empty() {
            self.segments.push(LabelSegment::Plain(text.to_string()));
        }
    }

    fn push_emphasis(&mut self, text: &str) {
        self.segments.push(LabelSegment::Emphasis(text.to_string()));
    }
}

/// Emphasis becomes a highlight span; text is escaped by `html!`
impl Render for FormattedLabel {
    fn render(&self) -> Markup {
        html! {
            @for segment in &self.segments {
                @match segment {
                    LabelSegment::Plain(text) => (text),
                    LabelSegment::Emphasis(text) => span.(HIGHLIGHT_CLASS) { (text) },
                }
            }
        }
    }
}

/// Split a menu name into plain and emphasised runs
pub fn format_label(name: &str) -> FormattedLabel {
    let mut label = FormattedLabel::default();

    if name == CONNECT_IONS {
        label.push_plain("CONNECT.");
        label.push_emphasis("IONS");
        return label;
    }

    let mut cursor = 0;
    for (start, matched) in name.match_indices(HIGHLIGHT) {
        label.push_plain(&name[cursor..start]);
        label.push_emphasis(matched);
        cursor = start + matched.len();
    }
    label.push_plain(&name[cursor..]);
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_label_has_no_emphasis() {
        let label = format_label("About Us");
        assert_eq!(label.segments(), &[LabelSegment::Plain("About Us".into())]);
    }

    #[test]
    fn test_every_occurrence_is_emphasised() {
        let label = format_label("NATIONAL IONS UNION");
        assert_eq!(label.emphasis_count(), 3);
        assert_eq!(label.plain_text(), "NATIONAL IONS UNION");
        assert_eq!(
            label.segments()[..3],
            [
                LabelSegment::Plain("NAT".into()),
                LabelSegment::Emphasis("ION".into()),
                LabelSegment::Plain("AL ".into()),
            ]
        );
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert_eq!(format_label("Donation").emphasis_count(), 0);
        assert_eq!(format_label("DONATION").emphasis_count(), 1);
    }

    #[test]
    fn test_connect_ions_override() {
        let label = format_label("Connect.IONS");
        assert_eq!(
            label.segments(),
            &[
                LabelSegment::Plain("CONNECT.".into()),
                LabelSegment::Emphasis("IONS".into()),
            ]
        );
    }

    #[test]
    fn test_connect_ions_override_is_exact() {
        // Only the exact literal is special-cased
        let label = format_label("Connect.IONS Events");
        assert_eq!(label.emphasis_count(), 1);
        assert_eq!(label.plain_text(), "Connect.IONS Events");
        assert!(label.segments().contains(&LabelSegment::Emphasis("ION".into())));
    }

    #[test]
    fn test_label_markup_escapes_text() {
        let html = format_label("R&D <ION>").render().into_string();
        assert_eq!(
            html,
            "R&amp;D &lt;<span class=\"ion-highlight\">ION</span>&gt;"
        );
    }

    #[test]
    fn test_connect_ions_markup() {
        let html = format_label("Connect.IONS").render().into_string();
        assert_eq!(html, "CONNECT.<span class=\"ion-highlight\">IONS</span>");
    }
}
