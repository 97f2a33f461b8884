//! Output formatting for the CLI subcommands

use anyhow::{bail, Result};
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};
use ionsnav_core::{DegradedState, ErrorSeverity, LoadReport};
use ionsnav_menu::{format_label, MenuTree, NodeId, Scope};

/// Parse a `name=value` query pair given on the command line
pub fn parse_query_pair(input: &str) -> Result<(String, String)> {
    match input.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => bail!("expected NAME=VALUE, got '{input}'"),
    }
}

/// Load report as a table (or JSON)
pub fn format_report(
    report: &LoadReport,
    state: &DegradedState,
    json: bool,
    no_color: bool,
) -> String {
    if json {
        let issues: Vec<_> = report
            .errors
            .iter()
            .map(|e| {
                serde_json::json!({
                    "source": e.source,
                    "severity": e.severity.as_str(),
                    "message": e.message,
                    "suggestion": e.suggestion,
                })
            })
            .collect();
        let value = serde_json::json!({
            "status": state.status(),
            "menu_loaded": report.menu_loaded,
            "used_fallback_menu": report.used_fallback_menu,
            "pruned_nodes": report.pruned_nodes,
            "stylesheet_inlined": report.stylesheet_inlined,
            "logo_placeholder": report.logo_placeholder,
            "issues": issues,
        });
        return serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string());
    }

    let mut out = summary_line(state);
    if report.errors.is_empty() {
        out.push_str("\nNo issues found.");
        return out;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    let headers = ["Severity", "Source", "Message", "Suggestion"];
    if no_color {
        table.set_header(headers.to_vec());
    } else {
        table.set_header(headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)).collect::<Vec<_>>());
    }

    for error in &report.errors {
        let severity = if no_color {
            Cell::new(error.severity.as_str())
        } else {
            Cell::new(error.severity.as_str()).fg(severity_color(error.severity))
        };
        table.add_row(Row::from(vec![
            severity,
            Cell::new(&error.source),
            Cell::new(&error.message),
            Cell::new(error.suggestion.as_deref().unwrap_or("-")),
        ]));
    }

    out.push('\n');
    out.push_str(&table.to_string());
    out
}

fn summary_line(state: &DegradedState) -> String {
    match state {
        DegradedState::Healthy => "Status: healthy".to_string(),
        DegradedState::Fallback { fallbacks, reason } => {
            format!("Status: degraded ({}): {}", fallbacks.join(", "), reason)
        }
    }
}

fn severity_color(severity: ErrorSeverity) -> Color {
    match severity {
        ErrorSeverity::Warning => Color::Yellow,
        ErrorSeverity::Error => Color::Red,
        ErrorSeverity::Fatal => Color::Magenta,
    }
}

/// One row of the `tree` listing
#[derive(Debug, PartialEq, Eq)]
pub struct TreeRow {
    pub level: usize,
    pub label: String,
    pub url: String,
    /// Id in the desktop bar (top level) or flyout panel (second level)
    pub desktop_id: Option<NodeId>,
    pub mobile_id: Option<NodeId>,
}

/// Flatten the navigable part of the tree with the element ids the
/// renderer gives each node; nodes rendered as plain links have none
pub fn tree_rows(tree: &MenuTree) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    for (index, node) in tree.navigable() {
        let flyout_root = NodeId::root(Scope::Flyout, &node.name, index);
        let mobile_root = NodeId::root(Scope::Mobile, &node.name, index);
        rows.push(TreeRow {
            level: 1,
            label: format_label(&node.name).plain_text(),
            url: node.url.clone(),
            desktop_id: Some(NodeId::root(Scope::Nav, &node.name, index)),
            mobile_id: node.has_children().then(|| mobile_root.clone()),
        });

        for (position, child) in node.children.iter().enumerate() {
            let branch = child.has_children();
            rows.push(TreeRow {
                level: 2,
                label: format_label(&child.name).plain_text(),
                url: child.url.clone(),
                desktop_id: branch.then(|| flyout_root.child(&child.name, position)),
                mobile_id: branch.then(|| mobile_root.child(&child.name, position)),
            });

            for grandchild in &child.children {
                rows.push(TreeRow {
                    level: 3,
                    label: format_label(&grandchild.name).plain_text(),
                    url: grandchild.url.clone(),
                    desktop_id: None,
                    mobile_id: None,
                });
            }
        }
    }
    rows
}

pub fn format_tree(tree: &MenuTree, json: bool, no_color: bool) -> String {
    if json {
        return serde_json::to_string_pretty(tree).unwrap_or_else(|_| "[]".to_string());
    }

    let rows = tree_rows(tree);
    if rows.is_empty() {
        return "Menu has no navigable items.".to_string();
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    let headers = ["Label", "URL", "Desktop id", "Mobile id"];
    if no_color {
        table.set_header(headers.to_vec());
    } else {
        table.set_header(headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)).collect::<Vec<_>>());
    }

    for row in rows {
        let indent = "  ".repeat(row.level - 1);
        let id = |id: &Option<NodeId>| id.as_ref().map_or("-".to_string(), |id| id.to_string());
        table.add_row(Row::from(vec![
            format!("{indent}{}", row.label),
            row.url.clone(),
            id(&row.desktop_id),
            id(&row.mobile_id),
        ]));
    }

    table.to_string()
}
