//! Presentation: replay and config formatters (text via comfy-table, json via serde_json).

use crate::config::ArtisetConfig;
use crate::error::ApiError;
use crate::events::WorksetEvent;
use crate::script::ReplayReport;
use crate::views::ViewPolicy;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

pub fn format_replay_text(report: &ReplayReport, policy: &ViewPolicy, show_events: bool) -> String {
    let snapshot = &report.snapshot;
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Working set")));
    out.push_str(&format!(
        "  Artifacts: {}/{}\n",
        snapshot.len(),
        snapshot.capacity
    ));
    match &snapshot.active_id {
        Some(id) => out.push_str(&format!("  Active: {}\n", id.as_str().green())),
        None => out.push_str(&format!("  Active: {}\n", "none".dimmed())),
    }
    let skipped = report.steps.iter().filter(|s| !s.applied).count();
    out.push_str(&format!(
        "  Commands: {} ({} ignored)\n\n",
        report.steps.len(),
        skipped
    ));

    let rows = snapshot.view(policy);
    if rows.is_empty() {
        out.push_str("No artifacts.\n");
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec![
            "", "Pos", "Artifact", "Origin", "Minimized", "Added", "Accessed",
        ]);
        for row in &rows {
            table.add_row(vec![
                if row.is_active { "*" } else { "" }.to_string(),
                row.position.to_string(),
                row.id.to_string(),
                row.origin_message_id
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                if row.is_minimized { "yes" } else { "no" }.to_string(),
                row.added_at.to_string(),
                row.last_accessed_at.to_string(),
            ]);
        }
        out.push_str(&format!("{}\n", table));
    }

    if show_events {
        out.push_str(&format!("\n{}\n\n", format_section_heading("Changes")));
        for change in &report.changes {
            let described: Vec<String> = change.events.iter().map(describe_event).collect();
            out.push_str(&format!("  #{:<3} {}\n", change.seq, described.join(", ")));
        }
    }
    out
}

fn describe_event(event: &WorksetEvent) -> String {
    match event {
        WorksetEvent::Added { id, position, .. } => format!("added {} @{}", id, position),
        WorksetEvent::Replaced { id } => format!("replaced {}", id),
        WorksetEvent::Evicted { id, was_active } => {
            if *was_active {
                format!("evicted {} (was active)", id)
            } else {
                format!("evicted {}", id)
            }
        }
        WorksetEvent::Removed { id } => format!("removed {}", id),
        WorksetEvent::FocusChanged { previous, current } => format!(
            "focus {} -> {}",
            previous.as_ref().map(|p| p.as_str()).unwrap_or("none"),
            current.as_ref().map(|c| c.as_str()).unwrap_or("none")
        ),
        WorksetEvent::Refocused { id } => format!("refocused {}", id),
        WorksetEvent::MinimizedChanged { id, minimized } => {
            if *minimized {
                format!("minimized {}", id)
            } else {
                format!("restored {}", id)
            }
        }
        WorksetEvent::Cleared { removed } => format!("cleared {}", removed),
    }
}

pub fn format_replay_json(
    report: &ReplayReport,
    policy: &ViewPolicy,
    show_events: bool,
) -> Result<String, ApiError> {
    let mut out = serde_json::json!({
        "capacity": report.snapshot.capacity,
        "active_id": report.snapshot.active_id,
        "artifacts": report.snapshot.view(policy),
        "steps": report.steps,
    });
    if show_events {
        out["changes"] = serde_json::to_value(&report.changes)?;
    }
    Ok(serde_json::to_string_pretty(&out)?)
}

pub fn format_config_text(config: &ArtisetConfig) -> Result<String, ApiError> {
    toml::to_string_pretty(config)
        .map_err(|e| ApiError::ConfigError(format!("Failed to render config: {}", e)))
}

pub fn format_config_json(config: &ArtisetConfig) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(config)?)
}
