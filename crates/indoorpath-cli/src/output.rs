//! Output formatting for planned paths and landmark listings.

use std::fmt::Write as _;

use anyhow::Result;
use clap::ValueEnum;

use indoorpath_lib::PathPlan;

use crate::commands::landmarks::LandmarkRow;

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// The same JSON body the HTTP endpoint returns.
    Json,
}

/// Render a planned path.
pub fn render_plan(plan: &PathPlan, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(plan)?),
        OutputFormat::Text => Ok(plan_text(plan)),
    }
}

fn plan_text(plan: &PathPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Path from {} to {} (algorithm: {}, {} hops):",
        plan.from,
        plan.to,
        plan.algorithm,
        plan.hop_count()
    );
    for step in &plan.steps {
        let _ = writeln!(out, "  {:>2}. {}", step.depth, step.name);
    }
    out.trim_end().to_string()
}

/// Render a landmark listing.
pub fn render_landmarks(rows: &[LandmarkRow], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Text => Ok(landmarks_text(rows)),
    }
}

fn landmarks_text(rows: &[LandmarkRow]) -> String {
    if rows.is_empty() {
        return "No landmarks found.".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Landmarks ({}):", rows.len());
    let _ = writeln!(out, "{:<32} {:<18} {:<8} Node", "Name", "Category", "Status");
    for row in rows {
        let status = if row.available { "open" } else { "closed" };
        let _ = writeln!(
            out,
            "{:<32} {:<18} {:<8} {}",
            row.name,
            row.category.as_str(),
            status,
            row.node.as_deref().unwrap_or("-")
        );
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoorpath_lib::{LandmarkCategory, PathAlgorithm, PathStep};

    fn plan() -> PathPlan {
        PathPlan {
            algorithm: PathAlgorithm::BfsViaType,
            from: "Lobby".to_string(),
            to: "Printer".to_string(),
            steps: vec![
                PathStep {
                    id: 1,
                    name: "Lobby Door".to_string(),
                    depth: 0,
                },
                PathStep {
                    id: 2,
                    name: "Nook".to_string(),
                    depth: 1,
                },
            ],
        }
    }

    #[test]
    fn text_plan_lists_steps() {
        let text = render_plan(&plan(), OutputFormat::Text).unwrap();
        assert!(text.starts_with("Path from Lobby to Printer (algorithm: bfs (via type), 1 hops):"));
        assert!(text.contains(" 0. Lobby Door"));
        assert!(text.ends_with(" 1. Nook"));
    }

    #[test]
    fn json_plan_matches_http_body() {
        let json = render_plan(&plan(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["algorithm"], "bfs (via type)");
        assert_eq!(value["steps"][1]["name"], "Nook");
    }

    #[test]
    fn empty_listing_has_a_message() {
        assert_eq!(
            render_landmarks(&[], OutputFormat::Text).unwrap(),
            "No landmarks found."
        );
    }

    #[test]
    fn text_listing_shows_status() {
        let rows = vec![LandmarkRow {
            name: "Closed Lab".to_string(),
            category: LandmarkCategory::Classroom,
            available: false,
            node: None,
        }];
        let text = render_landmarks(&rows, OutputFormat::Text).unwrap();
        assert!(text.contains("Closed Lab"));
        assert!(text.contains("closed"));
        assert!(text.contains("classroom"));
    }
}
