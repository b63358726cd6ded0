//! Landmarks command handler for listing points of interest.

use std::path::Path;

use anyhow::Result;
use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

use indoorpath_lib::{is_available, BuildingMap, LandmarkCategory};

use crate::commands::load_map;
use crate::output::{render_landmarks, OutputFormat};

/// One listed landmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LandmarkRow {
    pub name: String,
    pub category: LandmarkCategory,
    /// Open and accessible at the evaluated instant.
    pub available: bool,
    /// Name of the node the landmark is linked to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
}

/// Rows for every landmark, optionally restricted to one category, sorted by name.
pub fn collect_landmarks(
    map: &BuildingMap,
    category: Option<LandmarkCategory>,
    now: &DateTime<Tz>,
) -> Vec<LandmarkRow> {
    let mut rows: Vec<LandmarkRow> = map
        .landmarks()
        .filter(|landmark| category.map_or(true, |c| landmark.category == c))
        .map(|landmark| LandmarkRow {
            name: landmark.name.clone(),
            category: landmark.category,
            available: is_available(landmark, now),
            node: landmark
                .primary_node()
                .and_then(|id| map.node_name(id))
                .map(str::to_string),
        })
        .collect();
    rows.sort_by(|a, b| a.name.cmp(&b.name));
    rows
}

/// Handle the landmarks subcommand.
pub fn handle_landmarks_command(
    data_path: &Path,
    now: &DateTime<Tz>,
    format: OutputFormat,
    category: Option<LandmarkCategory>,
) -> Result<()> {
    let map = load_map(data_path)?;
    let rows = collect_landmarks(&map, category, now);
    println!("{}", render_landmarks(&rows, format)?);
    Ok(())
}
