//! Building dataset loader.
//!
//! A dataset is a JSON document with a `nodes` list and a `landmarks` list
//! that refer to each other by name:
//!
//! ```json
//! {
//!   "nodes": [
//!     { "name": "3-Hall-A", "floor": 3, "type": "hall", "connectsTo": ["3-Hall-B"] }
//!   ],
//!   "landmarks": [
//!     { "name": "Room 3420", "type": "classroom", "connectedTo": "3-Hall-A" }
//!   ]
//! }
//! ```
//!
//! Nodes are created first and their edges resolved in a second pass, so edge
//! order in the file does not matter. Identifiers are assigned in file order
//! starting at 1.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::model::{
    always_open_week, DayHours, GeoPoint, IndoorNode, Landmark, LandmarkCategory, LandmarkId,
    NodeId, NodeKind, LAST_MINUTE_OF_DAY,
};
use crate::store::BuildingMap;

/// Building name assigned to nodes that do not declare one.
pub const DEFAULT_BUILDING: &str = "Demo-Building";

#[derive(Debug, Deserialize)]
struct RawDataset {
    #[serde(default)]
    nodes: Vec<RawNode>,
    #[serde(default)]
    landmarks: Vec<RawLandmark>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    name: String,
    building: Option<String>,
    floor: Option<i32>,
    #[serde(rename = "type", default)]
    kind: NodeKind,
    accessible: Option<bool>,
    #[serde(default)]
    connects_to: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLandmark {
    name: String,
    #[serde(rename = "type")]
    category: LandmarkCategory,
    #[serde(default)]
    connected_to: NodeRefs,
    location: Option<RawLocation>,
    hours: Option<Vec<DayHours>>,
    accessible: Option<bool>,
    parent: Option<String>,
}

/// `connectedTo` accepts a single node name or a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NodeRefs {
    One(String),
    Many(Vec<String>),
}

impl Default for NodeRefs {
    fn default() -> Self {
        NodeRefs::Many(Vec::new())
    }
}

impl NodeRefs {
    fn names(&self) -> Vec<&str> {
        match self {
            NodeRefs::One(name) => vec![name.as_str()],
            NodeRefs::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// GeoJSON point: `{"type": "Point", "coordinates": [lng, lat]}`.
#[derive(Debug, Deserialize)]
struct RawLocation {
    #[serde(rename = "type", default = "point_type")]
    kind: String,
    coordinates: (f64, f64),
}

fn point_type() -> String {
    "Point".to_string()
}

/// Load a building dataset from a JSON file.
pub fn load_building(path: &Path) -> Result<BuildingMap> {
    if !path.exists() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }

    info!(path = %path.display(), "loading building dataset");
    let contents = fs::read_to_string(path)?;
    let map = parse_building(&contents)?;
    info!(
        nodes = map.node_count(),
        landmarks = map.landmark_count(),
        "building dataset loaded"
    );
    Ok(map)
}

/// Parse a building dataset from a JSON string.
pub fn parse_building(json: &str) -> Result<BuildingMap> {
    let raw: RawDataset = serde_json::from_str(json)?;
    build_map(raw)
}

fn build_map(raw: RawDataset) -> Result<BuildingMap> {
    if raw.nodes.is_empty() {
        return Err(Error::EmptyDataset);
    }

    // Pass 1: nodes without edges.
    let mut ids: HashMap<&str, NodeId> = HashMap::with_capacity(raw.nodes.len());
    for (index, node) in raw.nodes.iter().enumerate() {
        let id = index as NodeId + 1;
        if ids.insert(node.name.as_str(), id).is_some() {
            return Err(Error::DuplicateNodeName {
                name: node.name.clone(),
            });
        }
    }

    // Pass 2: resolve edges now that every node has an id.
    let mut nodes = Vec::with_capacity(raw.nodes.len());
    for node in &raw.nodes {
        let neighbors = node
            .connects_to
            .iter()
            .map(|target| {
                ids.get(target.as_str())
                    .copied()
                    .ok_or_else(|| Error::UnknownNodeReference {
                        node: node.name.clone(),
                        neighbor: target.clone(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        nodes.push(IndoorNode {
            id: ids[node.name.as_str()],
            name: node.name.clone(),
            building: Some(
                node.building
                    .clone()
                    .unwrap_or_else(|| DEFAULT_BUILDING.to_string()),
            ),
            floor: Some(node.floor.unwrap_or(0)),
            kind: node.kind,
            accessible: node.accessible.unwrap_or(true),
            neighbors,
        });
    }

    let landmarks = build_landmarks(&raw.landmarks, &ids)?;
    Ok(BuildingMap::from_parts(nodes, landmarks))
}

fn build_landmarks(raw: &[RawLandmark], node_ids: &HashMap<&str, NodeId>) -> Result<Vec<Landmark>> {
    let mut landmarks = Vec::with_capacity(raw.len());
    let mut landmark_ids: HashMap<&str, LandmarkId> = HashMap::new();

    for entry in raw {
        let mut connected_to = Vec::new();
        let mut unknown = None;
        for name in entry.connected_to.names() {
            match node_ids.get(name) {
                Some(&id) => connected_to.push(id),
                None => {
                    unknown = Some(name);
                    break;
                }
            }
        }
        if let Some(node) = unknown {
            warn!(landmark = %entry.name, node = %node, "skipping landmark linked to unknown node");
            continue;
        }

        let id = landmarks.len() as LandmarkId + 1;
        landmark_ids.entry(entry.name.as_str()).or_insert(id);

        landmarks.push(Landmark {
            id,
            name: entry.name.clone(),
            category: entry.category,
            location: entry
                .location
                .as_ref()
                .map(|location| validate_location(&entry.name, location))
                .transpose()?,
            hours: validate_hours(&entry.name, entry.hours.as_deref())?,
            accessible: entry.accessible,
            parent: None,
            connected_to,
        });
    }

    // Parents may appear later in the file than their children.
    for (landmark, entry) in landmarks
        .iter_mut()
        .zip(raw.iter().filter(|entry| !has_unknown_node(entry, node_ids)))
    {
        if let Some(parent) = entry.parent.as_deref() {
            landmark.parent = landmark_ids.get(parent).copied();
            if landmark.parent.is_none() {
                warn!(landmark = %landmark.name, parent = %parent, "dropping unknown parent landmark");
            }
        }
    }

    Ok(landmarks)
}

fn has_unknown_node(entry: &RawLandmark, node_ids: &HashMap<&str, NodeId>) -> bool {
    entry
        .connected_to
        .names()
        .iter()
        .any(|name| !node_ids.contains_key(name))
}

fn validate_location(landmark: &str, location: &RawLocation) -> Result<GeoPoint> {
    let (longitude, latitude) = location.coordinates;
    let point = GeoPoint {
        longitude,
        latitude,
    };
    if location.kind != "Point" || !point.is_valid() {
        return Err(Error::InvalidLocation {
            landmark: landmark.to_string(),
            longitude,
            latitude,
        });
    }
    Ok(point)
}

/// Missing or wrongly sized schedules become always-open; present entries
/// must be internally consistent.
fn validate_hours(landmark: &str, hours: Option<&[DayHours]>) -> Result<Vec<DayHours>> {
    let Some(hours) = hours else {
        debug!(landmark = %landmark, "no hours given, assuming always open");
        return Ok(always_open_week());
    };
    if hours.len() != 7 {
        warn!(
            landmark = %landmark,
            entries = hours.len(),
            "hours must have seven entries, assuming always open"
        );
        return Ok(always_open_week());
    }

    for (day, entry) in hours.iter().enumerate() {
        let invalid = |message: &str| Error::InvalidHours {
            landmark: landmark.to_string(),
            day,
            message: message.to_string(),
        };
        if entry.open > LAST_MINUTE_OF_DAY || entry.close > LAST_MINUTE_OF_DAY {
            return Err(invalid("minutes must be within 0..=1439"));
        }
        if entry.is_open && entry.open >= entry.close {
            return Err(invalid("open must be less than close"));
        }
    }

    Ok(hours.to_vec())
}
