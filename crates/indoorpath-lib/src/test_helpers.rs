#![allow(dead_code)]

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;

use crate::availability::DEFAULT_TIMEZONE;
use crate::model::{always_open_week, IndoorNode, Landmark, LandmarkCategory, NodeId, NodeKind};
use crate::store::BuildingMap;

pub fn node(id: NodeId, name: &str, neighbors: &[NodeId]) -> IndoorNode {
    IndoorNode {
        id,
        name: name.to_string(),
        building: None,
        floor: None,
        kind: NodeKind::Hall,
        accessible: true,
        neighbors: neighbors.to_vec(),
    }
}

pub fn landmark(id: u32, name: &str, category: LandmarkCategory, nodes: &[NodeId]) -> Landmark {
    Landmark {
        id,
        name: name.to_string(),
        category,
        location: None,
        hours: always_open_week(),
        accessible: None,
        parent: None,
        connected_to: nodes.to_vec(),
    }
}

/// Linear chain `N1 - N2 - ... - Nn`; `accessible[i]` flags node `i + 1`.
pub fn chain_map(accessible: &[bool]) -> BuildingMap {
    let count = accessible.len() as NodeId;
    let nodes = accessible
        .iter()
        .enumerate()
        .map(|(index, &flag)| {
            let id = index as NodeId + 1;
            let mut neighbors = Vec::new();
            if id > 1 {
                neighbors.push(id - 1);
            }
            if id < count {
                neighbors.push(id + 1);
            }
            let mut n = node(id, &format!("N{id}"), &neighbors);
            n.accessible = flag;
            n
        })
        .collect();
    BuildingMap::from_parts(nodes, Vec::new())
}

pub fn local(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Tz> {
    DEFAULT_TIMEZONE
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("unambiguous local time")
}

/// Wednesday 2025-03-12 at noon.
pub fn noon() -> DateTime<Tz> {
    local(2025, 3, 12, 12, 0)
}
