use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::model::{IndoorNode, NodeId, NodeKind};

/// Token that marks a stair landing in node names, e.g. `4-Stair-UpTo5`.
const STAIR_TOKEN: &str = "Stair";

/// One displayed step of a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStep {
    pub id: NodeId,
    pub name: String,
    /// Zero-based position in the final sequence.
    pub depth: usize,
}

/// Whether a node is a stair landing, by kind or by name.
pub fn is_stair(node: &IndoorNode) -> bool {
    node.kind == NodeKind::Stair || node.name.contains(STAIR_TOKEN)
}

/// Floor number encoded as the leading token of a stair name (`"4-Stair-..."`).
pub fn floor_from_name(name: &str) -> Option<i32> {
    let (floor, rest) = name.split_once('-')?;
    if !rest.starts_with(STAIR_TOKEN) || floor.is_empty() {
        return None;
    }
    if !floor.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    floor.parse().ok()
}

/// Collapse both landings of one staircase into the first.
///
/// A node is dropped when it and the last kept node are both stairs whose
/// names encode different floors. Names without a floor token never collapse.
pub fn compress_stairs(path: &[NodeId], nodes: &HashMap<NodeId, Arc<IndoorNode>>) -> Vec<NodeId> {
    let mut out: Vec<NodeId> = Vec::with_capacity(path.len());

    for &id in path {
        let collapses = out
            .last()
            .and_then(|prev| nodes.get(prev))
            .zip(nodes.get(&id))
            .is_some_and(|(prev, curr)| same_staircase(prev, curr));
        if collapses {
            continue;
        }
        out.push(id);
    }

    out
}

fn same_staircase(prev: &IndoorNode, curr: &IndoorNode) -> bool {
    if !is_stair(prev) || !is_stair(curr) {
        return false;
    }
    match (floor_from_name(&prev.name), floor_from_name(&curr.name)) {
        (Some(a), Some(b)) => a != b,
        _ => false,
    }
}

/// Map node ids to display names and positions.
pub fn resolve_steps(path: &[NodeId], names: &HashMap<NodeId, String>) -> Vec<PathStep> {
    path.iter()
        .enumerate()
        .map(|(depth, &id)| PathStep {
            id,
            name: names.get(&id).cloned().unwrap_or_default(),
            depth,
        })
        .collect()
}
