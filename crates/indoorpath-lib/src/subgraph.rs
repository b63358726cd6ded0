//! Alternative path discovery through one bulk subgraph expansion.
//!
//! The store returns every node within a depth cap in a single operation; the
//! path is rebuilt from the predecessor links recorded during that expansion.
//! The result only replaces the breadth-first baseline when it is strictly
//! shorter.

use std::collections::HashMap;

use crate::error::Result;
use crate::model::NodeId;
use crate::path::{reconstruct_path, PathConstraints};
use crate::store::{GraphStore, SubgraphNode};

/// Default depth cap for subgraph expansion.
pub const DEFAULT_MAX_SUBGRAPH_DEPTH: usize = 15;

/// Expand the subgraph around `start` and rebuild a path to `goal`.
///
/// Returns `Ok(None)` when `goal` lies beyond `max_depth` or is unreachable.
pub fn find_route_subgraph<S: GraphStore + ?Sized>(
    store: &S,
    start: NodeId,
    goal: NodeId,
    max_depth: usize,
    constraints: &PathConstraints,
) -> Result<Option<Vec<NodeId>>> {
    let expanded = store.expand_subgraph(start, max_depth, constraints)?;
    Ok(reconstruct_from_subgraph(&expanded, start, goal))
}

/// Follow predecessor links from `goal` back to `start`.
pub fn reconstruct_from_subgraph(
    expanded: &[SubgraphNode],
    start: NodeId,
    goal: NodeId,
) -> Option<Vec<NodeId>> {
    if !expanded.iter().any(|node| node.id == goal) {
        return None;
    }

    let parents: HashMap<NodeId, Option<NodeId>> = expanded
        .iter()
        .map(|node| (node.id, node.parent))
        .collect();

    // Parent links come from the store; a chain longer than the subgraph
    // itself can only be a cycle.
    let mut current = goal;
    for _ in 0..expanded.len() {
        if current == start {
            return Some(reconstruct_path(&parents, start, goal));
        }
        current = parents.get(&current).copied().flatten()?;
    }
    None
}

/// Keep `baseline` unless `candidate` is strictly shorter.
///
/// Returns the chosen path and whether the candidate won.
pub fn prefer_shorter(
    baseline: Vec<NodeId>,
    candidate: Option<Vec<NodeId>>,
) -> (Vec<NodeId>, bool) {
    match candidate {
        Some(candidate) if candidate.len() < baseline.len() => (candidate, true),
        _ => (baseline, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::chain_map;

    #[test]
    fn rebuilds_chain_from_predecessors() {
        let map = chain_map(&[true, true, true, true]);
        let path = find_route_subgraph(
            &map,
            1,
            4,
            DEFAULT_MAX_SUBGRAPH_DEPTH,
            &PathConstraints::default(),
        )
        .unwrap();
        assert_eq!(path, Some(vec![1, 2, 3, 4]));
    }

    #[test]
    fn goal_beyond_depth_cap_is_not_found() {
        let map = chain_map(&[true, true, true, true]);
        let path = find_route_subgraph(&map, 1, 4, 2, &PathConstraints::default()).unwrap();
        assert_eq!(path, None);
    }

    #[test]
    fn only_follows_edges_not_depth_order() {
        // Branching subgraph: 1 -> {2, 3}, 2 -> 4. Sorting by depth would emit 1,2,3,4.
        let expanded = vec![
            SubgraphNode { id: 1, depth: 0, parent: None },
            SubgraphNode { id: 2, depth: 1, parent: Some(1) },
            SubgraphNode { id: 3, depth: 1, parent: Some(1) },
            SubgraphNode { id: 4, depth: 2, parent: Some(2) },
        ];
        assert_eq!(reconstruct_from_subgraph(&expanded, 1, 4), Some(vec![1, 2, 4]));
    }

    #[test]
    fn cyclic_parent_chain_is_rejected() {
        let expanded = vec![
            SubgraphNode { id: 1, depth: 0, parent: None },
            SubgraphNode { id: 2, depth: 1, parent: Some(3) },
            SubgraphNode { id: 3, depth: 1, parent: Some(2) },
        ];
        assert_eq!(reconstruct_from_subgraph(&expanded, 1, 3), None);
    }

    #[test]
    fn broken_parent_chain_is_rejected() {
        let expanded = vec![
            SubgraphNode { id: 1, depth: 0, parent: None },
            SubgraphNode { id: 4, depth: 2, parent: Some(9) },
        ];
        assert_eq!(reconstruct_from_subgraph(&expanded, 1, 4), None);
    }

    #[test]
    fn candidate_must_be_strictly_shorter() {
        let baseline = vec![1, 2, 3];

        let (chosen, used) = prefer_shorter(baseline.clone(), Some(vec![1, 3]));
        assert_eq!(chosen, vec![1, 3]);
        assert!(used);

        let (chosen, used) = prefer_shorter(baseline.clone(), Some(vec![1, 5, 3]));
        assert_eq!(chosen, baseline);
        assert!(!used);

        let (chosen, used) = prefer_shorter(baseline.clone(), Some(vec![1, 5, 6, 3]));
        assert_eq!(chosen, baseline);
        assert!(!used);

        let (chosen, used) = prefer_shorter(baseline.clone(), None);
        assert_eq!(chosen, baseline);
        assert!(!used);
    }
}
