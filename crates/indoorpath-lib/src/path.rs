use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use chrono::{DateTime, TimeZone};

use crate::availability::is_available;
use crate::error::Result;
use crate::model::{IndoorNode, Landmark, LandmarkCategory, NodeId};
use crate::store::{GraphStore, NodeCache};

/// Constraints applied during pathfinding.
///
/// The search origin is never filtered; every node discovered from it,
/// including the goal, must satisfy the constraints.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PathConstraints {
    /// Never enter nodes flagged as inaccessible.
    pub require_accessible: bool,
}

impl PathConstraints {
    /// Constraints for step-free routing.
    pub fn accessible() -> Self {
        Self {
            require_accessible: true,
        }
    }

    pub(crate) fn admits(&self, node: &IndoorNode) -> bool {
        !self.require_accessible || node.accessible
    }
}

/// The nearest available landmark of a category and the path to it.
#[derive(Debug, Clone)]
pub struct CategoryMatch {
    pub landmark: Arc<Landmark>,
    pub path: Vec<NodeId>,
}

/// Find a route between `start` and `goal` using breadth-first search without
/// additional constraints.
pub fn find_route<S: GraphStore + ?Sized>(
    store: &S,
    start: NodeId,
    goal: NodeId,
) -> Result<Option<Vec<NodeId>>> {
    find_route_bfs(store, start, goal, &PathConstraints::default())
}

/// Run breadth-first search from `start` to `goal`.
///
/// Nodes are marked visited when enqueued, so each node is expanded at most
/// once and the returned path has the minimum hop count among paths that
/// satisfy `constraints`.
pub fn find_route_bfs<S: GraphStore + ?Sized>(
    store: &S,
    start: NodeId,
    goal: NodeId,
    constraints: &PathConstraints,
) -> Result<Option<Vec<NodeId>>> {
    let mut cache = NodeCache::new(store);
    // Confirms the origin exists even when start == goal.
    cache.get(start)?;

    if start == goal {
        return Ok(Some(vec![start]));
    }

    let mut parents: HashMap<NodeId, Option<NodeId>> = HashMap::new();
    let mut queue = VecDeque::new();

    parents.insert(start, None);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let node = cache.get(current)?;
        for &next in &node.neighbors {
            if parents.contains_key(&next) {
                continue;
            }
            if !constraints.admits(&*cache.get(next)?) {
                continue;
            }

            parents.insert(next, Some(current));
            if next == goal {
                tracing::debug!(fetches = cache.fetches(), "bfs reached goal");
                return Ok(Some(reconstruct_path(&parents, start, goal)));
            }
            queue.push_back(next);
        }
    }

    tracing::debug!(fetches = cache.fetches(), "bfs exhausted component");
    Ok(None)
}

/// Breadth-first search outward from `start` until a node hosts a landmark of
/// `category` that is available at `now`.
///
/// The match with the fewest hops wins. Among equally distant candidates the
/// first one dequeued wins, which follows the stored neighbour order; results
/// are only deterministic across stores that iterate neighbours identically.
pub fn find_nearest_by_category<S, Z>(
    store: &S,
    start: NodeId,
    category: LandmarkCategory,
    now: &DateTime<Z>,
    constraints: &PathConstraints,
) -> Result<Option<CategoryMatch>>
where
    S: GraphStore + ?Sized,
    Z: TimeZone,
{
    let mut cache = NodeCache::new(store);
    let mut parents: HashMap<NodeId, Option<NodeId>> = HashMap::new();
    let mut queue = VecDeque::new();

    cache.get(start)?;
    parents.insert(start, None);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let candidates = store.landmarks_at_node(current, category)?;
        if let Some(landmark) = candidates
            .into_iter()
            .find(|landmark| is_available(landmark, now))
        {
            return Ok(Some(CategoryMatch {
                landmark,
                path: reconstruct_path(&parents, start, current),
            }));
        }

        let node = cache.get(current)?;
        for &next in &node.neighbors {
            if parents.contains_key(&next) {
                continue;
            }
            if !constraints.admits(&*cache.get(next)?) {
                continue;
            }
            parents.insert(next, Some(current));
            queue.push_back(next);
        }
    }

    Ok(None)
}

pub(crate) fn reconstruct_path(
    parents: &HashMap<NodeId, Option<NodeId>>,
    start: NodeId,
    goal: NodeId,
) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents.get(&node).copied().flatten();
    }
    path.reverse();
    path
}
