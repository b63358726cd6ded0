//! Read-only access to the building graph.
//!
//! Search code never touches storage directly; it talks to a [`GraphStore`].
//! [`BuildingMap`] is the in-memory snapshot produced by the dataset loader and
//! is what the CLI and the HTTP service use.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::{IndoorNode, Landmark, LandmarkCategory, NodeId};
use crate::path::PathConstraints;

/// Minimum Jaro-Winkler similarity for a landmark name to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// A node reached by a bulk subgraph expansion, tagged with its hop depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubgraphNode {
    pub id: NodeId,
    pub depth: usize,
    /// Node this one was first discovered from; `None` for the origin.
    pub parent: Option<NodeId>,
}

/// Lookups the path subsystem needs from a graph-data store.
///
/// All lookups are read-only. Repeated lookups of the same id must return the
/// same data for the duration of one search.
pub trait GraphStore: Send + Sync {
    /// Fetch a node by id, failing with [`Error::UnknownNode`] when absent.
    fn node(&self, id: NodeId) -> Result<Arc<IndoorNode>>;

    /// Find a landmark by its exact name.
    fn find_landmark_by_name(&self, name: &str) -> Result<Option<Arc<Landmark>>>;

    /// All landmarks of `category` connected to `node`, in store order.
    fn landmarks_at_node(
        &self,
        node: NodeId,
        category: LandmarkCategory,
    ) -> Result<Vec<Arc<Landmark>>>;

    /// Landmark names similar to `name`, best match first.
    fn landmark_name_suggestions(&self, _name: &str, _limit: usize) -> Vec<String> {
        Vec::new()
    }

    /// First landmark of `category` connected to `node`.
    fn find_landmark_at_node(
        &self,
        node: NodeId,
        category: LandmarkCategory,
    ) -> Result<Option<Arc<Landmark>>> {
        Ok(self.landmarks_at_node(node, category)?.into_iter().next())
    }

    /// Batch node fetch.
    fn nodes(&self, ids: &[NodeId]) -> Result<HashMap<NodeId, Arc<IndoorNode>>> {
        let mut found = HashMap::with_capacity(ids.len());
        for &id in ids {
            if !found.contains_key(&id) {
                found.insert(id, self.node(id)?);
            }
        }
        Ok(found)
    }

    /// Batch id to display-name resolution.
    fn node_names(&self, ids: &[NodeId]) -> Result<HashMap<NodeId, String>> {
        Ok(self
            .nodes(ids)?
            .into_iter()
            .map(|(id, node)| (id, node.name.clone()))
            .collect())
    }

    /// Every node reachable from `start` within `max_depth` hops, each tagged
    /// with its depth. The origin is reported at depth 0.
    ///
    /// Stores with a native graph traversal should override this so the whole
    /// subgraph arrives in one round trip.
    fn expand_subgraph(
        &self,
        start: NodeId,
        max_depth: usize,
        constraints: &PathConstraints,
    ) -> Result<Vec<SubgraphNode>> {
        let mut cache = NodeCache::new(self);
        let mut discovered = vec![SubgraphNode {
            id: start,
            depth: 0,
            parent: None,
        }];
        let mut seen: HashMap<NodeId, usize> = HashMap::from([(start, 0)]);
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            let depth = seen[&current];
            if depth >= max_depth {
                continue;
            }
            let node = cache.get(current)?;
            for &next in &node.neighbors {
                if seen.contains_key(&next) {
                    continue;
                }
                if !constraints.admits(&*cache.get(next)?) {
                    continue;
                }
                seen.insert(next, depth + 1);
                discovered.push(SubgraphNode {
                    id: next,
                    depth: depth + 1,
                    parent: Some(current),
                });
                queue.push_back(next);
            }
        }

        Ok(discovered)
    }
}

/// Memoizes node fetches for the lifetime of a single search.
pub struct NodeCache<'a, S: GraphStore + ?Sized> {
    store: &'a S,
    nodes: HashMap<NodeId, Arc<IndoorNode>>,
    fetches: usize,
}

impl<'a, S: GraphStore + ?Sized> NodeCache<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            nodes: HashMap::new(),
            fetches: 0,
        }
    }

    /// Return the node, fetching it from the store on first use only.
    pub fn get(&mut self, id: NodeId) -> Result<Arc<IndoorNode>> {
        if let Some(node) = self.nodes.get(&id) {
            return Ok(Arc::clone(node));
        }
        let node = self.store.node(id)?;
        self.fetches += 1;
        self.nodes.insert(id, Arc::clone(&node));
        Ok(node)
    }

    /// Number of round trips made to the underlying store.
    pub fn fetches(&self) -> usize {
        self.fetches
    }

    pub fn store(&self) -> &'a S {
        self.store
    }
}

/// In-memory, read-only snapshot of a building graph.
#[derive(Debug, Clone, Default)]
pub struct BuildingMap {
    nodes: HashMap<NodeId, Arc<IndoorNode>>,
    node_name_to_id: HashMap<String, NodeId>,
    landmarks: Vec<Arc<Landmark>>,
    landmark_name_to_index: HashMap<String, usize>,
    landmarks_by_node: HashMap<NodeId, Vec<usize>>,
}

impl BuildingMap {
    /// Build a snapshot and its lookup indexes.
    ///
    /// When two landmarks share a name, the first one wins name lookups.
    pub fn from_parts(nodes: Vec<IndoorNode>, landmarks: Vec<Landmark>) -> Self {
        let node_name_to_id = nodes
            .iter()
            .map(|node| (node.name.clone(), node.id))
            .collect();
        let nodes = nodes
            .into_iter()
            .map(|node| (node.id, Arc::new(node)))
            .collect();

        let mut landmark_name_to_index = HashMap::new();
        let mut landmarks_by_node: HashMap<NodeId, Vec<usize>> = HashMap::new();
        for (index, landmark) in landmarks.iter().enumerate() {
            if landmark_name_to_index.contains_key(&landmark.name) {
                tracing::warn!(name = %landmark.name, "duplicate landmark name, keeping the first");
            } else {
                landmark_name_to_index.insert(landmark.name.clone(), index);
            }
            for &node in &landmark.connected_to {
                landmarks_by_node.entry(node).or_default().push(index);
            }
        }

        Self {
            nodes,
            node_name_to_id,
            landmarks: landmarks.into_iter().map(Arc::new).collect(),
            landmark_name_to_index,
            landmarks_by_node,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn landmark_count(&self) -> usize {
        self.landmarks.len()
    }

    /// Lookup a node identifier by its case-sensitive name.
    pub fn node_id_by_name(&self, name: &str) -> Option<NodeId> {
        self.node_name_to_id.get(name).copied()
    }

    /// Lookup a node name by identifier.
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(&id).map(|node| node.name.as_str())
    }

    /// Landmarks in dataset order.
    pub fn landmarks(&self) -> impl Iterator<Item = &Arc<Landmark>> {
        self.landmarks.iter()
    }
}

impl GraphStore for BuildingMap {
    fn node(&self, id: NodeId) -> Result<Arc<IndoorNode>> {
        self.nodes
            .get(&id)
            .cloned()
            .ok_or(Error::UnknownNode { id })
    }

    fn find_landmark_by_name(&self, name: &str) -> Result<Option<Arc<Landmark>>> {
        Ok(self
            .landmark_name_to_index
            .get(name)
            .map(|&index| Arc::clone(&self.landmarks[index])))
    }

    fn landmarks_at_node(
        &self,
        node: NodeId,
        category: LandmarkCategory,
    ) -> Result<Vec<Arc<Landmark>>> {
        Ok(self
            .landmarks_by_node
            .get(&node)
            .map(|indexes| {
                indexes
                    .iter()
                    .map(|&index| &self.landmarks[index])
                    .filter(|landmark| landmark.category == category)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn landmark_name_suggestions(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .landmark_name_to_index
            .keys()
            .map(|candidate| {
                let score = strsim::jaro_winkler(&needle, &candidate.to_lowercase());
                (score, candidate.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }
}
