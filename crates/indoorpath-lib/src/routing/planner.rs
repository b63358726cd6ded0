//! Point-to-point search strategies.
//!
//! Each strategy is a [`PathPlanner`]. The orchestrator always runs
//! [`BfsPlanner`] for the baseline and consults a supplementary planner only
//! when the request asks for one.

use crate::error::Result;
use crate::model::NodeId;
use crate::path::{find_route_bfs, PathConstraints};
use crate::store::GraphStore;
use crate::subgraph::{find_route_subgraph, DEFAULT_MAX_SUBGRAPH_DEPTH};

use super::{PathAlgorithm, PathMode, PathRequest};

/// A point-to-point search strategy.
pub trait PathPlanner: Send + Sync {
    /// Label reported when this planner's path is chosen.
    fn algorithm(&self) -> PathAlgorithm;

    /// Search for a path from `start` to `goal`.
    ///
    /// Returns `Ok(None)` when no path satisfies `constraints`.
    fn find_path(
        &self,
        store: &dyn GraphStore,
        start: NodeId,
        goal: NodeId,
        constraints: &PathConstraints,
    ) -> Result<Option<Vec<NodeId>>>;
}

/// Minimum-hop breadth-first search.
#[derive(Debug, Clone, Copy, Default)]
pub struct BfsPlanner;

impl PathPlanner for BfsPlanner {
    fn algorithm(&self) -> PathAlgorithm {
        PathAlgorithm::Bfs
    }

    fn find_path(
        &self,
        store: &dyn GraphStore,
        start: NodeId,
        goal: NodeId,
        constraints: &PathConstraints,
    ) -> Result<Option<Vec<NodeId>>> {
        find_route_bfs(store, start, goal, constraints)
    }
}

/// Bulk subgraph expansion capped at `max_depth` hops.
#[derive(Debug, Clone, Copy)]
pub struct SubgraphPlanner {
    max_depth: usize,
}

impl SubgraphPlanner {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for SubgraphPlanner {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SUBGRAPH_DEPTH)
    }
}

impl PathPlanner for SubgraphPlanner {
    fn algorithm(&self) -> PathAlgorithm {
        PathAlgorithm::Graph
    }

    fn find_path(
        &self,
        store: &dyn GraphStore,
        start: NodeId,
        goal: NodeId,
        constraints: &PathConstraints,
    ) -> Result<Option<Vec<NodeId>>> {
        find_route_subgraph(store, start, goal, self.max_depth, constraints)
    }
}

/// Supplementary planner for the request's mode, if any.
pub fn select_supplement(request: &PathRequest) -> Option<Box<dyn PathPlanner>> {
    match request.mode {
        PathMode::Bfs => None,
        PathMode::Graph => Some(Box::new(SubgraphPlanner::new(request.max_subgraph_depth))),
    }
}
