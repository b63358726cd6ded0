//! Path planning between landmarks.
//!
//! This module provides:
//! - [`PathMode`] - which strategies a request asks for
//! - [`PathAlgorithm`] - which strategy produced the returned path
//! - [`Destination`] - a named landmark or a nearest-of-category target
//! - [`PathRequest`] / [`PathPlan`] - request and result
//! - [`plan_path`] - the entry point used by the CLI and the HTTP service
//!
//! A request resolves its source landmark, then either searches outward for
//! the nearest available landmark of a category or runs a point-to-point
//! breadth-first search to a named landmark. In graph mode the subgraph
//! planner is consulted as well and its path is used only when strictly
//! shorter. Stair landings are compressed before names are resolved.

mod planner;

pub use planner::{select_supplement, BfsPlanner, PathPlanner, SubgraphPlanner};

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, TimeZone};
use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::availability::is_available;
use crate::error::{Error, LandmarkRole, Result};
use crate::model::{Landmark, LandmarkCategory, NodeId};
use crate::path::{find_nearest_by_category, PathConstraints};
use crate::postprocess::{compress_stairs, resolve_steps, PathStep};
use crate::store::GraphStore;
use crate::subgraph::{prefer_shorter, DEFAULT_MAX_SUBGRAPH_DEPTH};

/// Number of fuzzy suggestions attached to unknown-landmark errors.
const SUGGESTION_LIMIT: usize = 3;

/// Requested search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathMode {
    /// Breadth-first search only.
    #[default]
    Bfs,
    /// Breadth-first search supplemented by bulk subgraph expansion.
    Graph,
}

impl FromStr for PathMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bfs" => Ok(PathMode::Bfs),
            "graph" => Ok(PathMode::Graph),
            other => Err(Error::UnknownMode {
                value: other.to_string(),
            }),
        }
    }
}

/// Strategy that produced a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathAlgorithm {
    /// Point-to-point breadth-first search.
    Bfs,
    /// Nearest-of-category breadth-first search.
    BfsViaType,
    /// Bulk subgraph expansion, chosen because it was strictly shorter.
    Graph,
}

impl PathAlgorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            PathAlgorithm::Bfs => "bfs",
            PathAlgorithm::BfsViaType => "bfs (via type)",
            PathAlgorithm::Graph => "graph",
        }
    }
}

impl fmt::Display for PathAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PathAlgorithm {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// What the `to` token of a request refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Nearest available landmark of this category.
    Category(LandmarkCategory),
    /// A landmark with this exact name.
    Named(String),
}

impl Destination {
    /// Category tokens win over landmark names.
    pub fn parse(token: &str) -> Self {
        match LandmarkCategory::searchable_from_token(token) {
            Some(category) => Destination::Category(category),
            None => Destination::Named(token.to_string()),
        }
    }
}

/// High-level path planning request.
#[derive(Debug, Clone)]
pub struct PathRequest {
    /// Exact name of the source landmark.
    pub from: String,
    /// Destination landmark name or category token.
    pub to: String,
    pub mode: PathMode,
    /// Never route through nodes flagged inaccessible. The source node is exempt.
    pub require_accessible: bool,
    /// Depth cap for the subgraph planner.
    pub max_subgraph_depth: usize,
}

impl PathRequest {
    /// Breadth-first, step-free request with default limits.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            mode: PathMode::Bfs,
            require_accessible: true,
            max_subgraph_depth: DEFAULT_MAX_SUBGRAPH_DEPTH,
        }
    }

    pub fn with_mode(mut self, mode: PathMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_accessibility(mut self, require_accessible: bool) -> Self {
        self.require_accessible = require_accessible;
        self
    }

    pub fn destination(&self) -> Destination {
        Destination::parse(&self.to)
    }

    fn constraints(&self) -> PathConstraints {
        PathConstraints {
            require_accessible: self.require_accessible,
        }
    }
}

/// Planned path returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct PathPlan {
    pub algorithm: PathAlgorithm,
    /// Source landmark name.
    pub from: String,
    /// Destination landmark name; the matched landmark for category requests.
    pub to: String,
    pub steps: Vec<PathStep>,
}

impl PathPlan {
    /// Number of moves between steps.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Plan a path for `request`, judging landmark availability at `now`.
pub fn plan_path<Z: TimeZone>(
    store: &dyn GraphStore,
    request: &PathRequest,
    now: &DateTime<Z>,
) -> Result<PathPlan> {
    let source = resolve_landmark(store, &request.from, LandmarkRole::Source)?;
    let start = linked_node(&source, LandmarkRole::Source)?;
    let constraints = request.constraints();

    let (algorithm, destination, path) = match request.destination() {
        Destination::Category(category) => {
            debug!(from = %source.name, %category, "searching nearest landmark by category");
            let found = find_nearest_by_category(store, start, category, now, &constraints)?
                .ok_or_else(|| Error::NoReachableCategory {
                    category: category.to_string(),
                })?;
            (PathAlgorithm::BfsViaType, found.landmark, found.path)
        }
        Destination::Named(name) => {
            let target = resolve_landmark(store, &name, LandmarkRole::Destination)?;
            if !is_available(&target, now) {
                return Err(Error::LandmarkUnavailable { name: target.name.clone() });
            }
            let goal = linked_node(&target, LandmarkRole::Destination)?;
            let (algorithm, path) = point_to_point(store, request, start, goal, &constraints)?
                .ok_or_else(|| Error::RouteNotFound {
                    start: source.name.clone(),
                    goal: target.name.clone(),
                })?;
            (algorithm, target, path)
        }
    };

    let nodes = store.nodes(&path)?;
    let compressed = compress_stairs(&path, &nodes);
    let names: HashMap<NodeId, String> = nodes
        .iter()
        .map(|(&id, node)| (id, node.name.clone()))
        .collect();
    let steps = resolve_steps(&compressed, &names);

    debug!(
        %algorithm,
        raw = path.len(),
        steps = steps.len(),
        "path planned"
    );

    Ok(PathPlan {
        algorithm,
        from: source.name.clone(),
        to: destination.name.clone(),
        steps,
    })
}

/// Run the BFS baseline, then let the supplementary planner replace it only
/// with a strictly shorter path.
fn point_to_point(
    store: &dyn GraphStore,
    request: &PathRequest,
    start: NodeId,
    goal: NodeId,
    constraints: &PathConstraints,
) -> Result<Option<(PathAlgorithm, Vec<NodeId>)>> {
    let baseline_planner = BfsPlanner;
    let Some(baseline) = baseline_planner.find_path(store, start, goal, constraints)? else {
        return Ok(None);
    };

    let Some(supplement) = select_supplement(request) else {
        return Ok(Some((baseline_planner.algorithm(), baseline)));
    };

    let candidate = match supplement.find_path(store, start, goal, constraints) {
        Ok(candidate) => candidate,
        Err(err) => {
            warn!(error = %err, "supplementary planner failed, keeping bfs path");
            None
        }
    };

    let (path, replaced) = prefer_shorter(baseline, candidate);
    let algorithm = if replaced {
        supplement.algorithm()
    } else {
        baseline_planner.algorithm()
    };
    Ok(Some((algorithm, path)))
}

fn resolve_landmark(
    store: &dyn GraphStore,
    name: &str,
    role: LandmarkRole,
) -> Result<Arc<Landmark>> {
    store
        .find_landmark_by_name(name)?
        .ok_or_else(|| Error::UnknownLandmark {
            role,
            name: name.to_string(),
            suggestions: store.landmark_name_suggestions(name, SUGGESTION_LIMIT),
        })
}

fn linked_node(landmark: &Landmark, role: LandmarkRole) -> Result<NodeId> {
    landmark
        .primary_node()
        .ok_or_else(|| Error::LandmarkNotLinked {
            role,
            name: landmark.name.clone(),
        })
}
