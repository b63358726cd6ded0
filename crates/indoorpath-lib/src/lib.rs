//! Indoor path-finding library.
//!
//! This crate loads a building dataset (indoor nodes plus the landmarks
//! attached to them), exposes it through the read-only [`GraphStore`] trait,
//! and plans step-free paths between landmarks. Front ends (CLI, HTTP service)
//! should only depend on the functions exported here instead of reimplementing
//! behavior.
//!

#![deny(warnings)]

pub mod availability;
pub mod dataset;
pub mod error;
pub mod model;
pub mod path;
pub mod postprocess;
pub mod routing;
pub mod store;
pub mod subgraph;

#[cfg(test)]
mod test_helpers;

pub use availability::{is_available, is_open_at, Clock, FixedClock, SystemClock, DEFAULT_TIMEZONE};
pub use dataset::{load_building, parse_building};
pub use error::{Error, ErrorKind, LandmarkRole, Result};
pub use model::{DayHours, GeoPoint, IndoorNode, Landmark, LandmarkCategory, NodeId, NodeKind};
pub use path::{find_nearest_by_category, find_route, find_route_bfs, PathConstraints};
pub use postprocess::{compress_stairs, PathStep};
pub use routing::{plan_path, Destination, PathAlgorithm, PathMode, PathPlan, PathRequest};
pub use store::{BuildingMap, GraphStore, NodeCache};
pub use subgraph::{find_route_subgraph, DEFAULT_MAX_SUBGRAPH_DEPTH};
