use std::path::PathBuf;

use thiserror::Error;

use crate::model::NodeId;

/// Convenient result alias for the indoor path-finding library.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification used by front ends to pick a status code or exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The requested landmark, node, or path does not exist.
    NotFound,
    /// The request is malformed or refers to data that cannot be routed.
    BadRequest,
    /// The graph store or dataset failed.
    Internal,
}

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset file could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// Raised when a dataset does not contain any nodes.
    #[error("dataset contains no nodes")]
    EmptyDataset,

    /// Raised when two nodes in a dataset share a name.
    #[error("duplicate node name encountered: {name}")]
    DuplicateNodeName { name: String },

    /// Raised when a node lists a neighbour that is not part of the dataset.
    #[error("node '{node}' connects to unknown node '{neighbor}'")]
    UnknownNodeReference { node: String, neighbor: String },

    /// Raised when a landmark carries an impossible hours entry.
    #[error("invalid hours for landmark '{landmark}' on day {day}: {message}")]
    InvalidHours {
        landmark: String,
        day: usize,
        message: String,
    },

    /// Raised when a landmark location lies outside valid coordinate ranges.
    #[error("invalid location for landmark '{landmark}': ({longitude}, {latitude})")]
    InvalidLocation {
        landmark: String,
        longitude: f64,
        latitude: f64,
    },

    /// Raised when a category token is not one of the known landmark categories.
    #[error("unknown landmark category: {value}")]
    UnknownCategory { value: String },

    /// Raised when a search mode token is not recognised.
    #[error("unknown path mode '{value}', expected 'bfs' or 'graph'")]
    UnknownMode { value: String },

    /// Raised when a node identifier is not present in the graph store.
    #[error("unknown node id: {id}")]
    UnknownNode { id: NodeId },

    /// Raised when a landmark name could not be found.
    #[error("{role} landmark not found: {name}{}", format_suggestions(.suggestions))]
    UnknownLandmark {
        role: LandmarkRole,
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a landmark exists but is not linked to any indoor node.
    #[error("{role} landmark '{name}' is not linked to an indoor node")]
    LandmarkNotLinked { role: LandmarkRole, name: String },

    /// Raised when the destination landmark is closed or inaccessible right now.
    #[error("destination landmark '{name}' is not available")]
    LandmarkUnavailable { name: String },

    /// Raised when no path connects two landmarks.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when no available landmark of a category is reachable.
    #[error("no reachable landmark of type '{category}'")]
    NoReachableCategory { category: String },

    /// Raised by graph store implementations when a backing read fails.
    #[error("graph store failure: {message}")]
    Store { message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Classify the error for front ends.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnknownLandmark { .. }
            | Error::LandmarkUnavailable { .. }
            | Error::RouteNotFound { .. }
            | Error::NoReachableCategory { .. } => ErrorKind::NotFound,
            Error::LandmarkNotLinked { .. }
            | Error::UnknownCategory { .. }
            | Error::UnknownMode { .. } => ErrorKind::BadRequest,
            _ => ErrorKind::Internal,
        }
    }
}

/// Which end of a path request a landmark error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkRole {
    Source,
    Destination,
}

impl std::fmt::Display for LandmarkRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LandmarkRole::Source => f.write_str("source"),
            LandmarkRole::Destination => f.write_str("destination"),
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
