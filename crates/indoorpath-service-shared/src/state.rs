//! Application state shared by the axum handlers.

use std::path::Path;
use std::sync::Arc;

use chrono::DateTime;
use chrono_tz::Tz;
use indoorpath_lib::{load_building, BuildingMap, Clock, Error as LibError, SystemClock};

use crate::config::ServiceConfig;

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// The dataset file does not exist.
    DatasetNotFound(String),
    /// The dataset exists but could not be loaded.
    DatasetLoad(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatasetNotFound(path) => write!(f, "building dataset not found: {}", path),
            Self::DatasetLoad(e) => write!(f, "failed to load building dataset: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DatasetLoad(e) => Some(e),
            Self::DatasetNotFound(_) => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        match err {
            LibError::DatasetNotFound { path } => Self::DatasetNotFound(path.display().to_string()),
            other => Self::DatasetLoad(other),
        }
    }
}

/// Read-only building snapshot plus the clock used for availability checks.
///
/// Cheap to clone; share it through axum's `State` extractor.
///
/// ```ignore
/// use axum::{extract::State, routing::get, Router};
/// use indoorpath_service_shared::{AppState, ServiceConfig};
///
/// async fn handler(State(state): State<AppState>) -> String {
///     state.map().node_count().to_string()
/// }
///
/// let state = AppState::load(&ServiceConfig::from_env()?)?;
/// let app = Router::new().route("/nodes", get(handler)).with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    map: BuildingMap,
    clock: Arc<dyn Clock>,
    max_subgraph_depth: usize,
}

impl AppState {
    /// Load the dataset named by `config` and use a wall clock in its zone.
    pub fn load(config: &ServiceConfig) -> Result<Self, AppStateError> {
        let map = load_map(&config.data_path)?;
        Ok(Self::from_components(
            map,
            Arc::new(SystemClock::new(config.timezone)),
            config.max_subgraph_depth,
        ))
    }

    /// Build state from pre-loaded parts; used by tests.
    pub fn from_components(
        map: BuildingMap,
        clock: Arc<dyn Clock>,
        max_subgraph_depth: usize,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                map,
                clock,
                max_subgraph_depth,
            }),
        }
    }

    pub fn map(&self) -> &BuildingMap {
        &self.inner.map
    }

    /// Current time in the canonical zone.
    pub fn now(&self) -> DateTime<Tz> {
        self.inner.clock.now()
    }

    pub fn max_subgraph_depth(&self) -> usize {
        self.inner.max_subgraph_depth
    }
}

fn load_map(path: &Path) -> Result<BuildingMap, AppStateError> {
    if !path.exists() {
        return Err(AppStateError::DatasetNotFound(path.display().to_string()));
    }
    Ok(load_building(path)?)
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("node_count", &self.inner.map.node_count())
            .field("landmark_count", &self.inner.map.landmark_count())
            .field("max_subgraph_depth", &self.inner.max_subgraph_depth)
            .finish()
    }
}
