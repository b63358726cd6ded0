//! Liveness and readiness probes.
//!
//! `GET /health/live` answers as long as the process serves requests.
//! `GET /health/ready` also reports what the building snapshot holds and
//! answers 503 while it has no nodes, since no path can be planned then.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use indoorpath_lib::BuildingMap;

use crate::AppState;

const SERVICE: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Size of the loaded building snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatasetCounts {
    pub nodes_loaded: usize,
    pub landmarks_loaded: usize,
}

impl DatasetCounts {
    pub fn of(map: &BuildingMap) -> Self {
        Self {
            nodes_loaded: map.node_count(),
            landmarks_loaded: map.landmark_count(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// `ok` or `not_ready: <reason>`.
    pub status: String,
    pub service: &'static str,
    pub version: &'static str,
    #[serde(flatten)]
    pub dataset: Option<DatasetCounts>,
}

impl HealthStatus {
    pub fn live() -> Self {
        Self {
            status: "ok".to_string(),
            service: SERVICE,
            version: VERSION,
            dataset: None,
        }
    }

    /// Readiness of a snapshot and the status code to answer with.
    pub fn readiness(map: &BuildingMap) -> (StatusCode, Self) {
        let counts = DatasetCounts::of(map);
        let (code, status) = if counts.nodes_loaded == 0 {
            (StatusCode::SERVICE_UNAVAILABLE, "not_ready: no nodes loaded")
        } else {
            (StatusCode::OK, "ok")
        };
        let health = Self {
            status: status.to_string(),
            dataset: Some(counts),
            ..Self::live()
        };
        (code, health)
    }
}

pub async fn health_live() -> Json<HealthStatus> {
    Json(HealthStatus::live())
}

pub async fn health_ready(State(state): State<AppState>) -> Response {
    let (code, health) = HealthStatus::readiness(state.map());
    (code, Json(health)).into_response()
}
