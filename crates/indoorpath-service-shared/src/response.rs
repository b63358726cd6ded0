//! Success body for the path endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use indoorpath_lib::PathPlan;

/// A planned path plus the `content_type` marker that
/// [`crate::ProblemDetails`] also carries, so clients can branch on one field.
///
/// Serializes as `{algorithm, from, to, steps, hops, content_type}`.
#[derive(Debug, Clone, Serialize)]
pub struct PathResponse {
    #[serde(flatten)]
    pub plan: PathPlan,
    /// Moves between the first and last step.
    pub hops: usize,
    pub content_type: &'static str,
}

impl From<PathPlan> for PathResponse {
    fn from(plan: PathPlan) -> Self {
        Self {
            hops: plan.hop_count(),
            plan,
            content_type: "application/json",
        }
    }
}

impl IntoResponse for PathResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
