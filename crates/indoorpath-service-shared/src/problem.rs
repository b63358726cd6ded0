//! Error bodies for the path endpoint.
//!
//! Bodies follow RFC 9457 (<https://www.rfc-editor.org/rfc/rfc9457.html>) and
//! also carry a plain `error` string, so a client that only reads `error`
//! still has a message to show.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use indoorpath_lib::{Error as LibError, ErrorKind};

/// Failure classes the service reports, each with a stable type URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    InvalidRequest,
    UnknownLandmark,
    LandmarkUnavailable,
    LandmarkNotLinked,
    PathNotFound,
    ServiceUnavailable,
    Internal,
}

impl ProblemKind {
    /// Relative type URI, e.g. `/problems/unknown-landmark`.
    pub fn type_uri(self) -> &'static str {
        match self {
            ProblemKind::InvalidRequest => "/problems/invalid-request",
            ProblemKind::UnknownLandmark => "/problems/unknown-landmark",
            ProblemKind::LandmarkUnavailable => "/problems/landmark-unavailable",
            ProblemKind::LandmarkNotLinked => "/problems/landmark-not-linked",
            ProblemKind::PathNotFound => "/problems/path-not-found",
            ProblemKind::ServiceUnavailable => "/problems/service-unavailable",
            ProblemKind::Internal => "/problems/internal-error",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ProblemKind::InvalidRequest => "Invalid Request",
            ProblemKind::UnknownLandmark => "Unknown Landmark",
            ProblemKind::LandmarkUnavailable => "Landmark Unavailable",
            ProblemKind::LandmarkNotLinked => "Landmark Not Linked",
            ProblemKind::PathNotFound => "Path Not Found",
            ProblemKind::ServiceUnavailable => "Service Unavailable",
            ProblemKind::Internal => "Internal Error",
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            ProblemKind::InvalidRequest | ProblemKind::LandmarkNotLinked => StatusCode::BAD_REQUEST,
            ProblemKind::UnknownLandmark
            | ProblemKind::LandmarkUnavailable
            | ProblemKind::PathNotFound => StatusCode::NOT_FOUND,
            ProblemKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ProblemKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Problem class for a library error.
    pub fn of(error: &LibError) -> Self {
        match error {
            LibError::UnknownLandmark { .. } => ProblemKind::UnknownLandmark,
            LibError::LandmarkUnavailable { .. } => ProblemKind::LandmarkUnavailable,
            LibError::LandmarkNotLinked { .. } => ProblemKind::LandmarkNotLinked,
            LibError::DatasetNotFound { .. } => ProblemKind::ServiceUnavailable,
            other => match other.kind() {
                ErrorKind::NotFound => ProblemKind::PathNotFound,
                ErrorKind::BadRequest => ProblemKind::InvalidRequest,
                ErrorKind::Internal => ProblemKind::Internal,
            },
        }
    }
}

/// A problem details body.
///
/// ```
/// use indoorpath_service_shared::{ProblemDetails, ProblemKind};
///
/// let problem = ProblemDetails::new(ProblemKind::UnknownLandmark, "source landmark not found: Lobby", "req-1");
/// assert_eq!(problem.status, 404);
/// assert_eq!(problem.error, "source landmark not found: Lobby");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ProblemDetails {
    /// Same text as `detail`.
    pub error: String,
    #[serde(rename = "type")]
    pub type_uri: &'static str,
    pub title: &'static str,
    pub status: u16,
    pub detail: String,
    /// Request id of the failing request.
    pub instance: String,
    pub content_type: &'static str,
}

impl ProblemDetails {
    pub fn new(kind: ProblemKind, detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        let detail = detail.into();
        Self {
            error: detail.clone(),
            type_uri: kind.type_uri(),
            title: kind.title(),
            status: kind.status().as_u16(),
            detail,
            instance: request_id.into(),
            content_type: "application/problem+json",
        }
    }

    /// 400 for missing or malformed parameters.
    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(ProblemKind::InvalidRequest, detail, request_id)
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.title, self.status, self.detail)
    }
}

impl std::error::Error for ProblemDetails {}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = (status, Json(self)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}

/// Problem body for a library error.
///
/// Internal errors are logged here and replaced by a generic message.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    let kind = ProblemKind::of(error);
    let detail = match (kind, error) {
        (ProblemKind::Internal, _) => {
            tracing::error!(error = %error, request_id, "internal error while planning path");
            "internal error while planning path".to_string()
        }
        (ProblemKind::ServiceUnavailable, LibError::DatasetNotFound { path }) => {
            format!("building data not available at {}", path.display())
        }
        _ => error.to_string(),
    };
    ProblemDetails::new(kind, detail, request_id)
}
