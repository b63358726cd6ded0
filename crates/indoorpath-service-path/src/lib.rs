//! Indoor path-finding HTTP microservice.
//!
//! # Endpoints
//!
//! - `GET /path` and `GET /api/path` - plan a path between landmarks
//! - `GET /metrics` - Prometheus metrics
//! - `GET /health/live`, `GET /health/ready` - probes
//!
//! `from` names the source landmark. `to` names a destination landmark or one
//! of the category tokens `printer`, `classroom`, `male-restroom`,
//! `female-restroom` and `neutral-restroom`, in which case the nearest
//! available landmark of that category is used.

#![deny(warnings)]

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use indoorpath_lib::{plan_path, PathPlan};
use indoorpath_service_shared::{
    failure_reason, from_lib_error, health_live, health_ready, metrics_handler,
    record_path_calculated, record_path_failed, record_path_steps, AppState, MetricsConfig,
    PathQuery, PathResponse, ProblemDetails, RequestId, RequestLayer,
};

/// Build the service router.
pub fn app(state: AppState, metrics: &MetricsConfig) -> Router {
    let mut router = Router::new()
        .route("/path", get(path_handler))
        .route("/api/path", get(path_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready));

    if metrics.enabled {
        router = router.route(&metrics.path, get(metrics_handler));
    }

    router
        .layer(CorsLayer::permissive())
        .layer(RequestLayer::new(&metrics.path))
        .with_state(state)
}

/// Handle `GET /path`.
async fn path_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    query: Result<Query<PathQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!(request_id = %request_id, error = %rejection, "malformed query string");
            record_path_failed("validation_error");
            return ProblemDetails::bad_request(
                format!("invalid query string: {}", rejection.body_text()),
                request_id.as_str(),
            )
            .into_response();
        }
    };

    let request = match query.into_path_request(state.max_subgraph_depth(), request_id.as_str()) {
        Ok(request) => request,
        Err(problem) => {
            record_path_failed("validation_error");
            return problem.into_response();
        }
    };

    info!(
        request_id = %request_id,
        from = %request.from,
        to = %request.to,
        mode = ?request.mode,
        accessible = request.require_accessible,
        "handling path request"
    );

    match plan_path(state.map(), &request, &state.now()) {
        Ok(plan) => {
            record_success(&plan);
            info!(
                request_id = %request_id,
                algorithm = %plan.algorithm,
                steps = plan.steps.len(),
                "path computed"
            );
            PathResponse::from(plan).into_response()
        }
        Err(err) => {
            record_path_failed(failure_reason(&err));
            info!(request_id = %request_id, error = %err, "path request failed");
            from_lib_error(&err, request_id.as_str()).into_response()
        }
    }
}

fn record_success(plan: &PathPlan) {
    let algorithm = plan.algorithm.as_str();
    record_path_calculated(algorithm);
    record_path_steps(plan.steps.len(), algorithm);
}
