//! Shared infrastructure for the indoor path HTTP services.
//!
//! - [`AppState`]: loaded building snapshot and canonical clock
//! - [`ServiceConfig`]: environment configuration
//! - [`health`]: liveness and readiness probes
//! - [`ProblemDetails`]: RFC 9457 error bodies
//! - [`PathResponse`]: success body for a planned path
//! - [`metrics`], [`logging`], [`middleware`]: observability
//! - [`PathQuery`]: query parameters with validation
//!
//! Handlers stay thin; all path-finding lives in `indoorpath-lib`:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  axum handler                                │
//! │  - parse query string                        │
//! │  - validate parameters                       │
//! │  - call indoorpath_lib::plan_path            │
//! │  - format response or problem details        │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Enable the `test-utils` feature for fixture state in dependent crates.

#![deny(warnings)]

pub mod config;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ConfigError, ServiceConfig};
pub use health::{health_live, health_ready, DatasetCounts, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    failure_reason, init_metrics, metrics_handler, record_path_calculated, record_path_failed,
    record_path_steps, MetricsConfig, MetricsError,
};
pub use middleware::{RequestId, RequestLayer, REQUEST_ID_HEADER};
pub use problem::{from_lib_error, ProblemDetails, ProblemKind};
pub use request::{PathQuery, Validate, MISSING_ENDPOINTS};
pub use response::PathResponse;
pub use state::{AppState, AppStateError};
