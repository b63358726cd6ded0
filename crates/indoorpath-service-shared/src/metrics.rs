//! Prometheus metrics for the indoor path services.
//!
//! - [`MetricsConfig`] / [`init_metrics`]: install the global recorder
//! - [`metrics_handler`]: exposition text for `GET /metrics`
//! - business helpers for path outcomes
//!
//! ```no_run
//! use axum::{routing::get, Router};
//! use indoorpath_service_shared::metrics::{init_metrics, metrics_handler, MetricsConfig};
//!
//! init_metrics(&MetricsConfig::default()).expect("failed to initialize metrics");
//! let app: Router = Router::new().route("/metrics", get(metrics_handler));
//! ```

use indoorpath_lib::{Error as LibError, ErrorKind};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Route serving the exposition text.
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// - `METRICS_ENABLED`: anything but `false` enables metrics
    /// - `METRICS_PATH`: default `/metrics`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = lookup("METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);
        let path = lookup("METRICS_PATH")
            .filter(|p| p.starts_with('/'))
            .unwrap_or_else(|| "/metrics".to_string());
        Self { enabled, path }
    }
}

/// Install the Prometheus recorder. Must be called once, before any metric
/// is recorded.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)?;

    Ok(())
}

pub fn prometheus_handle() -> Option<&'static PrometheusHandle> {
    PROMETHEUS_HANDLE.get()
}

/// Handler for the metrics route.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

#[derive(Debug, Clone)]
pub enum MetricsError {
    Disabled,
    AlreadyInitialized,
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => {
                write!(f, "failed to install metrics recorder: {}", e)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

// =============================================================================
// Business Metrics Helpers
// =============================================================================

/// Increment `indoorpath_paths_calculated_total{algorithm}`.
pub fn record_path_calculated(algorithm: &str) {
    metrics::counter!(
        "indoorpath_paths_calculated_total",
        "algorithm" => algorithm.to_string()
    )
    .increment(1);
}

/// Increment `indoorpath_paths_failed_total{reason}`.
pub fn record_path_failed(reason: &str) {
    metrics::counter!(
        "indoorpath_paths_failed_total",
        "reason" => reason.to_string()
    )
    .increment(1);
}

/// Record the displayed step count to `indoorpath_path_steps{algorithm}`.
pub fn record_path_steps(steps: usize, algorithm: &str) {
    metrics::histogram!(
        "indoorpath_path_steps",
        "algorithm" => algorithm.to_string()
    )
    .record(steps as f64);
}

/// Low-cardinality failure label for a library error.
pub fn failure_reason(error: &LibError) -> &'static str {
    match error {
        LibError::UnknownLandmark { .. } => "unknown_landmark",
        LibError::LandmarkNotLinked { .. } => "landmark_not_linked",
        LibError::LandmarkUnavailable { .. } => "landmark_unavailable",
        LibError::RouteNotFound { .. } => "no_path",
        LibError::NoReachableCategory { .. } => "no_category_match",
        LibError::UnknownMode { .. } | LibError::UnknownCategory { .. } => "validation_error",
        other if other.kind() == ErrorKind::Internal => "internal",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_config_default() {
        let config = MetricsConfig::default();
        assert!(config.enabled);
        assert_eq!(config.path, "/metrics");
    }

    #[test]
    fn test_metrics_config_from_lookup() {
        let config = MetricsConfig::from_lookup(|key| match key {
            "METRICS_ENABLED" => Some("FALSE".to_string()),
            "METRICS_PATH" => Some("/internal/metrics".to_string()),
            _ => None,
        });
        assert!(!config.enabled);
        assert_eq!(config.path, "/internal/metrics");

        let relative = MetricsConfig::from_lookup(|key| {
            (key == "METRICS_PATH").then(|| "metrics".to_string())
        });
        assert_eq!(relative.path, "/metrics");
    }

    #[test]
    fn test_init_metrics_disabled() {
        let config = MetricsConfig {
            enabled: false,
            path: "/metrics".to_string(),
        };
        assert!(matches!(init_metrics(&config), Err(MetricsError::Disabled)));
    }

    #[test]
    fn test_metrics_handler_returns_prometheus_format() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let output = rt.block_on(async { metrics_handler().await });
        assert!(output.contains('#') || output.is_empty());
    }

    #[test]
    fn test_business_metrics_record_without_recorder() {
        record_path_calculated("bfs");
        record_path_calculated("bfs (via type)");
        record_path_failed("no_path");
        record_path_steps(6, "graph");
    }

    #[test]
    fn test_failure_reasons() {
        let err = LibError::RouteNotFound {
            start: "A".to_string(),
            goal: "B".to_string(),
        };
        assert_eq!(failure_reason(&err), "no_path");

        let err = LibError::UnknownMode {
            value: "dfs".to_string(),
        };
        assert_eq!(failure_reason(&err), "validation_error");

        let err = LibError::Store {
            message: "timeout".to_string(),
        };
        assert_eq!(failure_reason(&err), "internal");
    }

    #[test]
    fn test_metrics_error_display() {
        assert_eq!(MetricsError::Disabled.to_string(), "metrics are disabled");
        assert!(MetricsError::InstallFailed("boom".to_string())
            .to_string()
            .contains("boom"));
    }
}
