//! Structured logging for the indoor path services.
//!
//! - `LOG_FORMAT`: `json` (default) or `text`/`pretty`
//! - `RUST_LOG`: filter directives (default: `info`)
//! - `SERVICE_NAME`: attached to every JSON log line through a root span
//!
//! ```no_run
//! use indoorpath_service_shared::logging::{init_logging, LoggingConfig};
//!
//! let config = LoggingConfig::from_env().with_service("path");
//! let _guard = init_logging(&config);
//! ```

use serde::{Deserialize, Serialize};
use tracing::span::EnteredSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON lines for log shippers.
    #[default]
    Json,
    /// Human-readable output for local runs.
    Text,
}

impl LogFormat {
    /// Unrecognised values select JSON.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => LogFormat::Text,
            _ => LogFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Fallback filter when `RUST_LOG` is unset.
    pub level: String,
    pub service: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            level: "info".to_string(),
            service: None,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            format: lookup("LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
            level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            service: lookup("SERVICE_NAME"),
        }
    }

    /// Set the service name unless `SERVICE_NAME` already provided one.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        if self.service.is_none() {
            self.service = Some(service.into());
        }
        self
    }
}

/// Install the global subscriber.
///
/// Returns the entered root span carrying the service name; keep it alive for
/// the lifetime of the process. Returns `None` when a subscriber was already
/// installed, which happens when tests initialise logging more than once.
pub fn init_logging(config: &LoggingConfig) -> Option<EnteredSpan> {
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Text => registry.with(fmt::layer().pretty()).try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init(),
    };
    if installed.is_err() {
        return None;
    }

    let service = config.service.as_deref().unwrap_or("indoorpath");
    Some(tracing::info_span!("service", service = %service).entered())
}
