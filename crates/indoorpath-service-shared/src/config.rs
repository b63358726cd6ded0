//! Service configuration read from the environment.
//!
//! | variable | default |
//! |----------|---------|
//! | `INDOORPATH_DATA_PATH` | `/data/building.json` |
//! | `SERVICE_PORT` | `5050` |
//! | `INDOORPATH_TIMEZONE` | `America/Los_Angeles` |
//! | `INDOORPATH_MAX_SUBGRAPH_DEPTH` | `15` |
//!
//! Unparseable numbers fall back to their defaults with a warning. An unknown
//! time zone is a startup error, since every availability answer depends on it.

use std::path::PathBuf;

use chrono_tz::Tz;
use indoorpath_lib::{DEFAULT_MAX_SUBGRAPH_DEPTH, DEFAULT_TIMEZONE};

pub const DEFAULT_DATA_PATH: &str = "/data/building.json";
pub const DEFAULT_PORT: u16 = 5050;

/// Runtime settings for a path service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub data_path: PathBuf,
    pub port: u16,
    pub timezone: Tz,
    pub max_subgraph_depth: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            port: DEFAULT_PORT,
            timezone: DEFAULT_TIMEZONE,
            max_subgraph_depth: DEFAULT_MAX_SUBGRAPH_DEPTH,
        }
    }
}

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `INDOORPATH_TIMEZONE` is not an IANA zone name.
    UnknownTimezone(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::UnknownTimezone(name) => write!(f, "unknown time zone: {}", name),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ServiceConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_path = lookup("INDOORPATH_DATA_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);

        let port = parse_or_default(&lookup, "SERVICE_PORT", defaults.port);
        let max_subgraph_depth = parse_or_default(
            &lookup,
            "INDOORPATH_MAX_SUBGRAPH_DEPTH",
            defaults.max_subgraph_depth,
        );

        let timezone = match lookup("INDOORPATH_TIMEZONE") {
            Some(name) if !name.trim().is_empty() => name
                .trim()
                .parse::<Tz>()
                .map_err(|_| ConfigError::UnknownTimezone(name.clone()))?,
            _ => defaults.timezone,
        };

        Ok(Self {
            data_path,
            port,
            timezone,
            max_subgraph_depth,
        })
    }
}

fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, default = %default, "invalid value, using default");
            default
        }),
        None => default,
    }
}
