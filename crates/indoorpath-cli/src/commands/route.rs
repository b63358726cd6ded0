//! Route command handler for planning a path between landmarks.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::DateTime;
use chrono_tz::Tz;

use indoorpath_lib::{plan_path, PathMode, PathRequest, DEFAULT_MAX_SUBGRAPH_DEPTH};

use crate::commands::load_map;
use crate::output::{render_plan, OutputFormat};

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Source landmark name.
    pub from: String,
    /// Destination landmark name or category token.
    pub to: String,
    pub mode: PathMode,
    /// Step-free routing.
    pub accessible: bool,
    /// Depth cap for graph mode.
    pub max_depth: usize,
}

impl RouteCommandArgs {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            mode: PathMode::Bfs,
            accessible: true,
            max_depth: DEFAULT_MAX_SUBGRAPH_DEPTH,
        }
    }

    /// Convert CLI args to a library request.
    pub fn to_request(&self) -> PathRequest {
        let mut request = PathRequest::new(self.from.as_str(), self.to.as_str())
            .with_mode(self.mode)
            .with_accessibility(self.accessible);
        request.max_subgraph_depth = self.max_depth;
        request
    }
}

/// Handle the route subcommand.
///
/// Plans a path the same way the HTTP endpoint does and prints it in the
/// requested format.
pub fn handle_route_command(
    data_path: &Path,
    now: &DateTime<Tz>,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let map = load_map(data_path)?;
    let request = args.to_request();

    tracing::debug!(from = %request.from, to = %request.to, mode = ?request.mode, "planning path");

    let plan = plan_path(&map, &request, now)
        .with_context(|| format!("no path from '{}' to '{}'", request.from, request.to))?;

    println!("{}", render_plan(&plan, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_to_accessible_bfs() {
        let request = RouteCommandArgs::new("Room 3420", "printer").to_request();
        assert_eq!(request.from, "Room 3420");
        assert_eq!(request.to, "printer");
        assert_eq!(request.mode, PathMode::Bfs);
        assert!(request.require_accessible);
        assert_eq!(request.max_subgraph_depth, DEFAULT_MAX_SUBGRAPH_DEPTH);
    }

    #[test]
    fn request_carries_overrides() {
        let mut args = RouteCommandArgs::new("A", "B");
        args.mode = PathMode::Graph;
        args.accessible = false;
        args.max_depth = 4;
        let request = args.to_request();
        assert_eq!(request.mode, PathMode::Graph);
        assert!(!request.require_accessible);
        assert_eq!(request.max_subgraph_depth, 4);
    }

    #[test]
    fn names_are_passed_through_verbatim() {
        let request = RouteCommandArgs::new(" Room 3420 ", "printer ").to_request();
        assert_eq!(request.from, " Room 3420 ");
        assert_eq!(request.to, "printer ");
    }
}
