// One module per subcommand; main.rs parses arguments and dispatches here.

pub mod landmarks;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};

use indoorpath_lib::{load_building, BuildingMap};

/// Load the building dataset at `path`, with a CLI-friendly error.
pub fn load_map(path: &Path) -> Result<BuildingMap> {
    load_building(path)
        .with_context(|| format!("failed to load building data from {}", path.display()))
}
