//! Fixtures for handler tests.
//!
//! State is loaded from `docs/fixtures/boelter_hall.json` with a clock frozen
//! on a Wednesday at noon, so availability answers never depend on when the
//! tests run.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use indoorpath_lib::{load_building, FixedClock, DEFAULT_MAX_SUBGRAPH_DEPTH, DEFAULT_TIMEZONE};

use crate::state::AppState;

pub const TEST_FIXTURE_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../docs/fixtures/boelter_hall.json"
);

static TEST_STATE: OnceLock<AppState> = OnceLock::new();

/// Wednesday 2025-03-12 12:00 in the canonical zone.
pub fn fixture_now() -> DateTime<Tz> {
    DEFAULT_TIMEZONE
        .with_ymd_and_hms(2025, 3, 12, 12, 0, 0)
        .single()
        .expect("unambiguous fixture time")
}

/// Shared state over the fixture building.
///
/// # Panics
///
/// Panics if the fixture cannot be loaded.
pub fn test_state() -> AppState {
    TEST_STATE
        .get_or_init(|| {
            let path = fixture_path();
            let map = load_building(&path)
                .unwrap_or_else(|e| panic!("failed to load test fixture from {:?}: {}", path, e));
            AppState::from_components(
                map,
                Arc::new(FixedClock(fixture_now())),
                DEFAULT_MAX_SUBGRAPH_DEPTH,
            )
        })
        .clone()
}

pub fn fixture_path() -> PathBuf {
    PathBuf::from(TEST_FIXTURE_PATH)
}

/// Landmark names present in the fixture.
pub mod fixture_landmarks {
    /// Building entrance on the third floor; linked to "Boelter Entrance Door".
    pub const ENTRANCE: &str = "Boelter Entrance";

    /// Classroom three hops from the entrance.
    pub const ROOM_3420: &str = "Room 3420";

    /// Printer on the fourth floor, reachable by stairs or by elevator.
    pub const PRINTER: &str = "4th Floor Printer";

    /// Classroom closed every day.
    pub const CLOSED_LAB: &str = "Closed Lab";

    /// Study spot with no linked node.
    pub const UNLINKED_KIOSK: &str = "Unlinked Kiosk";
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoorpath_lib::GraphStore;

    #[test]
    fn test_fixture_path_exists() {
        assert!(fixture_path().exists(), "fixture not found at {:?}", fixture_path());
    }

    #[test]
    fn test_state_contains_expected_landmarks() {
        let state = test_state();
        for name in [
            fixture_landmarks::ENTRANCE,
            fixture_landmarks::ROOM_3420,
            fixture_landmarks::PRINTER,
            fixture_landmarks::CLOSED_LAB,
            fixture_landmarks::UNLINKED_KIOSK,
        ] {
            assert!(
                state.map().find_landmark_by_name(name).unwrap().is_some(),
                "{name} should exist in fixture"
            );
        }
        assert_eq!(state.now(), fixture_now());
    }
}
