#![allow(dead_code)]

use std::path::PathBuf;

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use indoorpath_lib::{load_building, BuildingMap, DEFAULT_TIMEZONE};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn boelter_hall() -> BuildingMap {
    load_building(&fixtures_dir().join("boelter_hall.json")).expect("fixture loads")
}

/// Wednesday 2025-03-12 at noon, local time.
pub fn wednesday_noon() -> DateTime<Tz> {
    DEFAULT_TIMEZONE
        .with_ymd_and_hms(2025, 3, 12, 12, 0, 0)
        .single()
        .expect("unambiguous local time")
}
