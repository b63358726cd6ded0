use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Numeric identifier for an indoor node.
pub type NodeId = u32;

/// Numeric identifier for a landmark.
pub type LandmarkId = u32;

/// Last valid minute of a day (23:59).
pub const LAST_MINUTE_OF_DAY: u16 = 1439;

/// Kind of walkable point within a building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[default]
    Hall,
    Stair,
    Elevator,
    Door,
}

/// A navigable point (graph vertex) inside a building.
#[derive(Debug, Clone, PartialEq)]
pub struct IndoorNode {
    pub id: NodeId,
    pub name: String,
    pub building: Option<String>,
    pub floor: Option<i32>,
    pub kind: NodeKind,
    pub accessible: bool,
    /// Edges as stored, in dataset order.
    pub neighbors: Vec<NodeId>,
}

/// Fixed set of landmark categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LandmarkCategory {
    Building,
    MaleRestroom,
    FemaleRestroom,
    NeutralRestroom,
    StudySpot,
    Classroom,
    Printer,
}

impl LandmarkCategory {
    /// Every category in declaration order.
    pub const ALL: [LandmarkCategory; 7] = [
        LandmarkCategory::Building,
        LandmarkCategory::MaleRestroom,
        LandmarkCategory::FemaleRestroom,
        LandmarkCategory::NeutralRestroom,
        LandmarkCategory::StudySpot,
        LandmarkCategory::Classroom,
        LandmarkCategory::Printer,
    ];

    /// Categories a client may use as a path destination instead of a name.
    pub const SEARCHABLE: [LandmarkCategory; 5] = [
        LandmarkCategory::Printer,
        LandmarkCategory::Classroom,
        LandmarkCategory::MaleRestroom,
        LandmarkCategory::FemaleRestroom,
        LandmarkCategory::NeutralRestroom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LandmarkCategory::Building => "building",
            LandmarkCategory::MaleRestroom => "male-restroom",
            LandmarkCategory::FemaleRestroom => "female-restroom",
            LandmarkCategory::NeutralRestroom => "neutral-restroom",
            LandmarkCategory::StudySpot => "study-spot",
            LandmarkCategory::Classroom => "classroom",
            LandmarkCategory::Printer => "printer",
        }
    }

    /// Whether this category can be requested as a nearest-of-type destination.
    pub fn is_searchable(self) -> bool {
        Self::SEARCHABLE.contains(&self)
    }

    /// Parse a destination token, returning a category only for searchable ones.
    pub fn searchable_from_token(token: &str) -> Option<Self> {
        Self::SEARCHABLE
            .iter()
            .copied()
            .find(|category| category.as_str() == token)
    }
}

impl fmt::Display for LandmarkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LandmarkCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| Error::UnknownCategory {
                value: s.to_string(),
            })
    }
}

/// Opening hours for one day of the week, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayHours {
    pub is_open: bool,
    #[serde(default)]
    pub open: u16,
    #[serde(default = "last_minute")]
    pub close: u16,
}

fn last_minute() -> u16 {
    LAST_MINUTE_OF_DAY
}

impl DayHours {
    /// Open for the whole day.
    pub const fn all_day() -> Self {
        Self {
            is_open: true,
            open: 0,
            close: LAST_MINUTE_OF_DAY,
        }
    }

    /// Closed for the whole day.
    pub const fn closed() -> Self {
        Self {
            is_open: false,
            open: 0,
            close: 0,
        }
    }

    pub const fn between(open: u16, close: u16) -> Self {
        Self {
            is_open: true,
            open,
            close,
        }
    }
}

/// Seven entries of the always-open schedule, Sunday first.
pub fn always_open_week() -> Vec<DayHours> {
    vec![DayHours::all_day(); 7]
}

/// WGS84 point; longitude first like GeoJSON.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub fn is_valid(&self) -> bool {
        (-180.0..=180.0).contains(&self.longitude) && (-90.0..=90.0).contains(&self.latitude)
    }
}

/// A named point of interest attached to one or more nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Landmark {
    pub id: LandmarkId,
    pub name: String,
    pub category: LandmarkCategory,
    pub location: Option<GeoPoint>,
    /// One entry per day of week, Sunday first.
    pub hours: Vec<DayHours>,
    /// `None` means unspecified, which counts as accessible.
    pub accessible: Option<bool>,
    pub parent: Option<LandmarkId>,
    pub connected_to: Vec<NodeId>,
}

impl Landmark {
    /// The node used as the landmark's position in the graph.
    pub fn primary_node(&self) -> Option<NodeId> {
        self.connected_to.first().copied()
    }
}
