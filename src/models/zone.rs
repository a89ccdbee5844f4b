//! Zone (work area) model.
//!
//! A zone is one node of the location breakdown structure that wagons
//! flow through. Within a phase group, `sequence` fixes the flow order.

use serde::{Deserialize, Serialize};

/// Kind of location a zone was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    /// Whole site.
    Site,
    /// A building on the site.
    Building,
    /// A storey.
    Floor,
    /// A ground sector (earthworks, foundations).
    Sector,
    /// A structural grid bay.
    Grid,
    /// A generic takt zone.
    Zone,
    /// A single room.
    Room,
}

/// A physical work area.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Zone {
    /// Unique zone identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// 1-based position in flow order.
    pub sequence: i32,
    /// Floor area in square meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_sqm: Option<f64>,
    /// Location type the zone was generated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_type: Option<LocationType>,
    /// Stored phase metadata (e.g. `"fitout"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_tag: Option<String>,
}

impl Zone {
    /// Creates a new zone.
    pub fn new(id: impl Into<String>, name: impl Into<String>, sequence: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sequence,
            area_sqm: None,
            location_type: None,
            phase_tag: None,
        }
    }

    /// Sets the floor area.
    pub fn with_area(mut self, area_sqm: f64) -> Self {
        self.area_sqm = Some(area_sqm);
        self
    }

    /// Sets the location type.
    pub fn with_location_type(mut self, location_type: LocationType) -> Self {
        self.location_type = Some(location_type);
        self
    }

    /// Sets the stored phase tag.
    pub fn with_phase_tag(mut self, tag: impl Into<String>) -> Self {
        self.phase_tag = Some(tag.into());
        self
    }
}
