//! Geo Attributor - Coarse region lookup from static bounding boxes
//!
//! Boxes are tested in order and the first one containing the point wins.
//! They overlap: the Australia box lies entirely inside the Asia box, so
//! with the default table Australian coordinates resolve to `Asia`.

use serde::{Deserialize, Serialize};

/// Label used when no box contains the point
pub const UNKNOWN_REGION: &str = "Unknown";

/// Axis-aligned box with exclusive bounds, paired with a region label
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionBox {
    pub region: String,
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl RegionBox {
    pub fn new(region: &str, lat: (f64, f64), lng: (f64, f64)) -> Self {
        Self {
            region: region.to_string(),
            min_lat: lat.0,
            max_lat: lat.1,
            min_lng: lng.0,
            max_lng: lng.1,
        }
    }

    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat > self.min_lat && lat < self.max_lat && lng > self.min_lng && lng < self.max_lng
    }
}

/// Bounding-box table (configurable)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeoConfig {
    /// Boxes in priority order
    pub regions: Vec<RegionBox>,
    pub unknown: String,
}

fn default_unknown() -> String {
    UNKNOWN_REGION.to_string()
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            regions: vec![
                RegionBox::new("Canada", (49.0, 71.0), (-141.0, -60.0)),
                RegionBox::new("United States", (25.0, 49.0), (-125.0, -66.0)),
                RegionBox::new("Europe", (35.0, 71.0), (-10.0, 40.0)),
                RegionBox::new("Africa", (-35.0, 37.0), (-18.0, 55.0)),
                RegionBox::new("Asia", (-50.0, 55.0), (26.0, 180.0)),
                RegionBox::new("Australia", (-50.0, -10.0), (110.0, 180.0)),
                RegionBox::new("South America", (-60.0, 15.0), (-82.0, -35.0)),
            ],
            unknown: default_unknown(),
        }
    }
}

/// Maps a coordinate to a region label
#[derive(Debug, Clone, Default)]
pub struct GeoAttributor {
    config: GeoConfig,
}

impl GeoAttributor {
    pub fn new(config: Option<GeoConfig>) -> Self {
        Self {
            config: config.unwrap_or_default(),
        }
    }

    /// Region of a point; never fails, falls through to the unknown label
    pub fn region_of(&self, lat: f64, lng: f64) -> &str {
        self.config
            .regions
            .iter()
            .find(|b| b.contains(lat, lng))
            .map(|b| b.region.as_str())
            .unwrap_or(self.config.unknown.as_str())
    }
}
