use serde::{Deserialize, Serialize};

use crate::geometry::DEFAULT_TOLERANCE;

pub const BOOKED_FILL: &str = "#DE4065";
pub const BOOKED_STROKE: &str = "#DE335B";
pub const FREE_FILL: &str = "#BEE9D7";
pub const FREE_STROKE: &str = "#249566";

/// Colors a resource outline is painted with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub fill: String,
    pub stroke: String,
}

impl Palette {
    pub fn new(fill: impl Into<String>, stroke: impl Into<String>) -> Self {
        Self {
            fill: fill.into(),
            stroke: stroke.into(),
        }
    }

    pub fn booked() -> Self {
        Self::new(BOOKED_FILL, BOOKED_STROKE)
    }

    pub fn free() -> Self {
        Self::new(FREE_FILL, FREE_STROKE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Douglas-Peucker tolerance applied to every outline on initialization.
    pub simplify_tolerance: f64,
    /// Skips the radial distance pre-pass when set.
    pub high_quality: bool,
    /// Applied by `book`.
    pub booked: Palette,
    /// Applied by `unbook`.
    pub free: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simplify_tolerance: DEFAULT_TOLERANCE,
            high_quality: false,
            booked: Palette::booked(),
            free: Palette::free(),
        }
    }
}

#[test]
fn partial_config_test() {
    let config: Config = serde_json::from_str(r#"{"high_quality": true}"#).unwrap();
    assert!(config.high_quality);
    assert_eq!(config.simplify_tolerance, DEFAULT_TOLERANCE);
    assert_eq!(config.booked, Palette::booked());
}
