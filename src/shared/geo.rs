use std::{fmt::Display, iter::Sum};

use serde::{Deserialize, Serialize};

/// A WGS84 position. GeoJSON stores positions as `[longitude, latitude]`,
/// this type names the axes instead.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}, {}", self.latitude, self.longitude))
    }
}

/// Averages every coordinate in the iterator.
/// An empty iterator yields NaN on both axes.
impl Sum for Coordinate {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        let mut count: usize = 0;
        let mut lat: f64 = 0.0;
        let mut lon: f64 = 0.0;
        iter.for_each(|coordinate| {
            count += 1;
            lat += coordinate.latitude;
            lon += coordinate.longitude;
        });
        let count = count as f64;
        Self {
            latitude: lat / count,
            longitude: lon / count,
        }
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(value: Coordinate) -> Self {
        (value.latitude, value.longitude)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<[f64; 2]> for Coordinate {
    /// Reads a GeoJSON position (`[longitude, latitude]`).
    fn from([longitude, latitude]: [f64; 2]) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(value: Coordinate) -> Self {
        [value.longitude, value.latitude]
    }
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

#[test]
fn mean_test() {
    let coordinate: Coordinate = [
        Coordinate::new(0.0, 0.0),
        Coordinate::new(2.0, 4.0),
        Coordinate::new(4.0, 2.0),
    ]
    .into_iter()
    .sum();
    assert_eq!(coordinate, Coordinate::new(2.0, 2.0));
}

#[test]
fn position_axis_order_test() {
    let coordinate = Coordinate::from([2.35, 48.85]);
    assert_eq!(coordinate.longitude, 2.35);
    assert_eq!(coordinate.latitude, 48.85);
    assert_eq!(<[f64; 2]>::from(coordinate), [2.35, 48.85]);
}
