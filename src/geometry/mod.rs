use std::fmt::Debug;

use geo::{Coord, LineString, Simplify};

use crate::shared::geo::Coordinate;

mod shape;

pub use shape::*;

/// Tolerance used when simplifying resource outlines on load.
/// Expressed in coordinate units (degrees).
pub const DEFAULT_TOLERANCE: f64 = 0.000_000_1;

/// Geometry operations the store relies on.
/// Implementations must be deterministic for a given input.
pub trait Geometry: Debug + Send + Sync {
    /// The point an occupant marker is placed on.
    /// Returns None when the polygon has no positions.
    fn centroid(&self, polygon: &PolygonGeometry) -> Option<Coordinate>;

    /// Reduces the number of positions of every ring.
    /// With `high_quality` unset a cheap radial distance pass runs before Douglas-Peucker.
    fn simplify(
        &self,
        polygon: &PolygonGeometry,
        tolerance: f64,
        high_quality: bool,
    ) -> PolygonGeometry;
}

/// [`Geometry`] backed by the `geo` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct GeoEngine;

impl Geometry for GeoEngine {
    fn centroid(&self, polygon: &PolygonGeometry) -> Option<Coordinate> {
        let mut vertices = polygon.vertices().peekable();
        vertices.peek()?;
        Some(vertices.sum())
    }

    fn simplify(
        &self,
        polygon: &PolygonGeometry,
        tolerance: f64,
        high_quality: bool,
    ) -> PolygonGeometry {
        let coordinates = polygon
            .coordinates
            .iter()
            .map(|ring| simplify_ring(ring, tolerance, high_quality))
            .collect();
        PolygonGeometry {
            geometry_type: polygon.geometry_type,
            coordinates,
        }
    }
}

fn simplify_ring(ring: &[Position], tolerance: f64, high_quality: bool) -> Ring {
    if ring.len() <= 4 {
        return ring.to_vec();
    }

    let points = if high_quality {
        ring.to_vec()
    } else {
        radial_distance(ring, tolerance)
    };
    let line: LineString<f64> = points
        .iter()
        .map(|[x, y]| Coord { x: *x, y: *y })
        .collect();
    let simplified: Ring = line
        .simplify(&tolerance)
        .coords()
        .map(|coord| [coord.x, coord.y])
        .collect();

    // A ring needs four positions to stay a polygon, keep the original when it collapses
    if simplified.len() < 4 {
        ring.to_vec()
    } else {
        simplified
    }
}

/// Drops every position closer than `tolerance` to the last kept one.
/// The first and last positions always survive.
fn radial_distance(ring: &[Position], tolerance: f64) -> Ring {
    let sq_tolerance = tolerance * tolerance;
    let Some((last, rest)) = ring.split_last() else {
        return Vec::new();
    };
    let mut kept: Ring = Vec::with_capacity(ring.len());
    for position in rest {
        match kept.last() {
            Some(previous) if sq_distance(previous, position) <= sq_tolerance => {}
            _ => kept.push(*position),
        }
    }
    kept.push(*last);
    kept
}

fn sq_distance(a: &Position, b: &Position) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx * dx + dy * dy
}

#[cfg(test)]
fn square() -> PolygonGeometry {
    PolygonGeometry::new(vec![vec![
        [0.0, 0.0],
        [1.0, 0.0],
        [1.0, 1.0],
        [0.0, 1.0],
        [0.0, 0.0],
    ]])
}

#[test]
fn centroid_ignores_closing_position_test() {
    let centroid = GeoEngine.centroid(&square()).unwrap();
    assert_eq!(centroid, Coordinate::new(0.5, 0.5));
}

#[test]
fn centroid_of_empty_polygon_test() {
    assert!(GeoEngine.centroid(&PolygonGeometry::default()).is_none());
}

#[test]
fn simplify_drops_collinear_positions_test() {
    let polygon = PolygonGeometry::new(vec![vec![
        [0.0, 0.0],
        [0.5, 0.0],
        [1.0, 0.0],
        [1.0, 1.0],
        [0.0, 1.0],
        [0.0, 0.0],
    ]]);
    let simplified = GeoEngine.simplify(&polygon, DEFAULT_TOLERANCE, false);
    assert_eq!(simplified, square());
}

#[test]
fn radial_distance_keeps_endpoints_test() {
    let ring = vec![[0.0, 0.0], [0.0, 1e-9], [0.0, 2e-9], [1.0, 1.0], [0.0, 0.0]];
    let kept = radial_distance(&ring, DEFAULT_TOLERANCE);
    assert_eq!(kept, vec![[0.0, 0.0], [1.0, 1.0], [0.0, 0.0]]);
}
