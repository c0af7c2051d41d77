use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::shared::geo::Coordinate;

/// A GeoJSON position, `[longitude, latitude]`.
pub type Position = [f64; 2];
/// A closed linear ring, first and last positions are equal.
pub type Ring = Vec<Position>;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureType {
    #[default]
    Feature,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryType {
    #[default]
    Polygon,
}

/// The outline of a resource as drawn on the map: a GeoJSON polygon feature.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    #[serde(rename = "type", default)]
    pub feature_type: FeatureType,
    pub geometry: PolygonGeometry,
    #[serde(default)]
    pub properties: ShapeProperties,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonGeometry {
    #[serde(rename = "type", default)]
    pub geometry_type: GeometryType,
    /// Exterior ring first, holes after it.
    pub coordinates: Vec<Ring>,
}

/// Display style of a shape. Anything besides the two colors is passed through untouched.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Shape {
    pub fn new(geometry: PolygonGeometry) -> Self {
        Self {
            feature_type: FeatureType::Feature,
            geometry,
            properties: Default::default(),
        }
    }

    /// Returns a copy of the shape painted with the given colors.
    pub fn painted(&self, fill: &str, stroke: &str) -> Self {
        let mut shape = self.clone();
        shape.properties.fill = Some(fill.to_string());
        shape.properties.stroke = Some(stroke.to_string());
        shape
    }
}

impl PolygonGeometry {
    pub fn new(coordinates: Vec<Ring>) -> Self {
        Self {
            geometry_type: GeometryType::Polygon,
            coordinates,
        }
    }

    /// Builds a single ring polygon from coordinates, closing the ring if needed.
    pub fn from_coordinates<I>(coordinates: I) -> Self
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut ring: Ring = coordinates.into_iter().map(Position::from).collect();
        if let (Some(first), Some(last)) = (ring.first().copied(), ring.last().copied())
            && first != last
        {
            ring.push(first);
        }
        Self::new(vec![ring])
    }

    pub fn exterior(&self) -> Option<&Ring> {
        self.coordinates.first()
    }

    /// Every position of every ring without the repeated closing position.
    pub fn vertices(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.coordinates.iter().flat_map(|ring| {
            let closed = ring.len() > 1 && ring.first() == ring.last();
            let count = if closed { ring.len() - 1 } else { ring.len() };
            ring.iter().take(count).map(|position| Coordinate::from(*position))
        })
    }

    /// A polygon is usable when it has an exterior ring and every ring is closed
    /// and holds at least four finite positions.
    pub fn is_valid(&self) -> bool {
        !self.coordinates.is_empty()
            && self.coordinates.iter().all(|ring| {
                ring.len() >= 4
                    && ring.first() == ring.last()
                    && ring
                        .iter()
                        .all(|position| Coordinate::from(*position).is_finite())
            })
    }
}
