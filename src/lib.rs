pub mod geometry;
pub mod seed;
pub mod shared;
pub mod store;

pub mod prelude {
    pub use crate::{
        geometry::{GeoEngine, Geometry, PolygonGeometry, Shape},
        seed::{ResourceRecord, SeedData, User},
        shared::Coordinate,
        store::{Config, Palette, Pinpoint, Resource, Status, Store, UserPoint},
    };
}
