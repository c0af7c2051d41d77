use std::{fmt::Display, sync::Arc};

use serde_json::{Map, Value};

use crate::{
    geometry::Shape,
    seed::{ResourceRecord, User},
    shared::geo::Coordinate,
    store::Palette,
};

pub const AVAILABLE: &str = "Available";
pub const UNAVAILABLE: &str = "Unavailable";

/// Whether a resource can be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Available,
    Unavailable,
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Status {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Status::Available => AVAILABLE,
            Status::Unavailable => UNAVAILABLE,
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            AVAILABLE => Some(Status::Available),
            UNAVAILABLE => Some(Status::Unavailable),
            _ => None,
        }
    }

    /// The availability carried by a tag list.
    /// None unless exactly one of the two availability tags is present.
    pub fn from_tags<I, S>(tags: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut found = tags
            .into_iter()
            .filter_map(|tag| Self::from_tag(tag.as_ref()));
        let status = found.next()?;
        match found.next() {
            None => Some(status),
            Some(_) => None,
        }
    }
}

/// A bookable physical object drawn as a polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    /// Internal sequence number, replaced on every transition.
    pub id: u64,
    /// Identifier of the data source, stable for the lifetime of the resource.
    pub external_id: Arc<str>,
    pub name: Option<Arc<str>>,
    /// Free form tags, always holding exactly one availability tag.
    pub tags: Box<[Arc<str>]>,
    /// Mirrors the availability tag.
    pub status: Status,
    pub shape: Shape,
    /// Remaining `external_data` entries of the source record.
    pub external_data: Map<String, Value>,
    /// Remaining top level entries of the source record.
    pub extra: Map<String, Value>,
}

impl Resource {
    pub(crate) fn from_record(id: u64, record: ResourceRecord, status: Status) -> Self {
        Self {
            id,
            external_id: record.external_data.ext_id.into(),
            name: record.name.map(|name| name.into()),
            tags: record.tags.into_iter().map(|tag| tag.into()).collect(),
            status,
            shape: record.shape,
            external_data: record.external_data.extra,
            extra: record.extra,
        }
    }

    /// A copy of the resource under a new id with its availability set to `status`.
    /// Existing availability tags are dropped and the new one is appended last.
    pub(crate) fn with_status(&self, id: u64, status: Status, palette: &Palette) -> Self {
        let tags = self
            .tags
            .iter()
            .filter(|tag| Status::from_tag(tag).is_none())
            .cloned()
            .chain([Arc::from(status.as_str())])
            .collect();
        Self {
            id,
            tags,
            status,
            shape: self.shape.painted(&palette.fill, &palette.stroke),
            ..self.clone()
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == Status::Available
    }
}

/// A user shown on top of the resource they occupy.
#[derive(Debug, Clone, PartialEq)]
pub struct UserPoint {
    /// Internal sequence number.
    pub id: u64,
    pub user: User,
    /// Centroid of the occupied resource when the point was created.
    pub coordinate: Coordinate,
    /// External id of the occupied resource.
    pub location: Arc<str>,
}

/// Anything rendered on the map.
/// Entries are shared between snapshots, cloning is cheap.
#[derive(Debug, Clone, PartialEq)]
pub enum Pinpoint {
    Resource(Arc<Resource>),
    User(Arc<UserPoint>),
}

impl From<Resource> for Pinpoint {
    fn from(value: Resource) -> Self {
        Self::Resource(Arc::new(value))
    }
}

impl From<UserPoint> for Pinpoint {
    fn from(value: UserPoint) -> Self {
        Self::User(Arc::new(value))
    }
}

impl Pinpoint {
    pub fn id(&self) -> u64 {
        match self {
            Pinpoint::Resource(resource) => resource.id,
            Pinpoint::User(point) => point.id,
        }
    }

    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Pinpoint::Resource(resource) => Some(resource),
            Pinpoint::User(_) => None,
        }
    }

    pub fn as_user(&self) -> Option<&UserPoint> {
        match self {
            Pinpoint::Resource(_) => None,
            Pinpoint::User(point) => Some(point),
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Pinpoint::User(_))
    }

    pub(crate) fn is_resource(&self, external_id: &str) -> bool {
        matches!(self, Pinpoint::Resource(resource) if &*resource.external_id == external_id)
    }

    pub(crate) fn is_located_at(&self, external_id: &str) -> bool {
        matches!(self, Pinpoint::User(point) if &*point.location == external_id)
    }
}

#[test]
fn status_from_tags_test() {
    assert_eq!(
        Status::from_tags(["Desk", "Available"]),
        Some(Status::Available)
    );
    assert_eq!(Status::from_tags(["Unavailable"]), Some(Status::Unavailable));
    assert_eq!(Status::from_tags(["Desk"]), None);
    assert_eq!(Status::from_tags(["Available", "Unavailable"]), None);
    assert_eq!(Status::from_tags(Vec::<String>::new()), None);
}
