use pinpoints::{
    geometry::Shape,
    store::{Pinpoint, Resource, Store, UserPoint},
};
use serde::Serialize;
use serde_json::{Map, Value};

/// Marker drawn as a round icon by the map.
const ROUND_ICON: u8 = 1;
const USER_TYPE: &str = "user";

/// A pinpoint as the map expects it.
#[derive(Debug, Clone, Serialize)]
pub struct PinpointDto {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub icon: Option<u8>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo_entity_shape: Option<Shape>,
    pub external_data: ExternalDataDto,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExternalDataDto {
    pub ext_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PinpointDto {
    pub fn from(pinpoint: &Pinpoint) -> Self {
        match pinpoint {
            Pinpoint::Resource(resource) => Self::from_resource(resource),
            Pinpoint::User(point) => Self::from_user(point),
        }
    }

    pub fn all(store: &Store) -> Vec<Self> {
        store.pinpoints().iter().map(Self::from).collect()
    }

    pub fn from_resource(resource: &Resource) -> Self {
        Self {
            id: resource.id,
            name: resource.name.as_ref().map(|name| name.to_string()),
            latitude: None,
            longitude: None,
            icon: None,
            tags: resource.tags.iter().map(|tag| tag.to_string()).collect(),
            geo_entity_shape: Some(resource.shape.clone()),
            external_data: ExternalDataDto {
                ext_id: resource.external_id.to_string(),
                status: Some(resource.status.to_string()),
                location: None,
                kind: None,
                extra: resource.external_data.clone(),
            },
            extra: resource.extra.clone(),
        }
    }

    pub fn from_user(point: &UserPoint) -> Self {
        Self {
            id: point.id,
            name: None,
            latitude: Some(point.coordinate.latitude),
            longitude: Some(point.coordinate.longitude),
            icon: Some(ROUND_ICON),
            tags: Vec::new(),
            geo_entity_shape: None,
            external_data: ExternalDataDto {
                ext_id: point.user.id.clone(),
                status: None,
                location: Some(point.location.to_string()),
                kind: Some(USER_TYPE.to_string()),
                extra: Map::new(),
            },
            extra: point.user.extra.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Book,
    Unbook,
}

/// An opened resource, its occupants and what its action button does.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionDto {
    pub pinpoint: PinpointDto,
    pub occupants: Vec<PinpointDto>,
    pub action: Action,
}

impl SelectionDto {
    pub fn from(resource: &Resource, store: &Store) -> Self {
        let action = if resource.is_available() {
            Action::Book
        } else {
            Action::Unbook
        };
        Self {
            pinpoint: PinpointDto::from_resource(resource),
            occupants: store
                .occupants(&resource.external_id)
                .into_iter()
                .map(PinpointDto::from_user)
                .collect(),
            action,
        }
    }
}

#[test]
fn user_wire_form_test() {
    use pinpoints::{seed::User, shared::Coordinate};
    use std::sync::Arc;

    let point = UserPoint {
        id: 4,
        user: User::new("42").with_field("name", "Ada"),
        coordinate: Coordinate::new(43.6, 3.88),
        location: Arc::from("desk-1"),
    };
    let value = serde_json::to_value(PinpointDto::from_user(&point)).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "id": 4,
            "latitude": 43.6,
            "longitude": 3.88,
            "type": 1,
            "external_data": { "ext_id": "42", "location": "desk-1", "type": "user" },
            "name": "Ada"
        })
    );
}
