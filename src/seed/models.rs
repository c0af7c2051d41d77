use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::{Map, Value};

use crate::geometry::Shape;

/// A bookable resource as delivered by the floor data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// Identifier of the source system. The store issues its own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "geo_entity_shape")]
    pub shape: Shape,
    #[serde(default)]
    pub external_data: ExternalData,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalData {
    #[serde(default, deserialize_with = "string_or_number")]
    pub ext_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A person that can occupy a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceRecord {
    pub fn new(ext_id: impl Into<String>, tags: &[&str], shape: Shape) -> Self {
        Self {
            id: None,
            name: None,
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            shape,
            external_data: ExternalData {
                ext_id: ext_id.into(),
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }

    pub fn ext_id(&self) -> &str {
        &self.external_data.ext_id
    }
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            extra: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// A display name, when the roster carries one.
    pub fn name(&self) -> Option<&str> {
        ["name", "username", "firstname"]
            .iter()
            .find_map(|key| self.extra.get(*key)?.as_str())
    }
}

/// Data sources are loose about identifiers, accept both `"42"` and `42`.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(value),
        Value::Number(value) => Ok(value.to_string()),
        other => Err(D::Error::custom(format!(
            "expected a string or a number, found {other}"
        ))),
    }
}

#[test]
fn numeric_user_id_test() {
    let user: User = serde_json::from_str(r#"{"id": 7, "name": "Ada"}"#).unwrap();
    assert_eq!(user.id, "7");
    assert_eq!(user.name(), Some("Ada"));
}

#[test]
fn invalid_user_id_test() {
    let user = serde_json::from_str::<User>(r#"{"id": [1]}"#);
    assert!(user.is_err());
}
