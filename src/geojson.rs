//! GeoJSON features, collections and the GeoJSON root object
//!
//! See <https://datatracker.ietf.org/doc/html/rfc7946>.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::{MicroJsonError, Result};
use crate::geometry::{Bbox, Geometry};

/// Free-form feature properties
pub type JsonObject = Map<String, Value>;

/// Feature identifier: a string or a number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureId {
    String(String),
    Number(serde_json::Number),
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureId::String(s) => f.write_str(s),
            FeatureId::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for FeatureId {
    fn from(s: &str) -> Self {
        FeatureId::String(s.to_string())
    }
}

impl From<i64> for FeatureId {
    fn from(n: i64) -> Self {
        FeatureId::Number(n.into())
    }
}

/// `type` member of a Feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeatureType {
    #[default]
    Feature,
}

/// `type` member of a FeatureCollection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeatureCollectionType {
    #[default]
    FeatureCollection,
}

/// A geometry with free-form properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: FeatureType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FeatureId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Bbox>,
    /// `null` for unlocated features
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<JsonObject>,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            kind: FeatureType::Feature,
            id: None,
            bbox: None,
            geometry: Some(geometry),
            properties: Some(JsonObject::new()),
        }
    }
}

/// An ordered list of features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: FeatureCollectionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Bbox>,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: FeatureCollectionType::FeatureCollection,
            bbox: None,
            features,
        }
    }
}

/// The root object of a GeoJSON file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GeoJson {
    Feature(Feature),
    FeatureCollection(FeatureCollection),
    Geometry(Geometry),
}

impl GeoJson {
    pub fn type_name(&self) -> &'static str {
        match self {
            GeoJson::Feature(_) => "Feature",
            GeoJson::FeatureCollection(_) => "FeatureCollection",
            GeoJson::Geometry(g) => g.type_name(),
        }
    }

    /// Build from an already parsed JSON value, dispatching on `type`
    pub fn from_value(value: Value) -> Result<Self> {
        match root_type(&value)?.as_str() {
            "Feature" => typed("Feature", value).map(GeoJson::Feature),
            "FeatureCollection" => typed("FeatureCollection", value).map(GeoJson::FeatureCollection),
            name => typed(name, value).map(GeoJson::Geometry),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }
}

impl<'de> Deserialize<'de> for GeoJson {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        GeoJson::from_value(value).map_err(serde::de::Error::custom)
    }
}

/// Read and check the `type` member of a root object
pub(crate) fn root_type(value: &Value) -> Result<String> {
    let name = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(MicroJsonError::MissingType)?;
    let known = name == "Feature"
        || name == "FeatureCollection"
        || Geometry::TYPE_NAMES.contains(&name);
    if !known {
        let mut expected = vec!["Feature", "FeatureCollection"];
        expected.extend(Geometry::TYPE_NAMES);
        return Err(MicroJsonError::UnknownType {
            found: name.to_string(),
            expected: expected.join(", "),
        });
    }
    Ok(name.to_string())
}

/// Deserialize a value whose `type` is already known, tagging shape errors
pub(crate) fn typed<T: DeserializeOwned>(type_name: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|source| MicroJsonError::Shape {
        type_name: type_name.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_feature_collection() {
        let doc = GeoJson::from_value(json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "id": 12,
                "geometry": { "type": "Point", "coordinates": [102.0, 0.5] },
                "properties": { "prop0": "value0" }
            }, {
                "type": "Feature",
                "id": "b",
                "geometry": null,
                "properties": null
            }]
        }))
        .unwrap();
        let GeoJson::FeatureCollection(fc) = doc else {
            panic!("expected FeatureCollection");
        };
        assert_eq!(fc.features.len(), 2);
        assert_eq!(fc.features[0].id, Some(FeatureId::from(12)));
        assert_eq!(fc.features[1].id, Some(FeatureId::from("b")));
        assert!(fc.features[1].geometry.is_none());
        assert!(fc.features[1].properties.is_none());
    }

    #[test]
    fn test_bare_geometry_root() {
        let doc = GeoJson::from_json_str(r#"{"type": "Point", "coordinates": [1.0, 2.0]}"#).unwrap();
        assert_eq!(doc.type_name(), "Point");
    }

    #[test]
    fn test_missing_type() {
        let err = GeoJson::from_value(json!({ "coordinates": [1.0, 2.0] })).unwrap_err();
        assert!(matches!(err, MicroJsonError::MissingType));
    }

    #[test]
    fn test_unknown_type() {
        let err = GeoJson::from_value(json!({ "type": "Topology" })).unwrap_err();
        match err {
            MicroJsonError::UnknownType { found, expected } => {
                assert_eq!(found, "Topology");
                assert!(expected.contains("GeometryCollection"));
            }
            other => panic!("expected UnknownType, got {:?}", other),
        }
    }

    #[test]
    fn test_shape_mismatch_names_type() {
        let err = GeoJson::from_value(json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [1.0, 2.0] }
        }));
        // properties default to null, so this one parses
        assert!(err.is_ok());

        let err = GeoJson::from_value(json!({
            "type": "FeatureCollection",
            "features": {}
        }))
        .unwrap_err();
        assert!(matches!(err, MicroJsonError::Shape { ref type_name, .. } if type_name == "FeatureCollection"));
    }

    #[test]
    fn test_serialize_writes_type_once() {
        let doc = GeoJson::Feature(Feature::new(Geometry::point(vec![1.0, 2.0])));
        let text = serde_json::to_string(&doc).unwrap();
        assert_eq!(text.matches("\"type\":\"Feature\"").count(), 1);
        let back: GeoJson = serde_json::from_str(&text).unwrap();
        assert_eq!(back, doc);
    }
}
