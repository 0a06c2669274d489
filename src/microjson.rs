//! MicroJSON features, collections and the MicroJSON root object
//!
//! MicroJSON extends GeoJSON with per-object coordinate systems and
//! structured properties. Properties are split into three buckets so that a
//! consumer can tell categorical, scalar and vector attributes apart without
//! inspecting runtime types:
//!
//! ```json
//! {
//!   "descriptive": { "cell_type": "nucleus" },
//!   "numerical": { "area": 412.5 },
//!   "multi_numerical": { "intensity": [12.0, 40.5, 33.1] }
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use crate::coordsys::CoordinateSystem;
use crate::error::{MicroJsonError, Result};
use crate::geojson::{root_type, typed, FeatureCollectionType, FeatureId, FeatureType, JsonObject};
use crate::geometry::{Bbox, Extents, Geometry, Position};
use crate::multiscale::Multiscale;
use crate::provenance::Provenance;

/// Structured feature properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Properties {
    /// Categorical, string-valued attributes
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub descriptive: BTreeMap<String, String>,
    /// Scalar attributes
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub numerical: BTreeMap<String, f64>,
    /// Vector-valued attributes
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub multi_numerical: BTreeMap<String, Vec<f64>>,
}

impl Properties {
    pub fn is_empty(&self) -> bool {
        self.descriptive.is_empty() && self.numerical.is_empty() && self.multi_numerical.is_empty()
    }

    /// Partition free-form properties into buckets by value type.
    ///
    /// Strings become descriptive, numbers numerical, arrays of numbers
    /// multi-numerical. Anything else (booleans, null, objects, mixed
    /// arrays) is rejected.
    pub fn from_untyped(map: &JsonObject) -> Result<Self> {
        let mut props = Properties::default();
        for (key, value) in map {
            match value {
                Value::String(s) => {
                    props.descriptive.insert(key.clone(), s.clone());
                }
                Value::Number(n) => {
                    let v = n.as_f64().ok_or_else(|| unsupported(key, "number out of range"))?;
                    props.numerical.insert(key.clone(), v);
                }
                Value::Array(items) => {
                    let values = items
                        .iter()
                        .map(Value::as_f64)
                        .collect::<Option<Vec<_>>>()
                        .ok_or_else(|| unsupported(key, "array elements must all be numbers"))?;
                    props.multi_numerical.insert(key.clone(), values);
                }
                Value::Bool(_) => return Err(unsupported(key, "booleans have no bucket")),
                Value::Null => return Err(unsupported(key, "null has no bucket")),
                Value::Object(_) => return Err(unsupported(key, "nested objects have no bucket")),
            }
        }
        Ok(props)
    }

    /// Flatten back into a single free-form map
    pub fn to_untyped(&self) -> JsonObject {
        let mut map = JsonObject::new();
        for (k, v) in &self.descriptive {
            map.insert(k.clone(), Value::from(v.as_str()));
        }
        for (k, v) in &self.numerical {
            map.insert(k.clone(), Value::from(*v));
        }
        for (k, v) in &self.multi_numerical {
            map.insert(k.clone(), Value::from(v.clone()));
        }
        map
    }

    /// Keys present in more than one bucket
    pub fn duplicate_keys(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        let mut dups = BTreeSet::new();
        let keys = self
            .descriptive
            .keys()
            .chain(self.numerical.keys())
            .chain(self.multi_numerical.keys());
        for key in keys {
            if !seen.insert(key.as_str()) {
                dups.insert(key.as_str());
            }
        }
        dups.into_iter().collect()
    }
}

fn unsupported(key: &str, reason: &str) -> MicroJsonError {
    MicroJsonError::UnsupportedProperty {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

/// Observed numeric bounds of one property
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Range containing a single value
    pub fn point(v: f64) -> Self {
        Self { min: v, max: v }
    }

    pub fn include(&mut self, v: f64) {
        self.min = self.min.min(v);
        self.max = self.max.max(v);
    }

    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }

    pub fn contains(&self, v: f64) -> bool {
        self.min <= v && v <= self.max
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Properties, D::Error> {
    Ok(Option::<Properties>::deserialize(deserializer)?.unwrap_or_default())
}

/// A GeoJSON feature with structured properties and coordinate metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicroFeature {
    #[serde(rename = "type")]
    pub kind: FeatureType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FeatureId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Bbox>,
    pub geometry: Option<Geometry>,
    /// `null` reads as empty buckets
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Properties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinatesystem: Option<CoordinateSystem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiscale: Option<Multiscale>,
    /// Reference to a related feature
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<FeatureId>,
    #[serde(rename = "parentId", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<FeatureId>,
    #[serde(rename = "featureClass", default, skip_serializing_if = "Option::is_none")]
    pub feature_class: Option<String>,
}

impl MicroFeature {
    pub fn new(geometry: Geometry, properties: Properties) -> Self {
        Self {
            kind: FeatureType::Feature,
            id: None,
            bbox: None,
            geometry: Some(geometry),
            properties,
            coordinatesystem: None,
            multiscale: None,
            reference: None,
            parent_id: None,
            feature_class: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<FeatureId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Coordinate system in effect for this feature's geometry
    pub fn effective_coordinatesystem(&self) -> Option<&CoordinateSystem> {
        self.geometry
            .as_ref()
            .and_then(Geometry::coordinatesystem)
            .or(self.coordinatesystem.as_ref())
    }
}

/// An ordered list of MicroFeatures with collection-wide metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicroFeatureCollection {
    #[serde(rename = "type")]
    pub kind: FeatureCollectionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FeatureId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Bbox>,
    pub features: Vec<MicroFeature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_range: Option<BTreeMap<String, ValueRange>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptive_fields: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinatesystem: Option<CoordinateSystem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiscale: Option<Multiscale>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Provenance>,
}

/// Aggregates derived from the features of a collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionSummary {
    pub bbox: Option<Bbox>,
    pub value_range: BTreeMap<String, ValueRange>,
    pub descriptive_fields: Vec<String>,
}

impl MicroFeatureCollection {
    pub fn new(features: Vec<MicroFeature>) -> Self {
        Self {
            kind: FeatureCollectionType::FeatureCollection,
            id: None,
            bbox: None,
            features,
            properties: None,
            value_range: None,
            descriptive_fields: None,
            coordinatesystem: None,
            multiscale: None,
            provenance: None,
        }
    }

    /// Compute bbox, value ranges and descriptive field names.
    ///
    /// Value ranges cover each numerical key and every element of each
    /// multi-numerical key; non-finite values are skipped. The bbox spans
    /// every position of every feature, narrowed to the axes they share.
    pub fn summarize(&self) -> CollectionSummary {
        let mut extents = Extents::default();
        let mut value_range: BTreeMap<String, ValueRange> = BTreeMap::new();
        let mut descriptive: BTreeSet<String> = BTreeSet::new();

        let mut record = |key: &str, v: f64| {
            if !v.is_finite() {
                return;
            }
            value_range
                .entry(key.to_string())
                .and_modify(|r| r.include(v))
                .or_insert_with(|| ValueRange::point(v));
        };

        for feature in &self.features {
            if let Some(geometry) = &feature.geometry {
                geometry.for_each_position(&mut |p: &Position| extents.add(p));
            }
            for (k, v) in &feature.properties.numerical {
                record(k, *v);
            }
            for (k, values) in &feature.properties.multi_numerical {
                for v in values {
                    record(k, *v);
                }
            }
            descriptive.extend(feature.properties.descriptive.keys().cloned());
        }

        CollectionSummary {
            bbox: extents.finish(),
            value_range,
            descriptive_fields: descriptive.into_iter().collect(),
        }
    }

    /// Overwrite `bbox`, `value_range` and `descriptive_fields` with a
    /// fresh summary. Empty aggregates are cleared rather than written.
    pub fn annotate(&mut self) -> CollectionSummary {
        let summary = self.summarize();
        self.bbox = summary.bbox.clone();
        self.value_range = (!summary.value_range.is_empty()).then(|| summary.value_range.clone());
        self.descriptive_fields =
            (!summary.descriptive_fields.is_empty()).then(|| summary.descriptive_fields.clone());
        summary
    }
}

/// The root object of a MicroJSON file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MicroJson {
    Feature(MicroFeature),
    FeatureCollection(MicroFeatureCollection),
    Geometry(Geometry),
}

impl MicroJson {
    pub fn type_name(&self) -> &'static str {
        match self {
            MicroJson::Feature(_) => "Feature",
            MicroJson::FeatureCollection(_) => "FeatureCollection",
            MicroJson::Geometry(g) => g.type_name(),
        }
    }

    /// Build from an already parsed JSON value, dispatching on `type`
    pub fn from_value(value: Value) -> Result<Self> {
        match root_type(&value)?.as_str() {
            "Feature" => typed("Feature", value).map(MicroJson::Feature),
            "FeatureCollection" => typed("FeatureCollection", value).map(MicroJson::FeatureCollection),
            name => typed(name, value).map(MicroJson::Geometry),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }
}

impl<'de> Deserialize<'de> for MicroJson {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        MicroJson::from_value(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordsys::{AxisLabel, Unit};
    use serde_json::json;

    fn feature(area: f64, intensity: Vec<f64>, label: &str, x: f64) -> MicroFeature {
        let mut props = Properties::default();
        props.numerical.insert("area".into(), area);
        props.multi_numerical.insert("intensity".into(), intensity);
        props.descriptive.insert("label".into(), label.into());
        MicroFeature::new(Geometry::point(vec![x, x * 2.0]), props)
    }

    #[test]
    fn test_full_collection_parses() {
        let doc = MicroJson::from_value(json!({
            "type": "FeatureCollection",
            "coordinatesystem": {
                "axes": ["x", "y", "z"],
                "units": ["pixel", "pixel", "pixel"],
                "pixelsPerUnit": [1.0, 1.0, 1.0]
            },
            "value_range": { "area": { "min": 1.0, "max": 5.0 } },
            "descriptive_fields": ["label"],
            "features": [{
                "type": "Feature",
                "id": 1,
                "ref": "plate-1",
                "parentId": 0,
                "featureClass": "nucleus",
                "geometry": { "type": "Point", "coordinates": [1.0, 2.0, 3.0] },
                "properties": {
                    "descriptive": { "label": "a" },
                    "numerical": { "area": 1.0 },
                    "multi_numerical": { "intensity": [1, 2, 3] }
                }
            }]
        }))
        .unwrap();
        let MicroJson::FeatureCollection(fc) = doc else {
            panic!("expected FeatureCollection");
        };
        let cs = fc.coordinatesystem.as_ref().unwrap();
        assert_eq!(cs.axes, vec![AxisLabel::X, AxisLabel::Y, AxisLabel::Z]);
        assert_eq!(cs.units.as_ref().unwrap()[0], Unit::Pixel);
        let f = &fc.features[0];
        assert_eq!(f.reference, Some(FeatureId::from("plate-1")));
        assert_eq!(f.feature_class.as_deref(), Some("nucleus"));
        assert_eq!(f.properties.multi_numerical["intensity"], vec![1.0, 2.0, 3.0]);
        assert_eq!(fc.value_range.as_ref().unwrap()["area"], ValueRange::new(1.0, 5.0));
    }

    #[test]
    fn test_unknown_property_bucket_rejected() {
        let err = MicroJson::from_value(json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [1.0, 2.0] },
            "properties": { "string": { "name": "a" } }
        }))
        .unwrap_err();
        assert!(matches!(err, MicroJsonError::Shape { .. }));
    }

    #[test]
    fn test_invalid_axis_rejected() {
        let err = MicroJson::from_value(json!({
            "type": "FeatureCollection",
            "coordinatesystem": { "axes": ["invalid_axis", "y", "z"] },
            "features": []
        }));
        assert!(err.is_err());
    }

    #[test]
    fn test_from_untyped_partitions() {
        let map = json!({ "name": "cell", "area": 3, "values": [1.0, 2.5] });
        let props = Properties::from_untyped(map.as_object().unwrap()).unwrap();
        assert_eq!(props.descriptive["name"], "cell");
        assert_eq!(props.numerical["area"], 3.0);
        assert_eq!(props.multi_numerical["values"], vec![1.0, 2.5]);

        let back = props.to_untyped();
        assert_eq!(back.len(), 3);
    }

    #[test]
    fn test_from_untyped_rejects_other_values() {
        for bad in [json!({ "flag": true }), json!({ "v": null }), json!({ "m": [1, "a"] })] {
            let err = Properties::from_untyped(bad.as_object().unwrap()).unwrap_err();
            assert!(matches!(err, MicroJsonError::UnsupportedProperty { .. }));
        }
    }

    #[test]
    fn test_duplicate_keys() {
        let mut props = Properties::default();
        props.numerical.insert("a".into(), 1.0);
        props.descriptive.insert("a".into(), "x".into());
        props.descriptive.insert("b".into(), "y".into());
        assert_eq!(props.duplicate_keys(), vec!["a"]);
    }

    #[test]
    fn test_summarize() {
        let fc = MicroFeatureCollection::new(vec![
            feature(1.0, vec![10.0, 20.0], "a", 0.0),
            feature(5.0, vec![-3.0], "b", 4.0),
        ]);
        let s = fc.summarize();
        assert_eq!(s.value_range["area"], ValueRange::new(1.0, 5.0));
        assert_eq!(s.value_range["intensity"], ValueRange::new(-3.0, 20.0));
        assert_eq!(s.descriptive_fields, vec!["label".to_string()]);
        assert_eq!(s.bbox, Some(Bbox(vec![0.0, 0.0, 4.0, 8.0])));
    }

    #[test]
    fn test_summarize_mixed_dimensions_covers_every_feature() {
        let fc = MicroFeatureCollection::new(vec![
            MicroFeature::new(Geometry::point(vec![0.0, 0.0]), Properties::default()),
            MicroFeature::new(Geometry::point(vec![100.0, 100.0, 5.0]), Properties::default()),
        ]);
        assert_eq!(fc.summarize().bbox, Some(Bbox(vec![0.0, 0.0, 100.0, 100.0])));

        let fc = MicroFeatureCollection::new(vec![
            MicroFeature::new(Geometry::point(vec![1.0, 2.0, 3.0]), Properties::default()),
            MicroFeature::new(Geometry::point(vec![-1.0, 4.0, 9.0]), Properties::default()),
        ]);
        assert_eq!(fc.summarize().bbox, Some(Bbox(vec![-1.0, 2.0, 3.0, 1.0, 4.0, 9.0])));
    }

    #[test]
    fn test_null_properties_read_as_empty() {
        let doc = MicroJson::from_json_str(r#"{"type":"Feature","geometry":null,"properties":null}"#)
            .unwrap();
        let MicroJson::Feature(f) = doc else {
            panic!("expected Feature");
        };
        assert!(f.geometry.is_none());
        assert!(f.properties.is_empty());

        let missing = MicroJson::from_value(json!({ "type": "Feature", "geometry": null })).unwrap();
        assert_eq!(missing, MicroJson::Feature(f));
    }

    #[test]
    fn test_annotate_writes_members() {
        let mut fc = MicroFeatureCollection::new(vec![feature(2.0, vec![], "a", 1.0)]);
        fc.annotate();
        assert_eq!(fc.value_range.as_ref().unwrap()["area"], ValueRange::point(2.0));
        assert_eq!(fc.descriptive_fields, Some(vec!["label".to_string()]));
        assert!(fc.bbox.is_some());

        let mut empty = MicroFeatureCollection::new(vec![]);
        empty.annotate();
        assert!(empty.value_range.is_none());
        assert!(empty.bbox.is_none());
    }

    #[test]
    fn test_effective_coordinatesystem_prefers_geometry() {
        let mut f = feature(1.0, vec![], "a", 0.0);
        f.coordinatesystem = Some(CoordinateSystem::new(vec![AxisLabel::X, AxisLabel::Y]));
        assert_eq!(f.effective_coordinatesystem().unwrap().dimensions(), 2);

        let geometry_cs = CoordinateSystem::new(vec![AxisLabel::R, AxisLabel::Theta, AxisLabel::Phi]);
        if let Some(Geometry::Point(p)) = f.geometry.as_mut() {
            p.coordinatesystem = Some(geometry_cs);
        }
        assert_eq!(f.effective_coordinatesystem().unwrap().dimensions(), 3);
    }
}
