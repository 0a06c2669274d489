//! TileJSON metadata for tiled MicroJSON datasets
//!
//! See <https://github.com/mapbox/tilejson-spec/tree/master/3.0.0>.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_minzoom() -> u8 {
    0
}

fn default_maxzoom() -> u8 {
    22
}

/// Value in a field range: a number or a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    String(String),
}

/// One vector layer of a tileset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayer {
    pub id: String,
    /// Field name to type description
    #[serde(default)]
    pub fields: Option<BTreeMap<String, String>>,
    #[serde(default = "default_minzoom")]
    pub minzoom: u8,
    #[serde(default = "default_maxzoom")]
    pub maxzoom: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fieldranges: Option<BTreeMap<String, Vec<FieldValue>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fieldenums: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fielddescriptions: Option<BTreeMap<String, String>>,
}

impl TileLayer {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: None,
            minzoom: default_minzoom(),
            maxzoom: default_maxzoom(),
            description: None,
            fieldranges: None,
            fieldenums: None,
            fielddescriptions: None,
        }
    }
}

/// A TileJSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileJson {
    /// TileJSON version, e.g. `"3.0.0"`
    pub tilejson: String,
    /// Tile URL templates or paths
    pub tiles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grids: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default = "default_minzoom")]
    pub minzoom: u8,
    #[serde(default = "default_maxzoom")]
    pub maxzoom: u8,
    /// `[west, south, east, north]`, optionally with more axes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Vec<f64>>,
    /// `[lon, lat, zoom]`, optionally with more axes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fillzoom: Option<u8>,
    pub vector_layers: Vec<TileLayer>,
}

impl TileJson {
    pub fn from_json_str(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parsed `tilejson` version
    pub fn spec_version(&self) -> Result<semver::Version, semver::Error> {
        semver::Version::parse(&self.tilejson)
    }

    pub fn layer(&self, id: &str) -> Option<&TileLayer> {
        self.vector_layers.iter().find(|l| l.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_tilejson_defaults() {
        let tj: TileJson = serde_json::from_value(json!({
            "tilejson": "3.0.0",
            "tiles": ["tiles/{z}/{x}/{y}.pbf"],
            "vector_layers": [{ "id": "cells", "fields": { "area": "Number" } }]
        }))
        .unwrap();
        assert_eq!(tj.minzoom, 0);
        assert_eq!(tj.maxzoom, 22);
        assert_eq!(tj.spec_version().unwrap(), semver::Version::new(3, 0, 0));
        let layer = tj.layer("cells").unwrap();
        assert_eq!(layer.maxzoom, 22);
        assert_eq!(layer.fields.as_ref().unwrap()["area"], "Number");
    }

    #[test]
    fn test_field_ranges_mix_numbers_and_strings() {
        let layer: TileLayer = serde_json::from_value(json!({
            "id": "cells",
            "fieldranges": { "area": [0, 100.5], "label": ["a", "z"] }
        }))
        .unwrap();
        let ranges = layer.fieldranges.unwrap();
        assert_eq!(ranges["area"], vec![FieldValue::Number(0.0), FieldValue::Number(100.5)]);
        assert_eq!(ranges["label"][0], FieldValue::String("a".into()));
    }

    #[test]
    fn test_missing_layers_rejected() {
        let err = serde_json::from_value::<TileJson>(json!({
            "tilejson": "3.0.0",
            "tiles": []
        }));
        assert!(err.is_err());
    }
}
