//! Embedded JSON Schemas for both dialects
//!
//! The schema files under `schemas/` are compiled into the binary with
//! `include_dir!`, so validation works without any files on disk.

use include_dir::{include_dir, Dir};
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;
use tracing::debug;

use crate::document::Dialect;
use crate::error::{MicroJsonError, Result};
use crate::validate::Issue;

/// The `schemas/` directory
pub static SCHEMAS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/schemas");

/// Schema text for a dialect
pub fn raw_schema(dialect: Dialect) -> Result<&'static str> {
    SCHEMAS
        .get_file(dialect.schema_file())
        .and_then(|f| f.contents_utf8())
        .ok_or_else(|| MicroJsonError::Schema(format!("{} is not embedded", dialect.schema_file())))
}

/// Parsed schema document for a dialect
pub fn schema_value(dialect: Dialect) -> Result<Value> {
    Ok(serde_json::from_str(raw_schema(dialect)?)?)
}

fn compile(dialect: Dialect) -> Result<JSONSchema> {
    let schema = schema_value(dialect)?;
    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema)
        .map_err(|e| MicroJsonError::Schema(format!("{}: {}", dialect.schema_file(), e)))
}

/// Convert a JSON pointer (`/features/0/geometry`) to the dotted path
/// notation used in validation reports (`features[0].geometry`)
pub fn pointer_to_path(pointer: &str) -> String {
    let mut path = String::new();
    for segment in pointer.split('/').skip(1) {
        let segment = segment.replace("~1", "/").replace("~0", "~");
        if segment.parse::<usize>().is_ok() {
            path.push('[');
            path.push_str(&segment);
            path.push(']');
        } else {
            if !path.is_empty() {
                path.push('.');
            }
            path.push_str(&segment);
        }
    }
    path
}

/// Compiled schemas for both dialects
pub struct SchemaSet {
    geojson: JSONSchema,
    microjson: JSONSchema,
}

impl SchemaSet {
    /// Compile the embedded schemas
    pub fn embedded() -> Result<Self> {
        let set = Self {
            geojson: compile(Dialect::GeoJson)?,
            microjson: compile(Dialect::MicroJson)?,
        };
        debug!("compiled embedded JSON schemas");
        Ok(set)
    }

    pub fn get(&self, dialect: Dialect) -> &JSONSchema {
        match dialect {
            Dialect::GeoJson => &self.geojson,
            Dialect::MicroJson => &self.microjson,
        }
    }

    pub fn is_valid(&self, dialect: Dialect, instance: &Value) -> bool {
        self.get(dialect).is_valid(instance)
    }

    /// Every schema violation, as `SCHEMA` issues
    pub fn validate_value(&self, dialect: Dialect, instance: &Value) -> Vec<Issue> {
        match self.get(dialect).validate(instance) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|e| Issue {
                    code: "SCHEMA",
                    message: e.to_string(),
                    path: pointer_to_path(&e.instance_path.to_string()),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_embedded_schemas_compile() {
        for dialect in [Dialect::GeoJson, Dialect::MicroJson] {
            let schema = schema_value(dialect).unwrap();
            assert_eq!(schema["$schema"], "http://json-schema.org/draft-07/schema#");
        }
        assert!(SchemaSet::embedded().is_ok());
    }

    #[test]
    fn test_pointer_to_path() {
        assert_eq!(pointer_to_path(""), "");
        assert_eq!(pointer_to_path("/features/0/geometry"), "features[0].geometry");
        assert_eq!(pointer_to_path("/coordinates/1/0"), "coordinates[1][0]");
        assert_eq!(pointer_to_path("/value_range/a~1b"), "value_range.a/b");
    }

    #[test]
    fn test_point_against_both_dialects() {
        let set = SchemaSet::embedded().unwrap();
        let point = json!({ "type": "Point", "coordinates": [1.0, 2.0] });
        assert!(set.is_valid(Dialect::GeoJson, &point));
        assert!(set.is_valid(Dialect::MicroJson, &point));

        let short = json!({ "type": "Point", "coordinates": [1.0] });
        assert!(!set.is_valid(Dialect::GeoJson, &short));
        let issues = set.validate_value(Dialect::GeoJson, &short);
        assert!(!issues.is_empty());
        assert!(issues.iter().all(|i| i.code == "SCHEMA"));
    }

    #[test]
    fn test_microjson_rejects_unknown_units() {
        let set = SchemaSet::embedded().unwrap();
        let fc = json!({
            "type": "FeatureCollection",
            "coordinatesystem": { "axes": ["x", "y"], "units": ["meter", "furlong"] },
            "features": []
        });
        assert!(!set.is_valid(Dialect::MicroJson, &fc));
        // GeoJSON tolerates foreign members
        assert!(set.is_valid(Dialect::GeoJson, &fc));
    }

    #[test]
    fn test_microjson_properties_buckets() {
        let set = SchemaSet::embedded().unwrap();
        let feature = json!({
            "type": "Feature",
            "geometry": null,
            "properties": { "numerical": { "area": 3.5 }, "descriptive": { "kind": "cell" } }
        });
        assert!(set.is_valid(Dialect::MicroJson, &feature));

        let flat = json!({
            "type": "Feature",
            "geometry": null,
            "properties": { "area": 3.5 }
        });
        assert!(!set.is_valid(Dialect::MicroJson, &flat));
        assert!(set.is_valid(Dialect::GeoJson, &flat));
    }

    #[test]
    fn test_null_properties_and_numeric_ids_agree_with_model() {
        let set = SchemaSet::embedded().unwrap();
        let feature = json!({
            "type": "Feature",
            "id": 1.5,
            "ref": 7,
            "geometry": null,
            "properties": null
        });
        for dialect in [Dialect::GeoJson, Dialect::MicroJson] {
            assert!(set.is_valid(dialect, &feature), "{} rejected the feature", dialect);
            assert!(crate::Document::from_value(feature.clone(), dialect).is_ok());
        }
    }
}
