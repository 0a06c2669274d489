//! Dialect-aware entry points
//!
//! A [`Document`] is a parsed root object of either dialect. [`check`] runs
//! the whole pipeline on raw text: JSON parsing, optional JSON Schema
//! validation and structural validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::{MicroJsonError, Result};
use crate::geojson::{root_type, GeoJson};
use crate::microjson::MicroJson;
use crate::schema::SchemaSet;
use crate::validate::{Validate, ValidationOptions, ValidationReport, Validator};

/// Which schema a document is read against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[value(name = "geojson")]
    GeoJson,
    #[default]
    #[value(name = "microjson")]
    MicroJson,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::GeoJson => "geojson",
            Dialect::MicroJson => "microjson",
        }
    }

    /// File name of the embedded schema
    pub fn schema_file(&self) -> &'static str {
        match self {
            Dialect::GeoJson => "geojson.schema.json",
            Dialect::MicroJson => "microjson.schema.json",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = MicroJsonError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "geojson" => Ok(Dialect::GeoJson),
            "microjson" => Ok(Dialect::MicroJson),
            _ => Err(MicroJsonError::UnknownType {
                found: s.to_string(),
                expected: "geojson, microjson".to_string(),
            }),
        }
    }
}

/// A parsed root object
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    GeoJson(GeoJson),
    MicroJson(MicroJson),
}

impl Document {
    pub fn from_value(value: Value, dialect: Dialect) -> Result<Self> {
        match dialect {
            Dialect::GeoJson => GeoJson::from_value(value).map(Document::GeoJson),
            Dialect::MicroJson => MicroJson::from_value(value).map(Document::MicroJson),
        }
    }

    pub fn parse(text: &str, dialect: Dialect) -> Result<Self> {
        Self::from_value(serde_json::from_str(text)?, dialect)
    }

    pub fn dialect(&self) -> Dialect {
        match self {
            Document::GeoJson(_) => Dialect::GeoJson,
            Document::MicroJson(_) => Dialect::MicroJson,
        }
    }

    /// Value of the root `type` member
    pub fn type_name(&self) -> &'static str {
        match self {
            Document::GeoJson(d) => d.type_name(),
            Document::MicroJson(d) => d.type_name(),
        }
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(match self {
            Document::GeoJson(d) => serde_json::to_value(d)?,
            Document::MicroJson(d) => serde_json::to_value(d)?,
        })
    }

    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        let value = self.to_value()?;
        Ok(if pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        })
    }
}

impl Validate for Document {
    fn validate_with(&self, validator: &mut Validator<'_>, path: &str) {
        match self {
            Document::GeoJson(d) => d.validate_with(validator, path),
            Document::MicroJson(d) => d.validate_with(validator, path),
        }
    }
}

/// Parse and validate raw text.
///
/// Malformed JSON and discriminant errors are returned as `Err`, with or
/// without `schemas`. When
/// `schemas` is given, schema violations are reported first; if the typed
/// parse then fails, those violations are returned instead of the parse
/// error since they describe the same problem in more detail.
pub fn check(
    text: &str,
    dialect: Dialect,
    options: &ValidationOptions,
    schemas: Option<&SchemaSet>,
) -> Result<ValidationReport> {
    let value: Value = serde_json::from_str(text)?;
    root_type(&value)?;

    let mut report = ValidationReport::default();
    if let Some(schemas) = schemas {
        report.errors.extend(schemas.validate_value(dialect, &value));
    }

    let document = match Document::from_value(value, dialect) {
        Ok(doc) => doc,
        Err(e) if !report.errors.is_empty() => {
            debug!("typed parse failed after schema violations: {}", e);
            return Ok(report);
        }
        Err(e) => return Err(e),
    };

    report.merge(document.validate_opts(options));
    debug!(
        dialect = %dialect,
        root = document.type_name(),
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "validated document"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINT: &str = r#"{"type": "Point", "coordinates": [1.0, 2.0]}"#;

    #[test]
    fn test_dialect_from_str() {
        assert_eq!("GeoJSON".parse::<Dialect>().unwrap(), Dialect::GeoJson);
        assert_eq!("microjson".parse::<Dialect>().unwrap(), Dialect::MicroJson);
        assert!("topojson".parse::<Dialect>().is_err());
        assert_eq!(Dialect::default(), Dialect::MicroJson);
    }

    #[test]
    fn test_parse_both_dialects() {
        for dialect in [Dialect::GeoJson, Dialect::MicroJson] {
            let doc = Document::parse(POINT, dialect).unwrap();
            assert_eq!(doc.dialect(), dialect);
            assert_eq!(doc.type_name(), "Point");
        }
    }

    #[test]
    fn test_round_trip_keeps_type() {
        let doc = Document::parse(POINT, Dialect::MicroJson).unwrap();
        let text = doc.to_json_string(false).unwrap();
        let back = Document::parse(&text, Dialect::MicroJson).unwrap();
        assert_eq!(back.type_name(), "Point");
        assert_eq!(back, doc);
    }

    #[test]
    fn test_check_reports_arity() {
        let report = check(
            r#"{"type": "Point", "coordinates": [1.0]}"#,
            Dialect::GeoJson,
            &ValidationOptions::default(),
            None,
        )
        .unwrap();
        assert!(report.has_error("ARITY"));
    }

    #[test]
    fn test_check_malformed_json() {
        let err = check("{", Dialect::GeoJson, &ValidationOptions::default(), None).unwrap_err();
        assert!(matches!(err, MicroJsonError::Json(_)));
    }

    #[test]
    fn test_check_missing_type_with_schema() {
        let schemas = SchemaSet::embedded().unwrap();
        let text = r#"{"coordinates": [1.0, 2.0]}"#;
        for dialect in [Dialect::GeoJson, Dialect::MicroJson] {
            let err = check(text, dialect, &ValidationOptions::default(), Some(&schemas)).unwrap_err();
            assert!(matches!(err, MicroJsonError::MissingType), "got {:?}", err);
        }

        let err = check(r#"{"type": "Topology"}"#, Dialect::GeoJson, &ValidationOptions::default(), Some(&schemas))
            .unwrap_err();
        assert!(matches!(err, MicroJsonError::UnknownType { .. }));
    }

    #[test]
    fn test_check_with_schema_prefers_schema_issues() {
        let schemas = SchemaSet::embedded().unwrap();
        let text = r#"{
            "type": "Feature",
            "geometry": null,
            "properties": { "area": 3.5 }
        }"#;
        let report = check(text, Dialect::MicroJson, &ValidationOptions::default(), Some(&schemas)).unwrap();
        assert!(report.has_error("SCHEMA"));

        let err = check(text, Dialect::MicroJson, &ValidationOptions::default(), None).unwrap_err();
        assert!(matches!(err, MicroJsonError::Shape { .. }));
    }
}
