//! MicroJSON
//!
//! Typed models for GeoJSON and its MicroJSON extension, with structural
//! validation and embedded JSON Schemas.
//!
//! ## Features
//!
//! - **Typed Models**: every geometry, feature and collection as a serde type
//! - **Coordinate Systems**: axis labels, units and pixel scaling per object
//! - **Structured Properties**: descriptive, numerical and multi-numerical buckets
//! - **Validation**: arity, dimensions, ring closure and range checks with paths
//! - **JSON Schema**: both dialects embedded and compiled on demand
//! - **Summaries**: bbox, value ranges and descriptive fields of a collection
//!
//! ## Dialects
//!
//! ```text
//! GeoJSON    Feature | FeatureCollection | Geometry
//!              └─ properties: free-form object
//! MicroJSON  Feature | FeatureCollection | Geometry
//!              ├─ properties: { descriptive, numerical, multi_numerical }
//!              ├─ coordinatesystem: { axes, units, pixelsPerUnit }
//!              └─ multiscale, provenance, value_range, descriptive_fields
//! ```
//!
//! ## Example
//!
//! ```
//! use microjson::{MicroJson, Validate};
//!
//! let doc = MicroJson::from_json_str(r#"{"type": "Point", "coordinates": [1.0, 2.0]}"#)?;
//! assert!(doc.validate().is_valid());
//! # Ok::<(), microjson::MicroJsonError>(())
//! ```

pub mod config;
pub mod coordsys;
pub mod document;
pub mod error;
pub mod geojson;
pub mod geometry;
pub mod loader;
pub mod microjson;
pub mod multiscale;
pub mod provenance;
pub mod schema;
pub mod tilejson;
pub mod validate;

pub use config::MicroJsonConfig;
pub use coordsys::{AxisLabel, CoordinateSystem, Unit, UnitKind};
pub use document::{check, Dialect, Document};
pub use error::{MicroJsonError, Result};
pub use geojson::{Feature, FeatureCollection, FeatureId, GeoJson};
pub use geometry::{Bbox, Geometry, GeometryCollection, Position, Shape};
pub use microjson::{
    CollectionSummary, MicroFeature, MicroFeatureCollection, MicroJson, Properties, ValueRange,
};
pub use multiscale::{CoordinateTransformation, Multiscale, MultiscaleAxis};
pub use provenance::Provenance;
pub use schema::SchemaSet;
pub use tilejson::{TileJson, TileLayer};
pub use validate::{Issue, Validate, ValidationOptions, ValidationReport};
