//! Structural validation
//!
//! Parsing only guarantees that a document has the right *shape*. The rules
//! below cover what the types cannot express:
//!
//! 1. **Arity**: positions have 2 or 3 numbers, lines 2+ positions, rings 4+
//!    positions and are closed
//! 2. **Consistency**: one dimension per geometry, matching the coordinate
//!    system in effect
//! 3. **Referential**: `units` / `pixelsPerUnit` run parallel to `axes`,
//!    transformation vectors to multiscale axes
//! 4. **Ranges**: bbox and `value_range` minima do not exceed maxima
//!
//! Findings are collected, never short-circuited, so one pass reports
//! everything wrong with a document.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::coordsys::{AxisLabel, CoordinateSystem, UnitKind};
use crate::error::{MicroJsonError, Result};
use crate::geojson::{Feature, FeatureCollection, GeoJson};
use crate::geometry::{Bbox, Geometry, Position};
use crate::microjson::{MicroFeature, MicroFeatureCollection, MicroJson, Properties};
use crate::multiscale::Multiscale;
use crate::provenance::{Artifact, ArtifactCollection, OutputArtifacts, Provenance, Workflow};
use crate::tilejson::TileJson;

/// Highest zoom level accepted in TileJSON documents
pub const MAX_ZOOM: u8 = 30;

/// One validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub code: &'static str,
    pub message: String,
    pub path: String,
}

/// Result of validating a document
#[derive(Debug, Default, Clone, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn has_error(&self, code: &str) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// `Err(Invalid)` if any error was recorded
    pub fn into_result(self) -> Result<Self> {
        match self.errors.first() {
            None => Ok(self),
            Some(first) => Err(MicroJsonError::Invalid {
                count: self.errors.len(),
                first: format!("[{}] {}: {}", first.code, display_path(&first.path), first.message),
            }),
        }
    }
}

/// Root-level findings have an empty path
pub fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "<root>"
    } else {
        path
    }
}

/// Knobs for the validator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOptions {
    /// Report warnings as errors
    #[serde(default)]
    pub strict: bool,
    /// Require polygon rings to end where they start
    #[serde(default = "default_true")]
    pub check_ring_closure: bool,
    /// Downgrade mixed 2D/3D positions in one geometry to a warning
    #[serde(default)]
    pub allow_mixed_dimensions: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            strict: false,
            check_ring_closure: true,
            allow_mixed_dimensions: false,
        }
    }
}

/// Anything that can be checked by the [`Validator`]
pub trait Validate {
    fn validate_with(&self, validator: &mut Validator<'_>, path: &str);

    fn validate(&self) -> ValidationReport {
        self.validate_opts(&ValidationOptions::default())
    }

    fn validate_opts(&self, options: &ValidationOptions) -> ValidationReport {
        let mut validator = Validator::new(options);
        self.validate_with(&mut validator, "");
        validator.finish()
    }
}

fn child(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn index(path: &str, i: usize) -> String {
    format!("{}[{}]", path, i)
}

/// Dimension of the first position seen in one geometry
#[derive(Debug, Default)]
struct Dimensions {
    first: Option<usize>,
    mixed_reported: bool,
}

/// Accumulates issues while walking a document
pub struct Validator<'o> {
    options: &'o ValidationOptions,
    report: ValidationReport,
}

impl<'o> Validator<'o> {
    pub fn new(options: &'o ValidationOptions) -> Self {
        Self {
            options,
            report: ValidationReport::default(),
        }
    }

    pub fn finish(self) -> ValidationReport {
        self.report
    }

    pub fn error(&mut self, code: &'static str, path: &str, message: impl Into<String>) {
        self.report.errors.push(Issue {
            code,
            message: message.into(),
            path: path.to_string(),
        });
    }

    /// Record a warning, or an error in strict mode
    pub fn warning(&mut self, code: &'static str, path: &str, message: impl Into<String>) {
        let issue = Issue {
            code,
            message: message.into(),
            path: path.to_string(),
        };
        if self.options.strict {
            self.report.errors.push(issue);
        } else {
            self.report.warnings.push(issue);
        }
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    pub fn bbox(&mut self, bbox: &Bbox, path: &str) {
        let values = bbox.as_slice();
        if values.len() < 4 || values.len() % 2 != 0 {
            self.error(
                "BBOX_LENGTH",
                path,
                format!("bbox needs an even number of at least 4 values, got {}", values.len()),
            );
            return;
        }
        if values.iter().any(|v| !v.is_finite()) {
            self.error("NON_FINITE", path, "bbox contains a non-finite number");
            return;
        }
        for (axis, (lo, hi)) in bbox.min().iter().zip(bbox.max()).enumerate() {
            if lo > hi {
                self.error(
                    "BBOX_ORDER",
                    path,
                    format!("axis {}: minimum {} exceeds maximum {}", axis, lo, hi),
                );
            }
        }
    }

    fn position(&mut self, p: &Position, path: &str, dims: &mut Dimensions) {
        if p.len() < 2 || p.len() > 3 {
            self.error(
                "ARITY",
                path,
                format!("position must have 2 or 3 numbers, got {}", p.len()),
            );
            return;
        }
        if p.iter().any(|v| !v.is_finite()) {
            self.error("NON_FINITE", path, "position contains a non-finite number");
        }
        match dims.first {
            None => dims.first = Some(p.len()),
            Some(d) if d != p.len() && !dims.mixed_reported => {
                dims.mixed_reported = true;
                let message = format!("{}D position in a {}D geometry", p.len(), d);
                if self.options.allow_mixed_dimensions {
                    self.warning("MIXED_DIMENSIONS", path, message);
                } else {
                    self.error("MIXED_DIMENSIONS", path, message);
                }
            }
            Some(_) => {}
        }
    }

    fn line(&mut self, line: &[Position], path: &str, dims: &mut Dimensions) {
        if line.len() < 2 {
            self.error(
                "LINE_TOO_SHORT",
                path,
                format!("line needs at least 2 positions, got {}", line.len()),
            );
        }
        for (i, p) in line.iter().enumerate() {
            self.position(p, &index(path, i), dims);
        }
    }

    fn rings(&mut self, rings: &[Vec<Position>], path: &str, dims: &mut Dimensions) {
        for (r, ring) in rings.iter().enumerate() {
            let ring_path = index(path, r);
            if ring.len() < 4 {
                self.error(
                    "RING_TOO_SHORT",
                    &ring_path,
                    format!("linear ring needs at least 4 positions, got {}", ring.len()),
                );
            } else if self.options.check_ring_closure && ring.first() != ring.last() {
                self.error("RING_NOT_CLOSED", &ring_path, "first and last positions differ");
            }
            for (i, p) in ring.iter().enumerate() {
                self.position(p, &index(&ring_path, i), dims);
            }
        }
    }

    /// Validate a geometry under the coordinate system inherited from its
    /// feature or collection. A geometry's own coordinate system wins.
    pub fn geometry(&mut self, geometry: &Geometry, path: &str, inherited: Option<&CoordinateSystem>) {
        if let Some(bbox) = geometry.bbox() {
            self.bbox(bbox, &child(path, "bbox"));
        }
        if let Some(cs) = geometry.coordinatesystem() {
            self.coordinatesystem(cs, &child(path, "coordinatesystem"));
        }
        let cs = geometry.coordinatesystem().or(inherited);

        let coords = child(path, "coordinates");
        let mut dims = Dimensions::default();
        match geometry {
            Geometry::Point(s) => self.position(&s.coordinates, &coords, &mut dims),
            Geometry::MultiPoint(s) => {
                for (i, p) in s.coordinates.iter().enumerate() {
                    self.position(p, &index(&coords, i), &mut dims);
                }
            }
            Geometry::LineString(s) => self.line(&s.coordinates, &coords, &mut dims),
            Geometry::MultiLineString(s) => {
                for (i, line) in s.coordinates.iter().enumerate() {
                    self.line(line, &index(&coords, i), &mut dims);
                }
            }
            Geometry::Polygon(s) => self.rings(&s.coordinates, &coords, &mut dims),
            Geometry::MultiPolygon(s) => {
                for (i, polygon) in s.coordinates.iter().enumerate() {
                    self.rings(polygon, &index(&coords, i), &mut dims);
                }
            }
            Geometry::GeometryCollection(c) => {
                let members = child(path, "geometries");
                for (i, g) in c.geometries.iter().enumerate() {
                    let member = index(&members, i);
                    if matches!(g, Geometry::GeometryCollection(_)) {
                        self.warning(
                            "NESTED_GEOMETRY_COLLECTION",
                            &member,
                            "geometry collections should not be nested",
                        );
                    }
                    self.geometry(g, &member, cs);
                }
                return;
            }
        }

        if let (Some(cs), Some(d)) = (cs, dims.first) {
            if cs.dimensions() != d {
                self.error(
                    "DIMENSION_MISMATCH",
                    &coords,
                    format!("{}D coordinates under a {}-axis coordinate system", d, cs.dimensions()),
                );
            }
        }
    }

    // -------------------------------------------------------------------------
    // Coordinate metadata
    // -------------------------------------------------------------------------

    pub fn coordinatesystem(&mut self, cs: &CoordinateSystem, path: &str) {
        let n = cs.axes.len();
        if n == 0 {
            self.error("AXIS_LENGTH_MISMATCH", &child(path, "axes"), "at least one axis is required");
        }

        let mut seen = HashSet::new();
        for (i, axis) in cs.axes.iter().enumerate() {
            if !seen.insert(*axis) {
                self.error(
                    "DUPLICATE_AXIS",
                    &index(&child(path, "axes"), i),
                    format!("axis '{}' appears more than once", axis),
                );
            }
        }

        if let Some(units) = &cs.units {
            let units_path = child(path, "units");
            if units.len() != n {
                self.error(
                    "AXIS_LENGTH_MISMATCH",
                    &units_path,
                    format!("{} units for {} axes", units.len(), n),
                );
            }
            for (i, (axis, unit)) in cs.axes.iter().zip(units).enumerate() {
                let angular = matches!(axis, AxisLabel::Theta | AxisLabel::Phi);
                let fits = match unit.kind() {
                    UnitKind::Angle => angular,
                    UnitKind::Length => !angular,
                    UnitKind::Pixel => true,
                };
                if !fits {
                    self.warning(
                        "UNIT_KIND_MISMATCH",
                        &index(&units_path, i),
                        format!("unit '{}' on axis '{}'", unit, axis),
                    );
                }
            }
        }

        if let Some(scale) = &cs.pixels_per_unit {
            let scale_path = child(path, "pixelsPerUnit");
            if scale.len() != n {
                self.error(
                    "AXIS_LENGTH_MISMATCH",
                    &scale_path,
                    format!("{} scale factors for {} axes", scale.len(), n),
                );
            }
            for (i, s) in scale.iter().enumerate() {
                if !s.is_finite() || *s <= 0.0 {
                    self.error(
                        "INVALID_PIXELS_PER_UNIT",
                        &index(&scale_path, i),
                        format!("scale factor must be a positive number, got {}", s),
                    );
                }
            }
        }
    }

    pub fn multiscale(&mut self, ms: &Multiscale, path: &str) {
        let n = ms.axes.len();
        let mut names = HashSet::new();
        for (i, axis) in ms.axes.iter().enumerate() {
            if !names.insert(axis.name.as_str()) {
                self.error(
                    "DUPLICATE_AXIS_NAME",
                    &index(&child(path, "axes"), i),
                    format!("axis name '{}' appears more than once", axis.name),
                );
            }
        }

        let transforms_path = child(path, "coordinateTransformations");
        for (i, t) in ms.coordinate_transformations.iter().flatten().enumerate() {
            if let Some(v) = t.vector() {
                if v.len() != n {
                    self.error(
                        "TRANSFORM_LENGTH",
                        &index(&transforms_path, i),
                        format!("{} values for {} axes", v.len(), n),
                    );
                }
            }
        }

        if let Some(matrix) = &ms.transformation_matrix {
            let rows_ok = matrix.len() == n || matrix.len() == n + 1;
            let cols_ok = matrix.iter().all(|row| row.len() == n + 1);
            if !rows_ok || !cols_ok {
                self.error(
                    "MATRIX_SHAPE",
                    &child(path, "transformationMatrix"),
                    format!("expected {} or {} rows of {} values", n, n + 1, n + 1),
                );
            }
        }
    }

    // -------------------------------------------------------------------------
    // Features
    // -------------------------------------------------------------------------

    pub fn feature(&mut self, feature: &Feature, path: &str) {
        if let Some(bbox) = &feature.bbox {
            self.bbox(bbox, &child(path, "bbox"));
        }
        if let Some(g) = &feature.geometry {
            self.geometry(g, &child(path, "geometry"), None);
        }
    }

    pub fn feature_collection(&mut self, fc: &FeatureCollection, path: &str) {
        if let Some(bbox) = &fc.bbox {
            self.bbox(bbox, &child(path, "bbox"));
        }
        let features = child(path, "features");
        for (i, f) in fc.features.iter().enumerate() {
            self.feature(f, &index(&features, i));
        }
    }

    fn properties(&mut self, props: &Properties, path: &str) {
        for key in props.duplicate_keys() {
            self.error(
                "DUPLICATE_PROPERTY_KEY",
                path,
                format!("property '{}' appears in more than one bucket", key),
            );
        }
        for (k, v) in &props.numerical {
            if !v.is_finite() {
                self.error("NON_FINITE", &child(&child(path, "numerical"), k), "non-finite value");
            }
        }
        for (k, values) in &props.multi_numerical {
            if values.iter().any(|v| !v.is_finite()) {
                self.error(
                    "NON_FINITE",
                    &child(&child(path, "multi_numerical"), k),
                    "non-finite value",
                );
            }
        }
    }

    /// Validate a MicroFeature under the collection's coordinate system
    pub fn micro_feature(
        &mut self,
        feature: &MicroFeature,
        path: &str,
        inherited: Option<&CoordinateSystem>,
    ) {
        if let Some(bbox) = &feature.bbox {
            self.bbox(bbox, &child(path, "bbox"));
        }
        if let Some(cs) = &feature.coordinatesystem {
            let cs_path = child(path, "coordinatesystem");
            self.coordinatesystem(cs, &cs_path);
            if let Some(parent) = inherited {
                if parent.dimensions() != cs.dimensions() {
                    self.error(
                        "DIMENSION_MISMATCH",
                        &cs_path,
                        format!(
                            "{} axes, but the collection declares {}",
                            cs.dimensions(),
                            parent.dimensions()
                        ),
                    );
                }
            }
        }
        if let Some(ms) = &feature.multiscale {
            self.multiscale(ms, &child(path, "multiscale"));
        }
        self.properties(&feature.properties, &child(path, "properties"));
        if let Some(g) = &feature.geometry {
            let cs = feature.coordinatesystem.as_ref().or(inherited);
            self.geometry(g, &child(path, "geometry"), cs);
        }
    }

    pub fn micro_feature_collection(&mut self, fc: &MicroFeatureCollection, path: &str) {
        if let Some(bbox) = &fc.bbox {
            self.bbox(bbox, &child(path, "bbox"));
        }
        if let Some(cs) = &fc.coordinatesystem {
            self.coordinatesystem(cs, &child(path, "coordinatesystem"));
        }
        if let Some(ms) = &fc.multiscale {
            self.multiscale(ms, &child(path, "multiscale"));
        }
        if let Some(p) = &fc.provenance {
            self.provenance(p, &child(path, "provenance"));
        }

        let features = child(path, "features");
        for (i, f) in fc.features.iter().enumerate() {
            self.micro_feature(f, &index(&features, i), fc.coordinatesystem.as_ref());
        }

        if let Some(ranges) = &fc.value_range {
            let numeric_keys: BTreeSet<&str> = fc
                .features
                .iter()
                .flat_map(|f| {
                    f.properties
                        .numerical
                        .keys()
                        .chain(f.properties.multi_numerical.keys())
                })
                .map(String::as_str)
                .collect();
            let ranges_path = child(path, "value_range");
            for (name, range) in ranges {
                let range_path = child(&ranges_path, name);
                if !range.min.is_finite() || !range.max.is_finite() {
                    self.error("NON_FINITE", &range_path, "value range bounds must be finite");
                } else if !range.is_ordered() {
                    self.error(
                        "VALUE_RANGE_INVERTED",
                        &range_path,
                        format!("min {} exceeds max {}", range.min, range.max),
                    );
                }
                if !numeric_keys.contains(name.as_str()) {
                    self.warning(
                        "UNKNOWN_VALUE_RANGE_FIELD",
                        &range_path,
                        format!("no feature has a numerical property '{}'", name),
                    );
                }
            }
        }

        if let Some(fields) = &fc.descriptive_fields {
            let descriptive_keys: BTreeSet<&str> = fc
                .features
                .iter()
                .flat_map(|f| f.properties.descriptive.keys())
                .map(String::as_str)
                .collect();
            let fields_path = child(path, "descriptive_fields");
            for (i, name) in fields.iter().enumerate() {
                if !descriptive_keys.contains(name.as_str()) {
                    self.warning(
                        "UNKNOWN_DESCRIPTIVE_FIELD",
                        &index(&fields_path, i),
                        format!("no feature has a descriptive property '{}'", name),
                    );
                }
            }
        }
    }

    pub fn provenance(&mut self, provenance: &Provenance, path: &str) {
        match provenance {
            Provenance::Artifact(a) => self.artifact(a, path),
            Provenance::ArtifactCollection(c) => self.artifact_collection(c, path),
            Provenance::Workflow(w) => self.workflow(w, path),
            Provenance::WorkflowCollection(c) => {
                let workflows = child(path, "workflows");
                for (i, w) in c.workflows.iter().enumerate() {
                    self.workflow(w, &index(&workflows, i));
                }
            }
        }
    }

    fn workflow(&mut self, workflow: &Workflow, path: &str) {
        let run = child(path, "workflowProvenance");
        if let Some(output) = workflow
            .workflow_provenance
            .as_ref()
            .and_then(|p| p.output_artifacts.as_ref())
        {
            let output_path = child(&run, "outputArtifacts");
            match output {
                OutputArtifacts::Artifact(a) => self.artifact(a, &output_path),
                OutputArtifacts::Collection(c) => self.artifact_collection(c, &output_path),
            }
        }
        let subs = child(path, "subWorkflows");
        for (i, sub) in workflow.sub_workflows.iter().flatten().enumerate() {
            self.workflow(sub, &index(&subs, i));
        }
    }

    fn artifact_collection(&mut self, collection: &ArtifactCollection, path: &str) {
        let artifacts = child(path, "artifacts");
        for (i, a) in collection.artifacts.iter().enumerate() {
            self.artifact(a, &index(&artifacts, i));
        }
    }

    fn artifact(&mut self, artifact: &Artifact, path: &str) {
        if artifact.uri.trim().is_empty() {
            let label = artifact.id.as_deref().unwrap_or("<unnamed>");
            self.error(
                "EMPTY_URI",
                &child(path, "uri"),
                format!("artifact {} has an empty uri", label),
            );
        }
    }

    // -------------------------------------------------------------------------
    // TileJSON
    // -------------------------------------------------------------------------

    fn zoom_range(&mut self, minzoom: u8, maxzoom: u8, path: &str) {
        if minzoom > maxzoom {
            self.error(
                "ZOOM_RANGE",
                path,
                format!("minzoom {} exceeds maxzoom {}", minzoom, maxzoom),
            );
        }
        if maxzoom > MAX_ZOOM {
            self.error(
                "ZOOM_RANGE",
                &child(path, "maxzoom"),
                format!("maxzoom {} exceeds {}", maxzoom, MAX_ZOOM),
            );
        }
    }

    pub fn tilejson(&mut self, tj: &TileJson, path: &str) {
        if let Err(e) = tj.spec_version() {
            self.error(
                "TILEJSON_VERSION",
                &child(path, "tilejson"),
                format!("'{}' is not a semantic version: {}", tj.tilejson, e),
            );
        }
        if tj.tiles.is_empty() {
            self.error("NO_TILES", &child(path, "tiles"), "at least one tile endpoint is required");
        }
        if let Some(bounds) = &tj.bounds {
            if !(4..=10).contains(&bounds.len()) {
                self.error(
                    "BOUNDS_LENGTH",
                    &child(path, "bounds"),
                    format!("bounds needs 4 to 10 values, got {}", bounds.len()),
                );
            }
        }
        if let Some(center) = &tj.center {
            if !(3..=6).contains(&center.len()) {
                self.error(
                    "CENTER_LENGTH",
                    &child(path, "center"),
                    format!("center needs 3 to 6 values, got {}", center.len()),
                );
            }
        }
        self.zoom_range(tj.minzoom, tj.maxzoom, path);
        if let Some(fill) = tj.fillzoom {
            if fill < tj.minzoom || fill > tj.maxzoom {
                self.error(
                    "ZOOM_RANGE",
                    &child(path, "fillzoom"),
                    format!("fillzoom {} outside {}..={}", fill, tj.minzoom, tj.maxzoom),
                );
            }
        }

        let layers = child(path, "vector_layers");
        let mut ids = HashSet::new();
        for (i, layer) in tj.vector_layers.iter().enumerate() {
            let layer_path = index(&layers, i);
            if !ids.insert(layer.id.as_str()) {
                self.error(
                    "DUPLICATE_LAYER",
                    &layer_path,
                    format!("layer id '{}' appears more than once", layer.id),
                );
            }
            self.zoom_range(layer.minzoom, layer.maxzoom, &layer_path);
        }
    }
}

// -----------------------------------------------------------------------------
// Validate impls
// -----------------------------------------------------------------------------

impl Validate for Bbox {
    fn validate_with(&self, validator: &mut Validator<'_>, path: &str) {
        validator.bbox(self, path);
    }
}

impl Validate for Geometry {
    fn validate_with(&self, validator: &mut Validator<'_>, path: &str) {
        validator.geometry(self, path, None);
    }
}

impl Validate for CoordinateSystem {
    fn validate_with(&self, validator: &mut Validator<'_>, path: &str) {
        validator.coordinatesystem(self, path);
    }
}

impl Validate for Multiscale {
    fn validate_with(&self, validator: &mut Validator<'_>, path: &str) {
        validator.multiscale(self, path);
    }
}

impl Validate for Feature {
    fn validate_with(&self, validator: &mut Validator<'_>, path: &str) {
        validator.feature(self, path);
    }
}

impl Validate for FeatureCollection {
    fn validate_with(&self, validator: &mut Validator<'_>, path: &str) {
        validator.feature_collection(self, path);
    }
}

impl Validate for MicroFeature {
    fn validate_with(&self, validator: &mut Validator<'_>, path: &str) {
        validator.micro_feature(self, path, None);
    }
}

impl Validate for MicroFeatureCollection {
    fn validate_with(&self, validator: &mut Validator<'_>, path: &str) {
        validator.micro_feature_collection(self, path);
    }
}

impl Validate for Provenance {
    fn validate_with(&self, validator: &mut Validator<'_>, path: &str) {
        validator.provenance(self, path);
    }
}

impl Validate for TileJson {
    fn validate_with(&self, validator: &mut Validator<'_>, path: &str) {
        validator.tilejson(self, path);
    }
}

impl Validate for GeoJson {
    fn validate_with(&self, validator: &mut Validator<'_>, path: &str) {
        match self {
            GeoJson::Feature(f) => validator.feature(f, path),
            GeoJson::FeatureCollection(fc) => validator.feature_collection(fc, path),
            GeoJson::Geometry(g) => validator.geometry(g, path, None),
        }
    }
}

impl Validate for MicroJson {
    fn validate_with(&self, validator: &mut Validator<'_>, path: &str) {
        match self {
            MicroJson::Feature(f) => validator.micro_feature(f, path, None),
            MicroJson::FeatureCollection(fc) => validator.micro_feature_collection(fc, path),
            MicroJson::Geometry(g) => validator.geometry(g, path, None),
        }
    }
}
