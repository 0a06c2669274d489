//! Geometry objects shared by the GeoJSON and MicroJSON dialects

use serde::{Deserialize, Serialize};

use crate::coordsys::CoordinateSystem;

/// A single position: 2 or 3 numbers, one per axis
pub type Position = Vec<f64>;

/// Bounding box: all per-axis minima followed by all per-axis maxima
///
/// `[minx, miny, maxx, maxy]` in 2D, `[minx, miny, minz, maxx, maxy, maxz]`
/// in 3D.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bbox(pub Vec<f64>);

impl Bbox {
    pub fn from_extents(min: &[f64], max: &[f64]) -> Self {
        let mut values = Vec::with_capacity(min.len() + max.len());
        values.extend_from_slice(min);
        values.extend_from_slice(max);
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of axes covered (half the length, rounded down)
    pub fn dimensions(&self) -> usize {
        self.0.len() / 2
    }

    pub fn min(&self) -> &[f64] {
        &self.0[..self.dimensions()]
    }

    pub fn max(&self) -> &[f64] {
        let d = self.dimensions();
        &self.0[d..2 * d]
    }

    /// Smallest box covering both, `None` if they differ in dimensions
    pub fn union(&self, other: &Bbox) -> Option<Bbox> {
        if self.dimensions() != other.dimensions() {
            return None;
        }
        let min: Vec<f64> = self.min().iter().zip(other.min()).map(|(a, b)| a.min(*b)).collect();
        let max: Vec<f64> = self.max().iter().zip(other.max()).map(|(a, b)| a.max(*b)).collect();
        Some(Bbox::from_extents(&min, &max))
    }
}

/// Accumulates per-axis extents over a stream of positions
#[derive(Debug, Default)]
pub(crate) struct Extents {
    min: Vec<f64>,
    max: Vec<f64>,
    seen: bool,
}

impl Extents {
    pub(crate) fn add(&mut self, position: &Position) {
        if !self.seen {
            self.min = position.clone();
            self.max = position.clone();
            self.seen = true;
            return;
        }
        // Mixed dimensions shrink the box to the shared axes
        let dims = self.min.len().min(position.len());
        self.min.truncate(dims);
        self.max.truncate(dims);
        for (i, v) in position.iter().take(dims).enumerate() {
            self.min[i] = self.min[i].min(*v);
            self.max[i] = self.max[i].max(*v);
        }
    }

    pub(crate) fn finish(self) -> Option<Bbox> {
        if !self.seen || self.min.is_empty() {
            return None;
        }
        Some(Bbox::from_extents(&self.min, &self.max))
    }
}

/// Body shared by every coordinate-carrying geometry
///
/// `C` fixes the nesting depth of `coordinates` for the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape<C> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Bbox>,
    pub coordinates: C,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinatesystem: Option<CoordinateSystem>,
}

impl<C> Shape<C> {
    pub fn new(coordinates: C) -> Self {
        Self {
            bbox: None,
            coordinates,
            coordinatesystem: None,
        }
    }

    pub fn with_coordinatesystem(mut self, cs: CoordinateSystem) -> Self {
        self.coordinatesystem = Some(cs);
        self
    }
}

pub type Point = Shape<Position>;
pub type MultiPoint = Shape<Vec<Position>>;
pub type LineString = Shape<Vec<Position>>;
pub type MultiLineString = Shape<Vec<Vec<Position>>>;
pub type Polygon = Shape<Vec<Vec<Position>>>;
pub type MultiPolygon = Shape<Vec<Vec<Vec<Position>>>>;

/// A heterogeneous list of geometries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryCollection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Bbox>,
    pub geometries: Vec<Geometry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinatesystem: Option<CoordinateSystem>,
}

/// Any geometry object, discriminated by its `type` member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point(Point),
    MultiPoint(MultiPoint),
    LineString(LineString),
    MultiLineString(MultiLineString),
    Polygon(Polygon),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    /// Every accepted value of the `type` member
    pub const TYPE_NAMES: [&'static str; 7] = [
        "Point",
        "MultiPoint",
        "LineString",
        "MultiLineString",
        "Polygon",
        "MultiPolygon",
        "GeometryCollection",
    ];

    pub fn point(coordinates: Position) -> Self {
        Geometry::Point(Shape::new(coordinates))
    }

    pub fn multi_point(coordinates: Vec<Position>) -> Self {
        Geometry::MultiPoint(Shape::new(coordinates))
    }

    pub fn line_string(coordinates: Vec<Position>) -> Self {
        Geometry::LineString(Shape::new(coordinates))
    }

    pub fn multi_line_string(coordinates: Vec<Vec<Position>>) -> Self {
        Geometry::MultiLineString(Shape::new(coordinates))
    }

    pub fn polygon(rings: Vec<Vec<Position>>) -> Self {
        Geometry::Polygon(Shape::new(rings))
    }

    pub fn multi_polygon(polygons: Vec<Vec<Vec<Position>>>) -> Self {
        Geometry::MultiPolygon(Shape::new(polygons))
    }

    pub fn collection(geometries: Vec<Geometry>) -> Self {
        Geometry::GeometryCollection(GeometryCollection {
            bbox: None,
            geometries,
            coordinatesystem: None,
        })
    }

    /// Value of the `type` member
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
            Geometry::GeometryCollection(_) => "GeometryCollection",
        }
    }

    pub fn bbox(&self) -> Option<&Bbox> {
        match self {
            Geometry::Point(s) => s.bbox.as_ref(),
            Geometry::MultiPoint(s) | Geometry::LineString(s) => s.bbox.as_ref(),
            Geometry::MultiLineString(s) | Geometry::Polygon(s) => s.bbox.as_ref(),
            Geometry::MultiPolygon(s) => s.bbox.as_ref(),
            Geometry::GeometryCollection(c) => c.bbox.as_ref(),
        }
    }

    pub fn set_bbox(&mut self, bbox: Option<Bbox>) {
        match self {
            Geometry::Point(s) => s.bbox = bbox,
            Geometry::MultiPoint(s) | Geometry::LineString(s) => s.bbox = bbox,
            Geometry::MultiLineString(s) | Geometry::Polygon(s) => s.bbox = bbox,
            Geometry::MultiPolygon(s) => s.bbox = bbox,
            Geometry::GeometryCollection(c) => c.bbox = bbox,
        }
    }

    /// The geometry's own coordinate system (not inherited from a parent)
    pub fn coordinatesystem(&self) -> Option<&CoordinateSystem> {
        match self {
            Geometry::Point(s) => s.coordinatesystem.as_ref(),
            Geometry::MultiPoint(s) | Geometry::LineString(s) => s.coordinatesystem.as_ref(),
            Geometry::MultiLineString(s) | Geometry::Polygon(s) => s.coordinatesystem.as_ref(),
            Geometry::MultiPolygon(s) => s.coordinatesystem.as_ref(),
            Geometry::GeometryCollection(c) => c.coordinatesystem.as_ref(),
        }
    }

    /// Visit every position, recursing into collections
    pub fn for_each_position<F: FnMut(&Position)>(&self, f: &mut F) {
        match self {
            Geometry::Point(s) => f(&s.coordinates),
            Geometry::MultiPoint(s) | Geometry::LineString(s) => s.coordinates.iter().for_each(f),
            Geometry::MultiLineString(s) | Geometry::Polygon(s) => {
                s.coordinates.iter().flatten().for_each(f)
            }
            Geometry::MultiPolygon(s) => s.coordinates.iter().flatten().flatten().for_each(f),
            Geometry::GeometryCollection(c) => {
                for g in &c.geometries {
                    g.for_each_position(f);
                }
            }
        }
    }

    pub fn position_count(&self) -> usize {
        let mut n = 0;
        self.for_each_position(&mut |_: &Position| n += 1);
        n
    }

    /// Extents of all positions, `None` when there are none
    pub fn compute_bbox(&self) -> Option<Bbox> {
        let mut extents = Extents::default();
        self.for_each_position(&mut |p: &Position| extents.add(p));
        extents.finish()
    }
}
