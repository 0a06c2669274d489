//! Coordinate system metadata for MicroJSON objects
//!
//! A [`CoordinateSystem`] labels each axis of a position and optionally
//! gives the physical unit and the pixel scale of that axis:
//!
//! ```json
//! {
//!   "axes": ["x", "y", "z"],
//!   "units": ["micrometer", "micrometer", "micrometer"],
//!   "pixelsPerUnit": [0.5, 0.5, 2.0]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MicroJsonError;
use crate::geometry::Position;

/// Label of one coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisLabel {
    X,
    Y,
    Z,
    R,
    Theta,
    Phi,
}

impl AxisLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AxisLabel::X => "x",
            AxisLabel::Y => "y",
            AxisLabel::Z => "z",
            AxisLabel::R => "r",
            AxisLabel::Theta => "theta",
            AxisLabel::Phi => "phi",
        }
    }
}

impl fmt::Display for AxisLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AxisLabel {
    type Err = MicroJsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(AxisLabel::X),
            "y" => Ok(AxisLabel::Y),
            "z" => Ok(AxisLabel::Z),
            "r" => Ok(AxisLabel::R),
            "theta" => Ok(AxisLabel::Theta),
            "phi" => Ok(AxisLabel::Phi),
            other => Err(MicroJsonError::UnknownAxis(other.to_string())),
        }
    }
}

/// What a unit measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Length,
    Pixel,
    Angle,
}

/// A unit of measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Angstrom,
    Attometer,
    Centimeter,
    Decimeter,
    Exameter,
    Femtometer,
    Foot,
    Gigameter,
    Hectometer,
    Inch,
    Kilometer,
    Megameter,
    Meter,
    Micrometer,
    Mile,
    Millimeter,
    Nanometer,
    Parsec,
    Petameter,
    Picometer,
    Terameter,
    Yard,
    Yoctometer,
    Yottameter,
    Zeptometer,
    Zettameter,
    Pixel,
    Radian,
    Degree,
}

impl Unit {
    /// Every unit, in wire-format order
    pub const ALL: [Unit; 29] = [
        Unit::Angstrom,
        Unit::Attometer,
        Unit::Centimeter,
        Unit::Decimeter,
        Unit::Exameter,
        Unit::Femtometer,
        Unit::Foot,
        Unit::Gigameter,
        Unit::Hectometer,
        Unit::Inch,
        Unit::Kilometer,
        Unit::Megameter,
        Unit::Meter,
        Unit::Micrometer,
        Unit::Mile,
        Unit::Millimeter,
        Unit::Nanometer,
        Unit::Parsec,
        Unit::Petameter,
        Unit::Picometer,
        Unit::Terameter,
        Unit::Yard,
        Unit::Yoctometer,
        Unit::Yottameter,
        Unit::Zeptometer,
        Unit::Zettameter,
        Unit::Pixel,
        Unit::Radian,
        Unit::Degree,
    ];

    /// Wire name of the unit
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Angstrom => "angstrom",
            Unit::Attometer => "attometer",
            Unit::Centimeter => "centimeter",
            Unit::Decimeter => "decimeter",
            Unit::Exameter => "exameter",
            Unit::Femtometer => "femtometer",
            Unit::Foot => "foot",
            Unit::Gigameter => "gigameter",
            Unit::Hectometer => "hectometer",
            Unit::Inch => "inch",
            Unit::Kilometer => "kilometer",
            Unit::Megameter => "megameter",
            Unit::Meter => "meter",
            Unit::Micrometer => "micrometer",
            Unit::Mile => "mile",
            Unit::Millimeter => "millimeter",
            Unit::Nanometer => "nanometer",
            Unit::Parsec => "parsec",
            Unit::Petameter => "petameter",
            Unit::Picometer => "picometer",
            Unit::Terameter => "terameter",
            Unit::Yard => "yard",
            Unit::Yoctometer => "yoctometer",
            Unit::Yottameter => "yottameter",
            Unit::Zeptometer => "zeptometer",
            Unit::Zettameter => "zettameter",
            Unit::Pixel => "pixel",
            Unit::Radian => "radian",
            Unit::Degree => "degree",
        }
    }

    pub fn kind(&self) -> UnitKind {
        match self {
            Unit::Pixel => UnitKind::Pixel,
            Unit::Radian | Unit::Degree => UnitKind::Angle,
            _ => UnitKind::Length,
        }
    }

    /// Length of one unit in meters, `None` for pixel and angle units
    pub fn meters(&self) -> Option<f64> {
        let m = match self {
            Unit::Angstrom => 1e-10,
            Unit::Attometer => 1e-18,
            Unit::Centimeter => 1e-2,
            Unit::Decimeter => 1e-1,
            Unit::Exameter => 1e18,
            Unit::Femtometer => 1e-15,
            Unit::Foot => 0.3048,
            Unit::Gigameter => 1e9,
            Unit::Hectometer => 1e2,
            Unit::Inch => 0.0254,
            Unit::Kilometer => 1e3,
            Unit::Megameter => 1e6,
            Unit::Meter => 1.0,
            Unit::Micrometer => 1e-6,
            Unit::Mile => 1609.344,
            Unit::Millimeter => 1e-3,
            Unit::Nanometer => 1e-9,
            Unit::Parsec => 3.085_677_581_491_367_3e16,
            Unit::Petameter => 1e15,
            Unit::Picometer => 1e-12,
            Unit::Terameter => 1e12,
            Unit::Yard => 0.9144,
            Unit::Yoctometer => 1e-24,
            Unit::Yottameter => 1e24,
            Unit::Zeptometer => 1e-21,
            Unit::Zettameter => 1e21,
            Unit::Pixel | Unit::Radian | Unit::Degree => return None,
        };
        Some(m)
    }

    fn radians(&self) -> Option<f64> {
        match self {
            Unit::Radian => Some(1.0),
            Unit::Degree => Some(std::f64::consts::PI / 180.0),
            _ => None,
        }
    }

    /// Convert `value` expressed in `self` into `to`.
    ///
    /// Returns `None` when the units measure different things. Pixels have
    /// no fixed physical size, so they only convert to themselves.
    pub fn convert(&self, value: f64, to: Unit) -> Option<f64> {
        if *self == to {
            return Some(value);
        }
        match (self.kind(), to.kind()) {
            (UnitKind::Length, UnitKind::Length) => Some(value * self.meters()? / to.meters()?),
            (UnitKind::Angle, UnitKind::Angle) => Some(value * self.radians()? / to.radians()?),
            _ => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = MicroJsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::ALL
            .iter()
            .copied()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| MicroJsonError::UnknownUnit(s.to_string()))
    }
}

/// Per-object description of axis semantics, units and pixel scaling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSystem {
    /// One label per axis, in position order
    pub axes: Vec<AxisLabel>,
    /// Physical unit of each axis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<Vec<Unit>>,
    /// Pixels per physical unit along each axis
    #[serde(rename = "pixelsPerUnit", default, skip_serializing_if = "Option::is_none")]
    pub pixels_per_unit: Option<Vec<f64>>,
}

/// Everything known about one axis of a coordinate system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisDescriptor {
    pub label: AxisLabel,
    pub unit: Option<Unit>,
    pub pixels_per_unit: Option<f64>,
}

impl CoordinateSystem {
    /// Coordinate system with labelled axes and nothing else
    pub fn new(axes: Vec<AxisLabel>) -> Self {
        Self {
            axes,
            units: None,
            pixels_per_unit: None,
        }
    }

    pub fn with_units(mut self, units: Vec<Unit>) -> Self {
        self.units = Some(units);
        self
    }

    pub fn with_pixels_per_unit(mut self, scale: Vec<f64>) -> Self {
        self.pixels_per_unit = Some(scale);
        self
    }

    /// Number of axes
    pub fn dimensions(&self) -> usize {
        self.axes.len()
    }

    /// Describe axis `index`, `None` past the last axis
    pub fn axis(&self, index: usize) -> Option<AxisDescriptor> {
        let label = *self.axes.get(index)?;
        Some(AxisDescriptor {
            label,
            unit: self.units.as_ref().and_then(|u| u.get(index).copied()),
            pixels_per_unit: self
                .pixels_per_unit
                .as_ref()
                .and_then(|p| p.get(index).copied()),
        })
    }

    /// Iterate over all axes
    pub fn iter_axes(&self) -> impl Iterator<Item = AxisDescriptor> + '_ {
        (0..self.axes.len()).filter_map(move |i| self.axis(i))
    }

    /// Convert a pixel-space position to physical units.
    ///
    /// `None` if no pixel scale is declared or the position does not have
    /// one component per axis.
    pub fn to_units(&self, position: &Position) -> Option<Position> {
        let scale = self.pixels_per_unit.as_ref()?;
        if position.len() != self.axes.len() || scale.len() != self.axes.len() {
            return None;
        }
        Some(position.iter().zip(scale).map(|(v, s)| v / s).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_coordinatesystem() {
        let cs: CoordinateSystem = serde_json::from_value(json!({
            "axes": ["x", "y", "z"],
            "units": ["pixel", "pixel", "micrometer"],
            "pixelsPerUnit": [1.0, 1.0, 0.5]
        }))
        .unwrap();
        assert_eq!(cs.dimensions(), 3);
        let z = cs.axis(2).unwrap();
        assert_eq!(z.label, AxisLabel::Z);
        assert_eq!(z.unit, Some(Unit::Micrometer));
        assert_eq!(z.pixels_per_unit, Some(0.5));
        assert!(cs.axis(3).is_none());
    }

    #[test]
    fn test_optional_members_are_omitted() {
        let cs = CoordinateSystem::new(vec![AxisLabel::R, AxisLabel::Theta]);
        let value = serde_json::to_value(&cs).unwrap();
        assert_eq!(value, json!({ "axes": ["r", "theta"] }));
    }

    #[test]
    fn test_unknown_unit_rejected() {
        let err = serde_json::from_value::<CoordinateSystem>(json!({
            "axes": ["x"],
            "units": ["furlong"]
        }));
        assert!(err.is_err());
        assert!(matches!("furlong".parse::<Unit>(), Err(MicroJsonError::UnknownUnit(_))));
    }

    #[test]
    fn test_unknown_axis_rejected() {
        let err = serde_json::from_value::<CoordinateSystem>(json!({ "axes": ["w"] }));
        assert!(err.is_err());
        assert!("w".parse::<AxisLabel>().is_err());
        assert_eq!("phi".parse::<AxisLabel>().unwrap(), AxisLabel::Phi);
    }

    #[test]
    fn test_unit_names_round_trip() {
        for unit in Unit::ALL {
            assert_eq!(unit.as_str().parse::<Unit>().unwrap(), unit);
            let wire = serde_json::to_value(unit).unwrap();
            assert_eq!(wire, json!(unit.as_str()));
        }
    }

    #[test]
    fn test_unit_conversion() {
        let um = Unit::Millimeter.convert(1.0, Unit::Micrometer).unwrap();
        assert!((um - 1000.0).abs() < 1e-9);

        let inches = Unit::Foot.convert(1.0, Unit::Inch).unwrap();
        assert!((inches - 12.0).abs() < 1e-9);

        let rad = Unit::Degree.convert(180.0, Unit::Radian).unwrap();
        assert!((rad - std::f64::consts::PI).abs() < 1e-12);

        assert_eq!(Unit::Pixel.convert(3.0, Unit::Pixel), Some(3.0));
        assert_eq!(Unit::Pixel.convert(3.0, Unit::Meter), None);
        assert_eq!(Unit::Meter.convert(3.0, Unit::Degree), None);
    }

    #[test]
    fn test_to_units() {
        let cs = CoordinateSystem::new(vec![AxisLabel::X, AxisLabel::Y])
            .with_units(vec![Unit::Micrometer, Unit::Micrometer])
            .with_pixels_per_unit(vec![2.0, 4.0]);
        assert_eq!(cs.to_units(&vec![10.0, 10.0]), Some(vec![5.0, 2.5]));
        assert_eq!(cs.to_units(&vec![10.0, 10.0, 1.0]), None);
        assert_eq!(CoordinateSystem::new(vec![AxisLabel::X]).to_units(&vec![1.0]), None);
    }
}
