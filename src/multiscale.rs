//! Multiscale coordinate description
//!
//! Describes named axes and the transformations from stored coordinates to
//! physical space, following the OME-NGFF layout (`axes`,
//! `coordinateTransformations`).

use serde::{Deserialize, Serialize};

use crate::coordsys::Unit;

/// What an axis measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    Space,
    Time,
    Channel,
}

/// One named axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiscaleAxis {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<AxisType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MultiscaleAxis {
    pub fn space(name: impl Into<String>, unit: Unit) -> Self {
        Self {
            name: name.into(),
            kind: Some(AxisType::Space),
            unit: Some(unit),
            description: None,
        }
    }
}

/// A transformation step, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CoordinateTransformation {
    Identity,
    Translation { translation: Vec<f64> },
    Scale { scale: Vec<f64> },
}

impl CoordinateTransformation {
    /// The per-axis vector, `None` for identity
    pub fn vector(&self) -> Option<&[f64]> {
        match self {
            CoordinateTransformation::Identity => None,
            CoordinateTransformation::Translation { translation } => Some(translation.as_slice()),
            CoordinateTransformation::Scale { scale } => Some(scale.as_slice()),
        }
    }

    fn apply(&self, position: &mut [f64]) {
        match self {
            CoordinateTransformation::Identity => {}
            CoordinateTransformation::Translation { translation } => {
                for (v, t) in position.iter_mut().zip(translation) {
                    *v += t;
                }
            }
            CoordinateTransformation::Scale { scale } => {
                for (v, s) in position.iter_mut().zip(scale) {
                    *v *= s;
                }
            }
        }
    }
}

/// Axes plus stored-to-physical transformations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Multiscale {
    pub axes: Vec<MultiscaleAxis>,
    #[serde(
        rename = "coordinateTransformations",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub coordinate_transformations: Option<Vec<CoordinateTransformation>>,
    /// Affine matrix, `n` or `n + 1` rows of `n + 1` columns
    #[serde(
        rename = "transformationMatrix",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transformation_matrix: Option<Vec<Vec<f64>>>,
}

impl Multiscale {
    pub fn new(axes: Vec<MultiscaleAxis>) -> Self {
        Self {
            axes,
            coordinate_transformations: None,
            transformation_matrix: None,
        }
    }

    pub fn dimensions(&self) -> usize {
        self.axes.len()
    }

    /// Apply the transformation list, then the matrix, to one position.
    ///
    /// Returns `None` if the position does not have one value per axis or
    /// the matrix is malformed.
    pub fn transform(&self, position: &[f64]) -> Option<Vec<f64>> {
        let n = self.axes.len();
        if position.len() != n {
            return None;
        }
        let mut out = position.to_vec();
        for t in self.coordinate_transformations.iter().flatten() {
            t.apply(&mut out);
        }
        if let Some(matrix) = &self.transformation_matrix {
            if matrix.len() < n || matrix.iter().any(|row| row.len() != n + 1) {
                return None;
            }
            out = matrix
                .iter()
                .take(n)
                .map(|row| row[..n].iter().zip(&out).map(|(m, v)| m * v).sum::<f64>() + row[n])
                .collect();
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_multiscale() {
        let ms: Multiscale = serde_json::from_value(json!({
            "axes": [
                { "name": "x", "type": "space", "unit": "micrometer" },
                { "name": "y", "type": "space", "unit": "micrometer", "description": "rows" }
            ],
            "coordinateTransformations": [
                { "type": "scale", "scale": [0.5, 0.5] },
                { "type": "translation", "translation": [10.0, 20.0] },
                { "type": "identity" }
            ]
        }))
        .unwrap();
        assert_eq!(ms.dimensions(), 2);
        assert_eq!(ms.axes[1].description.as_deref(), Some("rows"));
        let transforms = ms.coordinate_transformations.as_ref().unwrap();
        assert_eq!(transforms[0].vector(), Some(&[0.5, 0.5][..]));
        assert_eq!(transforms[2], CoordinateTransformation::Identity);
    }

    #[test]
    fn test_transform_applies_in_order() {
        let mut ms = Multiscale::new(vec![
            MultiscaleAxis::space("x", Unit::Micrometer),
            MultiscaleAxis::space("y", Unit::Micrometer),
        ]);
        ms.coordinate_transformations = Some(vec![
            CoordinateTransformation::Scale { scale: vec![2.0, 3.0] },
            CoordinateTransformation::Translation { translation: vec![1.0, 1.0] },
        ]);
        assert_eq!(ms.transform(&[1.0, 1.0]), Some(vec![3.0, 4.0]));
        assert_eq!(ms.transform(&[1.0]), None);
    }

    #[test]
    fn test_transform_matrix() {
        let mut ms = Multiscale::new(vec![
            MultiscaleAxis::space("x", Unit::Meter),
            MultiscaleAxis::space("y", Unit::Meter),
        ]);
        ms.transformation_matrix = Some(vec![
            vec![1.0, 0.0, 5.0],
            vec![0.0, 2.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ]);
        assert_eq!(ms.transform(&[1.0, 1.0]), Some(vec![6.0, 2.0]));

        ms.transformation_matrix = Some(vec![vec![1.0, 0.0]]);
        assert_eq!(ms.transform(&[1.0, 1.0]), None);
    }

    #[test]
    fn test_unknown_transformation_rejected() {
        let err = serde_json::from_value::<CoordinateTransformation>(json!({
            "type": "rotation",
            "angle": 90
        }));
        assert!(err.is_err());
    }
}
