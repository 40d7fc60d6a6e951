//! Sum-of-Gaussians scalar field used to sculpt facial landmarks.

use crate::math::Point3;
use serde::{Deserialize, Serialize};

use super::{ControlPoint, FieldError};

/// A validated, immutable set of control points.
///
/// Evaluation is pure, so one field can be shared by reference across
/// worker threads while a surface is generated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureField {
    points: Vec<ControlPoint>,
}

impl FeatureField {
    /// Build a field, rejecting any control point with an invalid width.
    pub fn new(points: Vec<ControlPoint>) -> Result<Self, FieldError> {
        for (index, cp) in points.iter().enumerate() {
            cp.validate(index)?;
        }
        Ok(Self { points })
    }

    /// A field that contributes zero everywhere.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The control points in evaluation order.
    #[inline]
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Check if the field has no terms.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sum every term's Gaussian influence at `point`.
    pub fn evaluate(&self, point: &Point3) -> f32 {
        self.points.iter().map(|cp| cp.influence(point)).sum()
    }
}

/// Named control-point sets, or an inline custom list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureSet {
    /// No deformation: the bare base shape.
    None,
    /// Eye sockets, nose, mouth, cheekbones, chin and forehead.
    #[default]
    Humanoid,
    /// Caller-supplied terms.
    Custom(Vec<ControlPoint>),
}

impl FeatureSet {
    /// Build the field for this set.
    pub fn build(&self) -> Result<FeatureField, FieldError> {
        match self {
            FeatureSet::None => Ok(FeatureField::empty()),
            FeatureSet::Humanoid => FeatureField::new(HUMANOID.to_vec()),
            FeatureSet::Custom(points) => FeatureField::new(points.clone()),
        }
    }
}

/// Landmarks tuned for a frontal half-ellipsoid of radii (0.8, 0.8, 1.3).
const HUMANOID: [ControlPoint; 13] = [
    // Left eye socket
    ControlPoint::raw(-0.25, 0.35, 0.1, -0.3, 0.005),
    ControlPoint::raw(-0.20, 0.35, 0.1, -0.3, 0.005),
    // Right eye socket
    ControlPoint::raw(0.25, 0.35, 0.1, -0.3, 0.005),
    ControlPoint::raw(0.20, 0.35, 0.1, -0.3, 0.005),
    // Nose
    ControlPoint::raw(0.0, 0.0, 0.2, 0.4, 0.01),
    ControlPoint::raw(0.0, 0.05, 0.2, 0.4, 0.01),
    // Mouth
    ControlPoint::raw(0.0, -0.3, 0.0, -0.4, 0.01),
    ControlPoint::raw(-0.1, -0.3, 0.0, -0.4, 0.01),
    ControlPoint::raw(0.1, -0.3, 0.0, -0.4, 0.01),
    // Cheekbones
    ControlPoint::raw(-0.5, 0.1, 0.1, 0.2, 0.02),
    ControlPoint::raw(0.5, 0.1, 0.1, 0.2, 0.02),
    // Chin
    ControlPoint::raw(0.0, -0.5, -0.2, -0.3, 0.015),
    // Forehead
    ControlPoint::raw(0.0, 0.5, 0.3, 0.2, 0.015),
];
