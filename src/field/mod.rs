//! Feature field: Gaussian radial-basis deformation of a base surface.

mod control_point;
mod feature_field;

pub use control_point::ControlPoint;
pub use feature_field::{FeatureField, FeatureSet};

use thiserror::Error;

/// Errors raised while constructing a feature field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    /// A control point's width was zero, negative or not finite.
    #[error("control point {index} has invalid width {width} (must be finite and > 0)")]
    InvalidWidth {
        /// Position of the offending point in its set.
        index: usize,
        /// The rejected width.
        width: f32,
    },
}
