//! Color mapping: gradients and height-based lookups.

mod gradient;
mod mapper;

pub use gradient::{ColorGradient, GradientChoice};
pub use mapper::{color_for, ColorMapper};

use thiserror::Error;

/// Errors raised by gradient construction and color lookup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    /// A gradient needs at least two stops.
    #[error("gradient needs at least 2 stops, got {count}")]
    TooFewStops {
        /// Number of stops supplied.
        count: usize,
    },

    /// A stop had a channel outside [0, 1].
    #[error("gradient stop {index} has a channel outside [0, 1]")]
    StopOutOfRange {
        /// Offending stop.
        index: usize,
    },

    /// The normalization domain has zero or non-finite width.
    #[error("normalization domain [{min}, {max}] is degenerate")]
    DegenerateDomain {
        /// Domain minimum.
        min: f32,
        /// Domain maximum.
        max: f32,
    },
}
