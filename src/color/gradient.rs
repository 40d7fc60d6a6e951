//! Piecewise-linear color ramps.

use crate::math::Color;
use serde::{Deserialize, Serialize};

use super::ColorError;

/// Evenly spaced RGB stops over the normalized domain [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GradientData")]
pub struct ColorGradient {
    stops: Vec<Color>,
    /// Quantize lookups to this many discrete levels, like a fixed-size LUT.
    levels: Option<u32>,
}

/// Unchecked wire form; deserialization goes through [`ColorGradient::new`].
#[derive(Deserialize)]
struct GradientData {
    stops: Vec<Color>,
    #[serde(default)]
    levels: Option<u32>,
}

impl TryFrom<GradientData> for ColorGradient {
    type Error = ColorError;

    fn try_from(data: GradientData) -> Result<Self, Self::Error> {
        let gradient = Self::new(data.stops)?;
        Ok(match data.levels {
            Some(levels) => gradient.with_levels(levels),
            None => gradient,
        })
    }
}

impl ColorGradient {
    /// Create a gradient. Needs at least two stops, each channel in [0, 1].
    pub fn new(stops: Vec<Color>) -> Result<Self, ColorError> {
        if stops.len() < 2 {
            return Err(ColorError::TooFewStops { count: stops.len() });
        }
        if let Some(index) = stops.iter().position(|c| !c.is_normalized()) {
            return Err(ColorError::StopOutOfRange { index });
        }
        Ok(Self { stops, levels: None })
    }

    /// Snap lookups to `levels` discrete colors. Fewer than two levels
    /// disables quantization.
    pub fn with_levels(mut self, levels: u32) -> Self {
        self.levels = (levels >= 2).then_some(levels);
        self
    }

    /// The gradient stops in order.
    #[inline]
    pub fn stops(&self) -> &[Color] {
        &self.stops
    }

    /// Color at normalized position `t`. Input is clamped to [0, 1] first;
    /// NaN maps to the first stop.
    pub fn sample(&self, t: f32) -> Color {
        let mut t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        if let Some(levels) = self.levels {
            let n = levels as f32;
            let index = (t * n).floor().min(n - 1.0);
            t = index / (n - 1.0);
        }

        let segments = (self.stops.len() - 1) as f32;
        let x = t * segments;
        let i = (x.floor() as usize).min(self.stops.len() - 2);
        let local = x - i as f32;
        self.stops[i].lerp(&self.stops[i + 1], local).clamp()
    }

    /// Color at the middle of the ramp.
    #[inline]
    pub fn midpoint(&self) -> Color {
        self.sample(0.5)
    }
}

/// The built-in ramps a run can pick from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientChoice {
    /// Red through violet to blue.
    #[default]
    Default,
    /// Mostly reds, ending in violet.
    RedEmphasis,
    /// Mostly blues, ending in mauve.
    BlueEmphasis,
}

impl GradientChoice {
    /// Resolution of the built-in ramps.
    pub const LEVELS: u32 = 100;

    /// The stops for this choice.
    pub fn stops(&self) -> [Color; 4] {
        match self {
            GradientChoice::Default => [
                Color::new(0.8, 0.1, 0.1),
                Color::new(0.6, 0.2, 0.4),
                Color::new(0.4, 0.4, 0.6),
                Color::new(0.2, 0.3, 0.8),
            ],
            GradientChoice::RedEmphasis => [
                Color::new(0.9, 0.1, 0.1),
                Color::new(0.7, 0.2, 0.2),
                Color::new(0.5, 0.3, 0.3),
                Color::new(0.3, 0.2, 0.5),
            ],
            GradientChoice::BlueEmphasis => [
                Color::new(0.2, 0.3, 0.8),
                Color::new(0.3, 0.4, 0.7),
                Color::new(0.4, 0.5, 0.6),
                Color::new(0.5, 0.4, 0.5),
            ],
        }
    }

    /// Build the gradient, quantized to [`GradientChoice::LEVELS`].
    pub fn gradient(&self) -> ColorGradient {
        ColorGradient {
            stops: self.stops().to_vec(),
            levels: Some(Self::LEVELS),
        }
    }
}
