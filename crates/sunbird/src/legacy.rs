use serde::{Deserialize, Serialize};

use crate::gradient::{ColorStop, GradientSpec, compose, extract_alpha};

/// Backward-compatible projection of a gradient's first two stops, kept for
/// the older degree/color1/color2/opacity field names. Always derived from
/// the authoritative gradient string, never stored as truth on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyTwoStopView {
    pub degree: f32,
    pub color1: String,
    pub color2: String,
    pub opacity: f32,
}

impl LegacyTwoStopView {
    pub fn from_css(css: &str) -> Self {
        let spec = GradientSpec::parse(css);
        let first = spec.stops.first().copied().unwrap_or_default();
        let second = spec.stops.get(1).copied().unwrap_or(first);

        Self {
            degree: spec.degree,
            color1: first.hex(),
            color2: second.hex(),
            opacity: extract_alpha(css, 1.0),
        }
    }

    pub fn to_css(&self) -> String {
        let first = ColorStop::from_hex(&self.color1).unwrap_or_default();
        let second = ColorStop::from_hex(&self.color2).unwrap_or_default();
        compose(self.degree, &[first, second], Some(self.opacity))
    }
}
