//! Neutral color classification

use crate::color::{Hsl, Rgb};

/// Thresholds deciding when a color is too gray, too dark or too light to
/// say anything about a garment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeutralFilter {
    /// Colors with saturation below this are grays
    pub min_saturation: f64,
    /// Colors with lightness below this are near-black
    pub min_lightness: f64,
    /// Colors with lightness above this are near-white
    pub max_lightness: f64,
}

impl Default for NeutralFilter {
    fn default() -> Self {
        Self {
            min_saturation: 0.15,
            min_lightness: 0.12,
            max_lightness: 0.92,
        }
    }
}

impl NeutralFilter {
    pub fn is_neutral(&self, color: Rgb) -> bool {
        let Hsl { s, l, .. } = Hsl::from(color);
        s < self.min_saturation || l < self.min_lightness || l > self.max_lightness
    }
}

/// [`NeutralFilter::is_neutral`] with the default thresholds.
pub fn is_neutral(color: Rgb) -> bool {
    NeutralFilter::default().is_neutral(color)
}
