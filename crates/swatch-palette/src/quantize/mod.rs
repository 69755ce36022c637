//! Color quantization capability.
//!
//! The palette pipeline never reads pixels itself. It asks a [`Quantizer`]
//! for the single most representative color and for a wider candidate list,
//! which keeps the pipeline independent of any particular algorithm and
//! makes it trivial to drive from tests.
//!
//! [`MedianCut`] is the bundled implementation.

mod median_cut;

pub use median_cut::MedianCut;

use crate::bitmap::Bitmap;
use crate::color::Rgb;
use crate::error::QuantizeError;

/// Reduces an image's colors to a small representative set.
///
/// `quality` is a sampling hint: 1 reads every pixel, larger values skip
/// pixels for speed at the cost of accuracy.
pub trait Quantizer {
    /// The single most representative color of `image`.
    fn dominant_color(&self, image: &Bitmap, quality: u32) -> Result<Rgb, QuantizeError>;

    /// Up to `size` representative colors of `image`, most significant first.
    fn palette(&self, image: &Bitmap, size: usize, quality: u32)
        -> Result<Vec<Rgb>, QuantizeError>;
}

impl<Q: Quantizer + ?Sized> Quantizer for &Q {
    fn dominant_color(&self, image: &Bitmap, quality: u32) -> Result<Rgb, QuantizeError> {
        (**self).dominant_color(image, quality)
    }

    fn palette(
        &self,
        image: &Bitmap,
        size: usize,
        quality: u32,
    ) -> Result<Vec<Rgb>, QuantizeError> {
        (**self).palette(image, size, quality)
    }
}
