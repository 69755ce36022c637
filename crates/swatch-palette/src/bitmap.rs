//! Decoded RGBA pixel buffer handed to a quantizer.

use crate::color::Rgb;
use crate::error::QuantizeError;

/// A decoded image: RGBA8 pixels in row-major order.
///
/// Construction validates that the buffer length matches the dimensions, so
/// a `Bitmap` is always safe to sample.
///
/// # Example
///
/// ```
/// use swatch_palette::{Bitmap, Rgb};
///
/// let bitmap = Bitmap::from_rgb_pixels(2, 1, &[Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)]).unwrap();
/// assert_eq!(bitmap.pixel_count(), 2);
/// assert_eq!(bitmap.pixel(1), [0, 0, 255, 255]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Bitmap {
    /// Wrap a raw RGBA8 buffer.
    ///
    /// # Errors
    ///
    /// [`QuantizeError::InvalidBitmap`] if `data.len() != width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, QuantizeError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(QuantizeError::InvalidBitmap {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a fully opaque bitmap from RGB colors.
    pub fn from_rgb_pixels(width: u32, height: u32, pixels: &[Rgb]) -> Result<Self, QuantizeError> {
        let data = pixels
            .iter()
            .flat_map(|c| [c.r, c.g, c.b, u8::MAX])
            .collect();
        Self::from_rgba(width, height, data)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.data.len() / 4
    }

    /// RGBA of the pixel at row-major index `i`.
    ///
    /// # Panics
    ///
    /// If `i >= pixel_count()`.
    #[inline]
    pub fn pixel(&self, i: usize) -> [u8; 4] {
        let o = i * 4;
        [self.data[o], self.data[o + 1], self.data[o + 2], self.data[o + 3]]
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn as_rgba(&self) -> &[u8] {
        &self.data
    }
}
