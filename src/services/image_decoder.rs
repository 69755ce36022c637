//! Turn uploaded image bytes into an RGBA bitmap.

use image::{ImageReader, Limits};
use std::io::Cursor;
use swatch_palette::{Bitmap, QuantizeError};

/// Largest decoded image accepted by default, in pixels (40 MP)
pub const DEFAULT_MAX_PIXELS: u64 = 40_000_000;

/// Widest sample layout the enabled decoders produce (16-bit RGBA)
const MAX_BYTES_PER_PIXEL: u64 = 8;

fn decode_limits(max_pixels: u64) -> Limits {
    let side = u32::try_from(max_pixels).unwrap_or(u32::MAX);
    let mut limits = Limits::default();
    limits.max_image_width = Some(side);
    limits.max_image_height = Some(side);
    limits.max_alloc = Some(max_pixels.saturating_mul(MAX_BYTES_PER_PIXEL));
    limits
}

/// Decode PNG, JPEG, WebP or GIF bytes.
///
/// The format is sniffed from the content; the request's content type is
/// not trusted. Images with more than `max_pixels` pixels are rejected from
/// their header, before any pixel data is allocated.
pub fn decode_bitmap(bytes: &[u8], max_pixels: u64) -> Result<Bitmap, QuantizeError> {
    if bytes.is_empty() {
        return Err(QuantizeError::Unreadable("empty image".to_string()));
    }

    let reader = || {
        ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| QuantizeError::Unreadable(e.to_string()))
    };

    let (width, height) = reader()?
        .into_dimensions()
        .map_err(|e| QuantizeError::Unreadable(e.to_string()))?;
    let pixels = u64::from(width) * u64::from(height);
    if pixels > max_pixels {
        return Err(QuantizeError::Unreadable(format!(
            "image is {width}x{height}, above the {max_pixels} pixel limit"
        )));
    }

    let mut reader = reader()?;
    reader.limits(decode_limits(max_pixels));
    let rgba = reader
        .decode()
        .map_err(|e| QuantizeError::Unreadable(e.to_string()))?
        .into_rgba8();

    tracing::trace!(width, height, bytes = bytes.len(), "Decoded upload");
    Bitmap::from_rgba(width, height, rgba.into_raw())
}
