//! Error types for color parsing and extraction.

use thiserror::Error;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,

    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// The single failure kind of palette extraction.
///
/// Covers everything that can go wrong between "here is an image" and "here
/// are its representative colors". The pipeline never surfaces it; see
/// [`extract_palette`](crate::extract_palette).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantizeError {
    /// Pixel buffer does not match the declared dimensions
    #[error("bitmap holds {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    InvalidBitmap {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Every sampled pixel was transparent or near-white
    #[error("image has no opaque, non-white pixels to sample")]
    NoPixels,

    /// The image could not be read at all (decode failure, unsupported format)
    #[error("image could not be read: {0}")]
    Unreadable(String),
}
