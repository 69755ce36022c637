//! swatch-palette: representative swatch colors for garment photos
//!
//! Given a decoded photo of a clothing item, produce a handful of hex colors
//! that describe it: the dominant color first, then other distinct,
//! non-neutral colors. The result drives the swatch row next to each item
//! and is fed to tag suggestion as a color hint.
//!
//! # Quick Start
//!
//! ```
//! use swatch_palette::{extract_palette, Bitmap, MedianCut, PaletteOptions, Rgb};
//!
//! let mut pixels = vec![Rgb::new(20, 40, 120); 70];
//! pixels.extend(vec![Rgb::new(230, 200, 40); 30]);
//! let photo = Bitmap::from_rgb_pixels(10, 10, &pixels).unwrap();
//!
//! let palette = extract_palette(Some(&photo), &MedianCut, &PaletteOptions::default());
//! assert_eq!(palette.len(), 2);
//! assert!(palette.iter().all(|hex| hex.len() == 7 && hex.starts_with('#')));
//! ```
//!
//! # Pipeline
//!
//! ```text
//! Bitmap
//!   |
//!   +--> Quantizer::dominant_color      (one color)
//!   +--> Quantizer::palette(12)         (candidates)
//!   |
//!   v
//! [dominant] ++ candidates != dominant
//!   |
//!   v
//! drop neutral        (s < 0.15, l < 0.12, l > 0.92)
//!   |
//!   v
//! dedupe_near(28)     (greedy, first occurrence wins)
//!   |
//!   v
//! take max_colors, encode #rrggbb
//!   |
//!   v
//! empty? -> [dominant]
//! ```
//!
//! Ordering matters: the dominant color goes in first so the greedy
//! deduplication can only ever drop colors similar to it, never the
//! dominant color itself.
//!
//! # Failure Policy
//!
//! Palette display is cosmetic. A missing image or any quantizer failure
//! yields an empty palette; nothing is propagated to the caller. Once the
//! dominant color is known the palette is never empty.
//!
//! # Quantizers
//!
//! The pipeline depends only on the [`Quantizer`] trait. [`MedianCut`] is
//! the bundled implementation; tests and alternative backends supply their
//! own.

pub mod bitmap;
pub mod color;
pub mod error;
pub mod palette;
pub mod quantize;
pub mod reveal;
pub mod session;


pub use bitmap::Bitmap;
pub use color::{Hsl, Rgb};
pub use error::{ParseColorError, QuantizeError};
pub use palette::{
    dedupe_near, extract_palette, is_neutral, NeutralFilter, PaletteOptions,
    DEFAULT_DEDUPE_THRESHOLD,
};
pub use quantize::{MedianCut, Quantizer};
pub use reveal::{RevealEvent, RevealState, SwatchLayout, SwatchReveal};
pub use session::{DecodeListener, PaletteSession};
