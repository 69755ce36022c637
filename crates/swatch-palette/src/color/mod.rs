//! Color types and conversion utilities
//!
//! - [`Rgb`]: 8-bit sRGB triplet, the unit the quantizer produces and the
//!   pipeline filters. Encodes to and parses from `#rrggbb` hex.
//! - [`Hsl`]: hue/saturation/lightness view of an [`Rgb`], used to decide
//!   whether a color is too neutral to be an informative swatch.
//!
//! # Example
//!
//! ```
//! use swatch_palette::{Hsl, Rgb};
//!
//! let rust: Rgb = "#b7410e".parse().unwrap();
//! let hsl = Hsl::from(rust);
//! assert!(hsl.h < 20.0);
//! assert_eq!(rust.to_hex(), "#b7410e");
//! ```

mod hsl;
mod rgb;

pub use hsl::Hsl;
pub use rgb::Rgb;
