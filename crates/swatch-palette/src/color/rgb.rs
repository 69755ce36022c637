//! 8-bit RGB triplet

use std::fmt;
use std::str::FromStr;

use crate::error::ParseColorError;

/// A color as three 8-bit sRGB channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as `[r, g, b]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Encode as a lowercase `#rrggbb` string.
    ///
    /// ```
    /// use swatch_palette::Rgb;
    /// assert_eq!(Rgb::new(10, 10, 10).to_hex(), "#0a0a0a");
    /// ```
    pub fn to_hex(self) -> String {
        format!("#{}", hex::encode(self.to_bytes()))
    }

    /// Euclidean distance between two colors in RGB space.
    ///
    /// Ranges from 0 to ~441.67 (the black/white diagonal).
    pub fn distance(self, other: Rgb) -> f64 {
        let dr = f64::from(self.r) - f64::from(other.r);
        let dg = f64::from(self.g) - f64::from(other.g);
        let db = f64::from(self.b) - f64::from(other.b);
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        color.to_bytes()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a hex color.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`, case-insensitive,
    /// surrounding whitespace trimmed. Shorthand digits are doubled
    /// (`#f00` is `#ff0000`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        let mut bytes = [0u8; 3];
        match s.len() {
            3 => {
                let expanded: String = s.chars().flat_map(|c| [c, c]).collect();
                hex::decode_to_slice(expanded, &mut bytes)?;
            }
            6 => hex::decode_to_slice(s, &mut bytes)?,
            _ => return Err(ParseColorError::InvalidLength),
        }
        Ok(Self::from(bytes))
    }
}
