//! Hue/saturation/lightness view of an RGB color

use super::rgb::Rgb;

/// A color in HSL form.
///
/// `h` is in degrees, `0.0..360.0`; `s` and `l` are in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    #[inline]
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// True when the color carries no hue at all (r == g == b).
    #[inline]
    pub fn is_achromatic(&self) -> bool {
        self.s == 0.0
    }
}

impl From<Rgb> for Hsl {
    /// Standard hexcone conversion.
    ///
    /// Achromatic inputs map to `h = 0, s = 0`. Hue is normalized into
    /// `0.0..360.0` by adding 360 to negative sector results.
    fn from(color: Rgb) -> Self {
        let r = f64::from(color.r) / 255.0;
        let g = f64::from(color.g) / 255.0;
        let b = f64::from(color.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let d = max - min;

        if d == 0.0 {
            return Self { h: 0.0, s: 0.0, l };
        }

        // Clamp guards against 1.0000000000000002 from float rounding
        let s = (d / (1.0 - (2.0 * l - 1.0).abs())).min(1.0);

        let sector = if max == r {
            ((g - b) / d) % 6.0
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        let mut h = sector * 60.0;
        if h < 0.0 {
            h += 360.0;
        }

        Self { h, s, l }
    }
}

impl From<Hsl> for Rgb {
    /// Inverse conversion, rounded to the nearest 8-bit channel value.
    fn from(hsl: Hsl) -> Self {
        let h = hsl.h.rem_euclid(360.0);
        let s = hsl.s.clamp(0.0, 1.0);
        let l = hsl.l.clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match (h / 60.0) as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgb::new(to_u8(r), to_u8(g), to_u8(b))
    }
}
