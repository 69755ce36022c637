//! Modified median cut quantization (MMCQ).
//!
//! Pixels are bucketed into a 32x32x32 histogram (5 significant bits per
//! channel). Starting from the box enclosing every populated bucket, the
//! most populated box is repeatedly cut at its median along its widest
//! axis. Once 75% of the requested colors exist, the remaining cuts are
//! driven by population x volume instead, which lets large sparse regions
//! of color space win a swatch even when few pixels live there.

use crate::bitmap::Bitmap;
use crate::color::Rgb;
use crate::error::QuantizeError;

use super::Quantizer;

const SIGBITS: u32 = 5;
const RSHIFT: u32 = 8 - SIGBITS;
const SIDE: usize = 1 << SIGBITS;
const MAX_ITERATIONS: usize = 1000;
const FRACT_BY_POPULATION: f64 = 0.75;

/// Pixels more transparent than this are not sampled
const MIN_ALPHA: u8 = 125;
/// Pixels with every channel above this are treated as background
const WHITE_CUTOFF: u8 = 250;

const DEFAULT_QUALITY: u32 = 10;
const DEFAULT_SIZE: usize = 10;
const DOMINANT_PALETTE_SIZE: usize = 5;

/// Median cut quantizer.
///
/// # Example
///
/// ```
/// use swatch_palette::{Bitmap, MedianCut, Quantizer, Rgb};
///
/// let mut pixels = vec![Rgb::new(200, 30, 30); 30];
/// pixels.extend(vec![Rgb::new(30, 30, 200); 10]);
/// let bitmap = Bitmap::from_rgb_pixels(8, 5, &pixels).unwrap();
///
/// let dominant = MedianCut.dominant_color(&bitmap, 1).unwrap();
/// assert!(dominant.r > 190 && dominant.b < 40);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MedianCut;

impl Quantizer for MedianCut {
    fn dominant_color(&self, image: &Bitmap, quality: u32) -> Result<Rgb, QuantizeError> {
        self.palette(image, DOMINANT_PALETTE_SIZE, quality)?
            .first()
            .copied()
            .ok_or(QuantizeError::NoPixels)
    }

    fn palette(
        &self,
        image: &Bitmap,
        size: usize,
        quality: u32,
    ) -> Result<Vec<Rgb>, QuantizeError> {
        let size = if (2..=256).contains(&size) {
            size
        } else {
            DEFAULT_SIZE
        };
        let quality = if quality < 1 { DEFAULT_QUALITY } else { quality };

        let histogram = Histogram::sample(image, quality)?;
        let boxes = quantize(&histogram, size);

        tracing::trace!(
            requested = size,
            produced = boxes.len(),
            "median cut finished"
        );

        Ok(boxes.iter().map(|b| b.average(&histogram)).collect())
    }
}

#[inline]
fn bin_index([r, g, b]: [usize; 3]) -> usize {
    (r << (2 * SIGBITS)) | (g << SIGBITS) | b
}

struct Histogram {
    bins: Vec<u32>,
}

impl Histogram {
    /// Bucket every `step`-th pixel, skipping transparent and near-white ones.
    fn sample(image: &Bitmap, step: u32) -> Result<Self, QuantizeError> {
        let mut bins = vec![0u32; SIDE * SIDE * SIDE];
        let mut sampled = 0usize;

        for i in (0..image.pixel_count()).step_by(step as usize) {
            let [r, g, b, a] = image.pixel(i);
            if a < MIN_ALPHA || (r > WHITE_CUTOFF && g > WHITE_CUTOFF && b > WHITE_CUTOFF) {
                continue;
            }
            let coord = [
                usize::from(r >> RSHIFT),
                usize::from(g >> RSHIFT),
                usize::from(b >> RSHIFT),
            ];
            bins[bin_index(coord)] += 1;
            sampled += 1;
        }

        if sampled == 0 {
            return Err(QuantizeError::NoPixels);
        }
        Ok(Self { bins })
    }

    #[inline]
    fn get(&self, coord: [usize; 3]) -> u32 {
        self.bins[bin_index(coord)]
    }
}

/// An axis-aligned box of histogram buckets, bounds inclusive.
///
/// Boxes are always fitted tightly around their populated buckets, so both
/// faces on every axis hold at least one pixel.
#[derive(Debug, Clone, Copy)]
struct VBox {
    lo: [usize; 3],
    hi: [usize; 3],
    count: u64,
}

impl VBox {
    /// Tightest box around the populated buckets inside `lo..=hi`.
    fn fit(histogram: &Histogram, lo: [usize; 3], hi: [usize; 3]) -> Option<Self> {
        let mut min = [SIDE; 3];
        let mut max = [0usize; 3];
        let mut count = 0u64;

        for_each_bin(lo, hi, |coord| {
            let n = histogram.get(coord);
            if n == 0 {
                return;
            }
            count += u64::from(n);
            for axis in 0..3 {
                min[axis] = min[axis].min(coord[axis]);
                max[axis] = max[axis].max(coord[axis]);
            }
        });

        (count > 0).then_some(Self {
            lo: min,
            hi: max,
            count,
        })
    }

    fn width(&self, axis: usize) -> usize {
        self.hi[axis] - self.lo[axis] + 1
    }

    fn volume(&self) -> u64 {
        (0..3).map(|axis| self.width(axis) as u64).product()
    }

    fn priority(&self) -> u64 {
        self.count * self.volume()
    }

    /// Widest axis; ties resolve red, then green, then blue.
    fn widest_axis(&self) -> usize {
        let mut widest = 0;
        for axis in 1..3 {
            if self.width(axis) > self.width(widest) {
                widest = axis;
            }
        }
        widest
    }

    /// Cut at the population median along the widest axis.
    ///
    /// Returns `None` when the box is a single bucket or a single pixel.
    fn split(&self, histogram: &Histogram) -> Option<(VBox, VBox)> {
        if self.count < 2 {
            return None;
        }
        let axis = self.widest_axis();
        let (lo, hi) = (self.lo[axis], self.hi[axis]);
        if lo == hi {
            return None;
        }

        let mut partial = [0u64; SIDE];
        for_each_bin(self.lo, self.hi, |coord| {
            partial[coord[axis]] += u64::from(histogram.get(coord));
        });
        for i in lo + 1..=hi {
            partial[i] += partial[i - 1];
        }
        let total = partial[hi];

        let median = (lo..=hi).find(|&i| partial[i] * 2 > total)?;
        let left = median - lo;
        let right = hi - median;

        // Cut into the larger side so the halves stay balanced in extent
        let cut = if left <= right {
            (median + right / 2).min(hi - 1)
        } else {
            median.saturating_sub(1 + left.div_ceil(2)).max(lo)
        };

        let mut left_hi = self.hi;
        left_hi[axis] = cut;
        let mut right_lo = self.lo;
        right_lo[axis] = cut + 1;

        Some((
            VBox::fit(histogram, self.lo, left_hi)?,
            VBox::fit(histogram, right_lo, self.hi)?,
        ))
    }

    /// Population-weighted center of the box's buckets.
    fn average(&self, histogram: &Histogram) -> Rgb {
        let mult = f64::from(1u32 << RSHIFT);
        let mut total = 0f64;
        let mut sum = [0f64; 3];

        for_each_bin(self.lo, self.hi, |coord| {
            let n = f64::from(histogram.get(coord));
            total += n;
            for axis in 0..3 {
                sum[axis] += n * (coord[axis] as f64 + 0.5) * mult;
            }
        });

        if total == 0.0 {
            let center = |axis: usize| (mult * (self.lo[axis] + self.hi[axis] + 1) as f64 / 2.0) as u8;
            return Rgb::new(center(0), center(1), center(2));
        }
        Rgb::new(
            (sum[0] / total) as u8,
            (sum[1] / total) as u8,
            (sum[2] / total) as u8,
        )
    }
}

fn for_each_bin(lo: [usize; 3], hi: [usize; 3], mut f: impl FnMut([usize; 3])) {
    for r in lo[0]..=hi[0] {
        for g in lo[1]..=hi[1] {
            for b in lo[2]..=hi[2] {
                f([r, g, b]);
            }
        }
    }
}

/// Cut boxes until `max_colors` exist (or nothing is left to cut), ordered
/// by population x volume, largest first.
fn quantize(histogram: &Histogram, max_colors: usize) -> Vec<VBox> {
    let Some(root) = VBox::fit(histogram, [0; 3], [SIDE - 1; 3]) else {
        return Vec::new();
    };

    let mut boxes = vec![root];
    let mut settled = Vec::new();

    let by_population = (max_colors as f64 * FRACT_BY_POPULATION).ceil() as usize;
    cut_until(histogram, &mut boxes, &mut settled, by_population, |b| b.count);
    cut_until(histogram, &mut boxes, &mut settled, max_colors, VBox::priority);

    boxes.extend(settled);
    boxes.sort_by(|a, b| b.priority().cmp(&a.priority()));
    boxes
}

/// Repeatedly split the box ranking highest by `key`.
///
/// Boxes that cannot be split move to `settled` so they stop competing.
fn cut_until(
    histogram: &Histogram,
    boxes: &mut Vec<VBox>,
    settled: &mut Vec<VBox>,
    target: usize,
    key: impl Fn(&VBox) -> u64,
) {
    for _ in 0..MAX_ITERATIONS {
        if boxes.len() + settled.len() >= target {
            return;
        }
        let Some(idx) = boxes
            .iter()
            .enumerate()
            .max_by_key(|(_, b)| key(b))
            .map(|(i, _)| i)
        else {
            return;
        };

        let vbox = boxes.swap_remove(idx);
        match vbox.split(histogram) {
            Some((a, b)) => {
                boxes.push(a);
                boxes.push(b);
            }
            None => settled.push(vbox),
        }
    }
}
