//! Palette extraction pipeline

use crate::bitmap::Bitmap;
use crate::color::Rgb;
use crate::error::QuantizeError;
use crate::quantize::Quantizer;

use super::dedupe::{dedupe_near, DEFAULT_DEDUPE_THRESHOLD};
use super::neutral::NeutralFilter;

/// Tuning for [`extract_palette`].
///
/// # Defaults
///
/// - `max_colors`: 4 swatches
/// - `quality`: 5 (lower is slower and more accurate)
/// - `palette_size`: 12 candidates requested from the quantizer
/// - `dedupe_threshold`: 28 (RGB Euclidean distance)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteOptions {
    /// Maximum number of swatches returned
    pub max_colors: usize,
    /// Sampling hint passed to the quantizer
    pub quality: u32,
    /// Number of candidate colors requested from the quantizer
    pub palette_size: usize,
    /// Candidates closer than this to an earlier swatch are dropped
    pub dedupe_threshold: f64,
    /// Neutral color thresholds
    pub neutral: NeutralFilter,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self {
            max_colors: 4,
            quality: 5,
            palette_size: 12,
            dedupe_threshold: DEFAULT_DEDUPE_THRESHOLD,
            neutral: NeutralFilter::default(),
        }
    }
}

impl PaletteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn max_colors(mut self, max_colors: usize) -> Self {
        self.max_colors = max_colors;
        self
    }

    #[inline]
    pub fn quality(mut self, quality: u32) -> Self {
        self.quality = quality;
        self
    }

    #[inline]
    pub fn palette_size(mut self, palette_size: usize) -> Self {
        self.palette_size = palette_size;
        self
    }

    #[inline]
    pub fn dedupe_threshold(mut self, threshold: f64) -> Self {
        self.dedupe_threshold = threshold;
        self
    }
}

/// Derive up to `options.max_colors` swatch colors from `image`.
///
/// The dominant color leads, followed by the quantizer's other candidates;
/// neutral and near-duplicate colors are dropped. If nothing survives, the
/// dominant color is returned alone even if it is neutral.
///
/// Extraction is a cosmetic, best-effort step: with no image, or when the
/// quantizer fails, the result is an empty palette and no error escapes.
///
/// # Example
///
/// ```
/// use swatch_palette::{extract_palette, Bitmap, MedianCut, PaletteOptions, Rgb};
///
/// let mut pixels = vec![Rgb::new(180, 20, 40); 60];
/// pixels.extend(vec![Rgb::new(30, 60, 170); 40]);
/// let bitmap = Bitmap::from_rgb_pixels(10, 10, &pixels).unwrap();
///
/// let palette = extract_palette(Some(&bitmap), &MedianCut, &PaletteOptions::default());
/// assert_eq!(palette.len(), 2);
///
/// assert!(extract_palette(None, &MedianCut, &PaletteOptions::default()).is_empty());
/// ```
pub fn extract_palette<Q: Quantizer + ?Sized>(
    image: Option<&Bitmap>,
    quantizer: &Q,
    options: &PaletteOptions,
) -> Vec<String> {
    let Some(image) = image else {
        return Vec::new();
    };

    match select_swatches(image, quantizer, options) {
        Ok(swatches) => swatches.into_iter().map(Rgb::to_hex).collect(),
        Err(e) => {
            tracing::debug!(error = %e, "palette extraction failed, showing no swatches");
            Vec::new()
        }
    }
}

fn select_swatches<Q: Quantizer + ?Sized>(
    image: &Bitmap,
    quantizer: &Q,
    options: &PaletteOptions,
) -> Result<Vec<Rgb>, QuantizeError> {
    let dominant = quantizer.dominant_color(image, options.quality)?;
    let candidates = quantizer.palette(image, options.palette_size, options.quality)?;

    let merged: Vec<Rgb> = std::iter::once(dominant)
        .chain(candidates.into_iter().filter(|&c| c != dominant))
        .filter(|&c| !options.neutral.is_neutral(c))
        .collect();

    let mut swatches = dedupe_near(&merged, options.dedupe_threshold);
    swatches.truncate(options.max_colors);

    if swatches.is_empty() {
        swatches.push(dominant);
    }
    Ok(swatches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    /// Quantizer returning canned colors, recording how often it was asked.
    struct Canned {
        dominant: Result<Rgb, QuantizeError>,
        palette: Result<Vec<Rgb>, QuantizeError>,
        calls: Cell<usize>,
        last_size: Cell<usize>,
        last_quality: Cell<u32>,
    }

    impl Canned {
        fn new(dominant: Rgb, palette: Vec<Rgb>) -> Self {
            Self {
                dominant: Ok(dominant),
                palette: Ok(palette),
                calls: Cell::new(0),
                last_size: Cell::new(0),
                last_quality: Cell::new(0),
            }
        }

        fn failing(error: QuantizeError) -> Self {
            Self {
                dominant: Err(error.clone()),
                palette: Err(error),
                calls: Cell::new(0),
                last_size: Cell::new(0),
                last_quality: Cell::new(0),
            }
        }
    }

    impl Quantizer for Canned {
        fn dominant_color(&self, _image: &Bitmap, quality: u32) -> Result<Rgb, QuantizeError> {
            self.calls.set(self.calls.get() + 1);
            self.last_quality.set(quality);
            self.dominant.clone()
        }

        fn palette(
            &self,
            _image: &Bitmap,
            size: usize,
            quality: u32,
        ) -> Result<Vec<Rgb>, QuantizeError> {
            self.calls.set(self.calls.get() + 1);
            self.last_size.set(size);
            self.last_quality.set(quality);
            self.palette.clone()
        }
    }

    fn image() -> Bitmap {
        Bitmap::from_rgb_pixels(1, 1, &[Rgb::new(0, 0, 0)]).unwrap()
    }

    fn run(quantizer: &Canned) -> Vec<String> {
        extract_palette(Some(&image()), quantizer, &PaletteOptions::default())
    }

    #[test]
    fn test_dominant_leads_and_duplicate_is_skipped() {
        let red = Rgb::new(200, 20, 20);
        let blue = Rgb::new(20, 40, 200);
        let quantizer = Canned::new(red, vec![blue, red, Rgb::new(30, 160, 60)]);
        assert_eq!(run(&quantizer), vec!["#c81414", "#1428c8", "#1ea03c"]);
    }

    #[test]
    fn test_neutral_candidates_are_removed() {
        let quantizer = Canned::new(
            Rgb::new(200, 20, 20),
            vec![
                Rgb::new(128, 128, 128),
                Rgb::new(250, 250, 248),
                Rgb::new(5, 5, 5),
                Rgb::new(20, 40, 200),
            ],
        );
        assert_eq!(run(&quantizer), vec!["#c81414", "#1428c8"]);
    }

    #[test]
    fn test_near_duplicates_merge_into_dominant() {
        let quantizer = Canned::new(
            Rgb::new(200, 20, 20),
            vec![Rgb::new(205, 25, 22), Rgb::new(20, 40, 200)],
        );
        assert_eq!(run(&quantizer), vec!["#c81414", "#1428c8"]);
    }

    #[test]
    fn test_truncates_to_max_colors() {
        let quantizer = Canned::new(
            Rgb::new(200, 20, 20),
            vec![
                Rgb::new(20, 200, 20),
                Rgb::new(20, 20, 200),
                Rgb::new(200, 200, 20),
                Rgb::new(20, 200, 200),
                Rgb::new(200, 20, 200),
            ],
        );
        let palette = run(&quantizer);
        assert_eq!(palette, vec!["#c81414", "#14c814", "#1414c8", "#c8c814"]);

        let two = extract_palette(
            Some(&image()),
            &quantizer,
            &PaletteOptions::default().max_colors(2),
        );
        assert_eq!(two, vec!["#c81414", "#14c814"]);
    }

    #[test]
    fn test_all_neutral_falls_back_to_dominant() {
        let quantizer = Canned::new(
            Rgb::new(10, 10, 10),
            vec![Rgb::new(128, 128, 128), Rgb::new(250, 250, 248)],
        );
        assert_eq!(run(&quantizer), vec!["#0a0a0a"]);
    }

    #[test]
    fn test_zero_max_colors_still_returns_dominant() {
        let quantizer = Canned::new(Rgb::new(200, 20, 20), vec![Rgb::new(20, 40, 200)]);
        let palette = extract_palette(
            Some(&image()),
            &quantizer,
            &PaletteOptions::default().max_colors(0),
        );
        assert_eq!(palette, vec!["#c81414"]);
    }

    #[test]
    fn test_quantizer_failure_yields_empty_palette() {
        let quantizer = Canned::failing(QuantizeError::Unreadable("tainted".into()));
        assert!(run(&quantizer).is_empty());
    }

    #[test]
    fn test_candidate_failure_yields_empty_palette() {
        let quantizer = Canned {
            palette: Err(QuantizeError::NoPixels),
            ..Canned::new(Rgb::new(200, 20, 20), Vec::new())
        };
        assert!(run(&quantizer).is_empty());
    }

    #[test]
    fn test_absent_image_skips_quantizer() {
        let quantizer = Canned::new(Rgb::new(200, 20, 20), Vec::new());
        let palette = extract_palette(None, &quantizer, &PaletteOptions::default());
        assert!(palette.is_empty());
        assert_eq!(quantizer.calls.get(), 0);
    }

    #[test]
    fn test_options_reach_quantizer() {
        let quantizer = Canned::new(Rgb::new(200, 20, 20), Vec::new());
        let options = PaletteOptions::new().quality(3).palette_size(7);
        extract_palette(Some(&image()), &quantizer, &options);
        assert_eq!(quantizer.calls.get(), 2);
        assert_eq!(quantizer.last_size.get(), 7);
        assert_eq!(quantizer.last_quality.get(), 3);
    }

    #[test]
    fn test_default_options() {
        let options = PaletteOptions::default();
        assert_eq!(options.max_colors, 4);
        assert_eq!(options.quality, 5);
        assert_eq!(options.palette_size, 12);
        assert_eq!(options.dedupe_threshold, 28.0);
    }
}
