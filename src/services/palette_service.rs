use serde::Deserialize;
use std::sync::Arc;
use swatch_palette::{extract_palette, MedianCut, PaletteOptions, Quantizer};
use utoipa::IntoParams;

use super::image_decoder::{decode_bitmap, DEFAULT_MAX_PIXELS};

/// Per-request overrides of the configured extraction defaults
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaletteOverrides {
    /// Maximum number of swatches
    pub max_colors: Option<usize>,
    /// Sampling stride; 1 samples every pixel
    pub quality: Option<u32>,
    /// Candidate colors requested from the quantizer
    pub palette_size: Option<usize>,
}

/// Extracts swatch palettes from uploaded image bytes
pub struct PaletteService {
    defaults: PaletteOptions,
    quantizer: Arc<dyn Quantizer + Send + Sync>,
    max_pixels: u64,
}

impl PaletteService {
    pub fn new(defaults: PaletteOptions) -> Self {
        Self::with_quantizer(defaults, Arc::new(MedianCut))
    }

    pub fn with_quantizer(
        defaults: PaletteOptions,
        quantizer: Arc<dyn Quantizer + Send + Sync>,
    ) -> Self {
        Self {
            defaults,
            quantizer,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }

    /// Cap on decoded image size; larger uploads yield an empty palette
    pub fn with_max_pixels(mut self, max_pixels: u64) -> Self {
        self.max_pixels = max_pixels;
        self
    }

    pub fn defaults(&self) -> &PaletteOptions {
        &self.defaults
    }

    /// Apply request overrides on top of the configured defaults
    pub fn options(&self, overrides: PaletteOverrides) -> PaletteOptions {
        let mut options = self.defaults;
        if let Some(max_colors) = overrides.max_colors {
            options = options.max_colors(max_colors);
        }
        if let Some(quality) = overrides.quality {
            options = options.quality(quality);
        }
        if let Some(palette_size) = overrides.palette_size {
            options = options.palette_size(palette_size);
        }
        options
    }

    /// Hex swatches for an encoded image.
    ///
    /// Empty or undecodable input yields an empty palette. This is CPU bound;
    /// async callers should run it on the blocking pool.
    pub fn extract(&self, bytes: &[u8], options: &PaletteOptions) -> Vec<String> {
        if bytes.is_empty() {
            return Vec::new();
        }

        let bitmap = match decode_bitmap(bytes, self.max_pixels) {
            Ok(bitmap) => bitmap,
            Err(e) => {
                tracing::debug!(error = %e, bytes = bytes.len(), "Upload is not a readable image");
                return Vec::new();
            }
        };

        let palette = extract_palette(Some(&bitmap), self.quantizer.as_ref(), options);
        tracing::debug!(
            width = bitmap.width(),
            height = bitmap.height(),
            swatches = palette.len(),
            "Extracted palette"
        );
        palette
    }
}

impl Default for PaletteService {
    fn default() -> Self {
        Self::new(PaletteOptions::default())
    }
}
