//! Palette lifecycle bound to a changing image reference.
//!
//! A swatch row shows the palette of whatever image is currently selected.
//! When the selection changes, the old palette must disappear at once, and an
//! extraction that was waiting for the previous image to finish decoding
//! must never overwrite the new one. [`PaletteSession`] enforces both by
//! tagging every pending decode with a generation number.
//!
//! ```
//! use swatch_palette::{Bitmap, MedianCut, PaletteOptions, PaletteSession, Rgb};
//!
//! let mut session = PaletteSession::new(MedianCut, PaletteOptions::default());
//!
//! // Not decoded yet: the session hands back a listener ticket
//! let first = session.set_source(Some("a.jpg"), None).unwrap();
//! // The user picks another photo before the first one finishes loading
//! let second = session.set_source(Some("b.jpg"), None).unwrap();
//!
//! let blue = Bitmap::from_rgb_pixels(1, 1, &[Rgb::new(30, 60, 200)]).unwrap();
//! let red = Bitmap::from_rgb_pixels(1, 1, &[Rgb::new(200, 30, 30)]).unwrap();
//!
//! assert!(session.on_decoded(&second, &blue));
//! assert!(!session.on_decoded(&first, &red)); // stale, ignored
//! assert_eq!(session.palette().len(), 1);
//! ```

use crate::bitmap::Bitmap;
use crate::palette::{extract_palette, PaletteOptions};
use crate::quantize::Quantizer;

/// Ticket for one pending "image finished decoding" notification.
///
/// Only the most recently issued ticket is live; presenting any older one to
/// [`PaletteSession::on_decoded`] is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeListener<K> {
    generation: u64,
    source: K,
}

impl<K> DecodeListener<K> {
    /// The image reference this ticket was issued for.
    pub fn source(&self) -> &K {
        &self.source
    }
}

/// Tracks the current image reference and its palette.
pub struct PaletteSession<K, Q> {
    quantizer: Q,
    options: PaletteOptions,
    source: Option<K>,
    generation: u64,
    /// Generation of the registered decode listener, if any
    listener: Option<u64>,
    palette: Vec<String>,
}

impl<K, Q> PaletteSession<K, Q>
where
    K: Clone + PartialEq,
    Q: Quantizer,
{
    pub fn new(quantizer: Q, options: PaletteOptions) -> Self {
        Self {
            quantizer,
            options,
            source: None,
            generation: 0,
            listener: None,
            palette: Vec::new(),
        }
    }

    /// Current swatches; empty while an extraction is pending.
    pub fn palette(&self) -> &[String] {
        &self.palette
    }

    pub fn source(&self) -> Option<&K> {
        self.source.as_ref()
    }

    pub fn options(&self) -> &PaletteOptions {
        &self.options
    }

    /// Whether a decode notification is still awaited.
    pub fn has_pending_listener(&self) -> bool {
        self.listener.is_some()
    }

    /// Point the session at a new image reference.
    ///
    /// Setting the reference it already holds changes nothing and returns
    /// `None`. Otherwise the palette is cleared immediately and any pending
    /// listener is dropped. If `decoded` is supplied the new palette is
    /// computed right away; if not, the returned ticket must be passed to
    /// [`on_decoded`](Self::on_decoded) once the image is ready.
    pub fn set_source(
        &mut self,
        source: Option<K>,
        decoded: Option<&Bitmap>,
    ) -> Option<DecodeListener<K>> {
        if source == self.source {
            return None;
        }
        self.source = source;
        self.rearm(decoded)
    }

    /// Replace the extraction options and recompute for the current source.
    ///
    /// Behaves like a source change: the palette is cleared and either
    /// recomputed from `decoded` or deferred behind a fresh ticket.
    pub fn set_options(
        &mut self,
        options: PaletteOptions,
        decoded: Option<&Bitmap>,
    ) -> Option<DecodeListener<K>> {
        self.options = options;
        self.rearm(decoded)
    }

    /// Deliver a decoded image for a previously issued ticket.
    ///
    /// Returns `true` if the ticket was live and the palette was updated.
    /// Each ticket fires at most once.
    pub fn on_decoded(&mut self, listener: &DecodeListener<K>, image: &Bitmap) -> bool {
        if self.listener != Some(listener.generation) {
            tracing::debug!(
                generation = listener.generation,
                current = self.generation,
                "ignoring decode for superseded image"
            );
            return false;
        }
        self.listener = None;
        self.palette = extract_palette(Some(image), &self.quantizer, &self.options);
        true
    }

    fn rearm(&mut self, decoded: Option<&Bitmap>) -> Option<DecodeListener<K>> {
        self.palette.clear();
        self.generation += 1;
        if let Some(stale) = self.listener.take() {
            tracing::trace!(generation = stale, "deregistered decode listener");
        }

        let source = self.source.as_ref()?;
        match decoded {
            Some(image) => {
                self.palette = extract_palette(Some(image), &self.quantizer, &self.options);
                None
            }
            None => {
                self.listener = Some(self.generation);
                Some(DecodeListener {
                    generation: self.generation,
                    source: source.clone(),
                })
            }
        }
    }
}
