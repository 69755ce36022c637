//! Swatch selection: neutrality filtering, near-duplicate suppression and
//! the orchestrating pipeline.

mod dedupe;
mod neutral;
mod pipeline;

pub use dedupe::{dedupe_near, DEFAULT_DEDUPE_THRESHOLD};
pub use neutral::{is_neutral, NeutralFilter};
pub use pipeline::{extract_palette, PaletteOptions};
