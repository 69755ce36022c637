pub mod image_decoder;
pub mod palette_service;
pub mod tag_suggester;

pub use image_decoder::{decode_bitmap, DEFAULT_MAX_PIXELS};
pub use palette_service::{PaletteOverrides, PaletteService};
pub use tag_suggester::{ItemDescription, OpenAiTagSuggester, TagSuggester};
