pub mod palette;
pub mod tags;

pub use palette::{handle_palette, PaletteResponse, __path_handle_palette};
pub use tags::{handle_auto_tag, AutoTagRequest, AutoTagResponse, __path_handle_auto_tag};
