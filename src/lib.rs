//! Closet
//!
//! Wardrobe catalog service: swatch palettes for garment photos and
//! language-model tag suggestions. Palette extraction itself lives in the
//! `swatch-palette` crate; this crate wires it into an HTTP API and CLI.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
