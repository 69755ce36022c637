//! Test fixtures: synthetic garment photos encoded in memory.

use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Colors used across fixtures
pub mod colors {
    use swatch_palette::Rgb;

    pub const RED: Rgb = Rgb { r: 200, g: 30, b: 30 };
    pub const BLUE: Rgb = Rgb { r: 30, g: 60, b: 200 };
    pub const GREEN: Rgb = Rgb { r: 40, g: 170, b: 70 };
    pub const GRAY: Rgb = Rgb { r: 128, g: 128, b: 128 };
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };
}

fn rgba(color: swatch_palette::Rgb) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, 255])
}

fn encode(image: &RgbaImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), format)
        .expect("Failed to encode fixture");
    buf
}

/// Vertical stripes, each `(color, width)`, 16 pixels tall
pub fn striped_png(stripes: &[(swatch_palette::Rgb, u32)]) -> Vec<u8> {
    let width: u32 = stripes.iter().map(|(_, w)| w).sum();
    let image = RgbaImage::from_fn(width, 16, |x, _| {
        let mut edge = 0;
        for &(color, w) in stripes {
            edge += w;
            if x < edge {
                return rgba(color);
            }
        }
        Rgba([0, 0, 0, 0])
    });
    encode(&image, ImageFormat::Png)
}

/// Single-color PNG
pub fn solid_png(color: swatch_palette::Rgb, size: u32) -> Vec<u8> {
    encode(&RgbaImage::from_pixel(size, size, rgba(color)), ImageFormat::Png)
}

/// Fully transparent PNG
pub fn transparent_png(size: u32) -> Vec<u8> {
    encode(
        &RgbaImage::from_pixel(size, size, Rgba([120, 40, 40, 0])),
        ImageFormat::Png,
    )
}

/// Garment on a white product-shot backdrop: a colored square in the middle
pub fn product_shot_png(garment: swatch_palette::Rgb) -> Vec<u8> {
    let image = RgbaImage::from_fn(20, 20, |x, y| {
        if (5..15).contains(&x) && (5..15).contains(&y) {
            rgba(garment)
        } else {
            Rgba([255, 255, 255, 255])
        }
    });
    encode(&image, ImageFormat::Png)
}

/// The same stripes as JPEG
pub fn striped_jpeg(stripes: &[(swatch_palette::Rgb, u32)]) -> Vec<u8> {
    let png = striped_png(stripes);
    let decoded = image::load_from_memory(&png).expect("Fixture PNG should decode");
    let mut buf = Vec::new();
    decoded
        .to_rgb8()
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Jpeg)
        .expect("Failed to encode JPEG fixture");
    buf
}
