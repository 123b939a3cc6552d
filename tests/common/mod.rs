#![allow(dead_code)]

use std::io::Cursor;

use image::{Rgba, RgbaImage};
use panelmaker::{BackgroundMode, FontLibrary, RenderConfig, generate_panels};

/// Encodes a solid-color image as PNG bytes, for background/border sources.
pub fn solid_png(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_pixel(w, h, Rgba(rgba));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

pub fn solid_bitmap(w: u32, h: u32, rgba: [u8; 4]) -> tiny_skia::Pixmap {
    panelmaker::decode_image(&solid_png(w, h, rgba)).unwrap()
}

pub fn decode(png: &[u8]) -> RgbaImage {
    image::load_from_memory(png).unwrap().to_rgba8()
}

pub fn px(img: &RgbaImage, x: u32, y: u32) -> [u8; 4] {
    img.get_pixel(x, y).0
}

pub fn channels_close(a: [u8; 4], b: [u8; 4], tolerance: u8) -> bool {
    a.iter()
        .zip(b.iter())
        .all(|(&x, &y)| x.abs_diff(y) <= tolerance)
}

/// Config with every decoration off; tests switch on what they probe. Text
/// and outline colors match the background fill so stray glyphs from a
/// resolved fallback font can never disturb pixel probes.
pub fn base_config(w: u32, h: u32, bg: [u8; 3]) -> RenderConfig {
    RenderConfig {
        width: w,
        height: h,
        background: BackgroundMode::Color,
        bg_color: bg,
        text_color: bg,
        outline_enabled: false,
        ..RenderConfig::default()
    }
}

/// Renders a single-block text and decodes the first panel.
pub fn render_one(config: &RenderConfig, text: &str) -> RgbaImage {
    let fonts = FontLibrary::new();
    let images = generate_panels(config, &fonts, text).unwrap();
    assert_eq!(images.len(), 1);
    decode(&images[0].png)
}
