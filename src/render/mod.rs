mod background;
mod blur;
mod geometry;
mod text;

pub use background::cover_rect;
pub use geometry::rounded_rect_path;
pub use text::{line_centers, line_origin};

use std::io::Cursor;

use tiny_skia::{ColorU8, Pixmap, PixmapPaint, Transform};

use crate::config::RenderConfig;
use crate::error::Error;
use crate::fonts::FontData;

use background::draw_background;
use text::draw_text;

/// Renders one panel for `block`: background plus text, through an
/// intermediate inset surface when content padding is configured. A fresh
/// surface is allocated per panel so no state leaks between blocks.
pub(crate) fn render_panel(
    config: &RenderConfig,
    font: Option<&FontData>,
    block: &str,
) -> Result<Pixmap, Error> {
    let mut surface = Pixmap::new(config.width, config.height)
        .ok_or_else(|| Error::Surface(format!("cannot allocate {}x{} surface", config.width, config.height)))?;

    let padding = config.padding;
    if padding > 0.0 {
        // Normalization keeps the inset at least 1x1.
        let inner_w = (config.width as f32 - padding * 2.0).floor().max(1.0) as u32;
        let inner_h = (config.height as f32 - padding * 2.0).floor().max(1.0) as u32;
        let mut inner = Pixmap::new(inner_w, inner_h)
            .ok_or_else(|| Error::Surface(format!("cannot allocate {inner_w}x{inner_h} inset surface")))?;
        draw_background(&mut inner, config);
        draw_text(&mut inner, config, font, block);
        surface.draw_pixmap(
            padding as i32,
            padding as i32,
            inner.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    } else {
        draw_background(&mut surface, config);
        draw_text(&mut surface, config, font, block);
    }

    Ok(surface)
}

/// Encodes a surface as lossless PNG bytes.
pub fn encode_png(surface: &Pixmap) -> Result<Vec<u8>, Error> {
    let mut rgba = Vec::with_capacity(surface.pixels().len() * 4);
    for px in surface.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    let img = image::RgbaImage::from_raw(surface.width(), surface.height(), rgba)
        .ok_or_else(|| Error::Surface("pixel buffer size mismatch".to_string()))?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Decodes raw image bytes (PNG/JPEG) into a premultiplied drawing bitmap,
/// for background and border-image sources.
pub fn decode_image(bytes: &[u8]) -> Result<Pixmap, Error> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (w, h) = rgba.dimensions();
    let mut pixmap = Pixmap::new(w, h)
        .ok_or_else(|| Error::Surface(format!("cannot allocate {w}x{h} bitmap")))?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}
