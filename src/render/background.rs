use tiny_skia::{
    BlendMode as SkiaBlend, FillRule, FilterQuality, Mask, Paint, Pixmap, PixmapPaint, Stroke,
    Transform,
};

use crate::config::{BackgroundMode, BlendMode, RenderConfig};

use super::geometry::rounded_rect_path;

/// Overlay blend-mode names map to a closed set of compositing operators;
/// anything else already collapsed to `Normal` at parse time.
fn to_skia_blend(mode: BlendMode) -> SkiaBlend {
    match mode {
        BlendMode::Normal => SkiaBlend::SourceOver,
        BlendMode::Overlay => SkiaBlend::Overlay,
        BlendMode::Multiply => SkiaBlend::Multiply,
        BlendMode::Screen => SkiaBlend::Screen,
    }
}

pub(crate) fn solid_paint(color: [u8; 3]) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color[0], color[1], color[2], 255);
    paint.anti_alias = true;
    paint
}

/// Destination rectangle (x, y, w, h) that covers a `w`x`h` area with an
/// image while preserving its aspect ratio. The overflowing axis is cropped
/// symmetrically.
pub fn cover_rect(img_w: f32, img_h: f32, w: f32, h: f32) -> (f32, f32, f32, f32) {
    let img_ratio = img_w / img_h;
    let canvas_ratio = w / h;
    if img_ratio > canvas_ratio {
        let dw = h * img_ratio;
        ((w - dw) / 2.0, 0.0, dw, h)
    } else {
        let dh = w / img_ratio;
        (0.0, (h - dh) / 2.0, w, dh)
    }
}

/// Paints the background layer onto `surface`, which is assumed cleared.
/// Works on whatever surface size it is handed; the assembler decides whether
/// that is the full canvas or a padded inset.
pub(crate) fn draw_background(surface: &mut Pixmap, config: &RenderConfig) {
    let w = surface.width() as f32;
    let h = surface.height() as f32;
    let radius = config.corner_radius;

    match config.background {
        BackgroundMode::Transparent => {}
        BackgroundMode::Color => {
            if let Some(path) = rounded_rect_path(0.0, 0.0, w, h, radius) {
                surface.fill_path(
                    &path,
                    &solid_paint(config.bg_color),
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
            }
            draw_border_and_overlay(surface, config, w, h);
        }
        BackgroundMode::Image => {
            // No image loaded behaves as transparent, not as an error.
            let Some(img) = &config.bg_image else {
                log::debug!("background mode is image but no bitmap is set");
                return;
            };

            let clip = if radius > 0.0 {
                rounded_clip_mask(w, h, radius)
            } else {
                None
            };

            let (dx, dy, dw, dh) = cover_rect(img.width() as f32, img.height() as f32, w, h);
            let mut paint = PixmapPaint::default();
            paint.quality = FilterQuality::Bilinear;
            surface.draw_pixmap(
                0,
                0,
                img.as_ref(),
                &paint,
                Transform::from_row(
                    dw / img.width() as f32,
                    0.0,
                    0.0,
                    dh / img.height() as f32,
                    dx,
                    dy,
                ),
                clip.as_ref(),
            );

            draw_border_and_overlay(surface, config, w, h);
        }
    }
}

fn rounded_clip_mask(w: f32, h: f32, radius: f32) -> Option<Mask> {
    let mut mask = Mask::new(w as u32, h as u32)?;
    let path = rounded_rect_path(0.0, 0.0, w, h, radius)?;
    mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
    Some(mask)
}

fn draw_border_and_overlay(surface: &mut Pixmap, config: &RenderConfig, w: f32, h: f32) {
    if !config.border_enabled {
        return;
    }
    let bw = config.border_width;
    if bw > 0.0 {
        // Stroke centered on the half-width inset so the border stays inside
        // the canvas; corner radius shrinks by the same half width.
        let inner_radius = (config.corner_radius - bw / 2.0).max(0.0);
        if let Some(path) = rounded_rect_path(bw / 2.0, bw / 2.0, w - bw, h - bw, inner_radius) {
            let stroke = Stroke {
                width: bw,
                ..Stroke::default()
            };
            surface.stroke_path(
                &path,
                &solid_paint(config.border_color),
                &stroke,
                Transform::identity(),
                None,
            );
        }
    }

    if config.border_image_enabled {
        draw_border_image_overlay(surface, config, w, h);
    }
}

/// Composites the border-image pattern into the ring between the outer
/// rounded rect and the border-width inset, honoring opacity and blend mode.
fn draw_border_image_overlay(surface: &mut Pixmap, config: &RenderConfig, w: f32, h: f32) {
    // Normalization guarantees the bitmap is present when the flag is set.
    let Some(img) = &config.border_image else {
        return;
    };
    let bw = config.border_width;
    let radius = config.corner_radius;
    let opacity = config.border_image_opacity as f32 / 100.0;

    let Some(mut scratch) = Pixmap::new(w as u32, h as u32) else {
        return;
    };

    // 1. Pattern image scaled to the full surface, clipped to the outer shape.
    let clip = rounded_clip_mask(w, h, radius);
    let mut paint = PixmapPaint::default();
    paint.opacity = opacity;
    paint.quality = FilterQuality::Bilinear;
    scratch.draw_pixmap(
        0,
        0,
        img.as_ref(),
        &paint,
        Transform::from_scale(w / img.width() as f32, h / img.height() as f32),
        clip.as_ref(),
    );

    // 2. Punch out the interior so only the border ring remains.
    let inner_radius = (radius - bw).max(0.0);
    if let Some(inner) = rounded_rect_path(bw, bw, w - bw * 2.0, h - bw * 2.0, inner_radius) {
        let mut erase = solid_paint([0, 0, 0]);
        erase.blend_mode = SkiaBlend::DestinationOut;
        scratch.fill_path(&inner, &erase, FillRule::Winding, Transform::identity(), None);
    }

    // 3. Composite the ring with the configured blend mode.
    let mut composite = PixmapPaint::default();
    composite.blend_mode = to_skia_blend(config.border_image_blend);
    surface.draw_pixmap(
        0,
        0,
        scratch.as_ref(),
        &composite,
        Transform::identity(),
        None,
    );
}
