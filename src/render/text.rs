use tiny_skia::{FillRule, LineJoin, Paint, Path, PathBuilder, Pixmap, Stroke, Transform};
use ttf_parser::{Face, GlyphId, OutlineBuilder};

use crate::config::{DoubleOutlineMode, RenderConfig, TextAlign};
use crate::fonts::FontData;

use super::background::solid_paint;
use super::blur::gaussian_blur;

/// Fixed inset from the surface edge for left/right alignment.
const EDGE_INSET: f32 = 10.0;

/// Line advance as a multiple of the font size.
const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Vertical midpoints of each line when a block of `line_count` lines is
/// centered as a group in a surface of height `surface_h`.
pub fn line_centers(line_count: usize, surface_h: f32, font_size: f32) -> Vec<f32> {
    let line_height = font_size * LINE_HEIGHT_FACTOR;
    let total_height = line_height * line_count as f32;
    let first = (surface_h - total_height) / 2.0 + line_height / 2.0;
    (0..line_count)
        .map(|i| first + i as f32 * line_height)
        .collect()
}

/// Left pen origin of a line of `line_width` under the given alignment.
pub fn line_origin(align: TextAlign, surface_w: f32, line_width: f32) -> f32 {
    match align {
        TextAlign::Left => EDGE_INSET,
        TextAlign::Right => surface_w - EDGE_INSET - line_width,
        TextAlign::Center => (surface_w - line_width) / 2.0,
    }
}

/// A glyph outline in font units plus its pen offset from the line origin.
struct PlacedGlyph {
    path: Option<Path>,
    pen_x: f32,
}

struct ShapedLine {
    glyphs: Vec<PlacedGlyph>,
    width: f32,
}

struct GlyphPathBuilder {
    pb: PathBuilder,
}

impl OutlineBuilder for GlyphPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.pb.move_to(x, y);
    }
    fn line_to(&mut self, x: f32, y: f32) {
        self.pb.line_to(x, y);
    }
    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.pb.quad_to(x1, y1, x, y);
    }
    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.pb.cubic_to(x1, y1, x2, y2, x, y);
    }
    fn close(&mut self) {
        self.pb.close();
    }
}

/// Per-character mapping: no shaping, no kerning — glyphs advance by their
/// horizontal metrics, matching simple canvas text measurement closely
/// enough for panel text. Unmapped characters render the .notdef glyph.
fn shape_line(face: &Face, line: &str, scale: f32) -> ShapedLine {
    let mut glyphs = Vec::new();
    let mut pen_x = 0.0f32;
    let notdef_advance = face.units_per_em() as f32 / 2.0;

    for ch in line.chars() {
        let gid = face.glyph_index(ch).unwrap_or(GlyphId(0));
        let mut builder = GlyphPathBuilder {
            pb: PathBuilder::new(),
        };
        let has_outline = face.outline_glyph(gid, &mut builder).is_some();
        let path = if has_outline { builder.pb.finish() } else { None };
        let advance = face
            .glyph_hor_advance(gid)
            .map(|a| a as f32)
            .unwrap_or(notdef_advance);
        glyphs.push(PlacedGlyph { path, pen_x });
        pen_x += advance * scale;
    }

    ShapedLine {
        glyphs,
        width: pen_x,
    }
}

/// Maps a glyph from font units (y-up) to surface pixels (y-down) at the
/// given pen position and baseline.
fn glyph_transform(scale: f32, pen_x: f32, baseline_y: f32) -> Transform {
    Transform::from_row(scale, 0.0, 0.0, -scale, pen_x, baseline_y)
}

fn fill_glyphs(surface: &mut Pixmap, line: &ShapedLine, origin_x: f32, baseline_y: f32, scale: f32, paint: &Paint) {
    for glyph in &line.glyphs {
        if let Some(path) = &glyph.path {
            surface.fill_path(
                path,
                paint,
                FillRule::Winding,
                glyph_transform(scale, origin_x + glyph.pen_x, baseline_y),
                None,
            );
        }
    }
}

fn stroke_glyphs(
    surface: &mut Pixmap,
    line: &ShapedLine,
    origin_x: f32,
    baseline_y: f32,
    scale: f32,
    color: [u8; 3],
    width: f32,
) {
    let stroke = Stroke {
        width,
        miter_limit: 2.0,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };
    let paint = solid_paint(color);
    for glyph in &line.glyphs {
        if let Some(path) = &glyph.path {
            surface.stroke_path(
                path,
                &paint,
                &stroke,
                glyph_transform(scale, origin_x + glyph.pen_x, baseline_y),
                None,
            );
        }
    }
}

/// Renders one text block onto `surface`: lines split at literal newlines,
/// vertically centered as a group, each line layered back to front as
/// double outline, primary outline, then fill.
pub(crate) fn draw_text(surface: &mut Pixmap, config: &RenderConfig, font: Option<&FontData>, block: &str) {
    let Some(font) = font else {
        log::warn!("no usable font, panel text skipped");
        return;
    };
    let Some(face) = font.face() else {
        log::warn!("font data no longer parses, panel text skipped");
        return;
    };
    let units = face.units_per_em() as f32;
    if units <= 0.0 {
        log::warn!("font has invalid units_per_em, panel text skipped");
        return;
    }

    let scale = config.font_size / units;
    // Middle-baseline convention: the line's vertical midpoint sits halfway
    // between ascender and descender, so the baseline hangs below it.
    let midline_offset = (face.ascender() as f32 + face.descender() as f32) / 2.0 * scale;

    let surface_w = surface.width() as f32;
    let surface_h = surface.height() as f32;
    let lines: Vec<&str> = block.split('\n').collect();
    let centers = line_centers(lines.len(), surface_h, config.font_size);

    for (line, center_y) in lines.iter().zip(centers) {
        let shaped = shape_line(&face, line, scale);
        let origin_x = line_origin(config.text_align, surface_w, shaped.width);
        let baseline_y = center_y + midline_offset;

        // Double outline first, so it reads as a halo around the single
        // outline. Normalization already suppressed it when the primary
        // outline is off or thinner than 1px.
        if config.double_outline_enabled {
            match config.double_outline_mode {
                DoubleOutlineMode::Blur => {
                    draw_blur_halo(surface, config, &shaped, origin_x, baseline_y, scale);
                }
                DoubleOutlineMode::Normal => {
                    let width = config.outline_width + config.double_outline_width * 2.0;
                    stroke_glyphs(
                        surface,
                        &shaped,
                        origin_x,
                        baseline_y,
                        scale,
                        config.double_outline_color,
                        width,
                    );
                }
            }
        }

        if config.outline_enabled && config.outline_width > 0.0 {
            stroke_glyphs(
                surface,
                &shaped,
                origin_x,
                baseline_y,
                scale,
                config.outline_color,
                config.outline_width,
            );
        }

        let fill = solid_paint(config.text_color);
        fill_glyphs(surface, &shaped, origin_x, baseline_y, scale, &fill);
    }
}

/// Blur-mode halo: the glyphs are filled in the halo color and blurred with a
/// shadow radius of twice the double-outline width (sigma = width), then the
/// unblurred fill is drawn on top, reproducing a canvas shadow + fill pair.
fn draw_blur_halo(
    surface: &mut Pixmap,
    config: &RenderConfig,
    shaped: &ShapedLine,
    origin_x: f32,
    baseline_y: f32,
    scale: f32,
) {
    let paint = solid_paint(config.double_outline_color);

    if let Some(mut halo) = Pixmap::new(surface.width(), surface.height()) {
        fill_glyphs(&mut halo, shaped, origin_x, baseline_y, scale, &paint);
        gaussian_blur(&mut halo, config.double_outline_width);
        surface.draw_pixmap(
            0,
            0,
            halo.as_ref(),
            &tiny_skia::PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    fill_glyphs(surface, shaped, origin_x, baseline_y, scale, &paint);
}
