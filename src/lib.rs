mod blocks;
mod config;
mod error;
mod fonts;
mod output;
mod render;

pub use blocks::split_blocks;
pub use config::{
    BackgroundMode, BlendMode, DEFAULT_FONT_SIZE, DoubleOutlineMode, RenderConfig, TextAlign,
    parse_f32_or, parse_hex_color, parse_hex_color_or, parse_u32_or, ratio_dimensions,
};
pub use error::Error;
pub use fonts::FontLibrary;
pub use output::{ARCHIVE_NAME, GeneratedImage, sanitize_filename, write_to_dir, zip_archive};
pub use render::{cover_rect, decode_image, encode_png, line_centers, line_origin, rounded_rect_path};

use std::time::Instant;

/// Renders every blank-line-separated block of `text` into a panel.
///
/// Rendering is deterministic and stateless per call: the same configuration,
/// text, and font availability produce byte-identical PNGs. Empty or
/// whitespace-only input is rejected before anything is rendered.
pub fn generate_panels(
    config: &RenderConfig,
    fonts: &FontLibrary,
    text: &str,
) -> Result<Vec<GeneratedImage>, Error> {
    let t0 = Instant::now();

    if text.trim().is_empty() {
        return Err(Error::EmptyInput);
    }

    let config = config.clone().normalized();
    let font = fonts.resolve(&config.font_family, &config.font_weight);
    let t_font = t0.elapsed();

    let blocks = split_blocks(text);
    let mut images = Vec::with_capacity(blocks.len());
    for (i, block) in blocks.into_iter().enumerate() {
        let surface = render::render_panel(&config, font.as_deref(), &block)?;
        let png = render::encode_png(&surface)?;
        log::debug!(
            "panel {}: {} lines, {} bytes",
            i + 1,
            block.split('\n').count(),
            png.len(),
        );
        images.push(GeneratedImage {
            index: i + 1,
            text: block,
            png,
        });
    }
    let t_total = t0.elapsed();

    log::info!(
        "Timing: fonts={:.1}ms, render={:.1}ms, total={:.1}ms ({} panels)",
        t_font.as_secs_f64() * 1000.0,
        (t_total - t_font).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        images.len(),
    );

    Ok(images)
}
