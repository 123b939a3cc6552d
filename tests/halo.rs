mod common;

use common::decode;
use image::RgbaImage;
use panelmaker::{
    BackgroundMode, DoubleOutlineMode, FontLibrary, RenderConfig, generate_panels,
};

fn halo_config(mode: DoubleOutlineMode) -> RenderConfig {
    RenderConfig {
        width: 240,
        height: 120,
        background: BackgroundMode::Transparent,
        font_size: 60.0,
        text_color: [0, 0, 0],
        outline_enabled: true,
        outline_color: [0, 0, 0],
        outline_width: 2.0,
        double_outline_enabled: true,
        double_outline_mode: mode,
        double_outline_color: [255, 0, 0],
        double_outline_width: 6.0,
        ..RenderConfig::default()
    }
}

fn render_halo(fonts: &FontLibrary, mode: DoubleOutlineMode) -> (Vec<u8>, RgbaImage) {
    let images = generate_panels(&halo_config(mode), fonts, "Oh").unwrap();
    assert_eq!(images.len(), 1);
    let decoded = decode(&images[0].png);
    (images[0].png.clone(), decoded)
}

fn partial_alpha_count(img: &RgbaImage) -> usize {
    img.pixels().filter(|p| p.0[3] > 0 && p.0[3] < 255).count()
}

#[test]
fn blur_halo_renders_differently_from_a_stroked_halo() {
    let _ = env_logger::try_init();
    let fonts = FontLibrary::new();
    if fonts.resolve("Noto Sans JP", "700").is_none() {
        // No glyph source on this machine, nothing to halo.
        return;
    }

    let (normal_png, _) = render_halo(&fonts, DoubleOutlineMode::Normal);
    let (blur_png, _) = render_halo(&fonts, DoubleOutlineMode::Blur);
    assert_ne!(
        normal_png, blur_png,
        "a blurred halo must not rasterize like a stroked one"
    );
}

/// The blurred halo spreads a wide band of partial alpha around each glyph
/// (kernel reach is three times the halo width), while the stroked halo only
/// has thin anti-aliased contour edges.
#[test]
fn blur_halo_fades_out_with_soft_alpha() {
    let _ = env_logger::try_init();
    let fonts = FontLibrary::new();
    if fonts.resolve("Noto Sans JP", "700").is_none() {
        return;
    }

    let (_, normal) = render_halo(&fonts, DoubleOutlineMode::Normal);
    let (_, blur) = render_halo(&fonts, DoubleOutlineMode::Blur);

    let soft_normal = partial_alpha_count(&normal);
    let soft_blur = partial_alpha_count(&blur);
    assert!(soft_blur > 0, "blurred render produced no glyph coverage");
    assert!(
        soft_blur > soft_normal,
        "blur mode must fade out ({soft_blur} partial-alpha pixels vs {soft_normal})"
    );
}
