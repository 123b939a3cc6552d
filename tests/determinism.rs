mod common;

use panelmaker::{BlendMode, DoubleOutlineMode, FontLibrary, RenderConfig, generate_panels};

/// Identical configuration and text must yield byte-identical PNGs across
/// runs (given identical font availability on the machine), for both
/// double-outline modes; the blurred halo goes through the gaussian pass.
#[test]
fn repeated_generation_is_pixel_identical() {
    let _ = env_logger::try_init();
    let fonts = FontLibrary::new();
    let text = "Hello\nWorld\n\nSecond panel";

    for mode in [DoubleOutlineMode::Normal, DoubleOutlineMode::Blur] {
        let config = RenderConfig {
            width: 320,
            height: 240,
            background: panelmaker::BackgroundMode::Color,
            bg_color: [240, 240, 255],
            corner_radius: 16.0,
            padding: 8.0,
            border_enabled: true,
            border_color: [30, 30, 30],
            border_width: 6.0,
            border_image_enabled: true,
            border_image: Some(common::solid_bitmap(8, 8, [0, 128, 255, 255])),
            border_image_blend: BlendMode::Multiply,
            border_image_opacity: 80,
            double_outline_enabled: true,
            double_outline_mode: mode,
            ..RenderConfig::default()
        };

        let first = generate_panels(&config, &fonts, text).unwrap();
        let second = generate_panels(&config, &fonts, text).unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.index, b.index);
            assert_eq!(a.text, b.text);
            assert_eq!(a.file_name(), b.file_name());
            assert_eq!(
                a.png, b.png,
                "panel {} differs between runs ({mode:?})",
                a.index
            );
        }
    }
}
