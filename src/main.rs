use std::io::Read;
use std::path::PathBuf;

use clap::Parser;

use panelmaker::{
    ARCHIVE_NAME, BackgroundMode, BlendMode, DoubleOutlineMode, Error, FontLibrary, RenderConfig,
    TextAlign, decode_image, generate_panels, parse_hex_color_or, ratio_dimensions, write_to_dir,
    zip_archive,
};

/// Renders text blocks (separated by blank lines) into styled PNG panels.
#[derive(Parser)]
#[command(name = "panelmaker", version, about)]
struct Args {
    /// Input text file; "-" reads from stdin
    input: PathBuf,

    /// Directory for the rendered PNGs
    #[arg(long, default_value = "panels")]
    out_dir: PathBuf,

    /// Also write an images.zip archive into the output directory
    #[arg(long)]
    zip: bool,

    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Canvas size from an aspect ratio, e.g. "16:9" (overrides width/height)
    #[arg(long)]
    ratio: Option<String>,

    /// Background mode: transparent, color, or image
    #[arg(long, default_value = "transparent")]
    background: String,

    #[arg(long, default_value = "#ffffff")]
    bg_color: String,

    /// Background image file (PNG/JPEG), cover-scaled to the canvas
    #[arg(long)]
    bg_image: Option<PathBuf>,

    #[arg(long, default_value_t = 0.0)]
    corner_radius: f32,

    /// Content padding; background and text render into the inset area
    #[arg(long, default_value_t = 0.0)]
    padding: f32,

    #[arg(long)]
    border: bool,

    #[arg(long, default_value = "#000000")]
    border_color: String,

    #[arg(long, default_value_t = 3.0)]
    border_width: f32,

    /// Pattern image confined to the border ring
    #[arg(long)]
    border_image: Option<PathBuf>,

    /// Border-image blend mode: normal, overlay, multiply, or screen
    #[arg(long, default_value = "normal")]
    blend_mode: String,

    /// Border-image opacity in percent
    #[arg(long, default_value_t = 100)]
    border_image_opacity: u8,

    #[arg(long, default_value = "Noto Sans JP")]
    font_family: String,

    /// Font file to register; takes priority over system fonts
    #[arg(long)]
    font_file: Option<PathBuf>,

    #[arg(long, default_value = "700")]
    font_weight: String,

    #[arg(long, default_value_t = 45.0)]
    font_size: f32,

    #[arg(long, default_value = "#000000")]
    text_color: String,

    /// Text alignment: left, center, or right
    #[arg(long, default_value = "center")]
    align: String,

    #[arg(long)]
    no_outline: bool,

    #[arg(long, default_value = "#ffffff")]
    outline_color: String,

    #[arg(long, default_value_t = 5.0)]
    outline_width: f32,

    #[arg(long)]
    double_outline: bool,

    /// Double-outline mode: normal (stroke) or blur (halo)
    #[arg(long, default_value = "normal")]
    double_outline_mode: String,

    #[arg(long, default_value = "#000000")]
    double_outline_color: String,

    #[arg(long, default_value_t = 3.0)]
    double_outline_width: f32,
}

fn read_input(path: &PathBuf) -> Result<String, Error> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn load_bitmap(path: &PathBuf) -> Result<tiny_skia::Pixmap, Error> {
    decode_image(&std::fs::read(path)?)
}

fn run(args: Args) -> Result<(), Error> {
    let text = read_input(&args.input)?;

    let mut fonts = FontLibrary::new();
    let mut font_family = args.font_family.clone();
    if let Some(path) = &args.font_file {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "UserFont".to_string());
        fonts.register(&name, std::fs::read(path)?)?;
        font_family = name;
    }

    let (width, height) = match &args.ratio {
        Some(ratio) => {
            let parts: Vec<u32> = ratio.split(':').filter_map(|p| p.trim().parse().ok()).collect();
            match parts.as_slice() {
                [w, h] => ratio_dimensions(*w, *h).unwrap_or((args.width, args.height)),
                _ => {
                    log::warn!("unparsable ratio {ratio:?}, keeping --width/--height");
                    (args.width, args.height)
                }
            }
        }
        None => (args.width, args.height),
    };

    let config = RenderConfig {
        width,
        height,
        background: BackgroundMode::parse(&args.background),
        bg_color: parse_hex_color_or(&args.bg_color, [0xff, 0xff, 0xff]),
        bg_image: args.bg_image.as_ref().map(load_bitmap).transpose()?,
        corner_radius: args.corner_radius,
        padding: args.padding,
        border_enabled: args.border,
        border_color: parse_hex_color_or(&args.border_color, [0, 0, 0]),
        border_width: args.border_width,
        border_image_enabled: args.border_image.is_some(),
        border_image: args.border_image.as_ref().map(load_bitmap).transpose()?,
        border_image_blend: BlendMode::parse(&args.blend_mode),
        border_image_opacity: args.border_image_opacity,
        font_family,
        font_weight: args.font_weight.clone(),
        font_size: args.font_size,
        text_color: parse_hex_color_or(&args.text_color, [0, 0, 0]),
        text_align: TextAlign::parse(&args.align),
        outline_enabled: !args.no_outline,
        outline_color: parse_hex_color_or(&args.outline_color, [0xff, 0xff, 0xff]),
        outline_width: args.outline_width,
        double_outline_enabled: args.double_outline,
        double_outline_mode: DoubleOutlineMode::parse(&args.double_outline_mode),
        double_outline_color: parse_hex_color_or(&args.double_outline_color, [0, 0, 0]),
        double_outline_width: args.double_outline_width,
    };

    let images = generate_panels(&config, &fonts, &text)?;
    write_to_dir(&images, &args.out_dir)?;
    if args.zip {
        let archive = zip_archive(&images)?;
        std::fs::write(args.out_dir.join(ARCHIVE_NAME), archive)?;
    }

    println!("{} panels written to {}", images.len(), args.out_dir.display());
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run(Args::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
