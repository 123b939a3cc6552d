use tiny_skia::Pixmap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackgroundMode {
    Transparent,
    Color,
    Image,
}

impl BackgroundMode {
    /// Parses a mode name; unrecognized values fall back to `Transparent`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "color" => BackgroundMode::Color,
            "image" => BackgroundMode::Image,
            _ => BackgroundMode::Transparent,
        }
    }
}

/// Compositing mode for the border-image overlay. A closed set; anything
/// unrecognized is treated as `Normal`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendMode {
    Normal,
    Overlay,
    Multiply,
    Screen,
}

impl BlendMode {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "overlay" => BlendMode::Overlay,
            "multiply" => BlendMode::Multiply,
            "screen" => BlendMode::Screen,
            _ => BlendMode::Normal,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => TextAlign::Left,
            "right" => TextAlign::Right,
            _ => TextAlign::Center,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoubleOutlineMode {
    /// Second stroked halo behind the primary outline.
    Normal,
    /// Soft blurred halo behind the primary outline.
    Blur,
}

impl DoubleOutlineMode {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "blur" => DoubleOutlineMode::Blur,
            _ => DoubleOutlineMode::Normal,
        }
    }
}

/// Flat per-run rendering configuration. Immutable during a generation run;
/// decoded bitmaps are referenced read-only by the renderer.
#[derive(Clone)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub background: BackgroundMode,
    pub bg_color: [u8; 3],
    pub bg_image: Option<Pixmap>,
    pub corner_radius: f32,
    pub padding: f32,
    pub border_enabled: bool,
    pub border_color: [u8; 3],
    pub border_width: f32,
    pub border_image_enabled: bool,
    pub border_image: Option<Pixmap>,
    pub border_image_blend: BlendMode,
    /// Overlay opacity in percent, 0..=100.
    pub border_image_opacity: u8,
    pub font_family: String,
    pub font_weight: String,
    pub font_size: f32,
    pub text_color: [u8; 3],
    pub text_align: TextAlign,
    pub outline_enabled: bool,
    pub outline_color: [u8; 3],
    pub outline_width: f32,
    pub double_outline_enabled: bool,
    pub double_outline_mode: DoubleOutlineMode,
    pub double_outline_color: [u8; 3],
    pub double_outline_width: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: BackgroundMode::Transparent,
            bg_color: [0xff, 0xff, 0xff],
            bg_image: None,
            corner_radius: 0.0,
            padding: 0.0,
            border_enabled: false,
            border_color: [0x00, 0x00, 0x00],
            border_width: 3.0,
            border_image_enabled: false,
            border_image: None,
            border_image_blend: BlendMode::Normal,
            border_image_opacity: 100,
            font_family: "Noto Sans JP".to_string(),
            font_weight: "700".to_string(),
            font_size: 45.0,
            text_color: [0x00, 0x00, 0x00],
            text_align: TextAlign::Center,
            outline_enabled: true,
            outline_color: [0xff, 0xff, 0xff],
            outline_width: 5.0,
            double_outline_enabled: false,
            double_outline_mode: DoubleOutlineMode::Normal,
            double_outline_color: [0x00, 0x00, 0x00],
            double_outline_width: 3.0,
        }
    }
}

impl RenderConfig {
    /// Clamps numeric fields to their valid ranges and resolves the
    /// cross-field rules the rendering core relies on:
    ///
    /// - a double outline is only effective when the primary outline is
    ///   enabled with width >= 1;
    /// - the border-image overlay is only effective when the border itself is
    ///   enabled and a border bitmap is present.
    pub fn normalized(mut self) -> Self {
        self.width = self.width.max(1);
        self.height = self.height.max(1);

        let min_dim = self.width.min(self.height) as f32;
        if !self.corner_radius.is_finite() {
            self.corner_radius = 0.0;
        }
        self.corner_radius = self.corner_radius.clamp(0.0, min_dim / 2.0);

        // Padding must leave at least a 1x1 content surface.
        if !self.padding.is_finite() {
            self.padding = 0.0;
        }
        self.padding = self.padding.clamp(0.0, ((min_dim - 1.0) / 2.0).max(0.0));

        self.border_width = if self.border_width.is_finite() {
            self.border_width.max(0.0)
        } else {
            0.0
        };
        self.outline_width = if self.outline_width.is_finite() {
            self.outline_width.max(0.0)
        } else {
            0.0
        };
        self.double_outline_width = if self.double_outline_width.is_finite() {
            self.double_outline_width.max(0.0)
        } else {
            0.0
        };
        self.border_image_opacity = self.border_image_opacity.min(100);

        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            self.font_size = DEFAULT_FONT_SIZE;
        }

        if !self.outline_enabled || self.outline_width < 1.0 {
            self.double_outline_enabled = false;
        }
        if !self.border_enabled || self.border_image.is_none() {
            self.border_image_enabled = false;
        }

        self
    }
}

pub const DEFAULT_FONT_SIZE: f32 = 45.0;

/// Parses a numeric field, falling back to `default` on malformed input.
pub fn parse_u32_or(s: &str, default: u32) -> u32 {
    s.trim().parse().unwrap_or(default)
}

pub fn parse_f32_or(s: &str, default: f32) -> f32 {
    match s.trim().parse::<f32>() {
        Ok(v) if v.is_finite() => v,
        _ => default,
    }
}

/// Parses `#rrggbb` (leading `#` optional) into an RGB triple.
pub fn parse_hex_color(s: &str) -> Option<[u8; 3]> {
    let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}

pub fn parse_hex_color_or(s: &str, default: [u8; 3]) -> [u8; 3] {
    parse_hex_color(s).unwrap_or(default)
}

/// Canvas dimensions from an aspect ratio: reduce by the gcd, scale by 100.
/// `16:9` becomes 1600x900.
pub fn ratio_dimensions(w: u32, h: u32) -> Option<(u32, u32)> {
    if w == 0 || h == 0 {
        return None;
    }
    let mut a = w;
    let mut b = h;
    while b != 0 {
        (a, b) = (b, a % b);
    }
    Some((w / a * 100, h / a * 100))
}
