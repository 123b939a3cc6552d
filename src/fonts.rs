use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use memmap2::Mmap;
use ttf_parser::Face;

use crate::error::Error;

/// Raw font bytes plus the face index within a collection. `Face` borrows the
/// data, so the renderer re-parses per panel; parsing is a cheap table scan.
pub struct FontData {
    pub(crate) data: Vec<u8>,
    pub(crate) face_index: u32,
}

impl FontData {
    pub(crate) fn face(&self) -> Option<Face<'_>> {
        Face::parse(&self.data, self.face_index).ok()
    }
}

/// Fonts registered by the caller plus lazy access to the system font index.
///
/// Registered fonts shadow system fonts of the same family name, mirroring
/// how a user-uploaded font takes priority over the preset list.
#[derive(Default)]
pub struct FontLibrary {
    registered: HashMap<String, Arc<FontData>>,
}

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers raw font bytes under `name`. Malformed data is rejected and
    /// leaves the library unchanged.
    pub fn register(&mut self, name: &str, data: Vec<u8>) -> Result<(), Error> {
        if Face::parse(&data, 0).is_err() {
            return Err(Error::Font(format!("cannot parse font file for {name:?}")));
        }
        log::info!("registered font {name:?} ({} bytes)", data.len());
        self.registered.insert(
            name.to_lowercase(),
            Arc::new(FontData {
                data,
                face_index: 0,
            }),
        );
        Ok(())
    }

    /// Resolves a family name and weight token to loaded font data.
    ///
    /// Order: registered fonts, then the system index, then the generic
    /// fallback family implied by the name. Returns `None` (with a warning)
    /// when nothing matches; rendering proceeds without glyphs rather than
    /// failing the run.
    pub fn resolve(&self, family: &str, weight: &str) -> Option<Arc<FontData>> {
        let bold = is_bold_weight(weight);

        if let Some(font) = self.registered.get(&family.to_lowercase()) {
            return Some(font.clone());
        }
        if let Some(font) = load_system_font(family, bold) {
            return Some(font);
        }

        let generic = generic_fallback(family);
        for candidate in generic_candidates(generic) {
            if let Some(font) = self.registered.get(&candidate.to_lowercase()) {
                log::warn!("font {family:?} not found, using {candidate:?} ({generic})");
                return Some(font.clone());
            }
            if let Some(font) = load_system_font(candidate, bold) {
                log::warn!("font {family:?} not found, using {candidate:?} ({generic})");
                return Some(font);
            }
        }

        log::warn!("font {family:?} not found and no {generic} fallback available");
        None
    }
}

/// CSS-style weight token to a bold flag; the system index only distinguishes
/// regular from bold.
fn is_bold_weight(weight: &str) -> bool {
    match weight.trim().to_ascii_lowercase().as_str() {
        "bold" | "bolder" => true,
        s => s.parse::<u32>().map(|w| w >= 600).unwrap_or(false),
    }
}

/// Generic family heuristic used when the requested family fails to load:
/// "Gothic" or "One" in the name means cursive, "Serif" means serif,
/// everything else sans-serif. Cursive markers win when a name carries both.
/// Not exhaustive, just the common presets.
pub(crate) fn generic_fallback(family: &str) -> &'static str {
    if family.contains("Gothic") || family.contains("One") {
        "cursive"
    } else if family.contains("Serif") {
        "serif"
    } else {
        "sans-serif"
    }
}

fn generic_candidates(generic: &str) -> &'static [&'static str] {
    match generic {
        "serif" => &[
            "Noto Serif",
            "DejaVu Serif",
            "Liberation Serif",
            "Times New Roman",
        ],
        "cursive" => &["Comic Sans MS", "Segoe Script", "DejaVu Sans"],
        _ => &[
            "Noto Sans",
            "DejaVu Sans",
            "Liberation Sans",
            "Arial",
            "Helvetica",
        ],
    }
}

/// (lowercase family name, bold) -> (file path, face index within TTC)
type FontLookup = HashMap<(String, bool), (PathBuf, u32)>;

static FONT_INDEX: OnceLock<FontLookup> = OnceLock::new();

fn load_system_font(family: &str, bold: bool) -> Option<Arc<FontData>> {
    let (path, face_index) = find_font_file(family, bold)?;
    let data = std::fs::read(&path).ok()?;
    Some(Arc::new(FontData { data, face_index }))
}

/// Looks up a font file by family name and weight in the system index.
/// Falls back to the regular variant when bold is not available.
fn find_font_file(family: &str, bold: bool) -> Option<(PathBuf, u32)> {
    let index = FONT_INDEX.get_or_init(scan_font_dirs);
    let key = family.to_lowercase();
    index
        .get(&(key.clone(), bold))
        .or_else(|| if bold { index.get(&(key, false)) } else { None })
        .cloned()
}

fn font_family_name(face: &Face) -> Option<String> {
    // ID 1 (Family) distinguishes style-specific families the way callers
    // reference them; ID 16 groups them and causes collisions.
    for name in face.names() {
        if name.name_id == ttf_parser::name_id::FAMILY
            && name.is_unicode()
            && let Some(s) = name.to_string()
        {
            return Some(s);
        }
    }
    None
}

fn read_font_style(data: &[u8], face_index: u32) -> Option<(String, bool)> {
    let face = Face::parse(data, face_index).ok()?;
    let family = font_family_name(&face)?;
    // Italic faces would shadow the upright ones in a two-key index.
    if face.is_italic() {
        return None;
    }
    Some((family, face.is_bold()))
}

fn font_directories() -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();

    // 1. User-configured directories via PANELMAKER_FONTS env var
    if let Ok(val) = std::env::var("PANELMAKER_FONTS") {
        let sep = if cfg!(windows) { ';' } else { ':' };
        for part in val.split(sep) {
            let trimmed = part.trim();
            if !trimmed.is_empty() {
                dirs.push(PathBuf::from(trimmed));
            }
        }
    }

    // 2. Platform-specific system font directories
    #[cfg(target_os = "macos")]
    {
        dirs.extend([
            "/Library/Fonts".into(),
            "/System/Library/Fonts".into(),
            "/System/Library/Fonts/Supplemental".into(),
        ]);
        if let Ok(home) = std::env::var("HOME") {
            dirs.push(PathBuf::from(home).join("Library/Fonts"));
        }
    }

    #[cfg(target_os = "linux")]
    {
        dirs.extend(["/usr/share/fonts".into(), "/usr/local/share/fonts".into()]);
        if let Ok(home) = std::env::var("HOME") {
            dirs.push(PathBuf::from(home).join(".local/share/fonts"));
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(windir) = std::env::var("WINDIR") {
            dirs.push(PathBuf::from(windir).join("Fonts"));
        } else {
            dirs.push("C:\\Windows\\Fonts".into());
        }
    }

    dirs
}

fn is_font_file(path: &std::path::Path) -> bool {
    matches!(
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref(),
        Some("ttf" | "otf" | "ttc")
    )
}

fn is_font_collection(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("ttc"))
}

fn scan_font_dirs() -> FontLookup {
    let t0 = std::time::Instant::now();
    let mut index = FontLookup::new();
    let mut files_scanned = 0u32;
    let mut visited: std::collections::HashSet<PathBuf> = std::collections::HashSet::new();

    let mut stack: Vec<PathBuf> = font_directories();
    while let Some(dir) = stack.pop() {
        if !visited.insert(dir.clone()) {
            continue;
        }
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            if !is_font_file(&path) {
                continue;
            }
            files_scanned += 1;
            let Ok(file) = std::fs::File::open(&path) else {
                continue;
            };
            let Ok(data) = (unsafe { Mmap::map(&file) }) else {
                continue;
            };
            let face_count = if is_font_collection(&path) {
                ttf_parser::fonts_in_collection(&data).unwrap_or(1)
            } else {
                1
            };
            for face_idx in 0..face_count {
                if let Some((family, bold)) = read_font_style(&data, face_idx) {
                    index
                        .entry((family.to_lowercase(), bold))
                        .or_insert((path.clone(), face_idx));
                }
            }
        }
    }

    log::info!(
        "Font scan: {:.1}ms, {} files parsed → {} entries",
        t0.elapsed().as_secs_f64() * 1000.0,
        files_scanned,
        index.len(),
    );

    index
}
