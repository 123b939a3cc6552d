use std::io::{Cursor, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;

use crate::error::Error;

/// Default name of the bulk-export archive.
pub const ARCHIVE_NAME: &str = "images.zip";

/// One rendered panel: 1-based sequence index, the source text block, and the
/// encoded PNG bytes. The staging list for a run owns these until exported;
/// a new run replaces the whole list.
pub struct GeneratedImage {
    pub index: usize,
    pub text: String,
    pub png: Vec<u8>,
}

impl GeneratedImage {
    /// Export filename: `{index}_{sanitizedText}.png`.
    pub fn file_name(&self) -> String {
        format!("{}_{}.png", self.index, sanitize_filename(&self.text))
    }
}

/// Filename-safe digest of a text block: forbidden filesystem characters are
/// stripped, the first 10 characters are kept, surrounding whitespace is
/// trimmed, and an empty result falls back to "image".
pub fn sanitize_filename(text: &str) -> String {
    const FORBIDDEN: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];
    let cleaned: String = text
        .chars()
        .filter(|c| !FORBIDDEN.contains(c))
        .take(10)
        .collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        "image".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Writes each panel as an individual PNG file into `dir`.
pub fn write_to_dir(images: &[GeneratedImage], dir: &Path) -> Result<(), Error> {
    std::fs::create_dir_all(dir)?;
    for img in images {
        let path = dir.join(img.file_name());
        std::fs::write(&path, &img.png)?;
        log::debug!("wrote {} ({} bytes)", path.display(), img.png.len());
    }
    log::info!("wrote {} panels to {}", images.len(), dir.display());
    Ok(())
}

/// Packs the current run's panels into a zip archive, in order, under the
/// same names as the per-image export. An empty run is an error.
pub fn zip_archive(images: &[GeneratedImage]) -> Result<Vec<u8>, Error> {
    if images.is_empty() {
        return Err(Error::NoImages);
    }
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    // PNG payloads are already compressed; store them as-is.
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for img in images {
        writer.start_file(img.file_name(), options)?;
        writer.write_all(&img.png)?;
    }
    Ok(writer.finish()?.into_inner())
}
