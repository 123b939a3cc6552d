use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// Input text was empty or whitespace-only; nothing to render.
    EmptyInput,
    /// Bulk export requested with no generated images.
    NoImages,
    /// A user-supplied font file could not be parsed.
    Font(String),
    /// A drawing surface could not be allocated (zero-sized or too large).
    Surface(String),
    Io(std::io::Error),
    Image(image::ImageError),
    Zip(zip::result::ZipError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "no text to render"),
            Error::NoImages => write!(f, "no generated images to export"),
            Error::Font(msg) => write!(f, "font error: {msg}"),
            Error::Surface(msg) => write!(f, "surface error: {msg}"),
            Error::Io(e) => write!(f, "io error: {e}"),
            Error::Image(e) => write!(f, "image error: {e}"),
            Error::Zip(e) => write!(f, "zip error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Image(e) => Some(e),
            Error::Zip(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e)
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        Error::Zip(e)
    }
}
