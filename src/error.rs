// One error type for the whole crate.
// Every variant states *where* things went wrong.
use std::fmt::{self, Display};
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    InvalidDimension { size: u32, min: u32, max: u32 }, // Canvas size outside the drawable range
    Io { path: PathBuf, source: std::io::Error }, // Writing an output file failed
    Encode(image::ImageError),                // PNG encoding/decoding failed
    Style(String),                            // Style file unreadable or invalid
    Usage(String),                            // Bad command-line arguments
    Window(String),                           // Preview window failed
    LayerSize(String),                        // Two layers disagree on dimensions
}

impl Display for Error {
    // This decides how the error is printed to your console.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDimension { size, min, max } => {
                write!(f, "Invalid dimension: {size} (must be {min}..={max})")
            }
            Error::Io { path, source } => write!(f, "I/O error at {}: {source}", path.display()),
            Error::Encode(e) => write!(f, "Image encode error: {e}"),
            Error::Style(s) => write!(f, "Style error: {s}"),
            Error::Usage(s) => write!(f, "Usage error: {s}"),
            Error::Window(s) => write!(f, "Window error: {s}"),
            Error::LayerSize(s) => write!(f, "Layer size mismatch: {s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            Error::Encode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Encode(e)
    }
}

impl Error {
    /// Attach the offending path to an I/O error.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}
