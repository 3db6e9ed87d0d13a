//! Custom error types for image carving

use std::fmt;
use std::io;

/// Carving-specific error types
#[derive(Debug)]
pub enum CarveError {
    /// I/O error on the input stream or the output directory
    IoError(io::Error),
    /// Image encoding error while saving a PNG
    ImageError(image::ImageError),
    /// Channel layout string failed validation
    InvalidMode(String),
    /// Command-line argument could not be interpreted
    InvalidArgument(String),
    /// Presets file could not be parsed
    InvalidPresets(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for CarveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarveError::IoError(e) => write!(f, "I/O error: {}", e),
            CarveError::ImageError(e) => write!(f, "Image error: {}", e),
            CarveError::InvalidMode(msg) => write!(f, "Invalid mode: {}", msg),
            CarveError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CarveError::InvalidPresets(msg) => write!(f, "Invalid presets: {}", msg),
            CarveError::GenericError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CarveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CarveError::IoError(e) => Some(e),
            CarveError::ImageError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CarveError {
    fn from(error: io::Error) -> Self {
        CarveError::IoError(error)
    }
}

impl From<image::ImageError> for CarveError {
    fn from(error: image::ImageError) -> Self {
        CarveError::ImageError(error)
    }
}

/// Result type for carving operations
pub type CarveResult<T> = Result<T, CarveError>;
