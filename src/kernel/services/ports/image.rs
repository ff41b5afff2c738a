//! Image decoding for inline images.

use crate::models::EmbeddedImage;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ImageError {
    Io(std::io::Error),
    Decode { path: PathBuf, message: String },
    /// The requested size cannot be produced by the resampler.
    InvalidSize { width: i64, height: i64 },
}

impl std::fmt::Display for ImageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageError::Io(e) => write!(f, "IO error: {}", e),
            ImageError::Decode { path, message } => {
                write!(f, "Cannot decode {}: {}", path.display(), message)
            }
            ImageError::InvalidSize { width, height } => {
                write!(f, "Cannot resize image to {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for ImageError {}

impl From<std::io::Error> for ImageError {
    fn from(e: std::io::Error) -> Self {
        ImageError::Io(e)
    }
}

/// Decodes an image file and resamples it to exactly `width` x `height`.
///
/// The dimensions are forwarded exactly as the user entered them; whether a
/// value is usable is up to the implementation.
pub trait ImageLoader {
    fn load(&self, path: &Path, width: i64, height: i64) -> Result<EmbeddedImage, ImageError>;
}
