//! `image` crate implementation of `ImageLoader`.

use crate::kernel::services::ports::image::{ImageError, ImageLoader};
use crate::models::EmbeddedImage;
use image::imageops::FilterType;
use std::path::Path;

#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCrateLoader;

impl ImageCrateLoader {
    pub fn new() -> Self {
        Self
    }
}

impl ImageLoader for ImageCrateLoader {
    fn load(&self, path: &Path, width: i64, height: i64) -> Result<EmbeddedImage, ImageError> {
        // The resampler needs a non-empty target.
        let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
            _ => return Err(ImageError::InvalidSize { width, height }),
        };

        let decoded = image::open(path).map_err(|e| match e {
            image::ImageError::IoError(io) => ImageError::Io(io),
            other => ImageError::Decode {
                path: path.to_path_buf(),
                message: other.to_string(),
            },
        })?;

        let resized = decoded.resize_exact(w, h, FilterType::Lanczos3).to_rgba8();
        tracing::debug!(
            path = %path.display(),
            width = w,
            height = h,
            "image decoded"
        );
        Ok(EmbeddedImage::new(
            path.to_path_buf(),
            resized.width(),
            resized.height(),
            resized.into_raw(),
        ))
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/image.rs"]
mod tests;
