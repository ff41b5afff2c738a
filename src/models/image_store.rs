//! Decoded images embedded in the document.
//!
//! The store is append-only for the lifetime of the session: the document only
//! holds `ImageId`s, so every id it can reference must stay resolvable.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(u32);

impl ImageId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    source: PathBuf,
    width: u32,
    height: u32,
    /// Row-major RGBA8 pixels.
    pixels: Vec<u8>,
}

impl EmbeddedImage {
    pub fn new(source: PathBuf, width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            source,
            width,
            height,
            pixels,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn file_name(&self) -> String {
        self.source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string())
    }
}

#[derive(Debug, Default)]
pub struct ImageStore {
    images: Vec<EmbeddedImage>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, image: EmbeddedImage) -> ImageId {
        let id = ImageId(self.images.len() as u32);
        self.images.push(image);
        id
    }

    pub fn get(&self, id: ImageId) -> Option<&EmbeddedImage> {
        self.images.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ImageId, &EmbeddedImage)> {
        self.images
            .iter()
            .enumerate()
            .map(|(idx, image)| (ImageId(idx as u32), image))
    }
}
