//! Data models

pub mod document;
pub mod image_store;
pub mod selection;

pub use document::{slice_to_cow, Document, Run, OBJECT_ANCHOR};
pub use image_store::{EmbeddedImage, ImageId, ImageStore};
pub use selection::Selection;
