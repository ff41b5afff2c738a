//! Service ports: traits + data contracts.

pub mod file;
pub mod image;
pub mod prompt;
pub mod settings;

pub use file::{DocumentFiles, FileError, Result as FileResult};
pub use self::image::{ImageError, ImageLoader};
pub use prompt::{FileDialog, FileFilter, Prompts};
pub use settings::{KeybindingRule, Settings, ThemeSettings, DEFAULT_FONT_SIZE};
