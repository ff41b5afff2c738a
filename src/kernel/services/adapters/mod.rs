//! Service adapters: OS specific implementations.

pub mod file;
pub mod image;
pub mod keybinding;
pub mod settings;

pub use self::image::ImageCrateLoader;
pub use file::LocalFiles;
pub use keybinding::{KeybindingContext, KeybindingService};
pub use settings::{
    ensure_log_dir, ensure_settings_file, get_log_dir, get_settings_path, load_settings,
    parse_keybinding,
};
