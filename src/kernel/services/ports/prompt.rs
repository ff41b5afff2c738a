//! Modal interaction with the user.
//!
//! Every call blocks until the user answers and returns the answer directly.
//! Dismissing a dialog is reported as `None` (or `false` for `confirm`).

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub label: String,
    pub patterns: Vec<String>,
}

impl FileFilter {
    pub fn new(label: &str, patterns: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn all_files() -> Self {
        Self::new("All Files", &["*.*"])
    }

    pub fn text_files() -> Self {
        Self::new("Text Files", &["*.txt"])
    }

    pub fn html_files() -> Self {
        Self::new("HTML Files", &["*.html"])
    }

    pub fn image_files() -> Self {
        Self::new("Image Files", &["*.png", "*.jpg", "*.jpeg", "*.bmp"])
    }

    /// `"Text Files (*.txt)"`
    pub fn describe(&self) -> String {
        format!("{} ({})", self.label, self.patterns.join(" "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDialog {
    pub title: String,
    pub filters: Vec<FileFilter>,
    /// Appended by the save prompt when the chosen name has no extension.
    pub default_extension: Option<String>,
    pub initial: Option<PathBuf>,
}

impl FileDialog {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            filters: Vec::new(),
            default_extension: None,
            initial: None,
        }
    }

    pub fn filter(mut self, filter: FileFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn default_extension(mut self, ext: &str) -> Self {
        self.default_extension = Some(ext.to_string());
        self
    }

    pub fn initial(mut self, path: Option<PathBuf>) -> Self {
        self.initial = path;
        self
    }

    /// Append the default extension to a name that has none.
    pub fn with_default_extension(&self, path: PathBuf) -> PathBuf {
        match (&self.default_extension, path.extension()) {
            (Some(ext), None) => path.with_extension(ext.trim_start_matches('.')),
            _ => path,
        }
    }
}

pub trait Prompts {
    fn pick_open_path(&mut self, dialog: &FileDialog) -> Option<PathBuf>;

    fn pick_save_path(&mut self, dialog: &FileDialog) -> Option<PathBuf>;

    fn ask_integer(&mut self, title: &str, prompt: &str, initial: Option<i64>) -> Option<i64>;

    fn confirm(&mut self, title: &str, message: &str) -> bool;

    fn show_error(&mut self, title: &str, message: &str);
}
