//! The editing session: one document, its images, and the commands that act
//! on them.
//!
//! Every command runs to completion inside [`EditorSession::dispatch`]. When a
//! command needs the user it calls the [`Prompts`] port, which blocks until the
//! user answers.

use crate::core::Command;
use crate::kernel::services::adapters::{ImageCrateLoader, LocalFiles};
use crate::kernel::services::ports::{
    DocumentFiles, FileDialog, FileError, FileFilter, ImageLoader, Prompts, DEFAULT_FONT_SIZE,
};
use crate::models::{Document, ImageStore};
use std::path::{Path, PathBuf};

pub const APP_TITLE: &str = "zpad";
pub const BULLET: &str = "\u{2022} ";
pub const CHECKBOX_EMPTY: char = '\u{274F}';
pub const CHECKBOX_CHECKED: char = '\u{2714}';

const DEFAULT_PAGE_LINES: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug)]
pub enum SessionError {
    /// Reading the chosen file failed. The session has no way to recover the
    /// half-finished open, so this ends the program.
    Open { path: PathBuf, source: FileError },
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Open { path, source } => {
                write!(f, "failed to open {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Open { source, .. } => Some(source),
        }
    }
}

/// Font configuration. Values are stored exactly as entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSettings {
    pub size: i64,
    /// Size of the bold attribute's font; follows `size`.
    pub bold_size: i64,
}

impl FontSettings {
    pub fn new(size: i64) -> Self {
        Self {
            size,
            bold_size: size,
        }
    }
}

impl Default for FontSettings {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_SIZE)
    }
}

pub struct EditorSession {
    document: Document,
    images: ImageStore,
    dirty: bool,
    current_path: Option<PathBuf>,
    font: FontSettings,
    page_lines: usize,
    files: Box<dyn DocumentFiles>,
    loader: Box<dyn ImageLoader>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::with_ports(Box::new(LocalFiles::new()), Box::new(ImageCrateLoader::new()))
    }

    pub fn with_ports(files: Box<dyn DocumentFiles>, loader: Box<dyn ImageLoader>) -> Self {
        Self {
            document: Document::new(),
            images: ImageStore::new(),
            dirty: false,
            current_path: None,
            font: FontSettings::default(),
            page_lines: DEFAULT_PAGE_LINES,
            files,
            loader,
        }
    }

    pub fn with_font_size(mut self, size: i64) -> Self {
        self.font = FontSettings::new(size);
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    pub fn font(&self) -> FontSettings {
        self.font
    }

    pub fn title(&self) -> String {
        match &self.current_path {
            Some(path) => format!("{} - {}", APP_TITLE, path.display()),
            None => APP_TITLE.to_string(),
        }
    }

    /// Lines moved by PageUp/PageDown; the frontend keeps it in sync with the
    /// visible height.
    pub fn set_page_lines(&mut self, lines: usize) {
        self.page_lines = lines.max(1);
    }

    pub fn dispatch(
        &mut self,
        command: &Command,
        prompts: &mut dyn Prompts,
    ) -> Result<Flow, SessionError> {
        match command {
            Command::NewFile => self.new_file(prompts),
            Command::OpenFile => self.open_file(prompts)?,
            Command::Save => {
                self.save_file(prompts);
            }
            Command::SaveAs => {
                self.save_as_file(prompts);
            }
            Command::CloseWindow => return Ok(self.close_window(prompts)),
            Command::InsertImage => self.insert_image(prompts),
            Command::SetFontSize => self.set_font_size(prompts),
            Command::InsertBullet => self.insert_bullet(),
            Command::ToggleBold => self.toggle_bold(),
            Command::ToggleCheckbox => self.toggle_checkbox(),
            Command::OpenMenu => {}
            _ => self.apply_text_command(command),
        }
        Ok(Flow::Continue)
    }

    // ==================== File ====================

    fn new_file(&mut self, prompts: &mut dyn Prompts) {
        if self.dirty && prompts.confirm("Save changes?", "Would you like to save your changes?")
        {
            self.save_file(prompts);
        }
        // A declined or failed save still discards.
        self.document.clear();
        self.dirty = false;
        tracing::info!("new document");
    }

    fn open_file(&mut self, prompts: &mut dyn Prompts) -> Result<(), SessionError> {
        let dialog = FileDialog::new("Open")
            .filter(FileFilter::all_files())
            .filter(FileFilter::text_files())
            .default_extension(".txt");
        let Some(path) = prompts.pick_open_path(&dialog) else {
            return Ok(());
        };
        self.open_path(&path)
    }

    /// Replace the document with the contents of `path`. Replacing the buffer
    /// is an edit: the document is dirty afterwards, as with typing.
    pub fn open_path(&mut self, path: &Path) -> Result<(), SessionError> {
        let content = self.files.read_to_string(path).map_err(|source| {
            tracing::error!(path = %path.display(), error = %source, "open failed");
            SessionError::Open {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let content = content.replace("\r\n", "\n").replace('\r', "\n");

        self.document = Document::from_text(&content);
        self.current_path = Some(path.to_path_buf());
        self.dirty = true;
        tracing::info!(path = %path.display(), chars = self.document.len_chars(), "opened");
        Ok(())
    }

    fn save_file(&mut self, prompts: &mut dyn Prompts) -> bool {
        let dialog = FileDialog::new("Save")
            .filter(FileFilter::all_files())
            .filter(FileFilter::text_files())
            .default_extension(".txt")
            .initial(self.current_path.clone());
        self.save_with_dialog(&dialog, prompts)
    }

    fn save_as_file(&mut self, prompts: &mut dyn Prompts) -> bool {
        // The HTML entry only changes what the dialog lists; output is plain text.
        let dialog = FileDialog::new("Save As")
            .filter(FileFilter::all_files())
            .filter(FileFilter::text_files())
            .filter(FileFilter::html_files())
            .default_extension(".txt")
            .initial(self.current_path.clone());
        self.save_with_dialog(&dialog, prompts)
    }

    fn save_with_dialog(&mut self, dialog: &FileDialog, prompts: &mut dyn Prompts) -> bool {
        let Some(path) = prompts.pick_save_path(dialog) else {
            return false;
        };

        let text = self.document.plain_text();
        match self.files.write(&path, &text) {
            Ok(()) => {
                tracing::info!(path = %path.display(), chars = text.chars().count(), "saved");
                self.current_path = Some(path);
                self.dirty = false;
                true
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "save failed");
                prompts.show_error("Save error", &err.to_string());
                false
            }
        }
    }

    fn close_window(&mut self, prompts: &mut dyn Prompts) -> Flow {
        if self.dirty
            && prompts.confirm(
                "Save changes?",
                "You have unsaved changes. Do you want to save before exiting?",
            )
        {
            self.save_file(prompts);
        }
        tracing::info!(dirty = self.dirty, "closing");
        Flow::Exit
    }

    // ==================== Edit menu ====================

    fn insert_image(&mut self, prompts: &mut dyn Prompts) {
        let dialog = FileDialog::new("Insert Image").filter(FileFilter::image_files());
        let Some(path) = prompts.pick_open_path(&dialog) else {
            return;
        };
        let Some(width) = prompts.ask_integer("Width", "Enter image width", None) else {
            return;
        };
        let Some(height) = prompts.ask_integer("Height", "Enter image height", None) else {
            return;
        };

        match self.loader.load(&path, width, height) {
            Ok(image) => {
                let id = self.images.push(image);
                self.document.insert_image(id);
                self.dirty = true;
                tracing::info!(path = %path.display(), width, height, "image inserted");
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "image insert failed");
                prompts.show_error("Image error", &err.to_string());
            }
        }
    }

    fn set_font_size(&mut self, prompts: &mut dyn Prompts) {
        let Some(size) = prompts.ask_integer("Set Font Size", "Enter font size", Some(self.font.size))
        else {
            return;
        };
        self.font = FontSettings::new(size);
        tracing::debug!(size, "font size set");
    }

    fn insert_bullet(&mut self) {
        let line = self.document.line_of(self.document.cursor());
        let start = self.document.line_start(line);
        self.document.insert_at(start, BULLET);
        self.dirty = true;
        tracing::debug!(line, "bullet inserted");
    }

    fn toggle_checkbox(&mut self) {
        let line = self.document.line_of(self.document.cursor());
        let start = self.document.line_start(line);
        let text = self.document.line_text(line);
        let mut chars = text.chars();

        let toggled = match chars.next() {
            Some(CHECKBOX_EMPTY) => Some(CHECKBOX_CHECKED),
            Some(CHECKBOX_CHECKED) => Some(CHECKBOX_EMPTY),
            _ => None,
        };

        match toggled {
            Some(glyph) => {
                let marker_len = if chars.next() == Some(' ') { 2 } else { 1 };
                self.document.delete_range(start..start + marker_len);
                self.document.insert_at(start, &format!("{glyph} "));
            }
            None => {
                self.document.insert_at(start, &format!("{CHECKBOX_EMPTY} "));
            }
        }
        self.dirty = true;
        tracing::debug!(line, "checkbox toggled");
    }

    fn toggle_bold(&mut self) {
        let Some(sel) = self.document.selection() else {
            return;
        };
        if self.document.is_bold_at(sel.start()) {
            self.document.remove_bold(sel.range());
        } else {
            self.document.add_bold(sel.range());
        }
        tracing::debug!(start = sel.start(), end = sel.end(), "bold toggled");
    }

    // ==================== Text entry ====================

    fn apply_text_command(&mut self, command: &Command) {
        let doc = &mut self.document;
        let changed = match command {
            Command::InsertChar(ch) => {
                let mut buf = [0u8; 4];
                doc.insert_text(ch.encode_utf8(&mut buf)) > 0
            }
            Command::InsertText(text) => doc.insert_text(text) > 0,
            Command::InsertNewline => doc.insert_text("\n") > 0,
            Command::InsertTab => doc.insert_text("\t") > 0,
            Command::DeleteBackward => doc.delete_backward() > 0,
            Command::DeleteForward => doc.delete_forward() > 0,
            Command::CursorLeft => {
                doc.move_left(false);
                false
            }
            Command::CursorRight => {
                doc.move_right(false);
                false
            }
            Command::CursorUp => {
                doc.move_vertical(-1, false);
                false
            }
            Command::CursorDown => {
                doc.move_vertical(1, false);
                false
            }
            Command::CursorLineStart => {
                doc.move_line_start(false);
                false
            }
            Command::CursorLineEnd => {
                doc.move_line_end(false);
                false
            }
            Command::CursorFileStart => {
                doc.move_doc_start(false);
                false
            }
            Command::CursorFileEnd => {
                doc.move_doc_end(false);
                false
            }
            Command::PageUp => {
                doc.move_vertical(-(self.page_lines as isize), false);
                false
            }
            Command::PageDown => {
                doc.move_vertical(self.page_lines as isize, false);
                false
            }
            Command::ExtendLeft => {
                doc.move_left(true);
                false
            }
            Command::ExtendRight => {
                doc.move_right(true);
                false
            }
            Command::ExtendUp => {
                doc.move_vertical(-1, true);
                false
            }
            Command::ExtendDown => {
                doc.move_vertical(1, true);
                false
            }
            Command::ExtendLineStart => {
                doc.move_line_start(true);
                false
            }
            Command::ExtendLineEnd => {
                doc.move_line_end(true);
                false
            }
            Command::SelectAll => {
                doc.select_all();
                false
            }
            Command::ClearSelection => {
                doc.clear_selection();
                false
            }
            _ => false,
        };
        if changed {
            self.dirty = true;
        }
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/session.rs"]
mod tests;
