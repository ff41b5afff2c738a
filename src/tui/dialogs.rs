//! Modal dialogs drawn over the editor.
//!
//! Each prompt runs its own event loop until the user answers, so the caller
//! sees a plain blocking call. The last editor frame is kept as a backdrop and
//! repainted under the dialog on every draw.

use super::events::EventSource;
use super::theme::UiTheme;
use crate::core::event::{InputEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crate::kernel::services::ports::{FileDialog, Prompts};
use ratatui::backend::Backend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const POLL_INTERVAL: Duration = Duration::from_millis(250);
const MAX_DIALOG_WIDTH: u16 = 64;

// ==================== Text field ====================

/// Single-line text input. `cursor` is a char index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    text: String,
    cursor: usize,
}

impl TextField {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.chars().count(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_at(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(i, _)| i)
    }

    pub fn insert_str(&mut self, s: &str) {
        let s: String = s.chars().filter(|ch| !ch.is_control()).collect();
        let at = self.byte_at(self.cursor);
        self.text.insert_str(at, &s);
        self.cursor += s.chars().count();
    }

    /// Apply an editing key. Returns false for keys the field does not use.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let len = self.text.chars().count();
        match key.code {
            KeyCode::Char(ch)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    || key.modifiers.contains(KeyModifiers::ALT) =>
            {
                let mut buf = [0u8; 4];
                self.insert_str(ch.encode_utf8(&mut buf));
            }
            KeyCode::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_at(self.cursor);
                self.text.remove(at);
            }
            KeyCode::Delete if self.cursor < len => {
                let at = self.byte_at(self.cursor);
                self.text.remove(at);
            }
            KeyCode::Backspace | KeyCode::Delete => {}
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(len),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = len,
            _ => return false,
        }
        true
    }

    /// The part of the text to show in `width` columns so the cursor stays
    /// visible, and the cursor's column within it.
    fn visible(&self, width: usize) -> (String, usize) {
        if width == 0 {
            return (String::new(), 0);
        }
        let chars: Vec<char> = self.text.chars().collect();
        let col_of = |from: usize, to: usize| -> usize {
            chars[from..to].iter().map(|ch| ch.width().unwrap_or(0)).sum()
        };
        let mut skip = 0;
        while skip < self.cursor && col_of(skip, self.cursor) >= width {
            skip += 1;
        }
        let mut shown = String::new();
        let mut used = 0;
        for ch in &chars[skip..] {
            let w = ch.width().unwrap_or(0);
            if used + w > width {
                break;
            }
            used += w;
            shown.push(*ch);
        }
        (shown, col_of(skip, self.cursor))
    }
}

// ==================== Dialog view ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DialogKind {
    Input,
    Question,
    Error,
}

#[derive(Debug, Clone)]
struct DialogView {
    kind: DialogKind,
    title: String,
    message: Vec<String>,
    input: Option<TextField>,
    error: Option<String>,
    hint: &'static str,
}

impl DialogView {
    fn input(title: &str, message: Vec<String>, initial: &str) -> Self {
        Self {
            kind: DialogKind::Input,
            title: title.to_string(),
            message,
            input: Some(TextField::new(initial)),
            error: None,
            hint: "[Enter] OK  [Esc] Cancel",
        }
    }

    fn field_text(&self) -> String {
        self.input
            .as_ref()
            .map(|field| field.text().trim().to_string())
            .unwrap_or_default()
    }
}

fn wrapped_rows(text: &str, width: usize) -> u16 {
    if width == 0 {
        return 1;
    }
    text.width().max(1).div_ceil(width) as u16
}

fn dialog_width(screen: Rect) -> u16 {
    MAX_DIALOG_WIDTH
        .min(screen.width.saturating_sub(4))
        .max(screen.width.min(20))
}

/// Centered box with `rows` content rows.
pub(crate) fn dialog_area(screen: Rect, rows: u16) -> Rect {
    let width = dialog_width(screen);
    let height = (rows + 2).min(screen.height);
    let x = screen.x + screen.width.saturating_sub(width) / 2;
    let y = screen.y + screen.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

fn render_dialog(frame: &mut Frame, view: &DialogView, theme: &UiTheme) {
    let screen = frame.area();
    let inner_w = dialog_width(screen).saturating_sub(2) as usize;

    let mut rows: u16 = view
        .message
        .iter()
        .map(|line| wrapped_rows(line, inner_w))
        .sum();
    if view.input.is_some() {
        rows += 1;
    }
    if let Some(err) = &view.error {
        rows += wrapped_rows(err, inner_w);
    }
    rows += 2; // blank + hint

    let area = dialog_area(screen, rows);
    if area.width < 3 || area.height < 3 {
        return;
    }
    frame.render_widget(Clear, area);

    let border = match view.kind {
        DialogKind::Error => theme.error_fg,
        DialogKind::Input | DialogKind::Question => theme.dialog_border,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            format!(" {} ", view.title),
            Style::default().fg(border).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = view
        .message
        .iter()
        .map(|line| Line::raw(line.clone()))
        .collect();
    let mut cursor = None;
    if let Some(field) = &view.input {
        let field_w = (inner.width as usize).saturating_sub(2);
        let (shown, col) = field.visible(field_w);
        let row: u16 = view
            .message
            .iter()
            .map(|line| wrapped_rows(line, inner.width as usize))
            .sum();
        let pad = field_w.saturating_sub(shown.width());
        lines.push(Line::from(vec![
            Span::raw("> "),
            Span::styled(
                format!("{}{}", shown, " ".repeat(pad)),
                Style::default().add_modifier(Modifier::UNDERLINED),
            ),
        ]));
        cursor = Some((inner.x + 2 + col as u16, inner.y + row));
    }
    if let Some(err) = &view.error {
        lines.push(Line::styled(err.clone(), Style::default().fg(theme.error_fg)));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(view.hint, Style::default().add_modifier(Modifier::DIM)));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    if let Some((x, y)) = cursor {
        if x < inner.right() && y < inner.bottom() {
            frame.set_cursor_position((x, y));
        }
    }
}

// ==================== Prompts ====================

enum Step<T> {
    Stay,
    Done(T),
}

/// [`Prompts`] implemented as modal terminal dialogs.
pub struct TerminalPrompts<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
    events: &'a mut dyn EventSource,
    backdrop: &'a Buffer,
    theme: &'a UiTheme,
}

impl<'a, B: Backend> TerminalPrompts<'a, B> {
    pub fn new(
        terminal: &'a mut Terminal<B>,
        events: &'a mut dyn EventSource,
        backdrop: &'a Buffer,
        theme: &'a UiTheme,
    ) -> Self {
        Self {
            terminal,
            events,
            backdrop,
            theme,
        }
    }

    fn draw(&mut self, view: &DialogView) -> io::Result<()> {
        let backdrop = self.backdrop;
        let theme = self.theme;
        self.terminal.draw(|frame| {
            if backdrop.area == frame.area() {
                frame.buffer_mut().merge(backdrop);
            }
            render_dialog(frame, view, theme);
        })?;
        Ok(())
    }

    /// Run the dialog until `on_key` finishes it. Text input and paste go to
    /// the field when `on_key` leaves a key unhandled.
    fn modal<T>(
        &mut self,
        view: &mut DialogView,
        mut on_key: impl FnMut(&mut DialogView, &KeyEvent) -> Option<Step<T>>,
    ) -> io::Result<T> {
        loop {
            self.draw(view)?;
            let Some(event) = self.events.next_event(POLL_INTERVAL)? else {
                continue;
            };
            match event {
                InputEvent::Key(key) if key.kind != KeyEventKind::Release => {
                    match on_key(view, &key) {
                        Some(Step::Done(value)) => return Ok(value),
                        Some(Step::Stay) => {}
                        None => {
                            if let Some(field) = view.input.as_mut() {
                                if field.handle_key(&key) {
                                    view.error = None;
                                }
                            }
                        }
                    }
                }
                InputEvent::Paste(text) => {
                    if let Some(field) = view.input.as_mut() {
                        field.insert_str(&text);
                        view.error = None;
                    }
                }
                _ => {}
            }
        }
    }

    fn path_modal(
        &mut self,
        dialog: &FileDialog,
        initial: &str,
        must_exist: bool,
    ) -> io::Result<Option<PathBuf>> {
        let types: Vec<String> = dialog.filters.iter().map(|f| f.describe()).collect();
        let mut message = vec!["File name:".to_string()];
        if !types.is_empty() {
            message.insert(0, format!("Types: {}", types.join(", ")));
        }
        let mut view = DialogView::input(&dialog.title, message, initial);

        self.modal(&mut view, |view, key| match key.code {
            KeyCode::Esc => Some(Step::Done(None)),
            KeyCode::Enter => {
                let text = view.field_text();
                if text.is_empty() {
                    view.error = Some("Enter a file name".to_string());
                    return Some(Step::Stay);
                }
                let path = expand_home(&text);
                if path.is_dir() {
                    view.error = Some(format!("{} is a directory", path.display()));
                    return Some(Step::Stay);
                }
                if must_exist && !path.is_file() {
                    view.error = Some(format!("{} does not exist", path.display()));
                    return Some(Step::Stay);
                }
                Some(Step::Done(Some(path)))
            }
            _ => None,
        })
    }
}

fn expand_home(text: &str) -> PathBuf {
    if let Some(rest) = text.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(text)
}

fn initial_text(dialog: &FileDialog) -> String {
    dialog
        .initial
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}

impl<B: Backend> Prompts for TerminalPrompts<'_, B> {
    fn pick_open_path(&mut self, dialog: &FileDialog) -> Option<PathBuf> {
        let initial = initial_text(dialog);
        self.path_modal(dialog, &initial, true).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "open dialog aborted");
            None
        })
    }

    fn pick_save_path(&mut self, dialog: &FileDialog) -> Option<PathBuf> {
        let mut initial = initial_text(dialog);
        loop {
            let path = match self.path_modal(dialog, &initial, false) {
                Ok(Some(path)) => dialog.with_default_extension(path),
                Ok(None) => return None,
                Err(err) => {
                    tracing::warn!(error = %err, "save dialog aborted");
                    return None;
                }
            };
            if !path.exists() {
                return Some(path);
            }
            let name = path.file_name().map_or_else(
                || path.display().to_string(),
                |n| n.to_string_lossy().into_owned(),
            );
            let message = format!("{} already exists.\nDo you want to replace it?", name);
            if self.confirm(&format!("Confirm {}", dialog.title), &message) {
                return Some(path);
            }
            initial = path.display().to_string();
        }
    }

    fn ask_integer(&mut self, title: &str, prompt: &str, initial: Option<i64>) -> Option<i64> {
        let initial = initial.map(|v| v.to_string()).unwrap_or_default();
        let mut view = DialogView::input(title, vec![prompt.to_string()], &initial);

        let result = self.modal(&mut view, |view, key| match key.code {
            KeyCode::Esc => Some(Step::Done(None)),
            KeyCode::Enter => match view.field_text().parse::<i64>() {
                Ok(value) => Some(Step::Done(Some(value))),
                Err(_) => {
                    view.error = Some("Not an integer; please try again".to_string());
                    Some(Step::Stay)
                }
            },
            _ => None,
        });
        result.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "integer dialog aborted");
            None
        })
    }

    fn confirm(&mut self, title: &str, message: &str) -> bool {
        let mut view = DialogView {
            kind: DialogKind::Question,
            title: title.to_string(),
            message: message.lines().map(str::to_string).collect(),
            input: None,
            error: None,
            hint: "[Y]es  [N]o",
        };

        let result = self.modal(&mut view, |_, key| match key.code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => Some(Step::Done(true)),
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => Some(Step::Done(false)),
            _ => Some(Step::Stay),
        });
        result.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "confirm dialog aborted");
            false
        })
    }

    fn show_error(&mut self, title: &str, message: &str) {
        let mut view = DialogView {
            kind: DialogKind::Error,
            title: title.to_string(),
            message: message.lines().map(str::to_string).collect(),
            input: None,
            error: None,
            hint: "[Enter] OK",
        };

        let result = self.modal(&mut view, |_, key| match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(Step::Done(())),
            _ => Some(Step::Stay),
        });
        if let Err(err) = result {
            tracing::warn!(error = %err, "error dialog aborted");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tui/dialogs.rs"]
mod tests;
