//! Drawing the editor screen: menu bar, document area, status line and the
//! dropped-down menu.

use super::theme::UiTheme;
use crate::kernel::menu::{MenuEntry, MenuState, MENUS};
use crate::kernel::EditorSession;
use crate::models::{Document, ImageStore, OBJECT_ANCHOR};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use std::ops::Range;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const TAB_WIDTH: usize = 4;
const MENU_TITLE_PAD: u16 = 2;

/// Scroll position of the document area, in lines and display columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub top: usize,
    pub left: usize,
    pub height: usize,
    pub width: usize,
}

impl Viewport {
    /// Scroll just enough for `(row, col)` to be visible.
    pub fn follow(&mut self, row: usize, col: usize) {
        if self.height > 0 {
            if row < self.top {
                self.top = row;
            } else if row >= self.top + self.height {
                self.top = row + 1 - self.height;
            }
        }
        if self.width > 0 {
            if col < self.left {
                self.left = col;
            } else if col >= self.left + self.width {
                self.left = col + 1 - self.width;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub menu_bar: Rect,
    pub document: Rect,
    pub status: Rect,
}

pub fn layout(area: Rect) -> ScreenLayout {
    let menu_h = area.height.min(1);
    let status_h = area.height.saturating_sub(menu_h).min(1);
    let doc_h = area.height.saturating_sub(menu_h + status_h);
    ScreenLayout {
        menu_bar: Rect::new(area.x, area.y, area.width, menu_h),
        document: Rect::new(area.x, area.y + menu_h, area.width, doc_h),
        status: Rect::new(area.x, area.y + menu_h + doc_h, area.width, status_h),
    }
}

pub fn render_screen(
    frame: &mut Frame,
    session: &EditorSession,
    menu: &MenuState,
    viewport: &mut Viewport,
    theme: &UiTheme,
) {
    let area = frame.area();
    let screen = layout(area);

    render_document(frame, screen.document, session, viewport, theme);
    render_menu_bar(frame, screen.menu_bar, menu, theme);
    render_status(frame, screen.status, session, theme);
    render_menu_popup(frame, screen.menu_bar, menu, theme);
}

// ==================== Document ====================

/// What one char of a line draws as.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Cell {
    text: String,
    width: usize,
    style: Style,
}

fn line_cells(
    doc: &Document,
    images: &ImageStore,
    line: usize,
    selection: Option<Range<usize>>,
    theme: &UiTheme,
) -> Vec<Cell> {
    let start = doc.line_start(line);
    let end = doc.line_end(line);
    let mut cells = Vec::with_capacity(end - start);
    let mut col = 0usize;

    for (offset, ch) in doc.rope().slice(start..end).chars().enumerate() {
        let pos = start + offset;
        let mut style = Style::default();
        if doc.is_bold_at(pos) {
            style = style.add_modifier(Modifier::BOLD);
        }

        let (text, width) = match ch {
            OBJECT_ANCHOR => {
                style = style.fg(theme.image_fg);
                let label = doc
                    .image_at(pos)
                    .and_then(|id| images.get(id))
                    .map(|image| format!("[image {}x{}]", image.width(), image.height()))
                    .unwrap_or_else(|| "[image]".to_string());
                let width = label.width();
                (label, width)
            }
            '\t' => {
                let width = TAB_WIDTH - col % TAB_WIDTH;
                (" ".repeat(width), width)
            }
            ch if ch.is_control() => ("?".to_string(), 1),
            ch => (ch.to_string(), ch.width().unwrap_or(0)),
        };

        if selection.as_ref().is_some_and(|sel| sel.contains(&pos)) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        col += width;
        cells.push(Cell { text, width, style });
    }
    cells
}

/// Display column of char `pos`, which must lie on `line`.
pub fn display_col(doc: &Document, images: &ImageStore, line: usize, pos: usize) -> usize {
    let start = doc.line_start(line);
    let theme = UiTheme::default();
    line_cells(doc, images, line, None, &theme)
        .iter()
        .take(pos.saturating_sub(start))
        .map(|cell| cell.width)
        .sum()
}

/// Clip `cells` to the columns `left..left + width` and merge equal styles.
fn clip_cells(cells: &[Cell], left: usize, width: usize) -> Line<'static> {
    let right = left + width;
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut col = 0usize;

    let mut push = |text: String, style: Style| match spans.last_mut() {
        Some(last) if last.style == style => last.content.to_mut().push_str(&text),
        _ => spans.push(Span::styled(text, style)),
    };

    for cell in cells {
        let cell_start = col;
        let cell_end = col + cell.width;
        col = cell_end;
        if cell_end <= left {
            continue;
        }
        if cell_start >= right {
            break;
        }
        if cell_start >= left && cell_end <= right {
            push(cell.text.clone(), cell.style);
        } else {
            // Partly visible: pad the visible columns.
            let visible = cell_end.min(right) - cell_start.max(left);
            push(" ".repeat(visible), cell.style);
        }
    }
    Line::from(spans)
}

fn render_document(
    frame: &mut Frame,
    area: Rect,
    session: &EditorSession,
    viewport: &mut Viewport,
    theme: &UiTheme,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let doc = session.document();
    let images = session.images();

    let (row, _) = doc.cursor_row_col();
    let cursor_col = display_col(doc, images, row, doc.cursor());
    viewport.height = area.height as usize;
    viewport.width = area.width as usize;
    viewport.follow(row, cursor_col);

    let selection = doc.selection().map(|sel| sel.range());
    let last_line = doc.len_lines();
    let mut lines = Vec::with_capacity(area.height as usize);
    for line in viewport.top..(viewport.top + viewport.height).min(last_line) {
        let cells = line_cells(doc, images, line, selection.clone(), theme);
        lines.push(clip_cells(&cells, viewport.left, viewport.width));
    }
    frame.render_widget(Paragraph::new(lines), area);

    let x = area.x as usize + cursor_col - viewport.left;
    let y = area.y as usize + row - viewport.top;
    frame.set_cursor_position((x as u16, y as u16));
}

// ==================== Menu bar / status ====================

/// Column range of each menu title in the bar.
pub fn menu_title_spans(area: Rect) -> Vec<Range<u16>> {
    let mut x = area.x + 1;
    MENUS
        .iter()
        .map(|menu| {
            let w = menu.title.width() as u16 + MENU_TITLE_PAD;
            let span = x..x + w;
            x += w;
            span
        })
        .collect()
}

fn render_menu_bar(frame: &mut Frame, area: Rect, menu: &MenuState, theme: &UiTheme) {
    if area.height == 0 {
        return;
    }
    let base = Style::default().bg(theme.menu_bar_bg).fg(theme.menu_bar_fg);
    let mut spans = vec![Span::styled(" ", base)];
    for (i, item) in MENUS.iter().enumerate() {
        let style = if menu.open_menu() == Some(i) {
            base.bg(theme.menu_selected_bg)
        } else {
            base
        };
        spans.push(Span::styled(format!(" {} ", item.title), style));
    }
    spans.push(Span::styled("   F10 menu", base.add_modifier(Modifier::DIM)));
    frame.render_widget(Paragraph::new(Line::from(spans)).style(base), area);
}

pub fn status_text(session: &EditorSession) -> String {
    let doc = session.document();
    let (row, col) = doc.cursor_row_col();
    let dirty = if session.is_dirty() { " *" } else { "" };
    format!(
        " {}{}  |  Ln {}, Col {}  |  Font {}",
        session.title(),
        dirty,
        row + 1,
        col + 1,
        session.font().size
    )
}

fn render_status(frame: &mut Frame, area: Rect, session: &EditorSession, theme: &UiTheme) {
    if area.height == 0 {
        return;
    }
    let style = Style::default().fg(theme.status_fg);
    frame.render_widget(Paragraph::new(status_text(session)).style(style), area);
}

pub fn menu_popup_area(bar: Rect, screen: Rect, menu: usize) -> Option<Rect> {
    let entries = MENUS.get(menu)?.entries;
    let titles = menu_title_spans(bar);
    let x = titles.get(menu)?.start;

    let inner_w = entries
        .iter()
        .map(|entry| match entry {
            MenuEntry::Item {
                label, shortcut, ..
            } => label.width() + shortcut.map_or(0, |s| s.width() + 3),
            MenuEntry::Separator => 1,
        })
        .max()
        .unwrap_or(0)
        + 2;
    let width = (inner_w as u16 + 2).min(screen.right().saturating_sub(x));
    let height = (entries.len() as u16 + 2).min(screen.bottom().saturating_sub(bar.bottom()));
    if width < 3 || height < 3 {
        return None;
    }
    Some(Rect::new(x, bar.bottom(), width, height))
}

fn render_menu_popup(frame: &mut Frame, bar: Rect, menu: &MenuState, theme: &UiTheme) {
    let Some(open) = menu.open_menu() else {
        return;
    };
    let Some(area) = menu_popup_area(bar, frame.area(), open) else {
        return;
    };
    let entries = MENUS[open].entries;
    let inner_w = area.width.saturating_sub(2) as usize;
    let base = Style::default().bg(theme.menu_bar_bg).fg(theme.menu_bar_fg);

    let lines: Vec<Line> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| match entry {
            MenuEntry::Item {
                label, shortcut, ..
            } => {
                let shortcut = shortcut.unwrap_or("");
                let gap = inner_w.saturating_sub(label.width() + shortcut.width() + 2);
                let text = format!(" {}{}{} ", label, " ".repeat(gap), shortcut);
                let style = if i == menu.selected() {
                    base.bg(theme.menu_selected_bg)
                } else {
                    base
                };
                Line::styled(text, style)
            }
            MenuEntry::Separator => Line::styled("\u{2500}".repeat(inner_w), base),
        })
        .collect();

    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(base)
        .style(base);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
#[path = "../../tests/unit/tui/render.rs"]
mod tests;
