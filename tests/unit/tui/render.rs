use super::*;
use crate::core::Command;
use crate::kernel::services::ports::{FileDialog, Prompts};
use crate::models::{EmbeddedImage, ImageStore};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;
use std::path::PathBuf;

struct NoPrompts;

impl Prompts for NoPrompts {
    fn pick_open_path(&mut self, _dialog: &FileDialog) -> Option<PathBuf> {
        None
    }
    fn pick_save_path(&mut self, _dialog: &FileDialog) -> Option<PathBuf> {
        None
    }
    fn ask_integer(&mut self, _title: &str, _prompt: &str, _initial: Option<i64>) -> Option<i64> {
        None
    }
    fn confirm(&mut self, _title: &str, _message: &str) -> bool {
        false
    }
    fn show_error(&mut self, _title: &str, _message: &str) {}
}

fn row_text(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width)
        .map(|x| buffer.cell((x, y)).map_or(" ", |cell| cell.symbol()).to_string())
        .collect()
}

fn draw(
    session: &EditorSession,
    menu: &MenuState,
    viewport: &mut Viewport,
    width: u16,
    height: u16,
) -> Terminal<TestBackend> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|frame| render_screen(frame, session, menu, viewport, &UiTheme::default()))
        .unwrap();
    terminal
}

fn type_text(session: &mut EditorSession, text: &str) {
    session
        .dispatch(&Command::InsertText(text.to_string()), &mut NoPrompts)
        .unwrap();
}

#[test]
fn layout_splits_bar_document_status() {
    let screen = layout(Rect::new(0, 0, 40, 10));
    assert_eq!(screen.menu_bar, Rect::new(0, 0, 40, 1));
    assert_eq!(screen.document, Rect::new(0, 1, 40, 8));
    assert_eq!(screen.status, Rect::new(0, 9, 40, 1));

    let tiny = layout(Rect::new(0, 0, 10, 1));
    assert_eq!(tiny.document.height, 0);
    assert_eq!(tiny.status.height, 0);
}

#[test]
fn viewport_follows_cursor() {
    let mut viewport = Viewport {
        top: 0,
        left: 0,
        height: 5,
        width: 10,
    };
    viewport.follow(7, 3);
    assert_eq!(viewport.top, 3);
    viewport.follow(1, 12);
    assert_eq!((viewport.top, viewport.left), (1, 3));
    viewport.follow(1, 0);
    assert_eq!(viewport.left, 0);
}

#[test]
fn screen_shows_menu_text_and_status() {
    let mut session = EditorSession::new();
    type_text(&mut session, "Hello\nworld");
    let mut viewport = Viewport::default();

    let terminal = draw(&session, &MenuState::new(), &mut viewport, 60, 6);
    let buffer = terminal.backend().buffer();

    assert!(row_text(buffer, 0).starts_with("  File  Edit "));
    assert!(row_text(buffer, 1).starts_with("Hello "));
    assert!(row_text(buffer, 2).starts_with("world "));
    let status = row_text(buffer, 5);
    assert!(status.contains("zpad *"), "{status}");
    assert!(status.contains("Ln 2, Col 6"), "{status}");
    assert!(status.contains("Font 12"), "{status}");
}

#[test]
fn bold_and_selection_styles() {
    let mut session = EditorSession::new();
    type_text(&mut session, "abcd");
    session.document_mut().add_bold(0..2);
    session.document_mut().select(1, 3);
    let mut viewport = Viewport::default();

    let terminal = draw(&session, &MenuState::new(), &mut viewport, 20, 4);
    let buffer = terminal.backend().buffer();

    let cell = |x: u16| buffer.cell((x, 1)).unwrap();
    assert!(cell(0).modifier.contains(Modifier::BOLD));
    assert!(!cell(0).modifier.contains(Modifier::REVERSED));
    assert!(cell(1).modifier.contains(Modifier::BOLD));
    assert!(cell(1).modifier.contains(Modifier::REVERSED));
    assert!(!cell(2).modifier.contains(Modifier::BOLD));
    assert!(cell(2).modifier.contains(Modifier::REVERSED));
    assert!(!cell(3).modifier.contains(Modifier::REVERSED));
}

#[test]
fn image_anchor_draws_placeholder() {
    let mut images = ImageStore::new();
    let id = images.push(EmbeddedImage::new(
        PathBuf::from("cat.png"),
        3,
        2,
        vec![0; 24],
    ));
    let mut doc = Document::from_text("ab");
    doc.set_cursor(1);
    doc.insert_image(id);

    let cells = line_cells(&doc, &images, 0, None, &UiTheme::default());
    let text: String = cells.iter().map(|cell| cell.text.as_str()).collect();
    assert_eq!(text, "a[image 3x2]b");
    assert_eq!(cells[1].style.fg, Some(UiTheme::default().image_fg));
    assert_eq!(display_col(&doc, &images, 0, 2), 12);
}

#[test]
fn tabs_expand_to_next_stop() {
    let doc = Document::from_text("a\tb");
    let images = ImageStore::new();
    assert_eq!(display_col(&doc, &images, 0, 2), TAB_WIDTH);
    assert_eq!(display_col(&doc, &images, 0, 3), TAB_WIDTH + 1);
}

#[test]
fn long_lines_scroll_horizontally() {
    let mut session = EditorSession::new();
    type_text(&mut session, "0123456789abcdef");
    let mut viewport = Viewport::default();

    let terminal = draw(&session, &MenuState::new(), &mut viewport, 10, 3);
    let buffer = terminal.backend().buffer();

    assert_eq!(viewport.left, 7);
    assert_eq!(row_text(buffer, 1), "789abcdef ");
}

#[test]
fn open_menu_draws_popup_with_shortcuts() {
    let session = EditorSession::new();
    let mut menu = MenuState::new();
    menu.open(1);
    let mut viewport = Viewport::default();

    let terminal = draw(&session, &menu, &mut viewport, 40, 12);
    let buffer = terminal.backend().buffer();

    let rows: Vec<String> = (0..12).map(|y| row_text(buffer, y)).collect();
    assert!(rows[2].contains("Insert Image"), "{rows:#?}");
    assert!(rows[4].contains("\u{2500}\u{2500}"), "{rows:#?}");
    assert!(rows[5].contains("Bullet") && rows[5].contains("Ctrl+L"));
    assert!(rows[7].contains("Toggle Checkbox") && rows[7].contains("Ctrl+S"));

    let popup = menu_popup_area(layout(buffer.area).menu_bar, buffer.area, 1).unwrap();
    let selected = buffer.cell((popup.x + 2, popup.y + 1)).unwrap();
    assert_eq!(selected.bg, UiTheme::default().menu_selected_bg);
}

#[test]
fn menu_titles_are_laid_out_left_to_right() {
    let spans = menu_title_spans(Rect::new(0, 0, 40, 1));
    assert_eq!(spans, vec![1..7, 7..13]);
}
