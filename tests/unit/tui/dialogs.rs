use super::*;
use crate::kernel::services::ports::FileFilter;
use crate::tui::events::ScriptedEvents;
use ratatui::backend::TestBackend;

fn key(code: KeyCode) -> InputEvent {
    InputEvent::Key(KeyEvent::press(code, KeyModifiers::NONE))
}

fn typed(text: &str) -> Vec<InputEvent> {
    text.chars().map(|ch| key(KeyCode::Char(ch))).collect()
}

struct Harness {
    terminal: Terminal<TestBackend>,
    backdrop: Buffer,
    theme: UiTheme,
    events: ScriptedEvents,
}

impl Harness {
    fn new(events: Vec<InputEvent>) -> Self {
        let terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        let backdrop = Buffer::empty(Rect::new(0, 0, 60, 16));
        Self {
            terminal,
            backdrop,
            theme: UiTheme::default(),
            events: ScriptedEvents::new(events),
        }
    }

    fn prompts(&mut self) -> TerminalPrompts<'_, TestBackend> {
        TerminalPrompts::new(
            &mut self.terminal,
            &mut self.events,
            &self.backdrop,
            &self.theme,
        )
    }

    fn screen(&self) -> String {
        let buffer = self.terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer.cell((x, y)).map_or(" ", |c| c.symbol()));
            }
            out.push('\n');
        }
        out
    }
}

// ==================== TextField ====================

#[test]
fn text_field_edits_at_cursor() {
    let mut field = TextField::new("ac");
    field.handle_key(&KeyEvent::press(KeyCode::Left, KeyModifiers::NONE));
    field.handle_key(&KeyEvent::press(KeyCode::Char('b'), KeyModifiers::NONE));
    assert_eq!(field.text(), "abc");
    assert_eq!(field.cursor(), 2);

    field.handle_key(&KeyEvent::press(KeyCode::Home, KeyModifiers::NONE));
    field.handle_key(&KeyEvent::press(KeyCode::Delete, KeyModifiers::NONE));
    assert_eq!(field.text(), "bc");

    field.handle_key(&KeyEvent::press(KeyCode::End, KeyModifiers::NONE));
    field.handle_key(&KeyEvent::press(KeyCode::Backspace, KeyModifiers::NONE));
    assert_eq!(field.text(), "b");
}

#[test]
fn text_field_ignores_ctrl_chords_and_control_chars() {
    let mut field = TextField::new("");
    assert!(!field.handle_key(&KeyEvent::press(
        KeyCode::Char('x'),
        KeyModifiers::CONTROL
    )));
    field.insert_str("a\nb\tc");
    assert_eq!(field.text(), "abc");
}

#[test]
fn text_field_handles_multibyte() {
    let mut field = TextField::new("é✔");
    field.handle_key(&KeyEvent::press(KeyCode::Backspace, KeyModifiers::NONE));
    assert_eq!(field.text(), "é");
    field.handle_key(&KeyEvent::press(KeyCode::Left, KeyModifiers::NONE));
    field.insert_str("ñ");
    assert_eq!(field.text(), "ñé");
}

#[test]
fn text_field_scrolls_to_cursor() {
    let field = TextField::new("abcdefghij");
    let (shown, col) = field.visible(4);
    assert_eq!(shown, "hij");
    assert_eq!(col, 3);

    let mut field = field;
    field.handle_key(&KeyEvent::press(KeyCode::Home, KeyModifiers::NONE));
    let (shown, col) = field.visible(4);
    assert_eq!(shown, "abcd");
    assert_eq!(col, 0);
}

// ==================== Prompts ====================

#[test]
fn ask_integer_accepts_typed_value() {
    let mut events = vec![key(KeyCode::Backspace), key(KeyCode::Backspace)];
    events.extend(typed("18"));
    events.push(key(KeyCode::Enter));
    let mut h = Harness::new(events);

    let value = h.prompts().ask_integer("Set Font Size", "Enter font size", Some(12));
    assert_eq!(value, Some(18));
}

#[test]
fn ask_integer_rejects_garbage_then_accepts() {
    let mut events = typed("x");
    events.push(key(KeyCode::Enter));
    events.push(key(KeyCode::Backspace));
    events.extend(typed("-4"));
    events.push(key(KeyCode::Enter));
    let mut h = Harness::new(events);

    assert_eq!(h.prompts().ask_integer("Width", "Enter image width", None), Some(-4));
}

#[test]
fn ask_integer_escape_cancels() {
    let mut h = Harness::new(vec![key(KeyCode::Char('5')), key(KeyCode::Esc)]);
    assert_eq!(h.prompts().ask_integer("Height", "Enter image height", None), None);
}

#[test]
fn ask_integer_shows_error_inline() {
    let mut events = typed("abc");
    events.push(key(KeyCode::Enter));
    let mut h = Harness::new(events);

    // Script runs dry while the error is on screen.
    assert_eq!(h.prompts().ask_integer("Width", "Enter image width", None), None);
    let screen = h.screen();
    assert!(screen.contains("Not an integer"), "{screen}");
    assert!(screen.contains("Width"), "{screen}");
}

#[test]
fn confirm_answers() {
    let mut h = Harness::new(vec![key(KeyCode::Char('x')), key(KeyCode::Char('y'))]);
    assert!(h.prompts().confirm("Save changes?", "Would you like to save your changes?"));

    let mut h = Harness::new(vec![key(KeyCode::Esc)]);
    assert!(!h.prompts().confirm("Save changes?", "Would you like to save your changes?"));

    let mut h = Harness::new(vec![key(KeyCode::Enter)]);
    assert!(h.prompts().confirm("Save changes?", "Would you like to save your changes?"));
}

#[test]
fn confirm_draws_message() {
    let mut h = Harness::new(vec![]);
    assert!(!h
        .prompts()
        .confirm("Save changes?", "Would you like to save your changes?"));
    let screen = h.screen();
    assert!(screen.contains("Save changes?"), "{screen}");
    assert!(screen.contains("Would you like to save your changes?"), "{screen}");
    assert!(screen.contains("[Y]es"), "{screen}");
}

#[test]
fn show_error_waits_for_dismissal() {
    let mut h = Harness::new(vec![key(KeyCode::Char('q')), key(KeyCode::Enter)]);
    h.prompts().show_error("Save error", "Permission denied: /ro/a.txt");
    assert_eq!(h.events.remaining(), 0);
    let screen = h.screen();
    assert!(screen.contains("Save error"), "{screen}");
    assert!(screen.contains("Permission denied: /ro/a.txt"), "{screen}");
}

#[test]
fn save_path_appends_default_extension() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("notes");
    let mut events = typed(&base.display().to_string());
    events.push(key(KeyCode::Enter));
    let mut h = Harness::new(events);

    let dialog = FileDialog::new("Save")
        .filter(FileFilter::all_files())
        .default_extension(".txt");
    let path = h.prompts().pick_save_path(&dialog);
    assert_eq!(path, Some(dir.path().join("notes.txt")));
}

#[test]
fn save_path_asks_before_replacing() {
    let dir = tempfile::tempdir().unwrap();
    let existing = dir.path().join("a.txt");
    std::fs::write(&existing, "old").unwrap();

    // Decline the replace, then accept it on the second try.
    let mut events = vec![key(KeyCode::Enter), key(KeyCode::Char('n'))];
    events.push(key(KeyCode::Enter));
    events.push(key(KeyCode::Char('y')));
    let mut h = Harness::new(events);

    let dialog = FileDialog::new("Save As").initial(Some(existing.clone()));
    assert_eq!(h.prompts().pick_save_path(&dialog), Some(existing));
    assert_eq!(h.events.remaining(), 0);
}

#[test]
fn save_path_empty_name_is_refused() {
    let mut h = Harness::new(vec![key(KeyCode::Enter), key(KeyCode::Esc)]);
    assert_eq!(h.prompts().pick_save_path(&FileDialog::new("Save")), None);
}

#[test]
fn open_path_requires_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("present.txt");
    std::fs::write(&file, "hi").unwrap();

    let mut events = typed(&dir.path().join("absent.txt").display().to_string());
    events.push(key(KeyCode::Enter));
    let mut h = Harness::new(events);
    // Script runs dry while the error is on screen.
    assert_eq!(h.prompts().pick_open_path(&FileDialog::new("Open")), None);
    assert!(h.screen().contains("exist"));

    let mut events = typed(&file.display().to_string());
    events.push(key(KeyCode::Enter));
    let mut h = Harness::new(events);
    assert_eq!(h.prompts().pick_open_path(&FileDialog::new("Open")), Some(file));
}

#[test]
fn open_path_lists_filters() {
    let mut h = Harness::new(vec![key(KeyCode::Esc)]);
    let dialog = FileDialog::new("Open")
        .filter(FileFilter::all_files())
        .filter(FileFilter::text_files());
    assert_eq!(h.prompts().pick_open_path(&dialog), None);
    let screen = h.screen();
    assert!(screen.contains("All Files (*.*)"), "{screen}");
    assert!(screen.contains("Text Files (*.txt)"), "{screen}");
}

#[test]
fn paste_goes_into_field() {
    let mut h = Harness::new(vec![
        InputEvent::Paste("42".to_string()),
        key(KeyCode::Enter),
    ]);
    assert_eq!(h.prompts().ask_integer("Width", "Enter image width", None), Some(42));
}

#[test]
fn dialog_area_is_centered() {
    let area = dialog_area(Rect::new(0, 0, 80, 24), 4);
    assert_eq!(area, Rect::new(8, 9, 64, 6));
}
