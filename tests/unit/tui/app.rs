use super::*;
use crate::kernel::services::ports::FileError;
use crate::tui::events::ScriptedEvents;
use crate::tui::terminal_guard::CloseHandshake;
use ratatui::backend::TestBackend;
use std::cell::RefCell;
use std::rc::Rc;

fn key(code: KeyCode) -> InputEvent {
    InputEvent::Key(KeyEvent::press(code, KeyModifiers::NONE))
}

fn ctrl(ch: char) -> InputEvent {
    InputEvent::Key(KeyEvent::press(KeyCode::Char(ch), KeyModifiers::CONTROL))
}

fn alt(ch: char) -> InputEvent {
    InputEvent::Key(KeyEvent::press(KeyCode::Char(ch), KeyModifiers::ALT))
}

fn typed(text: &str) -> Vec<InputEvent> {
    text.chars().map(|ch| key(KeyCode::Char(ch))).collect()
}

fn app(events: Vec<InputEvent>) -> App<TestBackend> {
    let terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
    App::new(
        terminal,
        Box::new(ScriptedEvents::new(events)),
        EditorSession::new(),
    )
}

#[test]
fn typing_then_quit_without_saving() {
    let mut events = typed("Hi there");
    events.push(ctrl('q'));
    events.push(key(KeyCode::Char('n')));
    let mut app = app(events);

    app.run().unwrap();

    assert_eq!(app.session().document().plain_text(), "Hi there");
    assert!(app.session().is_dirty());
}

#[test]
fn quit_when_clean_needs_no_answer() {
    let mut app = app(vec![ctrl('q')]);
    app.run().unwrap();
}

#[test]
fn shift_letters_type_uppercase() {
    let mut app = app(vec![]);
    app.handle_event(InputEvent::Key(KeyEvent::press(
        KeyCode::Char('T'),
        KeyModifiers::SHIFT,
    )))
    .unwrap();
    assert_eq!(app.session().document().plain_text(), "T");
}

#[test]
fn ctrl_s_toggles_checkbox() {
    let mut app = app(vec![]);
    for event in typed("Task") {
        app.handle_event(event).unwrap();
    }
    app.handle_event(ctrl('s')).unwrap();
    assert_eq!(app.session().document().plain_text(), "❏ Task");
    app.handle_event(ctrl('s')).unwrap();
    assert_eq!(app.session().document().plain_text(), "✔ Task");
}

#[test]
fn ctrl_l_inserts_bullet_and_ctrl_b_bolds_selection() {
    let mut app = app(vec![]);
    for event in typed("item") {
        app.handle_event(event).unwrap();
    }
    app.handle_event(ctrl('l')).unwrap();
    app.handle_event(ctrl('a')).unwrap();
    app.handle_event(ctrl('b')).unwrap();

    let doc = app.session().document();
    assert_eq!(doc.plain_text(), "• item");
    assert_eq!(doc.bold_ranges(), &[0..6]);
}

#[test]
fn unbound_ctrl_chords_do_not_type() {
    let mut app = app(vec![]);
    app.handle_event(ctrl('k')).unwrap();
    assert!(app.session().document().is_empty());
}

#[test]
fn paste_inserts_with_normalized_newlines() {
    let mut app = app(vec![]);
    app.handle_event(InputEvent::Paste("a\r\nb".to_string()))
        .unwrap();
    assert_eq!(app.session().document().plain_text(), "a\nb");
    assert!(app.session().is_dirty());
}

#[test]
fn alt_hotkeys_and_f10_open_menus() {
    let mut app = app(vec![]);
    app.handle_event(alt('e')).unwrap();
    assert_eq!(app.menu().open_menu(), Some(1));

    app.handle_event(key(KeyCode::Esc)).unwrap();
    assert!(!app.menu().is_open());

    app.handle_event(key(KeyCode::F(10))).unwrap();
    assert_eq!(app.menu().open_menu(), Some(0));
}

#[test]
fn menu_swallows_typing() {
    let mut app = app(vec![]);
    app.handle_event(alt('f')).unwrap();
    app.handle_event(key(KeyCode::Char('x'))).unwrap();
    app.handle_event(InputEvent::Paste("y".to_string())).unwrap();
    assert!(app.session().document().is_empty());
    assert!(app.menu().is_open());
}

#[test]
fn menu_runs_edit_commands() {
    let mut app = app(vec![]);
    for event in typed("x") {
        app.handle_event(event).unwrap();
    }
    // Edit > Toggle Checkbox is the last item; Up wraps to it.
    app.handle_event(alt('e')).unwrap();
    app.handle_event(key(KeyCode::Up)).unwrap();
    app.handle_event(key(KeyCode::Enter)).unwrap();

    assert_eq!(app.session().document().plain_text(), "❏ x");
    assert!(!app.menu().is_open());
}

#[test]
fn quit_with_save_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hello.txt");

    let mut events = typed("Hello");
    events.push(ctrl('q'));
    events.push(key(KeyCode::Char('y')));
    events.extend(typed(&path.display().to_string()));
    events.push(key(KeyCode::Enter));
    let mut app = app(events);

    app.run().unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "Hello");
    assert!(!app.session().is_dirty());
}

#[test]
fn open_from_menu_updates_title() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "one\ntwo").unwrap();

    let mut events = vec![alt('f'), key(KeyCode::Down), key(KeyCode::Enter)];
    events.extend(typed(&path.display().to_string()));
    events.push(key(KeyCode::Enter));
    // The replaced buffer counts as unsaved.
    events.push(ctrl('q'));
    events.push(key(KeyCode::Char('n')));

    let titles = Rc::new(RefCell::new(Vec::new()));
    let seen = titles.clone();
    let mut app = app(events).on_title(move |title| seen.borrow_mut().push(title.to_string()));

    app.run().unwrap();

    assert_eq!(app.session().document().plain_text(), "one\ntwo");
    assert!(app.session().is_dirty());
    let expected = format!("zpad - {}", path.display());
    assert_eq!(*titles.borrow(), vec!["zpad".to_string(), expected]);
}

#[test]
fn unreadable_file_ends_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("binary.txt");
    std::fs::write(&path, [0xff, 0xfe, 0x00, 0xc3]).unwrap();

    let mut events = vec![alt('f'), key(KeyCode::Down), key(KeyCode::Enter)];
    events.extend(typed(&path.display().to_string()));
    events.push(key(KeyCode::Enter));
    let mut app = app(events);

    let err = app.run().unwrap_err();
    assert!(matches!(
        err,
        AppError::Session(SessionError::Open {
            source: FileError::InvalidEncoding(_),
            ..
        })
    ));
}

#[test]
fn termination_signal_closes_window() {
    let (tx, rx) = std::sync::mpsc::channel();
    tx.send(TerminationSignal::SigTerm).unwrap();
    let handshake = CloseHandshake::new();
    let mut app = app(vec![]).with_signals(rx, handshake.clone());

    app.run().unwrap();
    assert!(handshake.is_acknowledged());
}

#[test]
fn termination_signal_with_unsaved_text_runs_save_prompts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rescued.txt");

    let mut events = vec![key(KeyCode::Char('y'))];
    events.extend(typed(&path.display().to_string()));
    events.push(key(KeyCode::Enter));

    let (tx, rx) = std::sync::mpsc::channel();
    let handshake = CloseHandshake::new();
    let mut app = app(events).with_signals(rx, handshake.clone());
    for event in typed("draft") {
        app.handle_event(event).unwrap();
    }
    tx.send(TerminationSignal::SigHup).unwrap();

    app.run().unwrap();

    assert!(handshake.is_acknowledged());
    assert!(!handshake.grace_expired());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "draft");
    assert!(!app.session().is_dirty());
}

#[test]
fn run_draws_status_line() {
    let mut events = typed("ab");
    events.push(ctrl('q'));
    events.push(key(KeyCode::Char('n')));
    let mut app = app(events);
    app.run().unwrap();

    let buffer = app.terminal().backend().buffer();
    let status: String = (0..buffer.area.width)
        .map(|x| buffer.cell((x, buffer.area.height - 1)).unwrap().symbol().to_string())
        .collect();
    assert!(status.contains("zpad *"), "{status}");
    assert!(status.contains("Ln 1, Col 3"), "{status}");
}

#[test]
fn typed_char_rules() {
    let ev = |code, mods| KeyEvent::press(code, mods);
    assert_eq!(typed_char(&ev(KeyCode::Char('a'), KeyModifiers::NONE)), Some('a'));
    assert_eq!(typed_char(&ev(KeyCode::Char('a'), KeyModifiers::CONTROL)), None);
    assert_eq!(typed_char(&ev(KeyCode::Char('a'), KeyModifiers::ALT)), None);
    assert_eq!(
        typed_char(&ev(
            KeyCode::Char('@'),
            KeyModifiers::CONTROL | KeyModifiers::ALT
        )),
        Some('@')
    );
    assert_eq!(typed_char(&ev(KeyCode::Enter, KeyModifiers::NONE)), None);
}
