use super::*;
use crate::core::event::KeyModifiers;

#[test]
fn editor_has_cursor_bindings() {
    let service = KeybindingService::new();
    assert_eq!(
        service.resolve(KeybindingContext::Editor, &Key::simple(KeyCode::Left)),
        Some(&Command::CursorLeft)
    );
}

#[test]
fn menu_chords_resolve_in_editor() {
    let service = KeybindingService::new();
    let cases = [
        ('n', Command::NewFile),
        ('l', Command::InsertBullet),
        ('b', Command::ToggleBold),
        ('s', Command::ToggleCheckbox),
    ];
    for (ch, expected) in cases {
        assert_eq!(
            service.resolve(KeybindingContext::Editor, &Key::ctrl(KeyCode::Char(ch))),
            Some(&expected)
        );
    }
}

#[test]
fn ctrl_s_is_not_save() {
    let service = KeybindingService::new();
    let save_bound = service
        .bindings(KeybindingContext::Global)
        .values()
        .any(|command| *command == Command::Save);
    assert!(!save_bound);
}

#[test]
fn editor_keys_do_not_leak_into_global() {
    let service = KeybindingService::new();
    assert_eq!(
        service.resolve(KeybindingContext::Global, &Key::simple(KeyCode::Enter)),
        None
    );
}

#[test]
fn bind_and_unbind() {
    let mut service = KeybindingService::new();
    let key = Key::new(KeyCode::Char('o'), KeyModifiers::CONTROL);

    service.bind(KeybindingContext::Global, key, Command::OpenFile);
    assert_eq!(
        service.resolve(KeybindingContext::Editor, &key),
        Some(&Command::OpenFile)
    );

    assert_eq!(
        service.unbind(KeybindingContext::Global, &key),
        Some(Command::OpenFile)
    );
    assert_eq!(service.resolve(KeybindingContext::Editor, &key), None);
}

#[test]
fn apply_rules_overrides_and_reports_rejects() {
    let mut service = KeybindingService::new();
    let rules = vec![
        KeybindingRule {
            key: "ctrl+shift+s".to_string(),
            command: "save".to_string(),
        },
        KeybindingRule {
            key: "tab".to_string(),
            command: "insertBullet".to_string(),
        },
        KeybindingRule {
            key: "ctrl+".to_string(),
            command: "save".to_string(),
        },
        KeybindingRule {
            key: "ctrl+k".to_string(),
            command: "launchRocket".to_string(),
        },
    ];

    let rejected = service.apply_rules(&rules);

    assert_eq!(rejected.len(), 2);
    assert_eq!(
        service.resolve(
            KeybindingContext::Editor,
            &Key::ctrl_shift(KeyCode::Char('s'))
        ),
        Some(&Command::Save)
    );
    assert_eq!(
        service.resolve(KeybindingContext::Editor, &Key::simple(KeyCode::Tab)),
        Some(&Command::InsertBullet)
    );
}
