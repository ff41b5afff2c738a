use super::*;

#[test]
fn settings_missing_fields_fall_back_to_defaults() {
    let settings: Settings = serde_json::from_str("{}").expect("deserialize empty settings");

    assert!(settings.keybindings.is_empty());
    assert_eq!(settings.font_size, DEFAULT_FONT_SIZE);
    assert_eq!(settings.theme.menu_bar_bg.as_deref(), Some("dark_gray"));
}

#[test]
fn settings_parse_keybinding_rules() {
    let json = r#"{
        "keybindings": [{ "key": "ctrl+shift+s", "command": "saveAs" }],
        "font_size": 16
    }"#;
    let settings: Settings = serde_json::from_str(json).expect("deserialize settings");

    assert_eq!(
        settings.keybindings,
        vec![KeybindingRule {
            key: "ctrl+shift+s".to_string(),
            command: "saveAs".to_string(),
        }]
    );
    assert_eq!(settings.font_size, 16);
}

#[test]
fn theme_settings_serde_roundtrip_preserves_defaults() {
    let original = ThemeSettings::default();
    let json = serde_json::to_string(&original).expect("serialize ThemeSettings");
    let decoded: ThemeSettings = serde_json::from_str(&json).expect("deserialize ThemeSettings");

    assert_eq!(decoded.menu_bar_bg, original.menu_bar_bg);
    assert_eq!(decoded.error_fg, original.error_fg);
}
