use serde::{Deserialize, Serialize};

pub const DEFAULT_FONT_SIZE: i64 = 12;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub keybindings: Vec<KeybindingRule>,
    #[serde(default = "default_font_size")]
    pub font_size: i64,
    #[serde(default)]
    pub theme: ThemeSettings,
}

fn default_font_size() -> i64 {
    DEFAULT_FONT_SIZE
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeybindingRule {
    pub key: String,
    pub command: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_bar_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_bar_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_selected_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialog_border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_fg: Option<String>,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            menu_bar_bg: Some("dark_gray".to_string()),
            menu_bar_fg: Some("white".to_string()),
            menu_selected_bg: Some("blue".to_string()),
            status_fg: Some("gray".to_string()),
            image_fg: Some("magenta".to_string()),
            dialog_border: Some("cyan".to_string()),
            error_fg: Some("red".to_string()),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            keybindings: Vec::new(),
            font_size: DEFAULT_FONT_SIZE,
            theme: ThemeSettings::default(),
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
