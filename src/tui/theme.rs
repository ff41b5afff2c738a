//! Colors used by the terminal frontend, overridable from settings.

use crate::kernel::services::ports::ThemeSettings;
use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiTheme {
    pub menu_bar_bg: Color,
    pub menu_bar_fg: Color,
    pub menu_selected_bg: Color,
    pub status_fg: Color,
    pub image_fg: Color,
    pub dialog_border: Color,
    pub error_fg: Color,
}

impl Default for UiTheme {
    fn default() -> Self {
        Self {
            menu_bar_bg: Color::Indexed(8),      // DarkGray
            menu_bar_fg: Color::Indexed(15),     // White
            menu_selected_bg: Color::Indexed(4), // Blue
            status_fg: Color::Indexed(7),        // Gray
            image_fg: Color::Indexed(5),         // Magenta
            dialog_border: Color::Indexed(6),    // Cyan
            error_fg: Color::Indexed(1),         // Red
        }
    }
}

impl UiTheme {
    pub fn from_settings(settings: &ThemeSettings) -> Self {
        let mut theme = Self::default();
        theme.apply_settings(settings);
        theme
    }

    /// Unparseable values keep the current color.
    pub fn apply_settings(&mut self, settings: &ThemeSettings) {
        let slots = [
            (&settings.menu_bar_bg, &mut self.menu_bar_bg),
            (&settings.menu_bar_fg, &mut self.menu_bar_fg),
            (&settings.menu_selected_bg, &mut self.menu_selected_bg),
            (&settings.status_fg, &mut self.status_fg),
            (&settings.image_fg, &mut self.image_fg),
            (&settings.dialog_border, &mut self.dialog_border),
            (&settings.error_fg, &mut self.error_fg),
        ];
        for (value, slot) in slots {
            match value.as_deref().map(|v| (v, parse_color(v))) {
                Some((_, Some(color))) => *slot = color,
                Some((raw, None)) => tracing::warn!(value = raw, "unknown theme color"),
                None => {}
            }
        }
    }
}

pub fn parse_color(value: &str) -> Option<Color> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }

    if let Some(hex) = v.strip_prefix('#') {
        if hex.len() == 6 && hex.is_ascii() {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Color::Rgb(r, g, b));
        }
        return None;
    }

    let v = v.to_ascii_lowercase();
    let c = match v.as_str() {
        "reset" => Color::Reset,
        "black" => Color::Indexed(0),
        "red" => Color::Indexed(1),
        "green" => Color::Indexed(2),
        "yellow" => Color::Indexed(3),
        "blue" => Color::Indexed(4),
        "magenta" => Color::Indexed(5),
        "cyan" => Color::Indexed(6),
        "gray" | "grey" => Color::Indexed(7),
        "dark_gray" | "darkgrey" | "dark_grey" => Color::Indexed(8),
        "light_red" => Color::Indexed(9),
        "light_green" => Color::Indexed(10),
        "light_yellow" => Color::Indexed(11),
        "light_blue" => Color::Indexed(12),
        "light_magenta" => Color::Indexed(13),
        "light_cyan" => Color::Indexed(14),
        "white" => Color::Indexed(15),
        _ => return None,
    };

    Some(c)
}
