//! The menu bar: a File menu and an Edit menu, navigated from the keyboard.

use crate::core::event::{Key, KeyCode, KeyModifiers};
use crate::core::Command;

#[derive(Debug, Clone)]
pub enum MenuEntry {
    Item {
        label: &'static str,
        shortcut: Option<&'static str>,
        command: Command,
    },
    Separator,
}

impl MenuEntry {
    pub fn is_separator(&self) -> bool {
        matches!(self, MenuEntry::Separator)
    }

    pub fn command(&self) -> Option<&Command> {
        match self {
            MenuEntry::Item { command, .. } => Some(command),
            MenuEntry::Separator => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Menu {
    pub title: &'static str,
    /// Opened with Alt+`hotkey`.
    pub hotkey: char,
    pub entries: &'static [MenuEntry],
}

pub static MENUS: &[Menu] = &[
    Menu {
        title: "File",
        hotkey: 'f',
        entries: &[
            MenuEntry::Item {
                label: "New",
                shortcut: Some("Ctrl+N"),
                command: Command::NewFile,
            },
            MenuEntry::Item {
                label: "Open",
                shortcut: None,
                command: Command::OpenFile,
            },
            MenuEntry::Item {
                label: "Save",
                shortcut: None,
                command: Command::Save,
            },
            MenuEntry::Item {
                label: "Save As",
                shortcut: None,
                command: Command::SaveAs,
            },
        ],
    },
    Menu {
        title: "Edit",
        hotkey: 'e',
        entries: &[
            MenuEntry::Item {
                label: "Insert Image",
                shortcut: None,
                command: Command::InsertImage,
            },
            MenuEntry::Item {
                label: "Font Size",
                shortcut: None,
                command: Command::SetFontSize,
            },
            MenuEntry::Separator,
            MenuEntry::Item {
                label: "Bullet",
                shortcut: Some("Ctrl+L"),
                command: Command::InsertBullet,
            },
            MenuEntry::Item {
                label: "Toggle Bold",
                shortcut: Some("Ctrl+B"),
                command: Command::ToggleBold,
            },
            MenuEntry::Item {
                label: "Toggle Checkbox",
                shortcut: Some("Ctrl+S"),
                command: Command::ToggleCheckbox,
            },
        ],
    },
];

pub fn menu_for_hotkey(ch: char) -> Option<usize> {
    let ch = ch.to_ascii_lowercase();
    MENUS.iter().position(|menu| menu.hotkey == ch)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    /// Key consumed; the menu stays open.
    Handled,
    Closed,
    Run(Command),
}

/// Which menu is dropped down and which entry is highlighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    open: Option<usize>,
    selected: usize,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn open_menu(&self) -> Option<usize> {
        self.open
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn open(&mut self, menu: usize) {
        if menu >= MENUS.len() {
            return;
        }
        self.open = Some(menu);
        self.selected = first_item(MENUS[menu].entries);
    }

    pub fn close(&mut self) {
        self.open = None;
        self.selected = 0;
    }

    pub fn next_menu(&mut self) {
        if let Some(menu) = self.open {
            self.open((menu + 1) % MENUS.len());
        }
    }

    pub fn prev_menu(&mut self) {
        if let Some(menu) = self.open {
            self.open((menu + MENUS.len() - 1) % MENUS.len());
        }
    }

    pub fn select_next(&mut self) {
        self.step(1);
    }

    pub fn select_prev(&mut self) {
        self.step(-1);
    }

    fn step(&mut self, delta: isize) {
        let Some(menu) = self.open else {
            return;
        };
        let entries = MENUS[menu].entries;
        let len = entries.len() as isize;
        let mut idx = self.selected as isize;
        for _ in 0..len {
            idx = (idx + delta).rem_euclid(len);
            if !entries[idx as usize].is_separator() {
                self.selected = idx as usize;
                return;
            }
        }
    }

    pub fn selected_command(&self) -> Option<&'static Command> {
        let menu = MENUS.get(self.open?)?;
        menu.entries.get(self.selected)?.command()
    }

    pub fn handle_key(&mut self, key: Key) -> MenuOutcome {
        if !self.is_open() {
            return MenuOutcome::Closed;
        }
        if key.modifiers.contains(KeyModifiers::ALT) {
            if let KeyCode::Char(ch) = key.code {
                return match menu_for_hotkey(ch) {
                    Some(menu) => {
                        self.open(menu);
                        MenuOutcome::Handled
                    }
                    None => MenuOutcome::Handled,
                };
            }
        }

        match key.code {
            KeyCode::Esc | KeyCode::F(10) => {
                self.close();
                MenuOutcome::Closed
            }
            KeyCode::Up => {
                self.select_prev();
                MenuOutcome::Handled
            }
            KeyCode::Down | KeyCode::Tab => {
                self.select_next();
                MenuOutcome::Handled
            }
            KeyCode::Left => {
                self.prev_menu();
                MenuOutcome::Handled
            }
            KeyCode::Right => {
                self.next_menu();
                MenuOutcome::Handled
            }
            KeyCode::Enter => match self.selected_command() {
                Some(command) => {
                    self.close();
                    MenuOutcome::Run(command.clone())
                }
                None => MenuOutcome::Handled,
            },
            _ => MenuOutcome::Handled,
        }
    }
}

fn first_item(entries: &[MenuEntry]) -> usize {
    entries
        .iter()
        .position(|entry| !entry.is_separator())
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/menu.rs"]
mod tests;
