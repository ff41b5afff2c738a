//! Key chords → commands.

use crate::core::event::{Key, KeyCode};
use crate::core::Command;
use crate::kernel::services::adapters::settings::parse_keybinding;
use crate::kernel::services::ports::settings::KeybindingRule;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeybindingContext {
    /// Menu commands; active everywhere.
    Global,
    /// Text entry and cursor movement inside the document.
    Editor,
}

pub struct KeybindingService {
    global: FxHashMap<Key, Command>,
    editor: FxHashMap<Key, Command>,
}

impl KeybindingService {
    pub fn new() -> Self {
        Self::with_defaults()
    }

    pub fn with_defaults() -> Self {
        Self {
            global: default_global_keybindings(),
            editor: default_editor_keybindings(),
        }
    }

    pub fn resolve(&self, context: KeybindingContext, key: &Key) -> Option<&Command> {
        match context {
            KeybindingContext::Global => self.global.get(key),
            KeybindingContext::Editor => self.editor.get(key).or_else(|| self.global.get(key)),
        }
    }

    pub fn bindings(&self, context: KeybindingContext) -> &FxHashMap<Key, Command> {
        match context {
            KeybindingContext::Global => &self.global,
            KeybindingContext::Editor => &self.editor,
        }
    }

    pub fn bind(&mut self, context: KeybindingContext, key: Key, command: Command) {
        self.map_mut(context).insert(key, command);
    }

    pub fn unbind(&mut self, context: KeybindingContext, key: &Key) -> Option<Command> {
        self.map_mut(context).remove(key)
    }

    /// Apply user overrides. Rules with an unparsable key or an unknown
    /// command are skipped and reported back.
    pub fn apply_rules(&mut self, rules: &[KeybindingRule]) -> Vec<KeybindingRule> {
        let mut rejected = Vec::new();
        for rule in rules {
            let Some(key) = parse_keybinding(&rule.key) else {
                rejected.push(rule.clone());
                continue;
            };
            let Some(command) = Command::from_name(&rule.command) else {
                rejected.push(rule.clone());
                continue;
            };
            // A chord means one thing; drop any editor-level meaning first.
            self.editor.remove(&key);
            self.global.insert(key, command);
        }
        rejected
    }

    fn map_mut(&mut self, context: KeybindingContext) -> &mut FxHashMap<Key, Command> {
        match context {
            KeybindingContext::Global => &mut self.global,
            KeybindingContext::Editor => &mut self.editor,
        }
    }
}

impl Default for KeybindingService {
    fn default() -> Self {
        Self::new()
    }
}

fn default_global_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();
    bindings.reserve(8);

    bindings.insert(Key::ctrl(KeyCode::Char('n')), Command::NewFile);
    bindings.insert(Key::ctrl(KeyCode::Char('l')), Command::InsertBullet);
    bindings.insert(Key::ctrl(KeyCode::Char('b')), Command::ToggleBold);
    // Shadows the conventional save chord; File > Save stays reachable from the menu.
    bindings.insert(Key::ctrl(KeyCode::Char('s')), Command::ToggleCheckbox);
    bindings.insert(Key::ctrl(KeyCode::Char('q')), Command::CloseWindow);
    bindings.insert(Key::simple(KeyCode::F(10)), Command::OpenMenu);

    bindings
}

fn default_editor_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();
    bindings.reserve(32);

    bindings.insert(Key::simple(KeyCode::Left), Command::CursorLeft);
    bindings.insert(Key::simple(KeyCode::Right), Command::CursorRight);
    bindings.insert(Key::simple(KeyCode::Up), Command::CursorUp);
    bindings.insert(Key::simple(KeyCode::Down), Command::CursorDown);
    bindings.insert(Key::simple(KeyCode::Home), Command::CursorLineStart);
    bindings.insert(Key::simple(KeyCode::End), Command::CursorLineEnd);
    bindings.insert(Key::ctrl(KeyCode::Home), Command::CursorFileStart);
    bindings.insert(Key::ctrl(KeyCode::End), Command::CursorFileEnd);
    bindings.insert(Key::simple(KeyCode::PageUp), Command::PageUp);
    bindings.insert(Key::simple(KeyCode::PageDown), Command::PageDown);

    bindings.insert(Key::simple(KeyCode::Enter), Command::InsertNewline);
    bindings.insert(Key::simple(KeyCode::Tab), Command::InsertTab);
    bindings.insert(Key::simple(KeyCode::Backspace), Command::DeleteBackward);
    bindings.insert(Key::simple(KeyCode::Delete), Command::DeleteForward);

    bindings.insert(Key::shift(KeyCode::Left), Command::ExtendLeft);
    bindings.insert(Key::shift(KeyCode::Right), Command::ExtendRight);
    bindings.insert(Key::shift(KeyCode::Up), Command::ExtendUp);
    bindings.insert(Key::shift(KeyCode::Down), Command::ExtendDown);
    bindings.insert(Key::shift(KeyCode::Home), Command::ExtendLineStart);
    bindings.insert(Key::shift(KeyCode::End), Command::ExtendLineEnd);
    bindings.insert(Key::ctrl(KeyCode::Char('a')), Command::SelectAll);
    bindings.insert(Key::simple(KeyCode::Esc), Command::ClearSelection);

    bindings
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/keybinding.rs"]
mod tests;
