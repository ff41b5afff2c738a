//! Semantic commands.
//!
//! A `Command` says what to do, never which key triggered it. Menu items and
//! key chords both resolve to one of these.

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    // ==================== File ====================
    NewFile,
    OpenFile,
    Save,
    SaveAs,
    CloseWindow,

    // ==================== Edit menu ====================
    InsertImage,
    SetFontSize,
    InsertBullet,
    ToggleBold,
    ToggleCheckbox,

    // ==================== Text entry ====================
    InsertChar(char),
    /// Pasted text.
    InsertText(String),
    InsertNewline,
    InsertTab,
    DeleteBackward,
    DeleteForward,

    // ==================== Cursor ====================
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorLineStart,
    CursorLineEnd,
    CursorFileStart,
    CursorFileEnd,
    PageUp,
    PageDown,

    // ==================== Selection ====================
    ExtendLeft,
    ExtendRight,
    ExtendUp,
    ExtendDown,
    ExtendLineStart,
    ExtendLineEnd,
    SelectAll,
    ClearSelection,

    // ==================== UI ====================
    OpenMenu,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::NewFile => "newFile",
            Command::OpenFile => "openFile",
            Command::Save => "save",
            Command::SaveAs => "saveAs",
            Command::CloseWindow => "closeWindow",
            Command::InsertImage => "insertImage",
            Command::SetFontSize => "setFontSize",
            Command::InsertBullet => "insertBullet",
            Command::ToggleBold => "toggleBold",
            Command::ToggleCheckbox => "toggleCheckbox",
            Command::InsertChar(_) => "insertChar",
            Command::InsertText(_) => "insertText",
            Command::InsertNewline => "insertNewline",
            Command::InsertTab => "insertTab",
            Command::DeleteBackward => "deleteBackward",
            Command::DeleteForward => "deleteForward",
            Command::CursorLeft => "cursorLeft",
            Command::CursorRight => "cursorRight",
            Command::CursorUp => "cursorUp",
            Command::CursorDown => "cursorDown",
            Command::CursorLineStart => "cursorLineStart",
            Command::CursorLineEnd => "cursorLineEnd",
            Command::CursorFileStart => "cursorFileStart",
            Command::CursorFileEnd => "cursorFileEnd",
            Command::PageUp => "pageUp",
            Command::PageDown => "pageDown",
            Command::ExtendLeft => "extendLeft",
            Command::ExtendRight => "extendRight",
            Command::ExtendUp => "extendUp",
            Command::ExtendDown => "extendDown",
            Command::ExtendLineStart => "extendLineStart",
            Command::ExtendLineEnd => "extendLineEnd",
            Command::SelectAll => "selectAll",
            Command::ClearSelection => "clearSelection",
            Command::OpenMenu => "openMenu",
        }
    }

    /// Inverse of [`Command::name`]. Commands carrying a payload are not
    /// addressable by name.
    pub fn from_name(name: &str) -> Option<Command> {
        let command = match name.trim() {
            "newFile" => Command::NewFile,
            "openFile" => Command::OpenFile,
            "save" => Command::Save,
            "saveAs" => Command::SaveAs,
            "closeWindow" | "quit" => Command::CloseWindow,
            "insertImage" => Command::InsertImage,
            "setFontSize" => Command::SetFontSize,
            "insertBullet" => Command::InsertBullet,
            "toggleBold" => Command::ToggleBold,
            "toggleCheckbox" => Command::ToggleCheckbox,
            "insertNewline" => Command::InsertNewline,
            "insertTab" => Command::InsertTab,
            "deleteBackward" => Command::DeleteBackward,
            "deleteForward" => Command::DeleteForward,
            "cursorLeft" => Command::CursorLeft,
            "cursorRight" => Command::CursorRight,
            "cursorUp" => Command::CursorUp,
            "cursorDown" => Command::CursorDown,
            "cursorLineStart" => Command::CursorLineStart,
            "cursorLineEnd" => Command::CursorLineEnd,
            "cursorFileStart" => Command::CursorFileStart,
            "cursorFileEnd" => Command::CursorFileEnd,
            "pageUp" => Command::PageUp,
            "pageDown" => Command::PageDown,
            "extendLeft" => Command::ExtendLeft,
            "extendRight" => Command::ExtendRight,
            "extendUp" => Command::ExtendUp,
            "extendDown" => Command::ExtendDown,
            "extendLineStart" => Command::ExtendLineStart,
            "extendLineEnd" => Command::ExtendLineEnd,
            "selectAll" => Command::SelectAll,
            "clearSelection" => Command::ClearSelection,
            "openMenu" => Command::OpenMenu,
            _ => return None,
        };
        Some(command)
    }

    pub fn is_edit_command(&self) -> bool {
        matches!(
            self,
            Command::InsertChar(_)
                | Command::InsertText(_)
                | Command::InsertNewline
                | Command::InsertTab
                | Command::DeleteBackward
                | Command::DeleteForward
                | Command::InsertBullet
                | Command::ToggleCheckbox
                | Command::InsertImage
        )
    }

    pub fn is_cursor_command(&self) -> bool {
        matches!(
            self,
            Command::CursorLeft
                | Command::CursorRight
                | Command::CursorUp
                | Command::CursorDown
                | Command::CursorLineStart
                | Command::CursorLineEnd
                | Command::CursorFileStart
                | Command::CursorFileEnd
                | Command::PageUp
                | Command::PageDown
        )
    }

    pub fn is_selection_command(&self) -> bool {
        matches!(
            self,
            Command::ExtendLeft
                | Command::ExtendRight
                | Command::ExtendUp
                | Command::ExtendDown
                | Command::ExtendLineStart
                | Command::ExtendLineEnd
                | Command::SelectAll
                | Command::ClearSelection
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/command.rs"]
mod tests;
