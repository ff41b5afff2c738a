//! Terminal frontend (crossterm + ratatui).
//!
//! Kept apart from `kernel`/`models` so the editing core has no terminal
//! dependency.

pub mod app;
pub mod crossterm;
pub mod dialogs;
pub mod events;
pub mod render;
pub mod terminal_guard;
pub mod theme;

pub use app::{App, AppError};
pub use events::{CrosstermEvents, EventSource, ScriptedEvents};
pub use terminal_guard::{CloseHandshake, TerminalGuard, TerminationSignal};
