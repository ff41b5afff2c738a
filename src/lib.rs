//! zpad - a small notepad for the terminal.
//!
//! Modules:
//! - core: commands and input events
//! - models: the document (rope, bold ranges, image anchors) and image store
//! - kernel: the editing session, menus, ports and adapters
//! - tui: ratatui frontend (feature `tui`)

pub mod core;
pub mod kernel;
pub mod models;
#[cfg(feature = "tui")]
pub mod tui;
