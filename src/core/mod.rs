//! Core vocabulary shared by the kernel and every frontend:
//! - Command: semantic commands
//! - Event: frontend-neutral input events

pub mod command;
pub mod event;

pub use command::Command;
pub use event::{InputEvent, Key, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
