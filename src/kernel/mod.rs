//! Headless editor core: the session, its menus, and the services it talks to.

pub mod menu;
pub mod services;
pub mod session;

pub use menu::{Menu, MenuEntry, MenuOutcome, MenuState, MENUS};
pub use session::{EditorSession, FontSettings, Flow, SessionError};
