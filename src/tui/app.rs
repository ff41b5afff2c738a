//! The main loop: draw, read an event, route it to the menu or the session.

use super::dialogs::TerminalPrompts;
use super::events::EventSource;
use super::render::{self, Viewport};
use super::terminal_guard::{CloseHandshake, TerminationSignal};
use super::theme::UiTheme;
use crate::core::event::{InputEvent, Key, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crate::core::Command;
use crate::kernel::menu::{menu_for_hotkey, MenuOutcome, MenuState};
use crate::kernel::services::adapters::{KeybindingContext, KeybindingService};
use crate::kernel::{EditorSession, Flow, SessionError};
use ratatui::backend::Backend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;
use std::io;
use std::sync::mpsc::Receiver;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub enum AppError {
    Io(io::Error),
    Session(SessionError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "terminal error: {}", e),
            AppError::Session(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(e) => Some(e),
            AppError::Session(e) => Some(e),
        }
    }
}

impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self {
        AppError::Io(e)
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::Session(e)
    }
}

pub struct App<B: Backend> {
    terminal: Terminal<B>,
    events: Box<dyn EventSource>,
    session: EditorSession,
    keymap: KeybindingService,
    menu: MenuState,
    viewport: Viewport,
    theme: UiTheme,
    /// Last drawn frame; dialogs paint over it.
    backdrop: Buffer,
    signals: Option<Receiver<TerminationSignal>>,
    handshake: CloseHandshake,
    on_title: Option<Box<dyn FnMut(&str)>>,
    last_title: String,
}

impl<B: Backend> App<B> {
    pub fn new(
        terminal: Terminal<B>,
        events: Box<dyn EventSource>,
        session: EditorSession,
    ) -> Self {
        Self {
            terminal,
            events,
            session,
            keymap: KeybindingService::with_defaults(),
            menu: MenuState::new(),
            viewport: Viewport::default(),
            theme: UiTheme::default(),
            backdrop: Buffer::default(),
            signals: None,
            handshake: CloseHandshake::new(),
            on_title: None,
            last_title: String::new(),
        }
    }

    pub fn with_keymap(mut self, keymap: KeybindingService) -> Self {
        self.keymap = keymap;
        self
    }

    pub fn with_theme(mut self, theme: UiTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Termination signals arrive on `signals`; taking one up is reported back
    /// through `handshake` so the listener lets the save prompts run.
    pub fn with_signals(
        mut self,
        signals: Receiver<TerminationSignal>,
        handshake: CloseHandshake,
    ) -> Self {
        self.signals = Some(signals);
        self.handshake = handshake;
        self
    }

    /// Called whenever the window title changes.
    pub fn on_title(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_title = Some(Box::new(f));
        self
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn menu(&self) -> &MenuState {
        &self.menu
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        tracing::info!("event loop started");
        loop {
            self.draw()?;

            if let Some(signal) = self.pending_signal() {
                tracing::info!(?signal, "close requested by signal");
                self.handshake.acknowledge();
                if self.execute(Command::CloseWindow)? == Flow::Exit {
                    break;
                }
                continue;
            }

            let Some(event) = self.events.next_event(POLL_INTERVAL)? else {
                continue;
            };
            if self.handle_event(event)? == Flow::Exit {
                break;
            }
        }
        tracing::info!("event loop finished");
        Ok(())
    }

    fn pending_signal(&self) -> Option<TerminationSignal> {
        self.signals.as_ref()?.try_recv().ok()
    }

    pub fn draw(&mut self) -> io::Result<()> {
        let session = &self.session;
        let menu = &self.menu;
        let viewport = &mut self.viewport;
        let theme = &self.theme;
        let frame = self
            .terminal
            .draw(|frame| render::render_screen(frame, session, menu, viewport, theme))?;
        self.backdrop = frame.buffer.clone();

        let title = self.session.title();
        if title != self.last_title {
            if let Some(on_title) = self.on_title.as_mut() {
                on_title(&title);
            }
            self.last_title = title;
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: InputEvent) -> Result<Flow, AppError> {
        match event {
            InputEvent::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            InputEvent::Paste(text) if !self.menu.is_open() => {
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.execute(Command::InsertText(text))
            }
            _ => Ok(Flow::Continue),
        }
    }

    fn handle_key(&mut self, event: KeyEvent) -> Result<Flow, AppError> {
        let key = Key::from(event);

        if self.menu.is_open() {
            return match self.menu.handle_key(key) {
                MenuOutcome::Run(command) => self.execute(command),
                MenuOutcome::Handled | MenuOutcome::Closed => Ok(Flow::Continue),
            };
        }

        if let (KeyCode::Char(ch), KeyModifiers::ALT) = (key.code, key.modifiers) {
            if let Some(menu) = menu_for_hotkey(ch) {
                self.menu.open(menu);
                return Ok(Flow::Continue);
            }
        }

        if let Some(command) = self.keymap.resolve(KeybindingContext::Editor, &key) {
            let command = command.clone();
            if command == Command::OpenMenu {
                self.menu.open(0);
                return Ok(Flow::Continue);
            }
            return self.execute(command);
        }

        match typed_char(&event) {
            Some(ch) => self.execute(Command::InsertChar(ch)),
            None => Ok(Flow::Continue),
        }
    }

    fn execute(&mut self, command: Command) -> Result<Flow, AppError> {
        tracing::debug!(command = command.name(), "execute");
        self.session.set_page_lines(self.viewport.height.max(1));
        let mut prompts = TerminalPrompts::new(
            &mut self.terminal,
            self.events.as_mut(),
            &self.backdrop,
            &self.theme,
        );
        Ok(self.session.dispatch(&command, &mut prompts)?)
    }
}

/// The character a key event types, if any. AltGr arrives as Ctrl+Alt on
/// some platforms and still types.
fn typed_char(event: &KeyEvent) -> Option<char> {
    let KeyCode::Char(ch) = event.code else {
        return None;
    };
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = event.modifiers.contains(KeyModifiers::ALT);
    if ctrl != alt {
        return None;
    }
    (!ch.is_control()).then_some(ch)
}

#[cfg(test)]
#[path = "../../tests/unit/tui/app.rs"]
mod tests;
