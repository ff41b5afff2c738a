//! Raw mode and alternate screen for the lifetime of the editor.

use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Duration;

/// How long a termination signal waits for the main loop to take up the close
/// request before the listener restores the terminal and exits on its own.
pub const SIGNAL_GRACE: Duration = Duration::from_secs(2);

pub trait TerminalOps: Send + Sync + 'static {
    fn setup(&self) -> io::Result<()>;
    fn restore(&self) -> io::Result<()>;
}

#[derive(Debug, Default)]
pub struct CrosstermTerminalOps;

impl TerminalOps for CrosstermTerminalOps {
    fn setup(&self) -> io::Result<()> {
        use crossterm::{
            event::EnableBracketedPaste,
            execute,
            terminal::{enable_raw_mode, EnterAlternateScreen, SetTitle},
        };

        enable_raw_mode()?;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableBracketedPaste,
            SetTitle(crate::kernel::session::APP_TITLE)
        )?;
        Ok(())
    }

    fn restore(&self) -> io::Result<()> {
        use crossterm::{
            cursor::Show,
            event::DisableBracketedPaste,
            execute,
            terminal::{disable_raw_mode, LeaveAlternateScreen},
        };

        // Run every step even if an earlier one fails; report the first error.
        let mut first_err: Option<io::Error> = None;

        if let Err(err) = disable_raw_mode() {
            first_err.get_or_insert(err);
        }
        if let Err(err) = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen, Show)
        {
            first_err.get_or_insert(err);
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Shared handle that restores the terminal at most once.
#[derive(Clone)]
pub struct TerminalRestorer {
    restored: Arc<AtomicBool>,
    ops: Arc<dyn TerminalOps>,
}

impl TerminalRestorer {
    pub fn restore(&self) -> io::Result<()> {
        if self.restored.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.ops.restore()
    }

    pub fn is_restored(&self) -> bool {
        self.restored.load(Ordering::SeqCst)
    }
}

pub struct TerminalGuard {
    restorer: TerminalRestorer,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        Self::with_ops(Arc::new(CrosstermTerminalOps))
    }

    pub fn with_ops(ops: Arc<dyn TerminalOps>) -> io::Result<Self> {
        ops.setup()?;
        Ok(Self {
            restorer: TerminalRestorer {
                restored: Arc::new(AtomicBool::new(false)),
                ops,
            },
        })
    }

    pub fn restorer(&self) -> TerminalRestorer {
        self.restorer.clone()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = self.restorer.restore();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    SigInt,
    SigTerm,
    SigHup,
}

impl TerminationSignal {
    pub fn exit_code(self) -> i32 {
        match self {
            TerminationSignal::SigInt => 130,
            TerminationSignal::SigTerm => 143,
            TerminationSignal::SigHup => 129,
        }
    }

    #[cfg(unix)]
    pub fn from_raw(sig: i32) -> Option<Self> {
        use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};

        match sig {
            SIGINT => Some(TerminationSignal::SigInt),
            SIGTERM => Some(TerminationSignal::SigTerm),
            SIGHUP => Some(TerminationSignal::SigHup),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalAction {
    /// Ask the main loop to close the window.
    RequestClose,
    /// Restore the terminal and exit now.
    ForceExit,
}

/// Shared between the signal listener and the main loop. Once the loop has
/// taken up a close request it may sit in the save prompts for as long as the
/// user needs; only a repeated signal cuts that short.
#[derive(Debug, Clone, Default)]
pub struct CloseHandshake {
    received: Arc<AtomicUsize>,
    acknowledged: Arc<AtomicBool>,
}

impl CloseHandshake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called by the main loop when it starts the close sequence.
    pub fn acknowledge(&self) {
        self.acknowledged.store(true, Ordering::SeqCst);
    }

    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged.load(Ordering::SeqCst)
    }

    pub fn record_signal(&self) -> SignalAction {
        if self.received.fetch_add(1, Ordering::SeqCst) == 0 {
            SignalAction::RequestClose
        } else {
            SignalAction::ForceExit
        }
    }

    /// Whether the grace period ran out without the main loop answering.
    pub fn grace_expired(&self) -> bool {
        !self.is_acknowledged()
    }
}

fn force_exit(restorer: &TerminalRestorer, signal: TerminationSignal) -> ! {
    let _ = restorer.restore();
    std::process::exit(signal.exit_code());
}

/// Forward SIGINT/SIGTERM/SIGHUP to `tx`. The main loop treats the first one as
/// a close request and acknowledges it through `handshake`. The listener exits
/// on its own when the loop has not acknowledged within [`SIGNAL_GRACE`], or
/// when a second signal arrives.
#[cfg(unix)]
pub fn install_termination_signals(
    restorer: TerminalRestorer,
    tx: Sender<TerminationSignal>,
    handshake: CloseHandshake,
) -> io::Result<std::thread::JoinHandle<()>> {
    use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP])?;
    Ok(std::thread::spawn(move || {
        for sig in signals.forever() {
            let Some(signal) = TerminationSignal::from_raw(sig) else {
                continue;
            };
            match handshake.record_signal() {
                SignalAction::RequestClose => {
                    tracing::info!(?signal, "termination signal");
                    let _ = tx.send(signal);

                    let restorer = restorer.clone();
                    let handshake = handshake.clone();
                    std::thread::spawn(move || {
                        std::thread::sleep(SIGNAL_GRACE);
                        if handshake.grace_expired() {
                            tracing::warn!(?signal, "close request not taken up; exiting");
                            force_exit(&restorer, signal);
                        }
                    });
                }
                SignalAction::ForceExit => {
                    tracing::warn!(?signal, "repeated termination signal; exiting");
                    force_exit(&restorer, signal);
                }
            }
        }
    }))
}

#[cfg(not(unix))]
pub fn install_termination_signals(
    _restorer: TerminalRestorer,
    _tx: Sender<TerminationSignal>,
    _handshake: CloseHandshake,
) -> io::Result<std::thread::JoinHandle<()>> {
    Ok(std::thread::spawn(|| {}))
}

#[cfg(test)]
#[path = "../../tests/unit/tui/terminal_guard.rs"]
mod tests;
