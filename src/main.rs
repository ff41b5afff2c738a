use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc;

use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use zpad::kernel::services::adapters::{ensure_settings_file, load_settings, KeybindingService};
use zpad::kernel::services::ports::Settings;
use zpad::kernel::EditorSession;
use zpad::tui::terminal_guard::install_termination_signals;
use zpad::tui::theme::UiTheme;
use zpad::tui::{App, CloseHandshake, CrosstermEvents, TerminalGuard};

mod logging;

/// Resolve the optional file argument against `cwd`. A directory is refused;
/// a missing file is left for the open itself to report.
fn resolve_startup_file(cwd: &Path, arg: Option<&str>) -> io::Result<Option<PathBuf>> {
    let Some(arg) = arg.map(str::trim).filter(|a| !a.is_empty()) else {
        return Ok(None);
    };
    let path = cwd.join(arg);
    if path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is a directory", path.display()),
        ));
    }
    Ok(Some(path))
}

fn load_user_settings() -> Settings {
    if let Err(err) = ensure_settings_file() {
        tracing::warn!(error = %err, "cannot create settings file");
    }
    load_settings().unwrap_or_default()
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let arg = std::env::args().nth(1);
    let open_file = resolve_startup_file(&cwd, arg.as_deref())?;

    let settings = load_user_settings();
    let mut keymap = KeybindingService::with_defaults();
    for rule in keymap.apply_rules(&settings.keybindings) {
        tracing::warn!(key = %rule.key, command = %rule.command, "ignoring keybinding");
    }
    let theme = UiTheme::from_settings(&settings.theme);

    let mut session = EditorSession::new().with_font_size(settings.font_size);
    if let Some(path) = &open_file {
        session.open_path(path)?;
    }

    let guard = TerminalGuard::new()?;
    let (signal_tx, signal_rx) = mpsc::channel();
    let handshake = CloseHandshake::new();
    if let Err(err) = install_termination_signals(guard.restorer(), signal_tx, handshake.clone())
    {
        tracing::warn!(error = %err, "signal handlers unavailable");
    }

    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut app = App::new(terminal, Box::new(CrosstermEvents), session)
        .with_keymap(keymap)
        .with_theme(theme)
        .with_signals(signal_rx, handshake)
        .on_title(|title| {
            let _ = crossterm::execute!(io::stdout(), crossterm::terminal::SetTitle(title));
        });

    let result = app.run();
    drop(app);
    drop(guard);
    result?;
    Ok(())
}

fn main() -> ExitCode {
    let logging = logging::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "fatal");
            match &logging {
                Some(logging) => eprintln!(
                    "zpad: {} (log: {})",
                    err,
                    logging.log_dir().display()
                ),
                None => eprintln!("zpad: {}", err),
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/cli_startup_paths.rs"]
mod tests;
