//! Terminal setup and teardown.

use std::io::{self, IsTerminal, Stdout};

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{DashError, Result};

/// Terminal type the dashboard draws on.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

fn io_error(context: &str) -> impl FnOnce(io::Error) -> DashError + '_ {
    move |e| DashError::Io(format!("{context}: {e}"))
}

/// Switches stdout to raw mode on the alternate screen.
///
/// Also installs a panic hook that puts the terminal back before the panic
/// message is printed.
///
/// # Errors
///
/// Returns [`DashError::Io`] if stdout is not a TTY or the terminal cannot
/// be prepared. Raw mode is undone on failure.
pub fn setup_terminal() -> Result<Tui> {
    let mut stdout = io::stdout();
    if !stdout.is_terminal() {
        return Err(DashError::Io(
            "the dashboard needs an interactive terminal".to_string(),
        ));
    }

    enable_raw_mode().map_err(io_error("failed to enable raw mode"))?;

    let prepared = execute!(stdout, EnterAlternateScreen)
        .map_err(io_error("failed to enter alternate screen"))
        .and_then(|()| {
            Terminal::new(CrosstermBackend::new(stdout))
                .map_err(io_error("failed to create terminal"))
        });
    if prepared.is_err() {
        leave_screen();
        return prepared;
    }

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        leave_screen();
        default_hook(info);
    }));

    prepared
}

/// Leaves the alternate screen and raw mode.
///
/// # Errors
///
/// Returns [`DashError::Io`] if the terminal cannot be restored.
pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().map_err(io_error("failed to disable raw mode"))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(io_error("failed to leave alternate screen"))?;
    terminal
        .show_cursor()
        .map_err(io_error("failed to show cursor"))
}

/// Best-effort restore that works without a [`Tui`] handle.
fn leave_screen() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}
