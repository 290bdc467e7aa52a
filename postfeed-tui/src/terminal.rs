//! Terminal management
//!
//! Handles terminal setup, teardown, and restoration.
//! Ensures terminal is properly restored even on panic.

use std::io::{self, Stdout};

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::error::Result;

/// Terminal type alias
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Setup terminal for TUI rendering
///
/// - Enables raw mode (no line buffering, no echo)
/// - Enters alternate screen (restore on exit)
pub fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        // Leave the shell usable if we bail out half way
        let _ = disable_raw_mode();
        return Err(e.into());
    }

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore terminal to normal mode
///
/// - Leaves alternate screen
/// - Disables raw mode
/// - Shows the cursor again
pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    disable_raw_mode()?;
    Ok(())
}

/// Install panic hook to restore terminal on panic
///
/// The panic message would otherwise be swallowed by the alternate screen.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);

        original_hook(panic_info);
    }));
}
