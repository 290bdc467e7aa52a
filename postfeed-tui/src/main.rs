//! postfeed-tui - Terminal UI for a remote post feed
//!
//! Single screen: a form for adding a post on top of the most recent posts.
//! Logs go to a file under the data directory since the terminal belongs to
//! the UI.

use libpostfeed::config::{resolve_data_path, Config};
use libpostfeed::logging;
use postfeed_tui::{
    app::{event::EventHandler, event::TuiEvent, AppState, UiConfig},
    error::Result,
    services::{dispatch, start_initial_load, ServiceHandle},
    terminal::{install_panic_hook, restore_terminal, setup_terminal, Tui},
    ui::{self, composer::ComposerWidget},
};

const LOG_FILE: &str = "postfeed-tui.log";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<()> {
    let config = Config::load()?;
    init_logging();

    let services = ServiceHandle::new(&config)?;
    let ui_config = UiConfig::from_settings(&config.ui);
    let events = EventHandler::new(ui_config.tick_rate_ms).with_service_events(services.subscribe());

    tracing::info!(
        base_url = %config.service.base_url,
        client = services.client_name(),
        "Starting postfeed-tui"
    );

    // Install panic hook to restore terminal on panic
    install_panic_hook();

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, AppState::with_config(ui_config), &services, &events);
    restore_terminal(&mut terminal)?;

    result
}

fn init_logging() {
    let path = match resolve_data_path() {
        Ok(dir) => dir.join(LOG_FILE),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            return;
        }
    };

    if let Err(e) = logging::from_env(false).init_with_file(&path) {
        eprintln!("Warning: cannot open log file {}: {}", path.display(), e);
    }
}

fn run_app(
    terminal: &mut Tui,
    state: AppState,
    services: &ServiceHandle,
    events: &EventHandler,
) -> Result<()> {
    let mut composer = ComposerWidget::new();
    let mut state = start_initial_load(state, services);

    loop {
        terminal.draw(|frame| ui::render(frame, &state, &mut composer))?;

        let event = events.next()?;
        let key = match event {
            TuiEvent::Key(key) => Some(key),
            _ => None,
        };

        match event.into_action(&state) {
            Some(action) => state = dispatch(state, action, services),
            // Unbound keys are text for the focused editor
            None => {
                if let Some(key) = key.filter(|_| accepts_text(&state)) {
                    if let Some(action) = composer.input(state.focus, key) {
                        state = dispatch(state, action, services);
                    }
                }
            }
        }

        for event in events.pending_service_events() {
            if let Some(action) = event.into_action(&state) {
                state = dispatch(state, action, services);
            }
        }

        // Editors follow the draft (cleared after a successful create)
        composer.sync(&state.composer.draft);

        if state.should_quit {
            tracing::info!("Quitting");
            break;
        }
    }

    Ok(())
}

/// Whether an unbound key should reach the focused text input
fn accepts_text(state: &AppState) -> bool {
    state.focus.is_input()
        && !state.is_posting()
        && !state.initial_loading()
        && !state.help_visible
        && state.error.is_none()
}
