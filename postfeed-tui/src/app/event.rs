//! Event handling infrastructure
//!
//! Merges UI events (keyboard, resize, tick) with service events
//! from the EventBus into a unified action stream.

use std::time::Duration;

use crossbeam_channel::Receiver;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use libpostfeed::service::events::Event;

use crate::app::{key_action, Action, AppState};
use crate::services::event_to_action;

/// TUI events that can be dispatched
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// Keyboard input
    Key(KeyEvent),

    /// Terminal resize
    Resize(u16, u16),

    /// Periodic tick for the spinner
    Tick,

    /// Service event (from EventBus)
    Service(Event),
}

impl TuiEvent {
    /// Convert into the action the reducer consumes
    ///
    /// Keys go through the keymap for the current state. Unbound keys and
    /// service start events yield `None`.
    pub fn into_action(self, state: &AppState) -> Option<Action> {
        match self {
            TuiEvent::Key(key) => key_action(state, key),
            TuiEvent::Resize(w, h) => Some(Action::Resize(w, h)),
            TuiEvent::Tick => Some(Action::Tick),
            TuiEvent::Service(event) => event_to_action(event),
        }
    }
}

/// Event handler that polls for terminal and service events
pub struct EventHandler {
    tick_rate: Duration,
    service_rx: Option<Receiver<Event>>,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            service_rx: None,
        }
    }

    /// Also deliver events from the service bridge
    pub fn with_service_events(mut self, rx: Receiver<Event>) -> Self {
        self.service_rx = Some(rx);
        self
    }

    /// Drain service events that are ready without blocking
    pub fn pending_service_events(&self) -> Vec<TuiEvent> {
        match &self.service_rx {
            Some(rx) => rx.try_iter().map(TuiEvent::Service).collect(),
            None => Vec::new(),
        }
    }

    /// Poll for the next terminal event, blocking up to tick_rate duration
    ///
    /// Returns `TuiEvent::Tick` if no event occurred within tick_rate.
    pub fn next(&self) -> std::io::Result<TuiEvent> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                // Windows reports releases too; only presses drive actions
                CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => {
                    Ok(TuiEvent::Key(key))
                }
                CrosstermEvent::Resize(w, h) => Ok(TuiEvent::Resize(w, h)),
                _ => Ok(TuiEvent::Tick), // Ignore other events
            }
        } else {
            Ok(TuiEvent::Tick)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use libpostfeed::Post;

    #[test]
    fn test_event_handler_creation() {
        let handler = EventHandler::new(100);
        assert_eq!(handler.tick_rate, Duration::from_millis(100));
        assert!(handler.pending_service_events().is_empty());
    }

    #[test]
    fn test_custom_tick_rate() {
        let handler = EventHandler::new(250);
        assert_eq!(handler.tick_rate, Duration::from_millis(250));
    }

    #[test]
    fn test_service_events_are_drained() {
        let (tx, rx) = unbounded();
        let handler = EventHandler::new(100).with_service_events(rx);

        tx.send(Event::ListStarted {
            request_id: 1,
            limit: 10,
        })
        .unwrap();
        tx.send(Event::ListCompleted {
            request_id: 1,
            posts: vec![Post::new(1, "A", "X")],
        })
        .unwrap();

        let events = handler.pending_service_events();
        assert_eq!(events.len(), 2);

        let state = AppState::new();
        let actions: Vec<Action> = events
            .into_iter()
            .filter_map(|event| event.into_action(&state))
            .collect();
        assert_eq!(actions.len(), 1);
        assert!(matches!(actions[0], Action::PostsLoaded { request_id: 1, .. }));

        assert!(handler.pending_service_events().is_empty());
    }

    #[test]
    fn test_tick_converts_to_tick_action() {
        let state = AppState::new();
        assert!(matches!(TuiEvent::Tick.into_action(&state), Some(Action::Tick)));
    }

    #[test]
    fn test_keys_go_through_keymap() {
        use crossterm::event::{KeyCode, KeyModifiers};

        let state = AppState::new();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let letter = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);

        assert!(matches!(TuiEvent::Key(ctrl_c).into_action(&state), Some(Action::Quit)));
        assert!(TuiEvent::Key(letter).into_action(&state).is_none());
    }
}
