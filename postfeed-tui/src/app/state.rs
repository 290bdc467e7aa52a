//! Application state
//!
//! Immutable state structure following functional programming principles.
//! All state transitions happen through the reducer (see `reducer.rs`).
//!
//! Load state is tracked per concern rather than as independent flags:
//! the list has a `FeedStatus`, the composer a `SubmitState`. A refresh and
//! a create may be in flight together; two list requests may not both be
//! current (only the newest is awaited).

use libpostfeed::config::UiSettings;
use libpostfeed::{Draft, Post};

use super::actions::Focus;

/// Root application state
///
/// This is the single source of truth for the entire application.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Should the application quit?
    pub should_quit: bool,

    /// Pane receiving keyboard input
    pub focus: Focus,

    /// Help overlay visible?
    pub help_visible: bool,

    /// Post list
    pub feed: FeedState,

    /// Post form
    pub composer: ComposerState,

    /// Status bar state
    pub status: StatusBarState,

    /// Error overlay state
    pub error: Option<String>,

    /// Ticks seen so far, drives the spinner
    pub tick: u64,

    /// UI configuration
    pub config: UiConfig,
}

/// Lifecycle of the post list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    /// Nothing loaded yet; the whole screen shows a spinner
    Loading,

    /// List shown, no list request in flight
    Ready,

    /// List shown with a refresh indicator while a reload runs
    Refreshing,
}

/// Post list state
#[derive(Debug, Clone)]
pub struct FeedState {
    /// Posts in display order
    pub posts: Vec<Post>,

    /// Current lifecycle phase
    pub status: FeedStatus,

    /// Id of the list request whose response will be applied
    ///
    /// Responses carrying any other id are stale and dropped.
    pub pending_request: Option<u64>,

    /// Highest list request id issued so far
    pub last_request_id: u64,

    /// Index of the highlighted post
    pub selected: usize,
}

/// Submit control state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitState {
    /// Submit enabled
    Idle,

    /// A create request is in flight for this draft; submit disabled
    Posting { request_id: String, draft: Draft },
}

/// Post form state
#[derive(Debug, Clone)]
pub struct ComposerState {
    /// Current field contents
    pub draft: Draft,

    /// Submit control state
    pub submit: SubmitState,

    /// Id of the last post this session created
    pub last_post_id: Option<u64>,
}

/// Status bar state
#[derive(Debug, Clone, Default)]
pub struct StatusBarState {
    /// Current status message
    pub message: Option<String>,
}

/// UI configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Use colors?
    pub colors_enabled: bool,

    /// Use unicode symbols (false = ASCII fallback)
    pub unicode_enabled: bool,

    /// Tick rate in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            should_quit: false,
            focus: Focus::Title,
            help_visible: false,
            feed: FeedState::default(),
            composer: ComposerState::default(),
            status: StatusBarState::default(),
            error: None,
            tick: 0,
            config: UiConfig::default(),
        }
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            // The screen starts out loading; nothing is rendered until the
            // initial list request completes
            status: FeedStatus::Loading,
            pending_request: None,
            last_request_id: 0,
            selected: 0,
        }
    }
}

impl Default for ComposerState {
    fn default() -> Self {
        Self {
            draft: Draft::default(),
            submit: SubmitState::Idle,
            last_post_id: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self::from_settings(&UiSettings::default())
    }
}

impl UiConfig {
    /// Build from the config file settings, then apply environment overrides
    pub fn from_settings(settings: &UiSettings) -> Self {
        let colors_enabled = std::env::var("NO_COLOR").is_err()
            && std::env::var("POSTFEED_NO_COLOR").is_err();

        let unicode_enabled = colors_enabled; // Same heuristic for now

        let tick_rate_ms = std::env::var("POSTFEED_TICK_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(settings.tick_rate_ms);

        Self {
            colors_enabled,
            unicode_enabled,
            tick_rate_ms,
        }
    }
}

impl FeedState {
    /// True until the first list request has settled
    pub fn initial_loading(&self) -> bool {
        self.status == FeedStatus::Loading
    }

    /// True while a reload runs behind a visible list
    pub fn is_refreshing(&self) -> bool {
        self.status == FeedStatus::Refreshing
    }

    /// Id the next list request should carry
    pub fn next_request_id(&self) -> u64 {
        self.last_request_id + 1
    }
}

impl ComposerState {
    pub fn is_posting(&self) -> bool {
        matches!(self.submit, SubmitState::Posting { .. })
    }

    /// Id of the in-flight create request, if any
    pub fn posting_request(&self) -> Option<&str> {
        match &self.submit {
            SubmitState::Posting { request_id, .. } => Some(request_id.as_str()),
            SubmitState::Idle => None,
        }
    }
}

impl AppState {
    /// Create new application state with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state using the given UI configuration
    pub fn with_config(config: UiConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn initial_loading(&self) -> bool {
        self.feed.initial_loading()
    }

    pub fn is_refreshing(&self) -> bool {
        self.feed.is_refreshing()
    }

    pub fn is_posting(&self) -> bool {
        self.composer.is_posting()
    }

    /// Check if submitting is allowed
    ///
    /// The draft is never validated; submit is only blocked while a create
    /// is already in flight or before the screen has content.
    pub fn can_submit(&self) -> bool {
        !self.is_posting() && !self.initial_loading()
    }

    /// Check if pull-to-refresh is available
    ///
    /// Refreshing is possible once the list has been shown, including while
    /// a refresh is already running (the newer request wins).
    pub fn can_refresh(&self) -> bool {
        !self.initial_loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_loading() {
        let state = AppState::new();
        assert!(state.initial_loading());
        assert!(!state.is_refreshing());
        assert!(!state.is_posting());
        assert!(!state.can_submit());
        assert!(!state.can_refresh());
        assert_eq!(state.focus, Focus::Title);
        assert_eq!(state.feed.next_request_id(), 1);
    }

    #[test]
    fn test_posting_request_id() {
        let mut composer = ComposerState::default();
        assert_eq!(composer.posting_request(), None);

        composer.submit = SubmitState::Posting {
            request_id: "abc".to_string(),
            draft: Draft::new("T", "B"),
        };
        assert!(composer.is_posting());
        assert_eq!(composer.posting_request(), Some("abc"));
    }
}
