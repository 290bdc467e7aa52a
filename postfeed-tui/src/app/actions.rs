//! Actions for the reducer pattern
//!
//! All state transitions are triggered by actions. This module defines
//! all possible actions that can modify application state.

use libpostfeed::Post;

/// Actions that trigger state transitions
///
/// Actions are immutable data describing what happened. The reducer
/// (see `reducer.rs`) applies them to state; the event loop performs the
/// side effects some of them ask for (network requests). Key presses are
/// turned into actions by `reducer::key_action` before they get here.
#[derive(Debug, Clone)]
pub enum Action {
    // === UI Events ===
    /// Periodic tick for the spinner
    Tick,

    /// Terminal resize event
    Resize(u16, u16),

    // === Navigation ===
    /// Quit the application
    Quit,

    /// Show help overlay
    ShowHelp,

    /// Hide help overlay
    HideHelp,

    /// Move focus to the next pane (title -> body -> list)
    FocusNext,

    /// Move focus to the previous pane
    FocusPrev,

    /// Move the list selection down
    SelectNext,

    /// Move the list selection up
    SelectPrev,

    // === Feed Actions ===
    /// User asked for a full reload of the list
    RefreshRequested,

    /// A list request was issued
    ListStarted { request_id: u64, kind: ListKind },

    /// A list request returned posts
    PostsLoaded { request_id: u64, posts: Vec<Post> },

    /// A list request failed
    ListFailed { request_id: u64, error: String },

    // === Composer Actions ===
    /// Title input changed
    TitleChanged(String),

    /// Body input changed
    BodyChanged(String),

    /// User pressed submit
    SubmitRequested,

    /// A create request was issued for the current draft
    PostStarted { request_id: String },

    /// The service confirmed the new post
    PostCreated { request_id: String, post: Post },

    /// A create request failed
    PostFailed { request_id: String, error: String },

    // === Error Handling ===
    /// Dismiss error overlay
    DismissError,
}

/// Focusable panes of the single screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Post title input
    Title,

    /// Post body input
    Body,

    /// Post list
    List,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Title => Focus::Body,
            Focus::Body => Focus::List,
            Focus::List => Focus::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Title => Focus::List,
            Focus::Body => Focus::Title,
            Focus::List => Focus::Body,
        }
    }

    /// True for the two text inputs
    pub fn is_input(self) -> bool {
        matches!(self, Focus::Title | Focus::Body)
    }
}

/// Which list operation a request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Load on screen activation
    Initial,

    /// Pull-to-refresh
    Refresh,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycle() {
        assert_eq!(Focus::Title.next(), Focus::Body);
        assert_eq!(Focus::Body.next(), Focus::List);
        assert_eq!(Focus::List.next(), Focus::Title);

        for focus in [Focus::Title, Focus::Body, Focus::List] {
            assert_eq!(focus.next().prev(), focus);
        }
    }

    #[test]
    fn test_input_panes() {
        assert!(Focus::Title.is_input());
        assert!(Focus::Body.is_input());
        assert!(!Focus::List.is_input());
    }
}
