//! Pure reducer function for state transitions
//!
//! Following functional programming principles, the reducer is a pure function:
//! `(State, Action) -> State`
//!
//! The reducer has NO side effects - it only computes new state values.
//! Network requests are issued by the event loop, which feeds their outcomes
//! back in as actions.

use super::actions::{Action, Focus, ListKind};
use super::state::{AppState, ComposerState, FeedState, FeedStatus, StatusBarState, SubmitState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use libpostfeed::Draft;

/// Pure reducer function
///
/// Takes current state and an action, returns new state.
///
/// # Purity Guarantees
///
/// - No network requests
/// - No file I/O
/// - No mutations of the input (returns new state)
/// - Deterministic (same inputs -> same output)
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        // === UI Events ===
        Action::Tick => AppState {
            tick: state.tick.wrapping_add(1),
            ..state
        },
        Action::Resize(_, _) => state, // Terminal auto-handles resize

        // === Navigation ===
        Action::Quit => AppState {
            should_quit: true,
            ..state
        },

        Action::ShowHelp => AppState {
            help_visible: true,
            ..state
        },

        Action::HideHelp => AppState {
            help_visible: false,
            ..state
        },

        Action::FocusNext => AppState {
            focus: state.focus.next(),
            ..state
        },

        Action::FocusPrev => AppState {
            focus: state.focus.prev(),
            ..state
        },

        Action::SelectNext => {
            let last = state.feed.posts.len().saturating_sub(1);
            AppState {
                feed: FeedState {
                    selected: (state.feed.selected + 1).min(last),
                    ..state.feed
                },
                ..state
            }
        }

        Action::SelectPrev => AppState {
            feed: FeedState {
                selected: state.feed.selected.saturating_sub(1),
                ..state.feed
            },
            ..state
        },

        // === Feed Actions ===
        Action::RefreshRequested => {
            // The event loop allocates a request id and dispatches ListStarted
            state
        }

        Action::ListStarted { request_id, kind } => {
            let status = match (kind, state.feed.status) {
                (ListKind::Initial, _) => FeedStatus::Loading,
                // Nothing to show yet: keep the full-screen spinner
                (ListKind::Refresh, FeedStatus::Loading) => FeedStatus::Loading,
                (ListKind::Refresh, _) => FeedStatus::Refreshing,
            };

            AppState {
                feed: FeedState {
                    status,
                    pending_request: Some(request_id),
                    last_request_id: state.feed.last_request_id.max(request_id),
                    ..state.feed
                },
                status: StatusBarState::default(),
                ..state
            }
        }

        Action::PostsLoaded { request_id, posts } => {
            if state.feed.pending_request != Some(request_id) {
                tracing::debug!(request_id, "Dropping stale list response");
                return state;
            }

            AppState {
                feed: FeedState {
                    posts,
                    status: FeedStatus::Ready,
                    pending_request: None,
                    selected: 0,
                    ..state.feed
                },
                ..state
            }
        }

        Action::ListFailed { request_id, error } => {
            if state.feed.pending_request != Some(request_id) {
                tracing::debug!(request_id, "Dropping stale list failure");
                return state;
            }

            AppState {
                feed: FeedState {
                    status: FeedStatus::Ready,
                    pending_request: None,
                    ..state.feed
                },
                error: Some(format!("Could not load posts: {}", error)),
                ..state
            }
        }

        // === Composer Actions ===
        Action::TitleChanged(title) => {
            if state.is_posting() {
                return state;
            }
            AppState {
                composer: ComposerState {
                    draft: Draft {
                        title,
                        ..state.composer.draft
                    },
                    ..state.composer
                },
                status: StatusBarState::default(),
                ..state
            }
        }

        Action::BodyChanged(body) => {
            if state.is_posting() {
                return state;
            }
            AppState {
                composer: ComposerState {
                    draft: Draft {
                        body,
                        ..state.composer.draft
                    },
                    ..state.composer
                },
                status: StatusBarState::default(),
                ..state
            }
        }

        Action::SubmitRequested => {
            // The event loop checks can_submit() and dispatches PostStarted
            state
        }

        Action::PostStarted { request_id } => {
            if !state.can_submit() {
                return state;
            }
            let draft = state.composer.draft.clone();
            AppState {
                composer: ComposerState {
                    submit: SubmitState::Posting { request_id, draft },
                    ..state.composer
                },
                ..state
            }
        }

        Action::PostCreated { request_id, post } => {
            if state.composer.posting_request() != Some(request_id.as_str()) {
                return state;
            }

            let message = format!("Post {} added", post.id);
            let last_post_id = Some(post.id);

            // Keep the highlight on the post it was on
            let selected = if state.feed.posts.is_empty() {
                0
            } else {
                state.feed.selected + 1
            };

            let mut posts = Vec::with_capacity(state.feed.posts.len() + 1);
            posts.push(post);
            posts.extend(state.feed.posts);

            AppState {
                feed: FeedState {
                    posts,
                    selected,
                    ..state.feed
                },
                composer: ComposerState {
                    draft: Draft::default(),
                    submit: SubmitState::Idle,
                    last_post_id,
                },
                status: StatusBarState {
                    message: Some(message),
                },
                ..state
            }
        }

        Action::PostFailed { request_id, error } => {
            if state.composer.posting_request() != Some(request_id.as_str()) {
                return state;
            }

            // Draft is kept so the user can submit again
            AppState {
                composer: ComposerState {
                    submit: SubmitState::Idle,
                    ..state.composer
                },
                error: Some(format!("Could not add post: {}", error)),
                ..state
            }
        }

        // === Error Handling ===
        Action::DismissError => AppState {
            error: None,
            ..state
        },
    }
}

/// Map a key press to the action it triggers in the current state
///
/// This is where keybindings are defined. Returns `None` for keys with no
/// binding; the event loop forwards those to the focused text input.
/// `RefreshRequested` and `SubmitRequested` only take effect through
/// `services::dispatch`, which starts the request.
pub fn key_action(state: &AppState, key: KeyEvent) -> Option<Action> {
    // Global keybindings (work everywhere)
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return Some(Action::Quit),

        (KeyCode::F(1), _) => {
            return Some(if state.help_visible {
                Action::HideHelp
            } else {
                Action::ShowHelp
            });
        }

        (KeyCode::Esc, _) if state.error.is_some() => return Some(Action::DismissError),
        (KeyCode::Esc, _) if state.help_visible => return Some(Action::HideHelp),

        (KeyCode::F(5), _) | (KeyCode::Char('r'), KeyModifiers::CONTROL)
            if state.can_refresh() =>
        {
            return Some(Action::RefreshRequested);
        }

        _ => {}
    }

    // Overlays and the loading screen swallow everything else
    if state.help_visible || state.error.is_some() || state.initial_loading() {
        return None;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Tab, _) => return Some(Action::FocusNext),
        (KeyCode::BackTab, _) => return Some(Action::FocusPrev),
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => return Some(Action::SubmitRequested),
        _ => {}
    }

    match state.focus {
        Focus::Title => match key.code {
            KeyCode::Enter => Some(Action::FocusNext),
            _ => None,
        },
        Focus::Body => match key.code {
            KeyCode::Enter => Some(Action::SubmitRequested),
            _ => None,
        },
        Focus::List => handle_list_key(state, key),
    }
}

/// Handle list-specific keys
fn handle_list_key(state: &AppState, key: KeyEvent) -> Option<Action> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) if !state.is_posting() => Some(Action::Quit),
        (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => Some(Action::SelectNext),
        (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => Some(Action::SelectPrev),
        _ => None,
    }
}
