//! Service layer adapter for TUI
//!
//! This module provides an adapter between the async FeedService
//! and the synchronous TUI event loop.
//!
//! # Architecture
//!
//! - `ServiceHandle`: Wraps FeedService and manages tokio runtime
//! - Requests: Spawned on the runtime, return immediately
//! - Events: Bridges tokio broadcast channel to crossbeam for sync event loop
//!
//! Outcomes never come back through return values; the event loop learns
//! about them from the bridged events, converted with [`event_to_action`].
//!
//! # Example
//!
//! ```no_run
//! use libpostfeed::config::Config;
//! use postfeed_tui::services::ServiceHandle;
//! use postfeed_tui::app::actions::ListKind;
//!
//! # fn example() -> postfeed_tui::error::Result<()> {
//! let services = ServiceHandle::new(&Config::default())?;
//! let events = services.subscribe();
//!
//! services.request_list(1, ListKind::Initial);
//!
//! // In event loop, check for events
//! if let Ok(event) = events.try_recv() {
//!     // Handle event
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver};
use libpostfeed::config::Config;
use libpostfeed::service::events::Event;
use libpostfeed::{Draft, FeedService};
use tokio::sync::broadcast::error::RecvError;

use crate::app::actions::{Action, ListKind};
use crate::app::{reduce, AppState};
use crate::error::Result;

/// Service handle for TUI operations
///
/// Wraps FeedService and provides the async bridge for the TUI event loop.
/// Uses a tokio runtime to handle network requests without blocking the UI.
pub struct ServiceHandle {
    service: Arc<FeedService>,
    runtime: tokio::runtime::Runtime,
}

impl ServiceHandle {
    /// Create a service handle talking HTTP to the configured base URL
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The HTTP client cannot be built
    /// - Tokio runtime cannot be created
    pub fn new(config: &Config) -> Result<Self> {
        let service = FeedService::from_config(config)?;
        Self::with_service(service)
    }

    /// Create a service handle around an existing service
    ///
    /// Tests use this with a mock-backed service.
    pub fn with_service(service: FeedService) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;

        Ok(Self {
            service: Arc::new(service),
            runtime,
        })
    }

    /// Name of the underlying client ("http", "mock")
    pub fn client_name(&self) -> &str {
        self.service.client_name()
    }

    /// Subscribe to service events
    ///
    /// Returns a receiver that will receive every service event emitted
    /// after this call. This bridges the tokio broadcast channel to a
    /// crossbeam channel for sync use. Subscribe before issuing requests.
    pub fn subscribe(&self) -> Receiver<Event> {
        let (tx, rx) = unbounded();

        // Spawn task to bridge tokio broadcast -> crossbeam channel
        let mut event_rx = self.service.subscribe();
        self.runtime.spawn(async move {
            loop {
                match event_rx.recv().await {
                    Ok(event) => {
                        if tx.send(event).is_err() {
                            // Receiver dropped, stop forwarding
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("Event receiver lagged, skipped {} events", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        rx
    }

    /// Start a list request
    ///
    /// The page size follows `kind`: the initial limit for the load on
    /// activation, the refresh limit for a pull-to-refresh.
    pub fn request_list(&self, request_id: u64, kind: ListKind) {
        let service = Arc::clone(&self.service);

        self.runtime.spawn(async move {
            let result = match kind {
                ListKind::Initial => service.load_initial(request_id).await,
                ListKind::Refresh => service.refresh(request_id).await,
            };
            if let Err(e) = result {
                // Already reported through the event bus
                tracing::debug!(request_id, "List request ended with error: {}", e);
            }
        });
    }

    /// Start a create request for `draft`
    ///
    /// Returns the request id the outcome events will carry.
    pub fn request_create(&self, draft: Draft) -> String {
        let request_id = uuid::Uuid::new_v4().to_string();

        let service = Arc::clone(&self.service);
        let id = request_id.clone();
        self.runtime.spawn(async move {
            if let Err(e) = service.create_post(&id, draft).await {
                tracing::debug!(request_id = %id, "Create request ended with error: {}", e);
            }
        });

        request_id
    }
}

/// Issue the list request made when the screen opens
pub fn start_initial_load(state: AppState, services: &ServiceHandle) -> AppState {
    let request_id = state.feed.next_request_id();
    let state = reduce(
        state,
        Action::ListStarted {
            request_id,
            kind: ListKind::Initial,
        },
    );
    services.request_list(request_id, ListKind::Initial);
    state
}

/// Apply an action, performing the request it asks for
///
/// `RefreshRequested` and `SubmitRequested` start network requests when the
/// state allows them; every other action goes straight to the reducer.
/// Outcomes arrive later through the event bridge, always after the start
/// action has been reduced.
pub fn dispatch(state: AppState, action: Action, services: &ServiceHandle) -> AppState {
    match action {
        Action::RefreshRequested if state.can_refresh() => {
            let request_id = state.feed.next_request_id();
            let state = reduce(
                state,
                Action::ListStarted {
                    request_id,
                    kind: ListKind::Refresh,
                },
            );
            services.request_list(request_id, ListKind::Refresh);
            state
        }
        Action::SubmitRequested if state.can_submit() => {
            let request_id = services.request_create(state.composer.draft.clone());
            reduce(state, Action::PostStarted { request_id })
        }
        other => reduce(state, other),
    }
}

/// Convert a service event into the action it drives, if any
///
/// Start events are dropped: the event loop dispatches `ListStarted` and
/// `PostStarted` itself when it issues a request.
pub fn event_to_action(event: Event) -> Option<Action> {
    match event {
        Event::ListStarted { .. } | Event::CreateStarted { .. } => None,
        Event::ListCompleted { request_id, posts } => {
            Some(Action::PostsLoaded { request_id, posts })
        }
        Event::ListFailed { request_id, error } => Some(Action::ListFailed { request_id, error }),
        Event::CreateCompleted { request_id, post } => {
            Some(Action::PostCreated { request_id, post })
        }
        Event::CreateFailed { request_id, error } => Some(Action::PostFailed { request_id, error }),
    }
}
