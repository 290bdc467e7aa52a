//! Event system for progress tracking
//!
//! This module provides an in-process event bus for distributing progress
//! events to subscribers without blocking operations.
//!
//! # Architecture
//!
//! The event bus uses `tokio::sync::broadcast` for multi-subscriber support.
//! Events are emitted by the feed service around every remote call and can be
//! consumed by any number of subscribers (TUI updates, logging, etc.).
//!
//! # Non-Blocking Behavior
//!
//! If no subscribers exist, events are dropped immediately without allocation
//! or blocking. Subscribers can lag without blocking emitters.
//!
//! # Example
//!
//! ```no_run
//! use libpostfeed::service::events::{EventBus, Event};
//!
//! # async fn example() {
//! let event_bus = EventBus::new(100);
//!
//! // Subscribe to events
//! let mut receiver = event_bus.subscribe();
//!
//! // Emit events (non-blocking)
//! event_bus.emit(Event::ListStarted {
//!     request_id: 1,
//!     limit: 10,
//! });
//!
//! // Receive events
//! if let Ok(event) = receiver.recv().await {
//!     println!("Received: {:?}", event);
//! }
//! # }
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::{Draft, Post};

/// Event receiver type alias
pub type EventReceiver = broadcast::Receiver<Event>;

/// Event bus for distributing progress events
///
/// The event bus uses a broadcast channel to distribute events to multiple
/// subscribers. Events are dropped if no subscribers exist, ensuring
/// non-blocking behavior.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a new event bus with the specified capacity
    ///
    /// The capacity determines how many events can be buffered per subscriber
    /// before older events are dropped (if the subscriber is lagging).
    ///
    /// # Arguments
    ///
    /// * `capacity` - Buffer capacity per subscriber (recommended: 100)
    ///
    /// # Example
    ///
    /// ```
    /// use libpostfeed::service::events::EventBus;
    ///
    /// let event_bus = EventBus::new(100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events
    ///
    /// Returns a receiver that will receive all events emitted after
    /// subscription. Multiple subscribers are supported.
    ///
    /// # Example
    ///
    /// ```
    /// use libpostfeed::service::events::EventBus;
    ///
    /// let event_bus = EventBus::new(100);
    /// let mut receiver1 = event_bus.subscribe();
    /// let mut receiver2 = event_bus.subscribe();
    /// ```
    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// This is a non-blocking operation. If no subscribers exist, the event
    /// is dropped immediately. If subscribers are lagging, they may miss
    /// events (oldest events are dropped first).
    ///
    /// # Arguments
    ///
    /// * `event` - The event to emit
    ///
    /// # Example
    ///
    /// ```
    /// use libpostfeed::service::events::{EventBus, Event};
    /// use libpostfeed::Draft;
    ///
    /// let event_bus = EventBus::new(100);
    /// event_bus.emit(Event::CreateStarted {
    ///     request_id: "abc123".to_string(),
    ///     draft: Draft::new("Hello", "World"),
    /// });
    /// ```
    pub fn emit(&self, event: Event) {
        // send() only fails when nobody is subscribed
        let _ = self.sender.send(event);
    }
}

/// Events emitted by the feed service around remote calls
///
/// List requests are identified by a caller-assigned sequence number so
/// consumers can tell a stale response from the latest one. Create requests
/// carry an opaque tracking id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A list request was sent
    ListStarted {
        request_id: u64,
        limit: usize,
    },

    /// A list request returned posts
    ListCompleted {
        request_id: u64,
        posts: Vec<Post>,
    },

    /// A list request failed
    ListFailed {
        request_id: u64,
        error: String,
    },

    /// A create request was sent
    CreateStarted {
        request_id: String,
        draft: Draft,
    },

    /// The service confirmed the new post
    CreateCompleted {
        request_id: String,
        post: Post,
    },

    /// A create request failed
    CreateFailed {
        request_id: String,
        error: String,
    },
}
