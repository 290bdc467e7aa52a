//! Core types for Postfeed

use serde::{Deserialize, Serialize};

/// A post as returned by the remote post service
///
/// Posts are never edited locally. The feed replaces them wholesale on a
/// reload or prepends a freshly created one. Fields the service sends beyond
/// `id`, `title` and `body` (e.g. `userId`) are ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub body: String,
}

impl Post {
    pub fn new(id: u64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
        }
    }
}

/// User-entered, not-yet-submitted post content
///
/// Drafts are sent as-is; empty titles and bodies are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub title: String,
    pub body: String,
}

impl Draft {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// True when both fields are empty
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.body.is_empty()
    }

    /// Reset both fields to empty strings
    pub fn clear(&mut self) {
        self.title.clear();
        self.body.clear();
    }
}
