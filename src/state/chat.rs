//! Role-scoped chat transcripts and their history load status.
//!
//! DESIGN
//! ======
//! The store is a plain owned value mutated through `&mut self`; callers
//! replace a role's transcript wholesale with `set`, so readers never see a
//! half-applied update. Persisting a transcript is the caller's job.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use std::collections::{HashMap, HashSet};

use crate::net::types::{ChatMessage, Role};

/// Per-role transcripts plus "history fetched this session" flags.
#[derive(Clone, Debug, Default)]
pub struct ChatStore {
    transcripts: HashMap<Role, Vec<ChatMessage>>,
    loaded: HashSet<Role>,
}

impl ChatStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Transcript for `role`, empty if nothing has been stored.
    #[must_use]
    pub fn get(&self, role: Role) -> &[ChatMessage] {
        self.transcripts.get(&role).map(Vec::as_slice).unwrap_or_default()
    }

    /// Replace the transcript for `role`.
    pub fn set(&mut self, role: Role, messages: Vec<ChatMessage>) {
        self.transcripts.insert(role, messages);
    }

    /// Drop one role's transcript and forget that its history was fetched.
    pub fn reset(&mut self, role: Role) {
        self.transcripts.remove(&role);
        self.loaded.remove(&role);
    }

    /// Drop every transcript and every load flag.
    pub fn clear_all(&mut self) {
        self.transcripts.clear();
        self.loaded.clear();
    }

    #[must_use]
    pub fn is_loaded(&self, role: Role) -> bool {
        self.loaded.contains(&role)
    }

    /// Flag `role` as fetched. Returns `false` if it already was.
    pub fn mark_loaded(&mut self, role: Role) -> bool {
        self.loaded.insert(role)
    }

    /// Total messages across every role.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.transcripts.values().map(Vec::len).sum()
    }
}
