//! Chat screen chrome: selected persona, input box, sending flag, notices.
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of the transcript store so the
//! store stays a pure role → messages map. Time is passed in explicitly
//! (`Instant`) so notice expiry is deterministic under test.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use std::time::{Duration, Instant};

use crate::net::types::Role;

/// How long the "Switched to ... mode" banner stays up.
pub const ROLE_SWITCH_NOTICE: Duration = Duration::from_millis(1500);

/// One-tap questions offered on an empty transcript.
pub const QUICK_QUESTIONS: [&str; 4] = [
    "When should my baby start crawling?",
    "How do I introduce solid foods?",
    "What's a good sleep schedule for 6 months?",
    "Is my baby's crying normal?",
];

/// Submission lifecycle. Settled outcomes are reported by the submit call
/// itself; the screen only tracks whether a request is in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Sending,
}

/// A banner that disappears once its deadline passes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    text: String,
    expires_at: Instant,
}

impl Notice {
    #[must_use]
    pub fn new(text: impl Into<String>, shown_at: Instant, ttl: Duration) -> Self {
        Self { text: text.into(), expires_at: shown_at + ttl }
    }

    /// Text while still visible at `now`.
    #[must_use]
    pub fn text_at(&self, now: Instant) -> Option<&str> {
        (now < self.expires_at).then_some(self.text.as_str())
    }
}

#[derive(Clone, Debug, Default)]
pub struct ChatScreen {
    pub role: Role,
    pub input: String,
    pub phase: SubmissionPhase,
    /// True only while a history request is out.
    pub history_loading: bool,
    notice: Option<Notice>,
}

impl ChatScreen {
    #[must_use]
    pub fn new(role: Role) -> Self {
        Self { role, ..Self::default() }
    }

    /// Switch persona: clears the input, drops the sending indicator, and
    /// shows a short-lived banner naming the new persona.
    pub fn select_role(&mut self, role: Role, now: Instant) {
        self.role = role;
        self.input.clear();
        self.phase = SubmissionPhase::Idle;
        self.notice = Some(Notice::new(format!("Switched to {} mode", role.label()), now, ROLE_SWITCH_NOTICE));
    }

    #[must_use]
    pub fn notice_at(&self, now: Instant) -> Option<&str> {
        self.notice.as_ref().and_then(|n| n.text_at(now))
    }

    #[must_use]
    pub fn is_sending(&self) -> bool {
        self.phase == SubmissionPhase::Sending
    }

    /// Whether the send control should be enabled.
    #[must_use]
    pub fn can_send(&self) -> bool {
        !self.is_sending() && !self.input.trim().is_empty()
    }
}
