//! Message submission: optimistic append, backend call, persistence.
//!
//! DESIGN
//! ======
//! A submission is split in two synchronous halves around the network call.
//! `begin_submit` appends the user message and flips the screen to
//! `Sending`; `complete_submit` applies the reply (or an in-transcript error
//! notice) to the role the message was sent from, even if the user switched
//! persona in the meantime. `submit` glues the halves to a `ChatApi`.
//!
//! Persisting the updated transcript runs as a spawned task so the reply is
//! visible without waiting on the save. The task's handle is returned so
//! callers and tests can observe it; dropping it does not cancel the save.
//!
//! ERROR HANDLING
//! ==============
//! Backend failures never leave the store half-updated: the user message
//! stays and a system message is appended in place of the reply. A failed
//! save is logged and otherwise ignored.

use std::sync::Arc;

use time::OffsetDateTime;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::net::api::{ChatApi, HistoryApi};
use crate::net::types::{ApiError, ChatMessage, MessageRole, Role};
use crate::state::chat::ChatStore;
use crate::state::ui::{ChatScreen, SubmissionPhase};

/// Shown in the transcript when the chat backend fails.
pub const SEND_FAILED_MESSAGE: &str = "Oops! Something went wrong. Please try again.";

/// Handle to a background transcript save.
pub type PersistHandle = JoinHandle<Result<(), ApiError>>;

/// A submission whose user message is already in the store.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub role: Role,
    /// Transcript including the new user message; this is what gets sent.
    pub transcript: Vec<ChatMessage>,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Blank input or a request already in flight.
    Ignored,
    Replied {
        reply: ChatMessage,
        persist: Option<PersistHandle>,
    },
    Failed(ApiError),
}

// =============================================================================
// IDS
// =============================================================================

/// Epoch milliseconds at `now`, bumped past the transcript's last id so ids
/// stay strictly increasing when two messages land in the same millisecond.
#[must_use]
pub fn next_message_id(transcript: &[ChatMessage], now: OffsetDateTime) -> i64 {
    let millis = i64::try_from(now.unix_timestamp_nanos() / 1_000_000).unwrap_or(i64::MAX);
    match transcript.last() {
        Some(last) => millis.max(last.id.saturating_add(1)),
        None => millis,
    }
}

// =============================================================================
// SUBMISSION
// =============================================================================

/// Append the user's message and mark the screen as sending.
///
/// `text` overrides the input box (quick questions) and is stored as typed.
/// Returns `None` when the text is blank or a request is already in flight;
/// nothing changes in that case.
pub fn begin_submit(
    screen: &mut ChatScreen,
    store: &mut ChatStore,
    text: Option<&str>,
    now: OffsetDateTime,
) -> Option<PendingSubmission> {
    if screen.is_sending() {
        return None;
    }
    let content = text.unwrap_or(&screen.input).to_string();
    if content.trim().is_empty() {
        return None;
    }

    let role = screen.role;
    let mut transcript = store.get(role).to_vec();
    let id = next_message_id(&transcript, now);
    transcript.push(ChatMessage::new(id, MessageRole::User, content, now));
    store.set(role, transcript.clone());

    screen.input.clear();
    screen.phase = SubmissionPhase::Sending;
    Some(PendingSubmission { role, transcript })
}

/// Apply the backend result for `pending` and return the screen to idle.
///
/// On success the reply is appended and, when `persist` carries a token, the
/// updated transcript is saved in the background. Must be called inside a
/// tokio runtime when persistence is requested.
pub fn complete_submit(
    screen: &mut ChatScreen,
    store: &mut ChatStore,
    pending: PendingSubmission,
    result: Result<ChatMessage, ApiError>,
    persist: Option<(Arc<dyn HistoryApi>, String)>,
    now: OffsetDateTime,
) -> SubmitOutcome {
    screen.phase = SubmissionPhase::Idle;
    let PendingSubmission { role, mut transcript } = pending;

    match result {
        Ok(reply) => {
            transcript.push(reply.clone());
            store.set(role, transcript.clone());
            info!(%role, messages = transcript.len(), "chat: reply received");
            let persist = persist.map(|(api, token)| spawn_save(api, role, transcript, token));
            SubmitOutcome::Replied { reply, persist }
        }
        Err(e) => {
            warn!(%role, error = %e, "chat: send failed");
            let id = next_message_id(&transcript, now);
            transcript.push(ChatMessage::new(id, MessageRole::System, SEND_FAILED_MESSAGE, now));
            store.set(role, transcript);
            SubmitOutcome::Failed(e)
        }
    }
}

/// Run a full submission against `chat`, persisting through `history` when a
/// session token is present.
pub async fn submit(
    screen: &mut ChatScreen,
    store: &mut ChatStore,
    chat: &dyn ChatApi,
    history: &Arc<dyn HistoryApi>,
    token: Option<&str>,
    text: Option<&str>,
) -> SubmitOutcome {
    let Some(pending) = begin_submit(screen, store, text, OffsetDateTime::now_utc()) else {
        return SubmitOutcome::Ignored;
    };

    let result = chat.complete(pending.role, &pending.transcript).await;
    let persist = token.map(|t| (Arc::clone(history), t.to_string()));
    complete_submit(screen, store, pending, result, persist, OffsetDateTime::now_utc())
}

fn spawn_save(api: Arc<dyn HistoryApi>, role: Role, messages: Vec<ChatMessage>, token: String) -> PersistHandle {
    tokio::spawn(async move {
        let result = api.save_history(role, &messages, &token).await;
        if let Err(e) = &result {
            warn!(%role, error = %e, count = messages.len(), "chat: history save failed");
        }
        result
    })
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
