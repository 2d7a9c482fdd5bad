//! History loader: first-access fetch of a persona's saved transcript.
//!
//! DESIGN
//! ======
//! A role is fetched at most once per session. The load flag is raised
//! before the request goes out, so a failing backend is hit once, not on
//! every re-render.
//!
//! ERROR HANDLING
//! ==============
//! Fails open: a fetch error leaves the role with an empty transcript and is
//! only logged. Signed-out users skip the fetch entirely and are not flagged,
//! so their history still loads after they sign in.

use tracing::{info, warn};

use crate::net::api::HistoryApi;
use crate::net::types::{ApiError, ChatMessage, Role};
use crate::state::chat::ChatStore;

/// What [`ensure_loaded`] did for a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryLoad {
    /// The role was fetched earlier this session.
    AlreadyLoaded,
    /// No session token; nothing fetched.
    Unauthenticated,
    /// Fetched and stored this many messages.
    Loaded(usize),
    /// The fetch failed; the transcript was set empty.
    FailedOpen,
}

/// Fetch the saved transcript for `role`.
///
/// # Errors
///
/// Returns [`ApiError::Unauthenticated`] without a token, otherwise whatever
/// the backend call returns.
pub async fn load(api: &dyn HistoryApi, role: Role, token: Option<&str>) -> Result<Vec<ChatMessage>, ApiError> {
    let token = token.ok_or(ApiError::Unauthenticated)?;
    api.fetch_history(role, token).await
}

/// Populate `store` for `role` unless it was already fetched this session.
pub async fn ensure_loaded(
    store: &mut ChatStore,
    api: &dyn HistoryApi,
    role: Role,
    token: Option<&str>,
) -> HistoryLoad {
    if store.is_loaded(role) {
        return HistoryLoad::AlreadyLoaded;
    }
    if token.is_none() {
        return HistoryLoad::Unauthenticated;
    }

    store.mark_loaded(role);
    match load(api, role, token).await {
        Ok(messages) => {
            let count = messages.len();
            info!(%role, count, "history: loaded");
            store.set(role, messages);
            HistoryLoad::Loaded(count)
        }
        Err(e) => {
            warn!(%role, error = %e, "history: fetch failed, starting empty");
            store.set(role, Vec::new());
            HistoryLoad::FailedOpen
        }
    }
}

#[cfg(test)]
#[path = "history_test.rs"]
mod tests;
