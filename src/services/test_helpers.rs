//! Mock backends shared by the service tests.

use std::sync::Mutex;

use time::OffsetDateTime;
use time::macros::datetime;

use crate::net::api::{AuthApi, ChatApi, HistoryApi};
use crate::net::types::{
    ApiError, ChatMessage, MessageRole, Role, SignupRequest, SignupResponse,
};

pub fn at() -> OffsetDateTime {
    datetime!(2025-03-01 09:00 UTC)
}

pub fn message(id: i64, role: MessageRole, content: &str) -> ChatMessage {
    ChatMessage::new(id, role, content, at())
}

// =========================================================================
// MockChat
// =========================================================================

/// Chat backend that replays canned replies and records every request.
pub struct MockChat {
    replies: Mutex<Vec<Result<ChatMessage, ApiError>>>,
    pub requests: Mutex<Vec<(Role, Vec<ChatMessage>)>>,
}

impl MockChat {
    pub fn new(replies: Vec<Result<ChatMessage, ApiError>>) -> Self {
        Self { replies: Mutex::new(replies), requests: Mutex::new(Vec::new()) }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl ChatApi for MockChat {
    async fn complete(&self, role: Role, messages: &[ChatMessage]) -> Result<ChatMessage, ApiError> {
        self.requests.lock().unwrap().push((role, messages.to_vec()));
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            Err(ApiError::Request("no canned reply".into()))
        } else {
            replies.remove(0)
        }
    }
}

// =========================================================================
// MockHistory
// =========================================================================

/// History backend with a fixed fetch result and recorded saves.
pub struct MockHistory {
    fetch: Mutex<Option<Result<Vec<ChatMessage>, ApiError>>>,
    fail_saves: bool,
    pub fetches: Mutex<Vec<(Role, String)>>,
    pub saves: Mutex<Vec<(Role, Vec<ChatMessage>, String)>>,
}

impl MockHistory {
    pub fn returning(messages: Vec<ChatMessage>) -> Self {
        Self::with_fetch(Ok(messages), false)
    }

    pub fn failing_fetch() -> Self {
        Self::with_fetch(Err(ApiError::Response { status: 503, body: "down".into() }), false)
    }

    pub fn failing_saves() -> Self {
        Self::with_fetch(Ok(Vec::new()), true)
    }

    fn with_fetch(fetch: Result<Vec<ChatMessage>, ApiError>, fail_saves: bool) -> Self {
        Self { fetch: Mutex::new(Some(fetch)), fail_saves, fetches: Mutex::default(), saves: Mutex::default() }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl HistoryApi for MockHistory {
    async fn fetch_history(&self, role: Role, token: &str) -> Result<Vec<ChatMessage>, ApiError> {
        self.fetches.lock().unwrap().push((role, token.to_string()));
        self.fetch
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn save_history(&self, role: Role, messages: &[ChatMessage], token: &str) -> Result<(), ApiError> {
        self.saves
            .lock()
            .unwrap()
            .push((role, messages.to_vec(), token.to_string()));
        if self.fail_saves { Err(ApiError::Request("save dropped".into())) } else { Ok(()) }
    }
}

// =========================================================================
// MockAuth
// =========================================================================

pub struct MockAuth {
    reply: Mutex<Option<Result<SignupResponse, ApiError>>>,
    pub requests: Mutex<Vec<SignupRequest>>,
}

impl MockAuth {
    pub fn new(reply: Result<SignupResponse, ApiError>) -> Self {
        Self { reply: Mutex::new(Some(reply)), requests: Mutex::default() }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl AuthApi for MockAuth {
    async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(ApiError::Request("no canned reply".into())))
    }
}
