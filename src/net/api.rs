//! REST client for the NeoNest backend.
//!
//! DESIGN
//! ======
//! Each backend concern sits behind its own async trait (`ChatApi`,
//! `HistoryApi`, `AuthApi`) so the submission flow, history loader, and
//! signup flow can be driven by mocks in tests. `ApiClient` is the single
//! reqwest implementation of all three.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures map to `ApiError::Request`, non-2xx statuses to
//! `ApiError::Response` with the raw body kept for callers that need to read
//! a backend `{ error }` message (signup does). Signup accepts only 201;
//! any other success status is reported as `ApiError::Response` too.

use std::time::Duration;

use tracing::debug;

use super::types::{
    ApiError, ChatMessage, ChatRequest, HistoryResponse, Role, SaveHistoryRequest, SignupRequest, SignupResponse,
};
use crate::config::ClientConfig;

// =============================================================================
// TRAITS
// =============================================================================

/// Chat completion backend (`POST /api/chat`).
#[async_trait::async_trait]
pub trait ChatApi: Send + Sync {
    /// Send the full transcript for `role` and return the assistant's reply.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the reply is malformed.
    async fn complete(&self, role: Role, messages: &[ChatMessage]) -> Result<ChatMessage, ApiError>;
}

/// Chat history persistence, scoped to the authenticated user.
#[async_trait::async_trait]
pub trait HistoryApi: Send + Sync {
    /// Fetch the persisted transcript for `role`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the body is malformed.
    async fn fetch_history(&self, role: Role, token: &str) -> Result<Vec<ChatMessage>, ApiError>;

    /// Replace the persisted transcript for `role`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    async fn save_history(&self, role: Role, messages: &[ChatMessage], token: &str) -> Result<(), ApiError>;
}

/// Account creation (`POST /api/auth/signup`).
#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Response`] with the backend's body on rejection or
    /// on any status other than 201 Created.
    async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse, ApiError>;
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for the configured backend origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the reqwest client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeouts.request_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.timeouts.connect_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl ChatApi for ApiClient {
    async fn complete(&self, role: Role, messages: &[ChatMessage]) -> Result<ChatMessage, ApiError> {
        let url = chat_endpoint(&self.base_url);
        debug!(%role, messages = messages.len(), "api: POST /api/chat");
        let response = self
            .http
            .post(url)
            .json(&ChatRequest { messages, role })
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let text = read_success_body(response).await?;
        parse_json(&text)
    }
}

#[async_trait::async_trait]
impl HistoryApi for ApiClient {
    async fn fetch_history(&self, role: Role, token: &str) -> Result<Vec<ChatMessage>, ApiError> {
        let url = history_fetch_endpoint(&self.base_url, role);
        debug!(%role, "api: GET /api/chat/history");
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let text = read_success_body(response).await?;
        let body: HistoryResponse = parse_json(&text)?;
        Ok(body.messages)
    }

    async fn save_history(&self, role: Role, messages: &[ChatMessage], token: &str) -> Result<(), ApiError> {
        let url = history_save_endpoint(&self.base_url);
        debug!(%role, messages = messages.len(), "api: POST /api/chat/history");
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&SaveHistoryRequest { role, messages })
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        read_success_body(response).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl AuthApi for ApiClient {
    async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse, ApiError> {
        let url = signup_endpoint(&self.base_url);
        debug!("api: POST /api/auth/signup");
        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let status = response.status();
        let text = read_success_body(response).await?;
        // Only 201 means an account was created.
        if status != reqwest::StatusCode::CREATED {
            return Err(ApiError::Response { status: status.as_u16(), body: text });
        }
        parse_json(&text)
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn chat_endpoint(base_url: &str) -> String {
    format!("{base_url}/api/chat")
}

fn history_fetch_endpoint(base_url: &str, role: Role) -> String {
    format!("{base_url}/api/chat/history?role={}", role.as_str())
}

fn history_save_endpoint(base_url: &str) -> String {
    format!("{base_url}/api/chat/history")
}

fn signup_endpoint(base_url: &str) -> String {
    format!("{base_url}/api/auth/signup")
}

async fn read_success_body(response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    if !status.is_success() {
        return Err(ApiError::Response { status: status.as_u16(), body: text });
    }
    Ok(text)
}

fn parse_json<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
