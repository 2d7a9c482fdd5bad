//! Wire types shared by the REST client, the stores, and the CLI.
//!
//! DESIGN
//! ======
//! Field names follow the backend's JSON (`createdAt`, `newUser`) through
//! serde renames so the Rust side keeps snake_case. `ChatMessage` is the
//! single message shape for every endpoint: the completion reply, history
//! fetch, and history save all carry it unchanged.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by calls to the NeoNest backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request could not be sent or the body could not be read.
    #[error("API request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("API response error: status {status}")]
    Response { status: u16, body: String },

    /// The response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The endpoint requires a session token and none was supplied.
    #[error("not authenticated")]
    Unauthenticated,
}

// =============================================================================
// CHAT
// =============================================================================

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

/// Chat persona. Each persona keeps an independent transcript.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Pediatrician,
    Baby,
    Mother,
}

impl Role {
    /// Every selectable persona, in menu order.
    pub const ALL: [Role; 3] = [Role::Pediatrician, Role::Baby, Role::Mother];

    /// Wire value sent as `role` to the backend.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pediatrician => "pediatrician",
            Self::Baby => "baby",
            Self::Mother => "mother",
        }
    }

    /// Human-readable label shown in the role picker.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pediatrician => "Pediatrician",
            Self::Baby => "Baby",
            Self::Mother => "Motherly",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pediatrician" => Ok(Self::Pediatrician),
            "baby" => Ok(Self::Baby),
            "mother" => Ok(Self::Mother),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// A single chat message. Immutable once appended to a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Epoch milliseconds at creation, unique within a transcript.
    pub id: i64,
    pub role: MessageRole,
    /// Markdown body.
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl ChatMessage {
    #[must_use]
    pub fn new(id: i64, role: MessageRole, content: impl Into<String>, created_at: OffsetDateTime) -> Self {
        Self { id, role, content: content.into(), created_at }
    }
}

/// Body of `POST /api/chat`.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub messages: &'a [ChatMessage],
    pub role: Role,
}

/// Body of `GET /api/chat/history`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

/// Body of `POST /api/chat/history`.
#[derive(Debug, Serialize)]
pub struct SaveHistoryRequest<'a> {
    pub role: Role,
    pub messages: &'a [ChatMessage],
}

// =============================================================================
// AUTH
// =============================================================================

/// Profile of the signed-in parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, rename = "_id", alias = "id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
}

/// Body of `POST /api/auth/signup`.
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Success body of `POST /api/auth/signup` (HTTP 201).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub token: String,
    pub new_user: User,
    #[serde(default)]
    pub success: Option<String>,
}

/// Error body returned by the backend on any failed request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
