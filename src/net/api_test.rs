use super::*;

use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use time::macros::datetime;

use crate::net::types::MessageRole;

type Captured = Arc<Mutex<Vec<Value>>>;

/// Serve `app` on an ephemeral local port and return its origin.
async fn spawn_backend(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client_for(base_url: &str) -> ApiClient {
    let config = ClientConfig { base_url: base_url.to_string(), ..ClientConfig::default() };
    ApiClient::new(&config).unwrap()
}

fn user_message(id: i64, content: &str) -> ChatMessage {
    ChatMessage::new(id, MessageRole::User, content, datetime!(2025-03-01 09:00 UTC))
}

// =============================================================================
// endpoints
// =============================================================================

#[test]
fn endpoints_join_base_url() {
    assert_eq!(chat_endpoint("http://h"), "http://h/api/chat");
    assert_eq!(history_fetch_endpoint("http://h", Role::Baby), "http://h/api/chat/history?role=baby");
    assert_eq!(history_save_endpoint("http://h"), "http://h/api/chat/history");
    assert_eq!(signup_endpoint("http://h"), "http://h/api/auth/signup");
}

#[test]
fn client_keeps_base_url() {
    let client = client_for("http://localhost:3000");
    assert_eq!(client.base_url(), "http://localhost:3000");
}

// =============================================================================
// ChatApi
// =============================================================================

#[tokio::test]
async fn complete_posts_transcript_and_returns_reply() {
    let captured: Captured = Arc::default();
    let app = Router::new()
        .route(
            "/api/chat",
            post(|State(seen): State<Captured>, Json(body): Json<Value>| async move {
                seen.lock().unwrap().push(body);
                Json(json!({
                    "id": 2,
                    "role": "assistant",
                    "content": "Most babies crawl between 6 and 10 months.",
                    "createdAt": "2025-03-01T09:00:01Z"
                }))
            }),
        )
        .with_state(captured.clone());
    let base = spawn_backend(app).await;

    let reply = client_for(&base)
        .complete(Role::Pediatrician, &[user_message(1, "When should my baby start crawling?")])
        .await
        .unwrap();

    assert_eq!(reply.id, 2);
    assert_eq!(reply.role, MessageRole::Assistant);
    let seen = captured.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0]["role"], "pediatrician");
    assert_eq!(seen[0]["messages"][0]["content"], "When should my baby start crawling?");
}

#[tokio::test]
async fn complete_maps_server_error_to_response() {
    let app = Router::new().route("/api/chat", post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }));
    let base = spawn_backend(app).await;

    let err = client_for(&base)
        .complete(Role::Baby, &[user_message(1, "hi")])
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Response { status: 500, ref body } if body == "boom"));
}

#[tokio::test]
async fn complete_maps_malformed_reply_to_parse() {
    let app = Router::new().route("/api/chat", post(|| async { Json(json!({ "text": "no message shape" })) }));
    let base = spawn_backend(app).await;

    let err = client_for(&base)
        .complete(Role::Mother, &[user_message(1, "hi")])
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Parse(_)));
}

#[tokio::test]
async fn complete_unreachable_backend_is_request_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(&format!("http://{addr}"))
        .complete(Role::Pediatrician, &[user_message(1, "hi")])
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Request(_)));
}

// =============================================================================
// HistoryApi
// =============================================================================

#[tokio::test]
async fn fetch_history_sends_bearer_and_role() {
    let captured: Captured = Arc::default();
    let app = Router::new()
        .route(
            "/api/chat/history",
            get(
                |State(seen): State<Captured>,
                 headers: HeaderMap,
                 Query(query): Query<std::collections::HashMap<String, String>>| async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    seen.lock().unwrap().push(json!({ "auth": auth, "role": query.get("role") }));
                    Json(json!({ "messages": [
                        { "id": 10, "role": "user", "content": "old question", "createdAt": "2025-02-01T08:00:00Z" }
                    ] }))
                },
            ),
        )
        .with_state(captured.clone());
    let base = spawn_backend(app).await;

    let messages = client_for(&base).fetch_history(Role::Mother, "tok-1").await.unwrap();

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "old question");
    let seen = captured.lock().unwrap();
    assert_eq!(seen[0]["auth"], "Bearer tok-1");
    assert_eq!(seen[0]["role"], "mother");
}

#[tokio::test]
async fn fetch_history_unauthorized_is_response_error() {
    let app = Router::new().route("/api/chat/history", get(|| async { StatusCode::UNAUTHORIZED }));
    let base = spawn_backend(app).await;

    let err = client_for(&base).fetch_history(Role::Baby, "expired").await.unwrap_err();
    assert!(matches!(err, ApiError::Response { status: 401, .. }));
}

#[tokio::test]
async fn save_history_posts_role_and_messages() {
    let captured: Captured = Arc::default();
    let app = Router::new()
        .route(
            "/api/chat/history",
            post(|State(seen): State<Captured>, Json(body): Json<Value>| async move {
                seen.lock().unwrap().push(body);
                StatusCode::NO_CONTENT
            }),
        )
        .with_state(captured.clone());
    let base = spawn_backend(app).await;

    let transcript = vec![user_message(1, "a"), user_message(2, "b")];
    client_for(&base)
        .save_history(Role::Baby, &transcript, "tok")
        .await
        .unwrap();

    let seen = captured.lock().unwrap();
    assert_eq!(seen[0]["role"], "baby");
    assert_eq!(seen[0]["messages"].as_array().map(Vec::len), Some(2));
}

// =============================================================================
// AuthApi
// =============================================================================

#[tokio::test]
async fn signup_created_returns_token_and_user() {
    let app = Router::new().route(
        "/api/auth/signup",
        post(|Json(body): Json<Value>| async move {
            (
                StatusCode::CREATED,
                Json(json!({
                    "token": "new-token",
                    "newUser": { "_id": "u42", "name": body["name"], "email": body["email"] },
                    "success": "Signup successful"
                })),
            )
        }),
    );
    let base = spawn_backend(app).await;

    let request =
        SignupRequest { name: "Asha".into(), email: "asha@example.com".into(), password: "secret1".into() };
    let resp = client_for(&base).signup(&request).await.unwrap();

    assert_eq!(resp.token, "new-token");
    assert_eq!(resp.new_user.email, "asha@example.com");
}

#[tokio::test]
async fn signup_conflict_keeps_error_body() {
    let app = Router::new().route(
        "/api/auth/signup",
        post(|| async { (StatusCode::CONFLICT, Json(json!({ "error": "Email already exists" }))) }),
    );
    let base = spawn_backend(app).await;

    let request = SignupRequest { name: "A".into(), email: "a@b.co".into(), password: "secret1".into() };
    let err = client_for(&base).signup(&request).await.unwrap_err();

    match err {
        ApiError::Response { status, body } => {
            assert_eq!(status, 409);
            assert!(body.contains("Email already exists"));
        }
        other => panic!("expected Response error, got {other:?}"),
    }
}

#[tokio::test]
async fn signup_plain_ok_is_not_account_creation() {
    let app = Router::new().route(
        "/api/auth/signup",
        post(|| async {
            (
                StatusCode::OK,
                Json(json!({
                    "token": "t",
                    "newUser": { "_id": "u1", "name": "A", "email": "a@b.co" },
                    "success": "ok"
                })),
            )
        }),
    );
    let base = spawn_backend(app).await;

    let request = SignupRequest { name: "A".into(), email: "a@b.co".into(), password: "secret1".into() };
    let err = client_for(&base).signup(&request).await.unwrap_err();

    assert!(matches!(err, ApiError::Response { status: 200, .. }));
    assert!(matches!(
        crate::services::signup::classify(err),
        crate::services::signup::SignupError::Rejected(ref m) if m == crate::services::signup::FALLBACK_ERROR
    ));
}
