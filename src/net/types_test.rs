use super::*;

use time::macros::datetime;

// =============================================================================
// Role
// =============================================================================

#[test]
fn role_default_is_pediatrician() {
    assert_eq!(Role::default(), Role::Pediatrician);
}

#[test]
fn role_parses_wire_values() {
    assert_eq!("pediatrician".parse::<Role>(), Ok(Role::Pediatrician));
    assert_eq!("Baby".parse::<Role>(), Ok(Role::Baby));
    assert_eq!(" mother ".parse::<Role>(), Ok(Role::Mother));
}

#[test]
fn role_rejects_unknown_value() {
    let err = "nani".parse::<Role>().unwrap_err();
    assert!(err.contains("unknown role"));
}

#[test]
fn role_labels_match_picker() {
    let labels: Vec<&str> = Role::ALL.iter().map(|r| r.label()).collect();
    assert_eq!(labels, vec!["Pediatrician", "Baby", "Motherly"]);
}

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_value(Role::Mother).unwrap(), "mother");
}

// =============================================================================
// ChatMessage
// =============================================================================

#[test]
fn chat_message_uses_camel_case_created_at() {
    let msg = ChatMessage::new(7, MessageRole::User, "hi", datetime!(2025-01-02 03:04:05 UTC));
    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["role"], "user");
    assert_eq!(json["content"], "hi");
    assert_eq!(json["createdAt"], "2025-01-02T03:04:05Z");
    assert!(json.get("created_at").is_none());
}

#[test]
fn chat_message_parses_backend_reply() {
    let raw = r#"{"id":2,"role":"assistant","content":"**Crawling** usually starts around 6-10 months.","createdAt":"2025-03-01T10:00:00.000Z"}"#;
    let msg: ChatMessage = serde_json::from_str(raw).unwrap();
    assert_eq!(msg.id, 2);
    assert_eq!(msg.role, MessageRole::Assistant);
    assert!(msg.content.starts_with("**Crawling**"));
    assert_eq!(msg.created_at, datetime!(2025-03-01 10:00:00 UTC));
}

#[test]
fn chat_message_rejects_unknown_role() {
    let raw = r#"{"id":1,"role":"robot","content":"x","createdAt":"2025-03-01T10:00:00Z"}"#;
    assert!(serde_json::from_str::<ChatMessage>(raw).is_err());
}

#[test]
fn chat_request_carries_role_value() {
    let msgs = vec![ChatMessage::new(1, MessageRole::User, "q", datetime!(2025-01-01 00:00 UTC))];
    let body = serde_json::to_value(ChatRequest { messages: &msgs, role: Role::Baby }).unwrap();
    assert_eq!(body["role"], "baby");
    assert_eq!(body["messages"].as_array().map(Vec::len), Some(1));
}

#[test]
fn history_response_missing_messages_defaults_empty() {
    let resp: HistoryResponse = serde_json::from_str("{}").unwrap();
    assert!(resp.messages.is_empty());
}

// =============================================================================
// Auth bodies
// =============================================================================

#[test]
fn signup_response_reads_new_user() {
    let raw = r#"{"token":"tok","newUser":{"_id":"u1","name":"Asha","email":"asha@example.com"},"success":"Signup successful"}"#;
    let resp: SignupResponse = serde_json::from_str(raw).unwrap();
    assert_eq!(resp.token, "tok");
    assert_eq!(resp.new_user.id.as_deref(), Some("u1"));
    assert_eq!(resp.new_user.name, "Asha");
    assert_eq!(resp.success.as_deref(), Some("Signup successful"));
}

#[test]
fn error_body_tolerates_missing_error() {
    let body: ApiErrorBody = serde_json::from_str("{}").unwrap();
    assert!(body.error.is_none());
}
