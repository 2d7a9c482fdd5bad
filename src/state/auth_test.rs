use super::*;

fn parent() -> User {
    User { id: Some("u1".into()), name: "Asha".into(), email: "asha@example.com".into() }
}

// =============================================================
// AuthState
// =============================================================

#[test]
fn auth_state_default_signed_out() {
    let state = AuthState::default();
    assert!(!state.is_authenticated());
    assert!(state.token().is_none());
    assert!(state.user().is_none());
}

#[test]
fn restore_ignores_blank_token() {
    let state = AuthState::restore(Some("  ".into()), None);
    assert!(!state.is_authenticated());
}

#[test]
fn restore_keeps_token_and_user() {
    let state = AuthState::restore(Some("tok".into()), Some(parent()));
    assert_eq!(state.token(), Some("tok"));
    assert_eq!(state.user().map(|u| u.name.as_str()), Some("Asha"));
}

#[test]
fn login_without_user_keeps_existing_profile() {
    let mut state = AuthState::restore(Some("old".into()), Some(parent()));
    state.login("new".into(), None);
    assert_eq!(state.token(), Some("new"));
    assert!(state.user().is_some());
}

#[test]
fn logout_clears_token_and_user() {
    let mut state = AuthState::default();
    state.login("tok".into(), Some(parent()));
    state.logout();
    assert!(!state.is_authenticated());
    assert!(state.user().is_none());
}

#[test]
fn update_user_replaces_profile() {
    let mut state = AuthState::default();
    state.update_user(parent());
    let mut renamed = parent();
    renamed.name = "Asha R".into();
    state.update_user(renamed);
    assert_eq!(state.user().map(|u| u.name.as_str()), Some("Asha R"));
}
