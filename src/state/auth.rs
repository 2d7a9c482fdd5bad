//! Auth-session state for the current parent.
//!
//! SYSTEM CONTEXT
//! ==============
//! The token gates chat-history fetch and save. It is restored once at
//! startup from configuration; where it is kept between runs is up to the
//! host platform.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    token: Option<String>,
    user: Option<User>,
}

impl AuthState {
    /// State restored at startup. Blank tokens count as signed out.
    #[must_use]
    pub fn restore(token: Option<String>, user: Option<User>) -> Self {
        let token = token.filter(|t| !t.trim().is_empty());
        Self { token, user }
    }

    pub fn login(&mut self, token: String, user: Option<User>) {
        self.token = Some(token);
        if user.is_some() {
            self.user = user;
        }
    }

    pub fn logout(&mut self) {
        self.token = None;
        self.user = None;
    }

    pub fn update_user(&mut self, user: User) {
        self.user = Some(user);
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
