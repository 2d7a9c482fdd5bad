//! Application context: every client store plus the backend handles.
//!
//! DESIGN
//! ======
//! `App` is built once at startup and handed to whatever drives the UI (the
//! CLI here). Screens reach state through it rather than through globals.
//! Backends are held as `Arc<dyn ...>` so tests swap in mocks and the
//! submission flow can move the history handle into its save task.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::catalog::reviews::ToyReviews;
use crate::catalog::toys::{CatalogError, ToyCatalog, ToyRecord};
use crate::config::ClientConfig;
use crate::net::api::{ApiClient, AuthApi, ChatApi, HistoryApi};
use crate::net::types::{ApiError, ChatMessage, Role, SignupRequest, SignupResponse};
use crate::services::chat::{self, SubmitOutcome};
use crate::services::history::{self, HistoryLoad};
use crate::services::signup::{self, SignupError};
use crate::state::auth::AuthState;
use crate::state::chat::ChatStore;
use crate::state::milestones::MilestoneStore;
use crate::state::ui::{ChatScreen, QUICK_QUESTIONS};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Backend handles, grouped so they can be built or mocked together.
#[derive(Clone)]
pub struct Backends {
    pub chat: Arc<dyn ChatApi>,
    pub history: Arc<dyn HistoryApi>,
    pub auth: Arc<dyn AuthApi>,
}

impl Backends {
    /// All three concerns served by one REST client.
    #[must_use]
    pub fn rest(client: ApiClient) -> Self {
        let client = Arc::new(client);
        Self { chat: client.clone(), history: client.clone(), auth: client }
    }
}

/// Holds a loading flag up until dropped.
struct LoadingFlag<'a>(&'a mut bool);

impl<'a> LoadingFlag<'a> {
    fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for LoadingFlag<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

pub struct App {
    pub auth: AuthState,
    pub chats: ChatStore,
    pub screen: ChatScreen,
    pub milestones: MilestoneStore,
    pub catalog: ToyCatalog,
    pub reviews: ToyReviews,
    backends: Backends,
}

impl App {
    #[must_use]
    pub fn new(auth: AuthState, catalog: ToyCatalog, backends: Backends) -> Self {
        Self {
            auth,
            chats: ChatStore::new(),
            screen: ChatScreen::default(),
            milestones: MilestoneStore::new(),
            catalog,
            reviews: ToyReviews::new(),
            backends,
        }
    }

    /// Wire up the REST client, the toy catalog, and the restored session.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or a configured
    /// catalog file cannot be read.
    pub fn from_config(config: &ClientConfig) -> Result<Self, AppError> {
        let backends = Backends::rest(ApiClient::new(config)?);
        let catalog = match &config.catalog_path {
            Some(path) => ToyCatalog::load(path)?,
            None => ToyCatalog::builtin()?,
        };
        let auth = AuthState::restore(config.token.clone(), None);
        info!(
            base_url = %config.base_url,
            toys = catalog.toys().len(),
            authenticated = auth.is_authenticated(),
            "app: initialized"
        );
        Ok(Self::new(auth, catalog, backends))
    }

    // =========================================================================
    // CHAT
    // =========================================================================

    /// Transcript of the persona currently on screen.
    #[must_use]
    pub fn transcript(&self) -> &[ChatMessage] {
        self.chats.get(self.screen.role)
    }

    /// Quick questions are only offered on an empty transcript.
    #[must_use]
    pub fn quick_questions(&self) -> &'static [&'static str] {
        if self.transcript().is_empty() { QUICK_QUESTIONS.as_slice() } else { &[] }
    }

    /// Switch persona. The cached transcript for `role` is kept.
    pub fn select_role(&mut self, role: Role, now: Instant) {
        self.screen.select_role(role, now);
    }

    /// Fetch the current persona's history if this session hasn't yet.
    ///
    /// `screen.history_loading` is raised only while a request is actually
    /// out, and is lowered again even if this future is dropped.
    pub async fn load_history(&mut self) -> HistoryLoad {
        let role = self.screen.role;
        let token = self.auth.token();
        let api = self.backends.history.as_ref();
        if self.chats.is_loaded(role) || token.is_none() {
            return history::ensure_loaded(&mut self.chats, api, role, token).await;
        }
        let _loading = LoadingFlag::raise(&mut self.screen.history_loading);
        history::ensure_loaded(&mut self.chats, api, role, token).await
    }

    /// Switch persona and make sure its history is loaded.
    pub async fn open_role(&mut self, role: Role, now: Instant) -> HistoryLoad {
        self.select_role(role, now);
        self.load_history().await
    }

    /// Submit whatever is in the input box.
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.submit_text(None).await
    }

    /// Submit a canned question directly, bypassing the input box.
    pub async fn submit_quick_question(&mut self, question: &str) -> SubmitOutcome {
        self.submit_text(Some(question)).await
    }

    async fn submit_text(&mut self, text: Option<&str>) -> SubmitOutcome {
        chat::submit(
            &mut self.screen,
            &mut self.chats,
            self.backends.chat.as_ref(),
            &self.backends.history,
            self.auth.token(),
            text,
        )
        .await
    }

    /// Forget every transcript locally; the next visit to each persona
    /// re-fetches its history.
    pub fn clear_chat(&mut self) {
        self.chats.clear_all();
    }

    // =========================================================================
    // ACCOUNT
    // =========================================================================

    /// # Errors
    ///
    /// See [`signup::signup`].
    pub async fn signup(&mut self, request: &SignupRequest) -> Result<SignupResponse, SignupError> {
        signup::signup(self.backends.auth.as_ref(), &mut self.auth, request).await
    }

    /// Sign out and drop every cached transcript.
    pub fn logout(&mut self) {
        self.chats.clear_all();
        self.auth.logout();
        info!("app: logged out");
    }

    // =========================================================================
    // MILESTONES
    // =========================================================================

    /// Toys suggested for the milestones listed under `month`.
    #[must_use]
    pub fn suggested_toys(&self, month: u32) -> Vec<&ToyRecord> {
        self.milestones.suggested_toys(month, &self.catalog)
    }
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
