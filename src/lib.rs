//! NeoNest client core.
//!
//! SYSTEM CONTEXT
//! ==============
//! Client-side state and flows for the NeoNest parenting app: role-scoped
//! AI chat with per-persona history, a developmental milestone tracker, and
//! a filterable toy catalog. The backend (chat completion, history
//! persistence, accounts) is reached over REST through `net::api`.

pub mod app;
pub mod catalog;
pub mod config;
pub mod net;
pub mod services;
pub mod state;
