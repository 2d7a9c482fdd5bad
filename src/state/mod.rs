//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `chat`, `milestones`, `ui`) so each
//! screen depends on small focused models. None of them talk to the network;
//! the `services` layer does that and writes results back here.

pub mod auth;
pub mod chat;
pub mod milestones;
pub mod ui;
