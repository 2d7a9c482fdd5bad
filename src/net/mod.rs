//! Networking modules for the NeoNest REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` holds the mockable backend traits and their reqwest implementation;
//! `types` defines the shared wire schema and the `ApiError` taxonomy.

pub mod api;
pub mod types;
