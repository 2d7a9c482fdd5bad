//! Services: the flows that move data between the backend and client state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each service takes the state it mutates by `&mut` and the backend it
//! calls as a trait object from `net::api`, so tests drive them with mocks.

pub mod chat;
pub mod history;
pub mod signup;

#[cfg(test)]
pub(crate) mod test_helpers;
