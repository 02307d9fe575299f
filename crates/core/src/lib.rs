//! `helpdesk-core` — shared domain primitives.
//!
//! This crate is intentionally small: the error model and the strongly-typed
//! sequential identifiers shared by the identity and ticket stores.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{IdSequence, TicketId, UserId};
