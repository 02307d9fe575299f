//! `helpdesk-identity` — user records and the in-memory identity store.

pub mod store;
pub mod user;

pub use store::IdentityStore;
pub use user::{IdentityError, User};
