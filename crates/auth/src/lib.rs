//! `helpdesk-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: roles, the
//! ownership-gating rule set, credential verification, and the opaque
//! session token model. No IO happens here.

pub mod credentials;
pub mod roles;
pub mod rules;
pub mod session;

pub use credentials::{PasswordVerifier, PlaintextVerifier};
pub use roles::Role;
pub use rules::{
    ensure_may_change_status, ensure_may_delete_ticket, ensure_may_edit_ticket,
    ensure_may_manage_users, ensure_may_view_ticket, may_change_status, may_delete_ticket,
    may_edit_ticket, may_manage_users, may_view_ticket, Actor, AuthzError,
};
pub use session::SessionToken;
