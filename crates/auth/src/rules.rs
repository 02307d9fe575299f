//! Ownership-gating rule set.
//!
//! These are the decision functions the whole application hangs on: given
//! the acting user and the owner of a target ticket, may the actor view,
//! edit, or delete it? Pure policy checks over value types:
//!
//! - No IO
//! - No panics
//! - No business logic beyond the predicate itself
//!
//! Denials are mapped to benign navigation by the API layer; nothing here
//! distinguishes "denied" from "not found" for the caller.

use thiserror::Error;

use helpdesk_core::UserId;

use crate::Role;

/// The acting identity for an authorization decision.
///
/// A deliberately small snapshot: decisions depend only on who the actor is
/// and which tier they hold, never on storage or transport state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: UserId,
    pub role: Role,
}

impl Actor {
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: {0}")]
    Forbidden(&'static str),
}

/// Admins see everything; everyone else only their own tickets.
pub fn may_view_ticket(actor: &Actor, owner: UserId) -> bool {
    actor.role.is_admin() || owner == actor.id
}

/// Edit rights are identical to view rights: ownership or admin.
pub fn may_edit_ticket(actor: &Actor, owner: UserId) -> bool {
    may_view_ticket(actor, owner)
}

/// Delete rights are identical to view rights: ownership or admin.
pub fn may_delete_ticket(actor: &Actor, owner: UserId) -> bool {
    may_view_ticket(actor, owner)
}

/// Only admins may list accounts or change roles.
pub fn may_manage_users(actor: &Actor) -> bool {
    actor.role.is_admin()
}

/// Status-edit policy: admin-only.
///
/// Non-admin editors may still change title/description on their own
/// tickets; the status field of their patch is dropped by the caller.
pub fn may_change_status(actor: &Actor) -> bool {
    actor.role.is_admin()
}

pub fn ensure_may_view_ticket(actor: &Actor, owner: UserId) -> Result<(), AuthzError> {
    if may_view_ticket(actor, owner) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden("view ticket"))
    }
}

pub fn ensure_may_edit_ticket(actor: &Actor, owner: UserId) -> Result<(), AuthzError> {
    if may_edit_ticket(actor, owner) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden("edit ticket"))
    }
}

pub fn ensure_may_delete_ticket(actor: &Actor, owner: UserId) -> Result<(), AuthzError> {
    if may_delete_ticket(actor, owner) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden("delete ticket"))
    }
}

pub fn ensure_may_manage_users(actor: &Actor) -> Result<(), AuthzError> {
    if may_manage_users(actor) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden("manage users"))
    }
}

pub fn ensure_may_change_status(actor: &Actor) -> Result<(), AuthzError> {
    if may_change_status(actor) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden("change status"))
    }
}
