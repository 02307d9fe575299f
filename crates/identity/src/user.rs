//! User account record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use helpdesk_auth::{Actor, Role};
use helpdesk_core::{DomainError, UserId};

/// A registered account.
///
/// # Invariants
/// - `id` is assigned once at registration and never reused.
/// - `username` is unique across the store (case-sensitive).
/// - `role` is always a valid [`Role`]; unrecognized role strings are
///   rejected before they reach this record.
///
/// The `password` field holds the stored credential verbatim; comparison
/// goes through `helpdesk_auth::PasswordVerifier` (plaintext baseline).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The actor snapshot used for authorization decisions.
    pub fn actor(&self) -> Actor {
        Actor::new(self.id, self.role)
    }
}

/// Identity-store error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// Registration collided with an existing username (case-sensitive).
    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    /// Username/credential pair did not match any stored record.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Domain(#[from] DomainError),
}
