//! In-memory identity store.
//!
//! One process-wide collection behind an `RwLock`, injected into the API
//! layer as an owned store object. No persistence; state is lost on restart.

use std::sync::RwLock;

use chrono::Utc;

use helpdesk_auth::{PasswordVerifier, Role};
use helpdesk_core::{DomainError, IdSequence, UserId};

use crate::user::{IdentityError, User};

/// Process-wide store of user accounts.
///
/// Registration order is preserved; ids are monotonic and never reused.
#[derive(Debug)]
pub struct IdentityStore {
    inner: RwLock<Vec<User>>,
    ids: IdSequence,
}

impl IdentityStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Vec::new()),
            ids: IdSequence::new(),
        }
    }

    /// Create a `User`-role account with the next sequential id.
    ///
    /// Fails with `DuplicateUsername` on a case-sensitive username
    /// collision; the existing record is left untouched.
    pub fn register(&self, username: &str, password: &str) -> Result<User, IdentityError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(DomainError::validation("username cannot be empty").into());
        }
        if password.is_empty() {
            return Err(DomainError::validation("password cannot be empty").into());
        }

        let mut users = match self.inner.write() {
            Ok(u) => u,
            Err(_) => return Err(DomainError::conflict("identity store unavailable").into()),
        };

        if users.iter().any(|u| u.username == username) {
            return Err(IdentityError::DuplicateUsername(username.to_string()));
        }

        let user = User {
            id: UserId::new(self.ids.next()),
            username: username.to_string(),
            password: password.to_string(),
            role: Role::User,
            created_at: Utc::now(),
        };
        users.push(user.clone());

        tracing::info!(user_id = %user.id, username = %user.username, "account registered");
        Ok(user)
    }

    /// Resolve a credential pair: exact username match plus a verifier match
    /// on the credential. No normalization, no lockout, no throttling.
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
        verifier: &dyn PasswordVerifier,
    ) -> Result<User, IdentityError> {
        let users = self
            .inner
            .read()
            .map_err(|_| IdentityError::InvalidCredentials)?;

        users
            .iter()
            .find(|u| u.username == username && verifier.verify(&u.password, password))
            .cloned()
            .ok_or(IdentityError::InvalidCredentials)
    }

    pub fn find_by_id(&self, id: UserId) -> Option<User> {
        let users = self.inner.read().ok()?;
        users.iter().find(|u| u.id == id).cloned()
    }

    pub fn find_by_username(&self, username: &str) -> Option<User> {
        let users = self.inner.read().ok()?;
        users.iter().find(|u| u.username == username).cloned()
    }

    /// All accounts in registration order.
    pub fn list(&self) -> Vec<User> {
        match self.inner.read() {
            Ok(users) => users.clone(),
            Err(_) => Vec::new(),
        }
    }

    /// Change an account's role in place.
    ///
    /// A nonexistent id is silently ignored: role updates come only from the
    /// admin view, where a stale form is benign, not an error.
    pub fn set_role(&self, id: UserId, role: Role) {
        if let Ok(mut users) = self.inner.write() {
            match users.iter_mut().find(|u| u.id == id) {
                Some(user) => {
                    tracing::info!(user_id = %id, role = %role, "role changed");
                    user.role = role;
                }
                None => {
                    tracing::debug!(user_id = %id, "role change ignored: no such user");
                }
            }
        }
    }
}

impl Default for IdentityStore {
    fn default() -> Self {
        Self::new()
    }
}
