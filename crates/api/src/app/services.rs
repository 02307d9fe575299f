//! Owned store objects injected into the handlers.
//!
//! All state is memory-resident and lost on restart; each store guards its
//! own collection, so the service container is just a bundle of `Arc`s.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use helpdesk_auth::{PasswordVerifier, PlaintextVerifier, Role, SessionToken};
use helpdesk_core::UserId;
use helpdesk_identity::IdentityStore;
use helpdesk_tickets::TicketStore;

/// Everything the handlers need, wired once at startup.
pub struct AppServices {
    pub identity: Arc<IdentityStore>,
    pub tickets: Arc<TicketStore>,
    pub sessions: Arc<SessionStore>,
    pub verifier: Arc<dyn PasswordVerifier>,
}

/// Build the service container and seed the demo accounts.
pub fn build_services() -> AppServices {
    let identity = Arc::new(IdentityStore::new());
    seed_demo_accounts(&identity);

    AppServices {
        identity,
        tickets: Arc::new(TicketStore::new()),
        sessions: Arc::new(SessionStore::new()),
        verifier: Arc::new(PlaintextVerifier),
    }
}

/// Seed the two inherited demo accounts (`user1` and `admin`).
///
/// Sessions and state are memory-resident, so a fresh process would
/// otherwise have no admin to promote anyone with.
fn seed_demo_accounts(identity: &IdentityStore) {
    tracing::warn!("seeding demo accounts with insecure default credentials");

    if let Ok(user1) = identity.register("user1", "password1") {
        tracing::info!(user_id = %user1.id, "seeded demo account 'user1'");
    }
    if let Ok(admin) = identity.register("admin", "adminpass") {
        identity.set_role(admin.id, Role::Admin);
        tracing::info!(user_id = %admin.id, "seeded demo account 'admin'");
    }
}

/// In-memory session store: opaque token -> user id.
///
/// No expiry; a binding lives until explicit logout or process restart.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<HashMap<SessionToken, UserId>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Mint a fresh token bound to the user.
    pub fn issue(&self, user_id: UserId) -> SessionToken {
        let token = SessionToken::new();
        if let Ok(mut sessions) = self.inner.write() {
            sessions.insert(token, user_id);
        }
        token
    }

    pub fn resolve(&self, token: &SessionToken) -> Option<UserId> {
        let sessions = self.inner.read().ok()?;
        sessions.get(token).copied()
    }

    /// Invalidate a token. Unknown tokens are a no-op.
    pub fn revoke(&self, token: &SessionToken) {
        if let Ok(mut sessions) = self.inner.write() {
            sessions.remove(token);
        }
    }
}
