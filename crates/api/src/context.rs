use helpdesk_auth::{Actor, Role};
use helpdesk_core::UserId;
use helpdesk_identity::User;

/// Authenticated identity for a request.
///
/// This is a fresh snapshot, re-resolved from the identity store on every
/// request: an admin promoting an account mid-session is visible to that
/// session on its next request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    id: UserId,
    username: String,
    role: Role,
}

impl CurrentUser {
    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Snapshot used by the authorization rules.
    pub fn actor(&self) -> Actor {
        Actor::new(self.id, self.role)
    }
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}
