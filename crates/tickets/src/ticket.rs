//! Support ticket record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use helpdesk_core::{TicketId, UserId};

/// Status assigned to a freshly created ticket.
///
/// Status is a free-form string by contract: `"open"`, `"in progress"` and
/// friends are conventions, not an enforced enumeration. Any string is
/// accepted on update.
pub const DEFAULT_STATUS: &str = "open";

/// A user-submitted support request.
///
/// # Invariants
/// - `id` is assigned once at creation and never reused.
/// - `owner` resolves to an existing user at creation time and is the
///   stable foreign key the authorization rules gate on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    pub status: String,
    pub owner: UserId,
    pub created_at: DateTime<Utc>,
}

/// Partial update for a ticket.
///
/// Only fields present are applied; `None` leaves the stored value
/// untouched. Whether `status` is allowed to be present is decided by the
/// caller via `helpdesk_auth::may_change_status`; the store is policy-free.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl TicketPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }

    /// Drop the status field (used when the caller lacks status rights).
    pub fn without_status(mut self) -> Self {
        self.status = None;
        self
    }
}
