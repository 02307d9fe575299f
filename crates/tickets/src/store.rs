//! In-memory ticket store.
//!
//! One process-wide collection behind an `RwLock`, injected into the API
//! layer. Insertion order is the listing order; last write wins on
//! concurrent updates (no versioning, no conflict detection).

use std::sync::RwLock;

use chrono::Utc;

use helpdesk_auth::Actor;
use helpdesk_core::{DomainError, DomainResult, IdSequence, TicketId, UserId};

use crate::ticket::{Ticket, TicketPatch, DEFAULT_STATUS};

/// Process-wide store of support tickets.
#[derive(Debug)]
pub struct TicketStore {
    inner: RwLock<Vec<Ticket>>,
    ids: IdSequence,
}

impl TicketStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Vec::new()),
            ids: IdSequence::new(),
        }
    }

    /// Create a ticket with the next sequential id and the default status.
    ///
    /// The owner reference is taken on trust here; the API layer only calls
    /// this with the authenticated user's own id.
    pub fn create(&self, owner: UserId, title: &str, description: &str) -> Ticket {
        let ticket = Ticket {
            id: TicketId::new(self.ids.next()),
            title: title.to_string(),
            description: description.to_string(),
            status: DEFAULT_STATUS.to_string(),
            owner,
            created_at: Utc::now(),
        };

        if let Ok(mut tickets) = self.inner.write() {
            tickets.push(ticket.clone());
        }

        tracing::info!(ticket_id = %ticket.id, owner = %owner, "ticket created");
        ticket
    }

    /// Tickets visible to the actor, in creation order.
    ///
    /// Admins see the whole store; everyone else only their own tickets.
    pub fn list_for(&self, actor: &Actor) -> Vec<Ticket> {
        let tickets = match self.inner.read() {
            Ok(t) => t,
            Err(_) => return Vec::new(),
        };

        tickets
            .iter()
            .filter(|t| actor.role.is_admin() || t.owner == actor.id)
            .cloned()
            .collect()
    }

    pub fn get(&self, id: TicketId) -> Option<Ticket> {
        let tickets = self.inner.read().ok()?;
        tickets.iter().find(|t| t.id == id).cloned()
    }

    /// Apply a partial update: only the fields present in the patch change.
    pub fn update(&self, id: TicketId, patch: TicketPatch) -> DomainResult<Ticket> {
        let mut tickets = self
            .inner
            .write()
            .map_err(|_| DomainError::conflict("ticket store unavailable"))?;

        let ticket = tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(DomainError::NotFound)?;

        if let Some(title) = patch.title {
            ticket.title = title;
        }
        if let Some(description) = patch.description {
            ticket.description = description;
        }
        if let Some(status) = patch.status {
            // Free-form by contract: any string is accepted.
            ticket.status = status;
        }

        tracing::info!(ticket_id = %id, "ticket updated");
        Ok(ticket.clone())
    }

    /// Remove a ticket. Deleting an absent id fails with `NotFound` but
    /// never panics; the freed id is not reused.
    pub fn delete(&self, id: TicketId) -> DomainResult<()> {
        let mut tickets = self
            .inner
            .write()
            .map_err(|_| DomainError::conflict("ticket store unavailable"))?;

        let before = tickets.len();
        tickets.retain(|t| t.id != id);

        if tickets.len() == before {
            return Err(DomainError::NotFound);
        }

        tracing::info!(ticket_id = %id, "ticket deleted");
        Ok(())
    }
}

impl Default for TicketStore {
    fn default() -> Self {
        Self::new()
    }
}
