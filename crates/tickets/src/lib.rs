//! `helpdesk-tickets` — ticket records and the in-memory ticket store.

pub mod store;
pub mod ticket;

pub use store::TicketStore;
pub use ticket::{Ticket, TicketPatch, DEFAULT_STATUS};
