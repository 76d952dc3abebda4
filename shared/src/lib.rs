//! Shared types for the support desk
//!
//! Wire types used by both `ticket-server` and `ticket-client`:
//! ticket records, request payloads, list filters and the error body.

pub mod error;
pub mod models;

// Re-exports
pub use error::ErrorBody;
pub use models::{
    CustomerProfile, Escalation, Message, StatusChange, Ticket, TicketEscalate, TicketFilter,
    TicketRespond, TicketSource, TicketStatus, TicketUpsert, UnknownVariant,
};
pub use serde::{Deserialize, Serialize};
