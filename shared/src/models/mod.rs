//! Data models
//!
//! Shared between ticket-server and the dashboard client (via API).
//! Wire names are camelCase; timestamps are RFC 3339 UTC strings.
//! All IDs are `i64`, assigned by the server starting at 1.

pub mod serde_helpers;
pub mod ticket;

// Re-exports
pub use ticket::*;
