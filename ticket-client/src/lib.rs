//! Ticket Client - 工单服务的 HTTP 客户端和命令行看板
//!
//! - [`TicketClient`] - 对 `/api/tickets` 及透传接口的类型化调用
//! - [`render`] - 工单列表和详情的纯文本渲染

pub mod config;
pub mod error;
pub mod http;
pub mod render;

pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ClientError, ClientResult};
pub use http::{TicketClient, UpsertOutcome};

// Re-export shared types for convenience
pub use shared::models::{
    CustomerProfile, Ticket, TicketEscalate, TicketFilter, TicketRespond, TicketSource, TicketStatus, TicketUpsert,
};
