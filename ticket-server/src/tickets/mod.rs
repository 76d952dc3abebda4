//! 工单模块
//!
//! - [`TicketStore`] - 内存工单存储 (唯一的数据所有者)
//! - [`clock`] - 时间源
//! - [`seed`] - 启动时的演示数据

pub mod clock;
pub mod seed;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{TicketError, TicketResult, TicketStore, Upserted};
