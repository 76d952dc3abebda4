//! 服务层 - 工单存储之外的协作者
//!
//! # 服务列表
//!
//! - [`notifier`] - 升级通知 (日志 / 队列 / webhook)
//! - [`UpstreamClient`] - 演示数据和资源搜索的上游代理

pub mod notifier;
pub mod upstream;

pub use notifier::{
    EscalationNotice, LogNotifier, NotifyError, NotifyWorker, QueuedNotifier, TeamNotifier,
    WebhookSink,
};
pub use upstream::{UpstreamClient, UpstreamError, UpstreamResult};
