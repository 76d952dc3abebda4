use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;

use crate::core::Config;
use crate::services::{NotifyWorker, QueuedNotifier, UpstreamClient, WebhookSink};
use crate::tickets::{SystemClock, TicketStore, seed};
use crate::utils::{AppError, AppResult};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | tickets | Arc<RwLock<TicketStore>> | 内存工单存储 |
/// | upstream | UpstreamClient | 第三方接口代理 |
///
/// 工单存储的锁只在同步代码中持有，不跨越 `.await`。
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 内存工单存储
    pub tickets: Arc<RwLock<TicketStore>>,
    /// 上游代理客户端
    pub upstream: UpstreamClient,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`initialize()`](Self::initialize) 方法代替
    pub fn new(config: Config, store: TicketStore, upstream: UpstreamClient) -> Self {
        Self {
            config,
            tickets: Arc::new(RwLock::new(store)),
            upstream,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 创建上游代理客户端
    /// 2. 启动升级通知 worker (队列 + 可选 webhook)
    /// 3. 创建工单存储，按配置加载演示数据
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let upstream = UpstreamClient::new(config)
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        let (notifier, rx) = QueuedNotifier::channel(config.notify_queue_capacity);
        let webhook = config
            .notify_webhook_url
            .as_ref()
            .map(|url| WebhookSink::new(upstream.http().clone(), url.clone()));
        tokio::spawn(NotifyWorker::new(webhook).run(rx));

        let clock = Arc::new(SystemClock);
        let store = if config.seed_demo_data {
            TicketStore::with_tickets(clock, Arc::new(notifier), seed::demo_tickets(Utc::now()))
        } else {
            TicketStore::new(clock, Arc::new(notifier))
        };
        tracing::info!(tickets = store.len(), "Ticket store ready");

        Ok(Self::new(config.clone(), store, upstream))
    }

    /// 当前工单数量
    pub fn ticket_count(&self) -> usize {
        self.tickets.read().len()
    }
}
