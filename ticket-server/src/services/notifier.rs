//! 升级通知
//!
//! 工单升级后通知被指派的团队。通知是尽力而为的副作用：
//! - [`TeamNotifier`] 由工单存储同步调用，失败只记录日志
//! - [`QueuedNotifier`] 只做非阻塞的通道投递，不占用请求路径
//! - [`NotifyWorker`] 在后台消费通道，写日志并可选地推送 webhook

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// 升级通知内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalationNotice {
    pub ticket_id: i64,
    pub subject: String,
    pub team: String,
    pub escalated_by: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification queue is full")]
    QueueFull,

    #[error("notification queue is closed")]
    QueueClosed,

    #[error("webhook delivery failed: {0}")]
    Webhook(#[from] reqwest::Error),

    #[error("webhook returned status {0}")]
    WebhookStatus(http::StatusCode),
}

/// Pluggable escalation notifier
///
/// 实现必须是非阻塞的：调用方持有工单存储的写锁。
pub trait TeamNotifier: Send + Sync + std::fmt::Debug {
    fn notify(&self, notice: &EscalationNotice) -> Result<(), NotifyError>;
}

/// 只写日志的通知器
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl TeamNotifier for LogNotifier {
    fn notify(&self, notice: &EscalationNotice) -> Result<(), NotifyError> {
        tracing::info!(
            target: "notify",
            team = %notice.team,
            ticket_id = notice.ticket_id,
            escalated_by = %notice.escalated_by,
            "Notify {}: Ticket #{} escalated.",
            notice.team,
            notice.ticket_id
        );
        Ok(())
    }
}

/// 投递到后台 worker 的通知器
#[derive(Debug, Clone)]
pub struct QueuedNotifier {
    tx: mpsc::Sender<EscalationNotice>,
}

impl QueuedNotifier {
    /// 创建通知器和对应的接收端 (交给 [`NotifyWorker::run`])
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<EscalationNotice>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }
}

impl TeamNotifier for QueuedNotifier {
    fn notify(&self, notice: &EscalationNotice) -> Result<(), NotifyError> {
        self.tx.try_send(notice.clone()).map_err(|e| match e {
            TrySendError::Full(_) => NotifyError::QueueFull,
            TrySendError::Closed(_) => NotifyError::QueueClosed,
        })
    }
}

/// Webhook 推送目标 (JSON POST)
#[derive(Debug, Clone)]
pub struct WebhookSink {
    client: reqwest::Client,
    url: String,
}

impl WebhookSink {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub async fn deliver(&self, notice: &EscalationNotice) -> Result<(), NotifyError> {
        let response = self.client.post(&self.url).json(notice).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::WebhookStatus(status));
        }
        Ok(())
    }
}

/// 升级通知后台 Worker
///
/// 从 mpsc 通道消费通知，通道关闭时自动退出。投递失败不重试。
#[derive(Debug, Default)]
pub struct NotifyWorker {
    webhook: Option<WebhookSink>,
}

impl NotifyWorker {
    pub fn new(webhook: Option<WebhookSink>) -> Self {
        Self { webhook }
    }

    /// 运行 worker（阻塞直到通道关闭），返回处理的通知数
    pub async fn run(self, mut rx: mpsc::Receiver<EscalationNotice>) -> usize {
        tracing::info!(webhook = self.webhook.is_some(), "Notify worker started");

        let mut handled = 0;
        while let Some(notice) = rx.recv().await {
            let _ = LogNotifier.notify(&notice);

            if let Some(webhook) = &self.webhook
                && let Err(e) = webhook.deliver(&notice).await
            {
                tracing::warn!(
                    ticket_id = notice.ticket_id,
                    team = %notice.team,
                    error = %e,
                    "Failed to deliver escalation webhook"
                );
            }
            handled += 1;
        }

        tracing::info!("Notify channel closed, worker stopping");
        handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, extract::State, routing::post};
    use chrono::TimeZone;

    fn notice(ticket_id: i64) -> EscalationNotice {
        EscalationNotice {
            ticket_id,
            subject: "Cannot access GPU instance".to_string(),
            team: "Engineering".to_string(),
            escalated_by: "supportAgent".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_queued_notifier_full_queue() {
        let (notifier, _rx) = QueuedNotifier::channel(1);

        notifier.notify(&notice(1)).unwrap();
        let err = notifier.notify(&notice(2)).unwrap_err();
        assert!(matches!(err, NotifyError::QueueFull));
    }

    #[test]
    fn test_queued_notifier_closed_queue() {
        let (notifier, rx) = QueuedNotifier::channel(4);
        drop(rx);

        let err = notifier.notify(&notice(1)).unwrap_err();
        assert!(matches!(err, NotifyError::QueueClosed));
    }

    #[tokio::test]
    async fn test_worker_drains_until_closed() {
        let (notifier, rx) = QueuedNotifier::channel(8);
        notifier.notify(&notice(1)).unwrap();
        notifier.notify(&notice(2)).unwrap();
        drop(notifier);

        let handled = NotifyWorker::new(None).run(rx).await;
        assert_eq!(handled, 2);
    }

    #[tokio::test]
    async fn test_worker_posts_to_webhook() {
        let (seen_tx, mut seen_rx) = mpsc::channel::<serde_json::Value>(4);
        let app = Router::new()
            .route(
                "/hook",
                post(
                    |State(tx): State<mpsc::Sender<serde_json::Value>>,
                     Json(body): Json<serde_json::Value>| async move {
                        let _ = tx.send(body).await;
                    },
                ),
            )
            .with_state(seen_tx);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let sink = WebhookSink::new(reqwest::Client::new(), format!("http://{addr}/hook"));
        let (notifier, rx) = QueuedNotifier::channel(8);
        notifier.notify(&notice(3)).unwrap();
        drop(notifier);

        let handled = NotifyWorker::new(Some(sink)).run(rx).await;
        assert_eq!(handled, 1);

        let body = seen_rx.recv().await.unwrap();
        assert_eq!(body["ticketId"], 3);
        assert_eq!(body["team"], "Engineering");
        assert_eq!(body["escalatedBy"], "supportAgent");
    }

    #[tokio::test]
    async fn test_worker_survives_unreachable_webhook() {
        let sink = WebhookSink::new(reqwest::Client::new(), "http://127.0.0.1:9/hook");
        let (notifier, rx) = QueuedNotifier::channel(8);
        notifier.notify(&notice(4)).unwrap();
        notifier.notify(&notice(5)).unwrap();
        drop(notifier);

        let handled = NotifyWorker::new(Some(sink)).run(rx).await;
        assert_eq!(handled, 2);
    }
}
