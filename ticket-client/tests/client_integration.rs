// ticket-client/tests/client_integration.rs
// 集成测试: 在随机端口启动真实的工单服务

use std::sync::Arc;

use ticket_client::{
    ClientConfig, ClientError, CustomerProfile, TicketClient, TicketEscalate, TicketFilter,
    TicketRespond, TicketSource, TicketStatus, TicketUpsert,
};
use ticket_server::services::{LogNotifier, UpstreamClient};
use ticket_server::tickets::{SystemClock, TicketStore, seed};
use ticket_server::{Config, ServerState};

async fn spawn_server() -> TicketClient {
    let config = Config::with_overrides(0, true);
    let store = TicketStore::with_tickets(
        Arc::new(SystemClock),
        Arc::new(LogNotifier),
        seed::demo_tickets(chrono::Utc::now()),
    );
    let upstream =
        UpstreamClient::with_client(reqwest::Client::new(), "http://127.0.0.1:9", "http://127.0.0.1:9");
    let app = ticket_server::api::build_router(ServerState::new(config, store, upstream));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    ClientConfig::new(format!("http://{addr}"))
        .with_timeout(5)
        .build_client()
        .unwrap()
}

#[test]
fn test_default_config() {
    let config = ClientConfig::default();
    assert_eq!(config.base_url, "http://localhost:4000");
    assert_eq!(config.timeout, 30);
}

#[tokio::test]
async fn test_list_and_filter() {
    let client = spawn_server().await;

    let all = client.list_tickets(&TicketFilter::default()).await.unwrap();
    assert_eq!(all.len(), 3);

    let chat = client
        .list_tickets(&TicketFilter::default().with_source(TicketSource::Chat))
        .await
        .unwrap();
    assert_eq!(chat.len(), 1);
    assert_eq!(chat[0].subject, "Billing question");

    let closed_email = client
        .list_tickets(
            &TicketFilter::default()
                .with_source(TicketSource::Email)
                .with_status(TicketStatus::Closed),
        )
        .await
        .unwrap();
    assert!(closed_email.is_empty());
}

#[tokio::test]
async fn test_get_missing_ticket() {
    let client = spawn_server().await;

    let err = client.get_ticket(404).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, ClientError::NotFound(ref msg) if msg == "Not found"));
}

#[tokio::test]
async fn test_upsert_respond_escalate() {
    let client = spawn_server().await;

    let req = TicketUpsert {
        subject: Some("Disk quota exceeded".to_string()),
        source: Some(TicketSource::Community),
        customer_profile: Some(CustomerProfile::new("Eve", "eve@x.com", "Epsilon")),
        reproduction_steps: Some("1. upload file".to_string()),
    };

    let first = client.upsert_ticket(&req).await.unwrap();
    assert!(first.created);
    assert_eq!(first.ticket.id, 4);

    let second = client.upsert_ticket(&req).await.unwrap();
    assert!(!second.created);
    assert_eq!(second.ticket.id, 4);

    let ticket = client
        .respond(
            4,
            &TicketRespond {
                content: "Looking into it".to_string(),
                sender: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(ticket.messages.len(), 1);
    assert_eq!(ticket.messages[0].sender, "support");

    let ticket = client
        .escalate(
            4,
            &TicketEscalate {
                team: "Engineering".to_string(),
                escalated_by: Some("supportAgent1".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(ticket.status, TicketStatus::Escalated);
    assert_eq!(ticket.assigned_team.as_deref(), Some("Engineering"));
    assert_eq!(ticket.escalation_history[0].escalated_by, "supportAgent1");
}

#[tokio::test]
async fn test_validation_errors_carry_server_message() {
    let client = spawn_server().await;

    let err = client.upsert_ticket(&TicketUpsert::default()).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(ref msg) if msg == "Missing required fields"));

    let err = client
        .escalate(1, &TicketEscalate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(ref msg) if msg == "No team specified"));

    let err = client.search_assets("").await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(ref msg) if msg == "Missing search query"));
}

#[tokio::test]
async fn test_upstream_failure_is_internal() {
    let client = spawn_server().await;

    let err = client.demo_customers().await.unwrap_err();
    assert!(
        matches!(err, ClientError::Internal(ref msg) if msg == "Failed to fetch demo customers")
    );
}

#[tokio::test]
async fn test_health() {
    let client = spawn_server().await;

    let health = client.health().await.unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["tickets"], 3);
}
