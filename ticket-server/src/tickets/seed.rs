//! 演示数据
//!
//! 三条预置工单，时间戳相对于启动时刻。

use chrono::{DateTime, Duration, Utc};
use shared::models::{CustomerProfile, Message, StatusChange, Ticket, TicketSource, TicketStatus};

fn message(sender: &str, content: &str, at: DateTime<Utc>) -> Message {
    Message {
        sender: sender.to_string(),
        content: content.to_string(),
        timestamp: at,
    }
}

fn change(status: TicketStatus, at: DateTime<Utc>) -> StatusChange {
    StatusChange {
        status,
        timestamp: at,
    }
}

/// 预置工单 (ID 1..=3)
pub fn demo_tickets(now: DateTime<Utc>) -> Vec<Ticket> {
    let ago = |ms: i64| now - Duration::milliseconds(ms);

    vec![
        Ticket {
            id: 1,
            subject: "Cannot access GPU instance".to_string(),
            source: TicketSource::Email,
            status: TicketStatus::Open,
            created_at: ago(86_400_000),
            updated_at: ago(3_600_000),
            messages: vec![
                message(
                    "user1@customer.com",
                    "I cannot access my GPU instance.",
                    ago(86_400_000),
                ),
                message("support", "We are looking into this.", ago(86_000_000)),
            ],
            customer_profile: CustomerProfile::new(
                "Alice Smith",
                "user1@customer.com",
                "Acme Corp",
            ),
            status_history: vec![
                change(TicketStatus::Open, ago(86_400_000)),
                change(TicketStatus::Pending, ago(86_000_000)),
            ],
            reproduction_steps:
                "1. Log in to dashboard. 2. Attempt to start GPU instance. 3. Observe error."
                    .to_string(),
            assigned_team: None,
            escalation_history: vec![],
        },
        Ticket {
            id: 2,
            subject: "Billing question".to_string(),
            source: TicketSource::Chat,
            status: TicketStatus::Pending,
            created_at: ago(43_200_000),
            updated_at: ago(1_800_000),
            messages: vec![message(
                "user2@customer.com",
                "Can you explain my last invoice?",
                ago(43_200_000),
            )],
            customer_profile: CustomerProfile::new("Bob Lee", "user2@customer.com", "Beta Inc."),
            status_history: vec![
                change(TicketStatus::Open, ago(43_200_000)),
                change(TicketStatus::Pending, ago(1_800_000)),
            ],
            reproduction_steps: "N/A (billing)".to_string(),
            assigned_team: None,
            escalation_history: vec![],
        },
        Ticket {
            id: 3,
            subject: "Feature request: more storage".to_string(),
            source: TicketSource::Community,
            status: TicketStatus::Closed,
            created_at: ago(259_200_000),
            updated_at: ago(172_800_000),
            messages: vec![
                message(
                    "user3@customer.com",
                    "Please add more storage options.",
                    ago(259_200_000),
                ),
                message(
                    "support",
                    "Thanks for the feedback! We are considering it.",
                    ago(172_800_000),
                ),
            ],
            customer_profile: CustomerProfile::new(
                "Carol Jones",
                "user3@customer.com",
                "Gamma LLC",
            ),
            status_history: vec![
                change(TicketStatus::Open, ago(259_200_000)),
                change(TicketStatus::Closed, ago(172_800_000)),
            ],
            reproduction_steps: "N/A (feature request)".to_string(),
            assigned_team: None,
            escalation_history: vec![],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_tickets_are_consistent() {
        let now = Utc::now();
        let tickets = demo_tickets(now);

        let ids: Vec<i64> = tickets.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        for t in &tickets {
            assert!(t.created_at <= t.updated_at, "ticket {}", t.id);
            assert!(t.updated_at <= now);
            assert!(!t.status_history.is_empty());
        }
    }
}
