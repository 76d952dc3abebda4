//! 纯文本渲染
//!
//! 所有函数返回 `String`，由调用方决定输出位置。

use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::Ticket;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

fn time(ts: &DateTime<Utc>) -> String {
    ts.format(TIME_FORMAT).to_string()
}

fn field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}

/// 工单列表: 主题、来源 | 状态、创建时间
pub fn ticket_list(tickets: &[Ticket]) -> String {
    if tickets.is_empty() {
        return "No tickets found.\n".to_string();
    }

    let mut out = String::new();
    for t in tickets {
        let _ = writeln!(out, "#{:<4} {}", t.id, t.subject);
        let _ = writeln!(
            out,
            "      {} | {}  {}",
            t.source,
            t.status,
            time(&t.created_at)
        );
    }
    out
}

/// 工单详情
pub fn ticket_detail(t: &Ticket) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#{} {}", t.id, t.subject);
    let _ = writeln!(out, "Source: {}", t.source);
    let _ = writeln!(out, "Status: {}", t.status);
    let _ = writeln!(
        out,
        "Assigned Team: {}",
        t.assigned_team.as_deref().unwrap_or("None")
    );
    let _ = writeln!(out, "Created: {}", time(&t.created_at));
    let _ = writeln!(out, "Updated: {}", time(&t.updated_at));

    let c = &t.customer_profile;
    let _ = writeln!(out, "\nCustomer Info");
    let _ = writeln!(out, "  Name: {}", c.name);
    let _ = writeln!(out, "  Email: {}", c.email);
    let _ = writeln!(out, "  Company: {}", c.company);

    let _ = writeln!(out, "\nIssue History");
    for h in &t.status_history {
        let _ = writeln!(out, "  {} at {}", h.status, time(&h.timestamp));
    }

    let _ = writeln!(out, "\nReproduction Steps");
    let _ = writeln!(out, "  {}", t.reproduction_steps);

    if !t.escalation_history.is_empty() {
        let _ = writeln!(out, "\nEscalation History");
        for e in &t.escalation_history {
            let _ = writeln!(
                out,
                "  {} by {} at {}",
                e.team,
                e.escalated_by,
                time(&e.timestamp)
            );
        }
    }

    let _ = writeln!(out, "\nMessages");
    if t.messages.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for m in &t.messages {
        let _ = writeln!(out, "  {} [{}]", m.sender, time(&m.timestamp));
        let _ = writeln!(out, "    {}", m.content);
    }
    out
}

/// 演示工单 (`title`)
pub fn demo_tickets(items: &[Value]) -> String {
    let mut out = String::new();
    for item in items {
        let _ = writeln!(out, "- {}", field(item, "title"));
    }
    out
}

/// 演示客户 (`name (email)`)
pub fn demo_customers(items: &[Value]) -> String {
    let mut out = String::new();
    for item in items {
        let _ = writeln!(out, "- {} ({})", field(item, "name"), field(item, "email"));
    }
    out
}

/// 资源搜索结果
pub fn assets(items: &[Value]) -> String {
    if items.is_empty() {
        return "No assets found.\n".to_string();
    }

    let mut out = String::new();
    for item in items {
        let _ = writeln!(
            out,
            "- {} {}",
            field(item, "full_name"),
            field(item, "html_url")
        );
    }
    out
}
