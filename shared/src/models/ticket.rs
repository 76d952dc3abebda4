//! Ticket Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::serde_helpers;

/// Unknown enum value in a request (e.g. `source=fax`)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// 工单来源渠道
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketSource {
    Email,
    Chat,
    Community,
}

impl TicketSource {
    pub const ALL: [TicketSource; 3] = [Self::Email, Self::Chat, Self::Community];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Chat => "chat",
            Self::Community => "community",
        }
    }
}

impl fmt::Display for TicketSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketSource {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "source",
                value: s.to_string(),
            })
    }
}

/// 工单状态
///
/// 没有强制的状态机：创建时为 `open`，升级时为 `escalated`，
/// `pending` / `closed` 只出现在预置数据中。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Open,
    Pending,
    Closed,
    Escalated,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 4] = [Self::Open, Self::Pending, Self::Closed, Self::Escalated];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Pending => "pending",
            Self::Closed => "closed",
            Self::Escalated => "escalated",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "status",
                value: s.to_string(),
            })
    }
}

/// Customer profile attached to a ticket
///
/// 只做存在性校验，字段缺失时为空字符串。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: String,
}

impl CustomerProfile {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        company: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            company: company.into(),
        }
    }
}

/// Ticket message (append-only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Status history entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: TicketStatus,
    pub timestamp: DateTime<Utc>,
}

/// Escalation history entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Escalation {
    pub team: String,
    pub escalated_by: String,
    pub timestamp: DateTime<Utc>,
}

/// Ticket entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: i64,
    pub subject: String,
    pub source: TicketSource,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub messages: Vec<Message>,
    pub customer_profile: CustomerProfile,
    /// 状态历史 (线上字段名沿用 `issueHistory`)
    #[serde(rename = "issueHistory", default)]
    pub status_history: Vec<StatusChange>,
    #[serde(default)]
    pub reproduction_steps: String,
    pub assigned_team: Option<String>,
    #[serde(default)]
    pub escalation_history: Vec<Escalation>,
}

/// Create-or-update ticket payload
///
/// 所有字段都可缺省，必填校验由服务端的工单存储完成，
/// 这样缺字段返回统一的 `Missing required fields`。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketUpsert {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub source: Option<TicketSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_profile: Option<CustomerProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reproduction_steps: Option<String>,
}

/// Respond payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketRespond {
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
}

/// Escalate payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketEscalate {
    #[serde(default)]
    pub team: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalated_by: Option<String>,
}

/// List filter (`GET /api/tickets?source=&status=`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketFilter {
    #[serde(
        default,
        deserialize_with = "serde_helpers::empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub source: Option<TicketSource>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<TicketStatus>,
}

impl TicketFilter {
    pub fn with_source(mut self, source: TicketSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_none() && self.status.is_none()
    }

    /// 所有已提供的字段都相等才算匹配
    pub fn matches(&self, ticket: &Ticket) -> bool {
        self.source.is_none_or(|s| s == ticket.source)
            && self.status.is_none_or(|s| s == ticket.status)
    }
}
