//! 内存工单存储
//!
//! `TicketStore` 独占所有工单及其消息/历史记录，调用方只拿到克隆。
//!
//! # 操作
//!
//! | 操作 | 说明 | 失败 |
//! |------|------|------|
//! | [`list`](TicketStore::list) | 按来源/状态过滤，保持插入顺序 | - |
//! | [`get`](TicketStore::get) | 按 ID 查询 | NotFound |
//! | [`create_or_update`](TicketStore::create_or_update) | 按主题 + 客户邮箱查找或创建 | Validation |
//! | [`respond`](TicketStore::respond) | 追加一条消息 | NotFound / Validation |
//! | [`escalate`](TicketStore::escalate) | 指派团队并标记为 escalated | NotFound / Validation |
//!
//! 所有校验在修改之前完成，失败的操作不会留下任何修改。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use shared::models::{
    Escalation, Message, StatusChange, Ticket, TicketFilter, TicketStatus, TicketUpsert,
};

use super::clock::Clock;
use crate::services::notifier::{EscalationNotice, TeamNotifier};

/// 回复的默认发送者
pub const DEFAULT_SENDER: &str = "support";
/// 升级操作的默认执行者
pub const DEFAULT_ESCALATED_BY: &str = "supportAgent";

pub const MSG_MISSING_FIELDS: &str = "Missing required fields";
pub const MSG_NO_CONTENT: &str = "No response content provided";
pub const MSG_NO_TEAM: &str = "No team specified";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TicketError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("Not found")]
    NotFound { id: i64 },
}

pub type TicketResult<T> = Result<T, TicketError>;

/// Result of [`TicketStore::create_or_update`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upserted {
    Created(Ticket),
    Updated(Ticket),
}

impl Upserted {
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    pub fn ticket(&self) -> &Ticket {
        match self {
            Self::Created(t) | Self::Updated(t) => t,
        }
    }

    pub fn into_ticket(self) -> Ticket {
        match self {
            Self::Created(t) | Self::Updated(t) => t,
        }
    }
}

#[derive(Debug)]
pub struct TicketStore {
    tickets: Vec<Ticket>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn TeamNotifier>,
}

impl TicketStore {
    pub fn new(clock: Arc<dyn Clock>, notifier: Arc<dyn TeamNotifier>) -> Self {
        Self {
            tickets: Vec::new(),
            clock,
            notifier,
        }
    }

    /// 用已有工单初始化 (预置数据)
    ///
    /// 重复 ID 的工单只保留第一条。
    pub fn with_tickets(
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn TeamNotifier>,
        tickets: Vec<Ticket>,
    ) -> Self {
        let mut store = Self::new(clock, notifier);
        for ticket in tickets {
            if store.position(ticket.id).is_some() {
                tracing::warn!(ticket_id = ticket.id, "Skipping seed ticket with duplicate id");
                continue;
            }
            store.tickets.push(ticket);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// 过滤工单，保持插入顺序
    pub fn list(&self, filter: &TicketFilter) -> Vec<Ticket> {
        self.tickets
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: i64) -> TicketResult<Ticket> {
        self.position(id)
            .map(|idx| self.tickets[idx].clone())
            .ok_or(TicketError::NotFound { id })
    }

    /// 查找或创建工单
    ///
    /// 主题和客户邮箱都相同视为同一工单：刷新 `updatedAt`、
    /// 以当前状态追加一条状态历史，并在提供非空复现步骤时覆盖。
    pub fn create_or_update(&mut self, req: TicketUpsert) -> TicketResult<Upserted> {
        let TicketUpsert {
            subject,
            source,
            customer_profile,
            reproduction_steps,
        } = req;

        let (Some(subject), Some(source), Some(customer_profile)) =
            (subject.filter(|s| !s.is_empty()), source, customer_profile)
        else {
            return Err(TicketError::Validation(MSG_MISSING_FIELDS));
        };
        let reproduction_steps = reproduction_steps.filter(|s| !s.is_empty());

        let existing = self
            .tickets
            .iter()
            .position(|t| t.subject == subject && t.customer_profile.email == customer_profile.email);

        if let Some(idx) = existing {
            let now = self.stamp(&self.tickets[idx]);
            let ticket = &mut self.tickets[idx];
            ticket.updated_at = now;
            ticket.status_history.push(StatusChange {
                status: ticket.status,
                timestamp: now,
            });
            if let Some(steps) = reproduction_steps {
                ticket.reproduction_steps = steps;
            }
            tracing::debug!(ticket_id = ticket.id, "Ticket refreshed by upsert");
            return Ok(Upserted::Updated(ticket.clone()));
        }

        let now = self.clock.now();
        let ticket = Ticket {
            id: self.next_id(),
            subject,
            source,
            status: TicketStatus::Open,
            created_at: now,
            updated_at: now,
            messages: Vec::new(),
            customer_profile,
            status_history: vec![StatusChange {
                status: TicketStatus::Open,
                timestamp: now,
            }],
            reproduction_steps: reproduction_steps.unwrap_or_default(),
            assigned_team: None,
            escalation_history: Vec::new(),
        };
        tracing::info!(
            ticket_id = ticket.id,
            source = %ticket.source,
            "Ticket created"
        );
        self.tickets.push(ticket.clone());
        Ok(Upserted::Created(ticket))
    }

    /// 追加回复消息 (不改变状态)
    pub fn respond(&mut self, id: i64, content: &str, sender: Option<&str>) -> TicketResult<Ticket> {
        let idx = self.position(id).ok_or(TicketError::NotFound { id })?;
        if content.is_empty() {
            return Err(TicketError::Validation(MSG_NO_CONTENT));
        }

        let now = self.stamp(&self.tickets[idx]);
        let ticket = &mut self.tickets[idx];
        ticket.messages.push(Message {
            sender: sender
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_SENDER)
                .to_string(),
            content: content.to_string(),
            timestamp: now,
        });
        ticket.updated_at = now;

        tracing::debug!(
            ticket_id = id,
            messages = ticket.messages.len(),
            "Response appended"
        );
        Ok(ticket.clone())
    }

    /// 升级到指定团队
    ///
    /// 无论之前是什么状态都会变为 `escalated`，并追加一条升级记录。
    /// 通知失败只记录告警，不影响返回结果。
    pub fn escalate(
        &mut self,
        id: i64,
        team: &str,
        escalated_by: Option<&str>,
    ) -> TicketResult<Ticket> {
        let idx = self.position(id).ok_or(TicketError::NotFound { id })?;
        if team.is_empty() {
            return Err(TicketError::Validation(MSG_NO_TEAM));
        }
        let escalated_by = escalated_by
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_ESCALATED_BY);

        let now = self.stamp(&self.tickets[idx]);
        let ticket = &mut self.tickets[idx];
        ticket.assigned_team = Some(team.to_string());
        ticket.status = TicketStatus::Escalated;
        ticket.updated_at = now;
        ticket.escalation_history.push(Escalation {
            team: team.to_string(),
            escalated_by: escalated_by.to_string(),
            timestamp: now,
        });
        let ticket = ticket.clone();

        tracing::info!(
            ticket_id = id,
            team = %team,
            escalated_by = %escalated_by,
            "Ticket escalated"
        );

        let notice = EscalationNotice {
            ticket_id: ticket.id,
            subject: ticket.subject.clone(),
            team: team.to_string(),
            escalated_by: escalated_by.to_string(),
            timestamp: now,
        };
        if let Err(e) = self.notifier.notify(&notice) {
            tracing::warn!(ticket_id = id, team = %team, error = %e, "Escalation notification dropped");
        }

        Ok(ticket)
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.tickets.iter().position(|t| t.id == id)
    }

    /// 下一个 ID：当前最大 ID + 1，空表从 1 开始
    fn next_id(&self) -> i64 {
        self.tickets.iter().map(|t| t.id).max().map_or(1, |max| max + 1)
    }

    /// 修改时间戳，保证 `updatedAt` 不回退
    fn stamp(&self, ticket: &Ticket) -> DateTime<Utc> {
        self.clock.now().max(ticket.updated_at)
    }
}
