//! Ticket API Handlers

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use shared::models::{Ticket, TicketEscalate, TicketFilter, TicketRespond, TicketUpsert};

use crate::api::{AppError, AppResult};
use crate::core::ServerState;

/// 非数字 ID 不可能匹配任何工单，按 404 处理
fn ticket_id(path: Result<Path<i64>, PathRejection>) -> AppResult<i64> {
    path.map(|Path(id)| id).map_err(|_| AppError::NotFound)
}

/// GET /api/tickets - 获取工单列表
pub async fn list(
    State(state): State<ServerState>,
    filter: Result<Query<TicketFilter>, QueryRejection>,
) -> AppResult<Json<Vec<Ticket>>> {
    let Query(filter) = filter?;
    let tickets = state.tickets.read().list(&filter);
    Ok(Json(tickets))
}

/// GET /api/tickets/{id} - 获取单个工单
pub async fn get_by_id(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Ticket>> {
    let id = ticket_id(path)?;
    let ticket = state.tickets.read().get(id)?;
    Ok(Json(ticket))
}

/// POST /api/tickets - 查找或创建工单
pub async fn create_or_update(
    State(state): State<ServerState>,
    payload: Result<Json<TicketUpsert>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Ticket>)> {
    let Json(payload) = payload?;
    let upserted = state.tickets.write().create_or_update(payload)?;

    let status = if upserted.is_created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(upserted.into_ticket())))
}

/// POST /api/tickets/{id}/respond - 追加回复
pub async fn respond(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TicketRespond>, JsonRejection>,
) -> AppResult<Json<Ticket>> {
    let id = ticket_id(path)?;
    let Json(payload) = payload?;
    let ticket = state
        .tickets
        .write()
        .respond(id, &payload.content, payload.sender.as_deref())?;
    Ok(Json(ticket))
}

/// POST /api/tickets/{id}/escalate - 升级到团队
pub async fn escalate(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TicketEscalate>, JsonRejection>,
) -> AppResult<Json<Ticket>> {
    let id = ticket_id(path)?;
    let Json(payload) = payload?;
    let ticket = state
        .tickets
        .write()
        .escalate(id, &payload.team, payload.escalated_by.as_deref())?;
    Ok(Json(ticket))
}
