//! Proxy API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use serde_json::Value;

use crate::api::{AppError, AppResult};
use crate::core::ServerState;

/// GET /api/demo/tickets
pub async fn demo_tickets(State(state): State<ServerState>) -> AppResult<Json<Value>> {
    let posts = state
        .upstream
        .demo_tickets()
        .await
        .map_err(AppError::upstream("Failed to fetch demo tickets"))?;
    Ok(Json(posts))
}

/// GET /api/demo/customers
pub async fn demo_customers(State(state): State<ServerState>) -> AppResult<Json<Value>> {
    let users = state
        .upstream
        .demo_customers()
        .await
        .map_err(AppError::upstream("Failed to fetch demo customers"))?;
    Ok(Json(users))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: Option<String>,
}

/// GET /api/assets/search?q=
pub async fn search_assets(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Value>> {
    let q = query
        .q
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::validation("Missing search query"))?;

    let items = state
        .upstream
        .search_repositories(&q)
        .await
        .map_err(AppError::upstream("Failed to search assets"))?;
    Ok(Json(items))
}
