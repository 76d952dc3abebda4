//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`tickets`] - 工单接口
//! - [`proxy`] - 演示数据 / 资源搜索透传接口

pub mod health;
pub mod proxy;
pub mod tickets;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let start = std::time::Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();
    let latency_ms = start.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::warn!(target: "http_access", latency_ms, "{} {} {}", method, uri, status);
    } else {
        tracing::info!(target: "http_access", latency_ms, "{} {} {}", method, uri, status);
    }

    response
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(tickets::router())
        .merge(proxy::router())
}

/// Build the full application router with state and middleware
pub fn build_router(state: ServerState) -> Router {
    let timeout = state.config.request_timeout();

    build_app()
        .with_state(state)
        // Tower HTTP 中间件
        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::permissive())
        // HTTP 请求日志中间件
        .layer(middleware::from_fn(log_request))
}
