//! 透传接口模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/demo/tickets | GET | 第三方演示工单 |
//! | /api/demo/customers | GET | 第三方演示客户 |
//! | /api/assets/search?q= | GET | 仓库搜索 |
//!
//! 上游失败统一返回 500 和通用错误消息。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/demo/tickets", get(handler::demo_tickets))
        .route("/api/demo/customers", get(handler::demo_customers))
        .route("/api/assets/search", get(handler::search_assets))
}
