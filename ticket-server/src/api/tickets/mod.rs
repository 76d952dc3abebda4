//! Ticket API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/tickets | GET | 列表 (可按 source / status 过滤) |
//! | /api/tickets | POST | 查找或创建 (201 创建 / 200 更新) |
//! | /api/tickets/{id} | GET | 详情 |
//! | /api/tickets/{id}/respond | POST | 追加回复 |
//! | /api/tickets/{id}/escalate | POST | 升级到团队 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tickets", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create_or_update))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/respond", post(handler::respond))
        .route("/{id}/escalate", post(handler::escalate))
}
