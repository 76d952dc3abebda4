//! 统一错误处理
//!
//! 工单存储抛出类型化错误 ([`TicketError`])，在请求边界统一转换为
//! HTTP 状态码。所有错误响应体都是 [`ErrorBody`]：
//!
//! ```json
//! { "error": "Not found" }
//! ```
//!
//! | 变体 | 状态码 | 说明 |
//! |------|--------|------|
//! | Validation | 400 | 必填字段缺失、请求体/查询参数格式错误 |
//! | NotFound | 404 | 工单不存在 |
//! | Upstream | 500 | 第三方接口失败 (返回通用消息) |
//! | Internal | 500 | 其他内部错误 |

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::ErrorBody;
use tracing::error;

use crate::services::UpstreamError;
use crate::tickets::TicketError;

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    /// 验证失败 (400)
    Validation(String),

    #[error("Not found")]
    /// 资源不存在 (404)
    NotFound,

    #[error("{message}")]
    /// 上游失败 (500)，`message` 是返回给客户端的通用描述
    Upstream {
        message: &'static str,
        #[source]
        source: UpstreamError,
    },

    #[error("Internal server error: {0}")]
    /// 内部错误 (500)
    Internal(String),
}

/// 处理器的 Result 类型别名
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn upstream(message: &'static str) -> impl FnOnce(UpstreamError) -> Self {
        move |source| Self::Upstream { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Upstream { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Upstream { message, source } => {
                error!(target: "upstream", error = %source, "{}", message);
                (*message).to_string()
            }
            AppError::Internal(msg) => {
                // 记录内部错误但不暴露详细信息
                error!(target: "internal", error = %msg, "Internal error occurred");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorBody::new(message))).into_response()
    }
}

impl From<TicketError> for AppError {
    fn from(e: TicketError) -> Self {
        match e {
            TicketError::Validation(msg) => AppError::Validation(msg.to_string()),
            TicketError::NotFound { .. } => AppError::NotFound,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(err: AppError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_store_errors_map_to_status() {
        let (status, body) = body_of(TicketError::NotFound { id: 9 }.into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "Not found");

        let (status, body) =
            body_of(TicketError::Validation("Missing required fields").into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Missing required fields");
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let (status, body) = body_of(AppError::internal("lock poisoned at store.rs")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Internal server error");
    }
}
