//! Operation Log API 处理器

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use super::error::OperationError;
use super::router::OperationsState;
use super::types::parse_create_request;

/// GET /api/operations
///
/// 存储层按 createdAt 升序返回，这里反转为最新在前
pub async fn list_operations(State(state): State<OperationsState>) -> impl IntoResponse {
    match state.log.list().await {
        Ok(mut operations) => {
            operations.reverse();
            Json(operations).into_response()
        }
        Err(e) => {
            tracing::error!("查询操作记录失败: {:#}", e);
            error_response(OperationError::Storage(e))
        }
    }
}

/// POST /api/operations
///
/// 请求体按原始字节读取，由 [`parse_create_request`] 统一给出 400 消息，
/// 不依赖 Content-Type
pub async fn create_operation(
    State(state): State<OperationsState>,
    body: Bytes,
) -> impl IntoResponse {
    let candidate = match parse_create_request(&body) {
        Ok(candidate) => candidate,
        Err(e) => {
            tracing::debug!("操作记录校验失败: {}", e);
            return error_response(e);
        }
    };

    match state.log.create(candidate).await {
        Ok(operation) => {
            tracing::info!(id = operation.id, task = %operation.task, "已记录操作");
            #[cfg(feature = "sensitive-logs")]
            tracing::info!(
                id = operation.id,
                input = %crate::common::truncate_with_ellipsis(&operation.input, 200),
                "操作输入"
            );
            (StatusCode::CREATED, Json(operation)).into_response()
        }
        Err(e) => {
            tracing::error!("写入操作记录失败: {:#}", e);
            error_response(OperationError::Storage(e))
        }
    }
}

fn error_response(e: OperationError) -> Response {
    (e.status_code(), Json(e.into_response())).into_response()
}
