//! Operation Log API 错误类型

use std::fmt;

use axum::http::StatusCode;

use super::types::ErrorResponse;

/// Operation Log 服务错误
#[derive(Debug)]
pub enum OperationError {
    /// 请求体校验失败（消息指明第一个不合法的字段）
    Validation(String),
    /// 存储层失败
    Storage(anyhow::Error),
}

impl OperationError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// 获取对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 转换为 API 错误响应
    pub fn into_response(self) -> ErrorResponse {
        match self {
            Self::Validation(message) => ErrorResponse::new(message),
            Self::Storage(_) => ErrorResponse::new("Internal Server Error"),
        }
    }
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "{}", message),
            Self::Storage(e) => write!(f, "存储失败: {:#}", e),
        }
    }
}

impl std::error::Error for OperationError {}

impl From<anyhow::Error> for OperationError {
    fn from(e: anyhow::Error) -> Self {
        Self::Storage(e)
    }
}
