//! Operation Log API 路由

use axum::{Router, routing::get};

use super::handlers::{create_operation, list_operations};
use super::store::OperationLog;

/// Operation Log API 状态
#[derive(Clone)]
pub struct OperationsState {
    pub log: OperationLog,
}

/// 创建 Operation Log API 路由
///
/// # 端点
/// - `GET /operations` - 获取全部操作记录（最新在前）
/// - `POST /operations` - 记录一次推理运行
///
/// 返回 Router<()>，由主应用 nest 到 `/api`
pub fn create_operations_router(log: OperationLog) -> Router {
    let state = OperationsState { log };

    Router::new()
        .route("/operations", get(list_operations).post(create_operation))
        .with_state(state)
}
