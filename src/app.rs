//! 主应用路由组装

use axum::{Router, middleware};

use crate::common::middleware::{cors_layer, cross_origin_isolation};
use crate::model::config::Config;
use crate::operations::{OperationLog, create_operations_router};
use crate::ui::create_ui_router;

/// 组装主应用
///
/// - `/api/operations` - Operation Log API
/// - 其余路径 - Playground UI 静态文件
pub fn create_app(config: &Config, log: OperationLog) -> Router {
    let mut app = Router::new()
        .nest("/api", create_operations_router(log))
        .merge(create_ui_router());

    if config.cors_allow_any {
        app = app.layer(cors_layer());
    }
    if config.cross_origin_isolation {
        app = app.layer(middleware::from_fn(cross_origin_isolation));
    }

    app
}
