//! 操作记录数据模型

use chrono::{DateTime, Utc};
use serde::Serialize;

/// 已持久化的一次推理运行记录
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub id: i64,
    /// 任务标识，例如 "sentiment-analysis"
    pub task: String,
    pub input: String,
    /// 推理结果，形状由任务决定，存储层不做校验
    pub output: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// 已通过校验、待写入的操作
///
/// 不含 `id` 与 `createdAt`，二者均由服务端在写入时生成
#[derive(Debug, Clone, PartialEq)]
pub struct NewOperation {
    pub task: String,
    pub input: String,
    pub output: serde_json::Value,
}
