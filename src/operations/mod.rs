//! 推理运行记录（Operation Log）模块
//!
//! 提供操作记录的校验、持久化存储和 REST API

mod error;
mod handlers;
pub mod model;
mod router;
pub mod store;
mod types;

pub use router::create_operations_router;
pub use store::OperationLog;
