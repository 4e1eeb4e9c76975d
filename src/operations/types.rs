//! Operation Log API 请求/响应类型

use serde::Serialize;
use serde_json::{Map, Value};

use super::error::OperationError;
use super::model::NewOperation;

/// 错误响应
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 解析 POST /api/operations 的请求体
///
/// 按 `task`、`input`、`output` 的顺序校验，返回第一个不合法字段对应的错误。
/// 空请求体按 `{}` 处理；未知字段以及客户端提供的 `id`/`createdAt` 一律忽略。
pub fn parse_create_request(body: &[u8]) -> Result<NewOperation, OperationError> {
    let value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Map::new())
    } else {
        serde_json::from_slice::<Value>(body)
            .map_err(|_| OperationError::validation("Request body must be valid JSON"))?
    };

    match value {
        Value::Object(fields) => validate_candidate(fields),
        _ => Err(OperationError::validation(
            "Request body must be a JSON object",
        )),
    }
}

/// 校验候选记录 `{task, input, output}`
fn validate_candidate(mut fields: Map<String, Value>) -> Result<NewOperation, OperationError> {
    let task = take_non_empty_string(&mut fields, "task")?;
    let input = take_non_empty_string(&mut fields, "input")?;
    // output 的结构由推理任务决定，这里只要求存在且非 null
    let output = match fields.remove("output") {
        None | Some(Value::Null) => return Err(required("output")),
        Some(value) => value,
    };

    Ok(NewOperation {
        task,
        input,
        output,
    })
}

fn take_non_empty_string(
    fields: &mut Map<String, Value>,
    field: &str,
) -> Result<String, OperationError> {
    match fields.remove(field) {
        None | Some(Value::Null) => Err(required(field)),
        Some(Value::String(s)) if s.is_empty() => Err(OperationError::validation(format!(
            "{} must not be empty",
            field
        ))),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(OperationError::validation(format!(
            "{} must be a string, received {}",
            field,
            json_type_name(&other)
        ))),
    }
}

fn required(field: &str) -> OperationError {
    OperationError::validation(format!("{} is required", field))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
