//! 领域层：实体种类、缓存键、请求体校验

mod course;
mod entity;
mod student;

pub use course::*;
pub use entity::*;
pub use student::*;

use campus_errors::{AppError, AppResult};
use campus_ports::Fields;
use serde_json::Value;

/// 由存储维护、客户端不可写的字段
pub const RESERVED_FIELDS: [&str; 3] = ["_id", "createdAt", "updatedAt"];

/// 请求体必须是 JSON 对象
fn into_object(body: Value) -> AppResult<Fields> {
    match body {
        Value::Object(fields) => Ok(fields),
        _ => Err(AppError::validation("Request body must be a JSON object")),
    }
}

fn is_non_empty_string(fields: &Fields, name: &str) -> bool {
    matches!(fields.get(name), Some(Value::String(s)) if !s.trim().is_empty())
}

/// 客户端传入的保留字段直接丢弃，由服务端重新赋值
fn strip_reserved(fields: &mut Fields) {
    for name in RESERVED_FIELDS {
        fields.remove(name);
    }
}
