//! 课程请求体

use campus_errors::{AppError, AppResult};
use campus_ports::Fields;
use serde_json::Value;

use super::{RESERVED_FIELDS, into_object, is_non_empty_string, strip_reserved};

/// 校验通过的新课程
///
/// 除已知字段外的其他字段原样保留
#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse {
    fields: Fields,
}

impl NewCourse {
    pub fn from_json(body: Value) -> AppResult<Self> {
        let mut fields = into_object(body)?;

        if !is_non_empty_string(&fields, "title") || !is_non_empty_string(&fields, "description") {
            return Err(AppError::validation("Title and description are required"));
        }
        validate_optional_fields(&fields)?;
        strip_reserved(&mut fields);

        Ok(Self { fields })
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn into_fields(self) -> Fields {
        self.fields
    }
}

/// 课程部分更新
#[derive(Debug, Clone, PartialEq)]
pub struct CoursePatch {
    fields: Fields,
}

impl CoursePatch {
    pub fn from_json(body: Value) -> AppResult<Self> {
        let fields = into_object(body)?;

        if fields.is_empty() {
            return Err(AppError::validation("Update body must contain at least one field"));
        }
        if let Some(name) = RESERVED_FIELDS.iter().find(|name| fields.contains_key(**name)) {
            return Err(AppError::validation(format!("Field '{}' cannot be updated", name)));
        }
        for name in ["title", "description"] {
            if fields.contains_key(name) && !is_non_empty_string(&fields, name) {
                return Err(AppError::validation(format!("{} must be a non-empty string", name)));
            }
        }
        validate_optional_fields(&fields)?;

        Ok(Self { fields })
    }

    pub fn into_fields(self) -> Fields {
        self.fields
    }
}

fn validate_optional_fields(fields: &Fields) -> AppResult<()> {
    match fields.get("price") {
        None | Some(Value::Null) => {}
        Some(Value::Number(n)) if n.as_f64().is_some_and(|p| p >= 0.0) => {}
        Some(_) => return Err(AppError::validation("price must be a non-negative number")),
    }
    match fields.get("duration") {
        None | Some(Value::Null) | Some(Value::String(_)) => {}
        Some(_) => return Err(AppError::validation("duration must be a string")),
    }
    Ok(())
}
