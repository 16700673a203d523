//! 学生请求体

use campus_errors::{AppError, AppResult};
use campus_ports::Fields;
use serde_json::Value;

use super::{into_object, is_non_empty_string, strip_reserved};

/// 已选课程列表字段
pub const ENROLLED_COURSES: &str = "enrolledCourses";

/// 校验通过的新学生，已选课程初始化为空
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    fields: Fields,
}

impl NewStudent {
    pub fn from_json(body: Value) -> AppResult<Self> {
        let mut fields = into_object(body)?;

        if !is_non_empty_string(&fields, "name") || !is_non_empty_string(&fields, "email") {
            return Err(AppError::validation("Name and email are required"));
        }
        strip_reserved(&mut fields);
        fields.insert(ENROLLED_COURSES.to_string(), Value::Array(Vec::new()));

        Ok(Self { fields })
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn into_fields(self) -> Fields {
        self.fields
    }
}
