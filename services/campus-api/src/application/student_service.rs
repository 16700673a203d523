//! 学生服务

use campus_common::DocumentId;
use campus_errors::{AppError, AppResult};
use campus_ports::{Document, UpdateOp};
use serde_json::Value;
use tracing::info;

use super::CacheAside;
use crate::domain::{ENROLLED_COURSES, EntityKind, NewStudent};

#[derive(Clone)]
pub struct StudentService {
    access: CacheAside,
}

impl StudentService {
    pub fn new(access: CacheAside) -> Self {
        Self { access }
    }

    pub async fn create(&self, body: Value) -> AppResult<Document> {
        let student = NewStudent::from_json(body)?;
        let document = self
            .access
            .create(EntityKind::Student, student.into_fields())
            .await?;

        info!(student_id = %document.id, "Student created");
        Ok(document)
    }

    pub async fn get(&self, id: &DocumentId) -> AppResult<Document> {
        self.access.read(EntityKind::Student, id).await
    }

    /// 选课，集合语义：重复选课不会产生重复条目
    ///
    /// 学生不存在或已选过该课程时返回 NotFound
    pub async fn enroll(&self, student_id: &DocumentId, course_id: &DocumentId) -> AppResult<()> {
        self.access.read(EntityKind::Course, course_id).await?;

        let op = UpdateOp::AddToSet {
            field: ENROLLED_COURSES.to_string(),
            value: Value::String(course_id.to_string()),
        };

        match self.access.update(EntityKind::Student, student_id, op).await {
            Ok(0) | Err(AppError::NotFound(_)) => Err(AppError::not_found(
                "Student not found or already enrolled",
            )),
            Ok(_) => {
                info!(student_id = %student_id, course_id = %course_id, "Student enrolled");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
