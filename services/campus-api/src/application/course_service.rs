//! 课程服务

use campus_common::DocumentId;
use campus_errors::AppResult;
use campus_ports::{CollectionStats, Document, UpdateOp};
use serde_json::Value;
use tracing::info;

use super::CacheAside;
use crate::domain::{CoursePatch, EntityKind, NewCourse};

#[derive(Clone)]
pub struct CourseService {
    access: CacheAside,
}

impl CourseService {
    pub fn new(access: CacheAside) -> Self {
        Self { access }
    }

    pub async fn create(&self, body: Value) -> AppResult<Document> {
        let course = NewCourse::from_json(body)?;
        let document = self
            .access
            .create(EntityKind::Course, course.into_fields())
            .await?;

        info!(course_id = %document.id, "Course created");
        Ok(document)
    }

    pub async fn get(&self, id: &DocumentId) -> AppResult<Document> {
        self.access.read(EntityKind::Course, id).await
    }

    /// 统计不经过缓存
    pub async fn stats(&self) -> AppResult<CollectionStats> {
        self.access
            .store()
            .aggregate_stats(EntityKind::Course.collection())
            .await
    }

    pub async fn update(&self, id: &DocumentId, body: Value) -> AppResult<u64> {
        let patch = CoursePatch::from_json(body)?;
        let modified = self
            .access
            .update(EntityKind::Course, id, UpdateOp::Set(patch.into_fields()))
            .await?;

        info!(course_id = %id, modified, "Course updated");
        Ok(modified)
    }

    pub async fn delete(&self, id: &DocumentId) -> AppResult<()> {
        self.access.delete(EntityKind::Course, id).await?;
        info!(course_id = %id, "Course deleted");
        Ok(())
    }
}
