//! Cache-aside 访问层
//!
//! 读：先查缓存，未命中再查存储并回填。
//! 写：先写存储，再删除受影响的缓存键，从不原地修改缓存。
//!
//! 存储错误直接返回给调用方；缓存错误只记录日志和指标，不会让请求失败。

use std::sync::Arc;
use std::time::Duration;

use campus_common::{DocumentId, now_micros};
use campus_errors::{AppError, AppResult};
use campus_ports::{CachePort, Document, DocumentStore, DocumentUpdate, Fields, NewDocument, UpdateOp};
use metrics::counter;
use tracing::{debug, warn};

use crate::domain::{CacheKey, EntityKind};

/// 默认缓存 TTL
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// 创建文档后的缓存策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// 删除该种类的全部缓存键，下一次读取必然回源
    InvalidateKind,
    /// 用刚写入的文档填充它自己的缓存键
    PopulateOnCreate,
}

/// 访问层配置
#[derive(Debug, Clone)]
pub struct CacheAsideConfig {
    pub ttl: Duration,
    pub course_policy: CachePolicy,
    pub student_policy: CachePolicy,
}

impl Default for CacheAsideConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            course_policy: CachePolicy::InvalidateKind,
            student_policy: CachePolicy::PopulateOnCreate,
        }
    }
}

impl CacheAsideConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn policy_for(&self, kind: EntityKind) -> CachePolicy {
        match kind {
            EntityKind::Course => self.course_policy,
            EntityKind::Student => self.student_policy,
        }
    }
}

/// 缓存查询结果
///
/// `Miss` 与 `AdapterError` 对调用方等价：都回落到存储
#[derive(Debug)]
pub enum CacheLookup {
    Hit(Document),
    Miss,
    AdapterError(AppError),
}

/// Cache-aside 访问层
#[derive(Clone)]
pub struct CacheAside {
    store: Arc<dyn DocumentStore>,
    cache: Arc<dyn CachePort>,
    config: CacheAsideConfig,
}

impl CacheAside {
    pub fn new(store: Arc<dyn DocumentStore>, cache: Arc<dyn CachePort>) -> Self {
        Self {
            store,
            cache,
            config: CacheAsideConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CacheAsideConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CacheAsideConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// 只查缓存
    pub async fn lookup(&self, kind: EntityKind, id: &DocumentId) -> CacheLookup {
        let key = CacheKey::for_entity(kind, id);

        let raw = match self.cache.get(key.as_str()).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                counter!("campus_cache_misses_total", "kind" => kind.as_str()).increment(1);
                debug!(key = %key, "Cache miss");
                return CacheLookup::Miss;
            }
            Err(e) => {
                self.record_error(kind, "get", &key, &e);
                return CacheLookup::AdapterError(e);
            }
        };

        match serde_json::from_str::<Document>(&raw) {
            Ok(document) => {
                counter!("campus_cache_hits_total", "kind" => kind.as_str()).increment(1);
                debug!(key = %key, "Cache hit");
                CacheLookup::Hit(document)
            }
            Err(e) => {
                let e = AppError::cache(format!("Corrupt cache entry: {}", e));
                self.record_error(kind, "decode", &key, &e);
                CacheLookup::AdapterError(e)
            }
        }
    }

    /// 读取文档，使用默认 TTL 回填
    pub async fn read(&self, kind: EntityKind, id: &DocumentId) -> AppResult<Document> {
        self.read_with_ttl(kind, id, self.config.ttl).await
    }

    /// 读取文档，未命中时以指定 TTL 回填
    pub async fn read_with_ttl(
        &self,
        kind: EntityKind,
        id: &DocumentId,
        ttl: Duration,
    ) -> AppResult<Document> {
        match self.lookup(kind, id).await {
            CacheLookup::Hit(document) => return Ok(document),
            CacheLookup::Miss | CacheLookup::AdapterError(_) => {}
        }

        let document = self
            .store
            .find_by_id(kind.collection(), id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{} not found", kind.label())))?;

        self.populate(kind, &document, ttl).await;
        Ok(document)
    }

    /// 创建文档，按该种类的策略处理缓存
    pub async fn create(&self, kind: EntityKind, fields: Fields) -> AppResult<Document> {
        let now = now_micros();
        let new_document = NewDocument {
            fields,
            created_at: now,
            updated_at: now,
        };

        let id = self.store.insert_one(kind.collection(), &new_document).await?;
        let document = new_document.into_document(id);

        match self.config.policy_for(kind) {
            CachePolicy::InvalidateKind => self.invalidate_kind(kind).await,
            CachePolicy::PopulateOnCreate => self.populate(kind, &document, self.config.ttl).await,
        }

        Ok(document)
    }

    /// 更新文档，返回实际修改的数量
    ///
    /// 缓存键无论是否修改都会被删除；没有匹配的文档时返回 NotFound
    pub async fn update(&self, kind: EntityKind, id: &DocumentId, op: UpdateOp) -> AppResult<u64> {
        let update = DocumentUpdate {
            op,
            updated_at: now_micros(),
        };

        let result = self.store.update_one(kind.collection(), id, &update).await?;
        self.invalidate(kind, id).await;

        if result.matched == 0 {
            return Err(AppError::not_found(format!("{} not found", kind.label())));
        }
        Ok(result.modified)
    }

    /// 删除文档，存储删除成功后才删除缓存键
    pub async fn delete(&self, kind: EntityKind, id: &DocumentId) -> AppResult<()> {
        let deleted = self.store.delete_one(kind.collection(), id).await?;
        if deleted == 0 {
            return Err(AppError::not_found(format!("{} not found", kind.label())));
        }

        self.invalidate(kind, id).await;
        Ok(())
    }

    async fn populate(&self, kind: EntityKind, document: &Document, ttl: Duration) {
        let key = CacheKey::for_entity(kind, &document.id);

        let raw = match serde_json::to_string(document) {
            Ok(raw) => raw,
            Err(e) => {
                self.record_error(kind, "encode", &key, &AppError::from(e));
                return;
            }
        };

        if let Err(e) = self.cache.set(key.as_str(), &raw, ttl).await {
            self.record_error(kind, "set", &key, &e);
        }
    }

    async fn invalidate(&self, kind: EntityKind, id: &DocumentId) {
        let key = CacheKey::for_entity(kind, id);
        if let Err(e) = self.cache.delete(key.as_str()).await {
            self.record_error(kind, "delete", &key, &e);
        }
    }

    async fn invalidate_kind(&self, kind: EntityKind) {
        let prefix = CacheKey::kind_prefix(kind);
        match self.cache.delete_by_prefix(&prefix).await {
            Ok(deleted) => debug!(prefix = %prefix, deleted, "Invalidated cache entries"),
            Err(e) => {
                counter!("campus_cache_errors_total", "kind" => kind.as_str()).increment(1);
                warn!(prefix = %prefix, error = %e, "Cache prefix delete failed, ignoring");
            }
        }
    }

    fn record_error(&self, kind: EntityKind, operation: &'static str, key: &CacheKey, error: &AppError) {
        counter!("campus_cache_errors_total", "kind" => kind.as_str()).increment(1);
        warn!(
            operation,
            key = %key,
            backend = self.cache.backend_name(),
            error = %error,
            "Cache operation failed, ignoring"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_adapter_memory::{MemoryCache, MemoryDocumentStore};
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    fn setup() -> (CacheAside, Arc<MemoryCache>) {
        let cache = Arc::new(MemoryCache::default());
        let access = CacheAside::new(Arc::new(MemoryDocumentStore::new()), cache.clone());
        (access, cache)
    }

    #[tokio::test]
    async fn test_read_populates_cache() {
        let (access, cache) = setup();
        let course = access
            .create(EntityKind::Course, fields(json!({"title": "Rust"})))
            .await
            .unwrap();
        let key = CacheKey::for_entity(EntityKind::Course, &course.id);
        assert!(cache.get(key.as_str()).await.unwrap().is_none());

        let read = access.read(EntityKind::Course, &course.id).await.unwrap();
        assert_eq!(read, course);
        assert!(matches!(
            access.lookup(EntityKind::Course, &course.id).await,
            CacheLookup::Hit(cached) if cached == course
        ));
    }

    #[tokio::test]
    async fn test_student_create_populates_own_key() {
        let (access, _) = setup();
        let student = access
            .create(EntityKind::Student, fields(json!({"name": "Ada"})))
            .await
            .unwrap();

        assert!(matches!(
            access.lookup(EntityKind::Student, &student.id).await,
            CacheLookup::Hit(cached) if cached == student
        ));
    }

    #[tokio::test]
    async fn test_course_create_invalidates_kind() {
        let (access, cache) = setup();
        cache.set("course:stale", "{}", DEFAULT_TTL).await.unwrap();
        cache.set("student:keep", "{}", DEFAULT_TTL).await.unwrap();

        access
            .create(EntityKind::Course, fields(json!({"title": "Rust"})))
            .await
            .unwrap();

        assert!(cache.get("course:stale").await.unwrap().is_none());
        assert!(cache.get("student:keep").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_corrupt_entry_falls_back_to_store() {
        let (access, cache) = setup();
        let course = access
            .create(EntityKind::Course, fields(json!({"title": "Rust"})))
            .await
            .unwrap();
        let key = CacheKey::for_entity(EntityKind::Course, &course.id);
        cache.set(key.as_str(), "not json", DEFAULT_TTL).await.unwrap();

        assert!(matches!(
            access.lookup(EntityKind::Course, &course.id).await,
            CacheLookup::AdapterError(AppError::Cache(_))
        ));
        let read = access.read(EntityKind::Course, &course.id).await.unwrap();
        assert_eq!(read, course);
    }

    #[tokio::test]
    async fn test_missing_document() {
        let (access, _) = setup();
        let id = DocumentId::generate();

        let err = access.read(EntityKind::Course, &id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = access
            .update(EntityKind::Course, &id, UpdateOp::Set(fields(json!({"a": 1}))))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = access.delete(EntityKind::Course, &id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_invalidates_key() {
        let (access, cache) = setup();
        let course = access
            .create(EntityKind::Course, fields(json!({"title": "Rust"})))
            .await
            .unwrap();
        access.read(EntityKind::Course, &course.id).await.unwrap();

        access.delete(EntityKind::Course, &course.id).await.unwrap();

        let key = CacheKey::for_entity(EntityKind::Course, &course.id);
        assert!(cache.get(key.as_str()).await.unwrap().is_none());
        assert!(access.read(EntityKind::Course, &course.id).await.is_err());
    }

    #[test]
    fn test_default_policies() {
        let config = CacheAsideConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(3600));
        assert_eq!(config.policy_for(EntityKind::Course), CachePolicy::InvalidateKind);
        assert_eq!(config.policy_for(EntityKind::Student), CachePolicy::PopulateOnCreate);
    }
}
