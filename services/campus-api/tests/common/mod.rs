//! 测试替身

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use campus_adapter_memory::{MemoryCache, MemoryDocumentStore};
use campus_api::{AppState, CacheAside, CacheAsideConfig};
use campus_common::DocumentId;
use campus_errors::{AppError, AppResult};
use campus_ports::{
    CachePort, CollectionStats, Document, DocumentStore, DocumentUpdate, NewDocument, UpdateResult,
};

/// 记录 find_by_id 调用次数的存储
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryDocumentStore,
    finds: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_calls(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for CountingStore {
    async fn find_by_id(&self, collection: &str, id: &DocumentId) -> AppResult<Option<Document>> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(collection, id).await
    }

    async fn insert_one(&self, collection: &str, document: &NewDocument) -> AppResult<DocumentId> {
        self.inner.insert_one(collection, document).await
    }

    async fn update_one(
        &self,
        collection: &str,
        id: &DocumentId,
        update: &DocumentUpdate,
    ) -> AppResult<UpdateResult> {
        self.inner.update_one(collection, id, update).await
    }

    async fn delete_one(&self, collection: &str, id: &DocumentId) -> AppResult<u64> {
        self.inner.delete_one(collection, id).await
    }

    async fn aggregate_stats(&self, collection: &str) -> AppResult<CollectionStats> {
        self.inner.aggregate_stats(collection).await
    }

    async fn ping(&self) -> AppResult<()> {
        self.inner.ping().await
    }
}

/// 每个操作都失败的缓存
#[derive(Default)]
pub struct FailingCache {
    calls: AtomicUsize,
}

impl FailingCache {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> AppResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AppError::cache("connection refused"))
    }
}

#[async_trait]
impl CachePort for FailingCache {
    async fn get(&self, _key: &str) -> AppResult<Option<String>> {
        self.fail()
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> AppResult<()> {
        self.fail()
    }

    async fn delete(&self, _key: &str) -> AppResult<()> {
        self.fail()
    }

    async fn delete_by_prefix(&self, _prefix: &str) -> AppResult<u64> {
        self.fail()
    }

    async fn ping(&self) -> AppResult<()> {
        self.fail()
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

/// 存储读写都失败
pub struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    async fn find_by_id(&self, _collection: &str, _id: &DocumentId) -> AppResult<Option<Document>> {
        Err(AppError::database("connection reset by peer"))
    }

    async fn insert_one(&self, _collection: &str, _document: &NewDocument) -> AppResult<DocumentId> {
        Err(AppError::database("connection reset by peer"))
    }

    async fn update_one(
        &self,
        _collection: &str,
        _id: &DocumentId,
        _update: &DocumentUpdate,
    ) -> AppResult<UpdateResult> {
        Err(AppError::database("connection reset by peer"))
    }

    async fn delete_one(&self, _collection: &str, _id: &DocumentId) -> AppResult<u64> {
        Err(AppError::database("connection reset by peer"))
    }

    async fn aggregate_stats(&self, _collection: &str) -> AppResult<CollectionStats> {
        Err(AppError::database("connection reset by peer"))
    }

    async fn ping(&self) -> AppResult<()> {
        Err(AppError::database("connection reset by peer"))
    }
}

/// 只有删除失败的存储，其余操作交给 CountingStore
#[derive(Default)]
pub struct DeleteFailingStore {
    inner: CountingStore,
}

impl DeleteFailingStore {
    pub fn find_calls(&self) -> usize {
        self.inner.find_calls()
    }
}

#[async_trait]
impl DocumentStore for DeleteFailingStore {
    async fn find_by_id(&self, collection: &str, id: &DocumentId) -> AppResult<Option<Document>> {
        self.inner.find_by_id(collection, id).await
    }

    async fn insert_one(&self, collection: &str, document: &NewDocument) -> AppResult<DocumentId> {
        self.inner.insert_one(collection, document).await
    }

    async fn update_one(
        &self,
        collection: &str,
        id: &DocumentId,
        update: &DocumentUpdate,
    ) -> AppResult<UpdateResult> {
        self.inner.update_one(collection, id, update).await
    }

    async fn delete_one(&self, _collection: &str, _id: &DocumentId) -> AppResult<u64> {
        Err(AppError::database("statement timeout"))
    }

    async fn aggregate_stats(&self, collection: &str) -> AppResult<CollectionStats> {
        self.inner.aggregate_stats(collection).await
    }

    async fn ping(&self) -> AppResult<()> {
        self.inner.ping().await
    }
}

pub struct Harness {
    pub store: Arc<CountingStore>,
    pub cache: Arc<MemoryCache>,
    pub access: CacheAside,
}

pub fn harness() -> Harness {
    let store = Arc::new(CountingStore::new());
    let cache = Arc::new(MemoryCache::default());
    let access = CacheAside::new(store.clone(), cache.clone());
    Harness {
        store,
        cache,
        access,
    }
}

pub fn app_state(store: Arc<dyn DocumentStore>, cache: Arc<dyn CachePort>) -> AppState {
    AppState::new(store, cache, CacheAsideConfig::default())
}
