//! 进程内文档存储

use std::collections::HashMap;

use async_trait::async_trait;
use campus_common::DocumentId;
use campus_errors::AppResult;
use campus_ports::{
    CollectionStats, Document, DocumentStore, DocumentUpdate, NewDocument, UpdateResult,
};
use parking_lot::RwLock;

/// 进程内文档存储
///
/// 更新语义与 PostgreSQL 适配器一致，数据不持久化
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, HashMap<DocumentId, Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 集合中的文档数量
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, HashMap::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find_by_id(&self, collection: &str, id: &DocumentId) -> AppResult<Option<Document>> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn insert_one(&self, collection: &str, document: &NewDocument) -> AppResult<DocumentId> {
        let id = DocumentId::generate();
        let stored = document.clone().into_document(id.clone());
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), stored);
        Ok(id)
    }

    async fn update_one(
        &self,
        collection: &str,
        id: &DocumentId,
        update: &DocumentUpdate,
    ) -> AppResult<UpdateResult> {
        let mut collections = self.collections.write();
        let Some(document) = collections.get_mut(collection).and_then(|docs| docs.get_mut(id))
        else {
            return Ok(UpdateResult::default());
        };

        let modified = update.op.apply(&mut document.fields);
        if modified {
            document.updated_at = update.updated_at;
        }

        Ok(UpdateResult {
            matched: 1,
            modified: u64::from(modified),
        })
    }

    async fn delete_one(&self, collection: &str, id: &DocumentId) -> AppResult<u64> {
        let removed = self
            .collections
            .write()
            .get_mut(collection)
            .and_then(|docs| docs.remove(id));
        Ok(u64::from(removed.is_some()))
    }

    async fn aggregate_stats(&self, collection: &str) -> AppResult<CollectionStats> {
        let collections = self.collections.read();
        let Some(docs) = collections.get(collection) else {
            return Ok(CollectionStats::default());
        };

        let mut total_size = 0u64;
        for document in docs.values() {
            total_size += serde_json::to_vec(&document.fields)?.len() as u64;
        }

        let document_count = docs.len() as u64;
        let avg_document_size = if document_count == 0 {
            0.0
        } else {
            total_size as f64 / document_count as f64
        };

        Ok(CollectionStats {
            document_count,
            total_size,
            avg_document_size,
        })
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
