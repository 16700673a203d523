//! 文档存储 trait 定义

use async_trait::async_trait;
use campus_common::DocumentId;
use campus_errors::AppResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 文档内容（除 ID 与时间戳以外的字段）
pub type Fields = Map<String, Value>;

/// 存储中的文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(flatten)]
    pub fields: Fields,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Document {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// 待插入的文档，ID 由存储分配
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub fields: Fields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewDocument {
    pub fn into_document(self, id: DocumentId) -> Document {
        Document {
            id,
            fields: self.fields,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// 更新操作
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOp {
    /// 浅合并字段
    Set(Fields),
    /// 向数组字段追加值，已存在则不修改
    AddToSet { field: String, value: Value },
}

impl UpdateOp {
    /// 在内存中应用更新，返回文档是否被修改
    ///
    /// 所有存储实现共用，值相同的字段不算修改
    pub fn apply(&self, fields: &mut Fields) -> bool {
        match self {
            Self::Set(patch) => {
                let mut changed = false;
                for (key, value) in patch {
                    if fields.get(key) != Some(value) {
                        fields.insert(key.clone(), value.clone());
                        changed = true;
                    }
                }
                changed
            }
            Self::AddToSet { field, value } => {
                let entry = fields
                    .entry(field.clone())
                    .or_insert_with(|| Value::Array(Vec::new()));
                match entry {
                    Value::Array(items) if items.contains(value) => false,
                    Value::Array(items) => {
                        items.push(value.clone());
                        true
                    }
                    other => {
                        *other = Value::Array(vec![value.clone()]);
                        true
                    }
                }
            }
        }
    }
}

/// 带时间戳的更新，updated_at 仅在文档被修改时写入
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentUpdate {
    pub op: UpdateOp,
    pub updated_at: DateTime<Utc>,
}

/// 更新结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResult {
    pub matched: u64,
    pub modified: u64,
}

/// 集合统计，每次实时计算
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    pub document_count: u64,
    /// 文档内容总字节数
    pub total_size: u64,
    pub avg_document_size: f64,
}

/// 面向集合的持久化文档存储
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// 根据 ID 查找
    async fn find_by_id(&self, collection: &str, id: &DocumentId) -> AppResult<Option<Document>>;

    /// 插入文档，返回存储分配的 ID
    async fn insert_one(&self, collection: &str, document: &NewDocument) -> AppResult<DocumentId>;

    /// 更新单个文档
    async fn update_one(
        &self,
        collection: &str,
        id: &DocumentId,
        update: &DocumentUpdate,
    ) -> AppResult<UpdateResult>;

    /// 删除单个文档，返回删除数量
    async fn delete_one(&self, collection: &str, id: &DocumentId) -> AppResult<u64>;

    /// 集合统计
    async fn aggregate_stats(&self, collection: &str) -> AppResult<CollectionStats>;

    /// 连通性检查
    async fn ping(&self) -> AppResult<()>;
}
