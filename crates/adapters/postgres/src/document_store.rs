//! PostgreSQL 实现的 DocumentStore

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use campus_common::DocumentId;
use campus_errors::{AppError, AppResult};
use campus_ports::{
    CollectionStats, Document, DocumentStore, DocumentUpdate, Fields, NewDocument, UpdateResult,
};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::error;

const FIND_BY_ID: &str = r"
SELECT id, body, created_at, updated_at
FROM documents
WHERE collection = $1 AND id = $2
";

const INSERT: &str = r"
INSERT INTO documents (collection, id, body, created_at, updated_at)
VALUES ($1, $2, $3, $4, $5)
";

// 行锁保证并发更新按顺序基于最新内容计算
const SELECT_FOR_UPDATE: &str = r"
SELECT body
FROM documents
WHERE collection = $1 AND id = $2
FOR UPDATE
";

const WRITE_BODY: &str = r"
UPDATE documents
SET body = $3, updated_at = $4
WHERE collection = $1 AND id = $2
";

const DELETE: &str = r"
DELETE FROM documents
WHERE collection = $1 AND id = $2
";

const STATS: &str = r"
SELECT COUNT(*)::BIGINT AS document_count,
       COALESCE(SUM(pg_column_size(body)), 0)::BIGINT AS total_size,
       COALESCE(AVG(pg_column_size(body)), 0)::FLOAT8 AS avg_document_size
FROM documents
WHERE collection = $1
";

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: String,
    body: Json<Fields>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: DocumentId::new(row.id),
            fields: row.body.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL 文档存储
#[derive(Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
    operation_timeout: Duration,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            operation_timeout: Duration::from_secs(5),
        }
    }

    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    /// 为单条语句加超时，并统一映射为存储错误
    async fn timed<T, F>(&self, operation: &'static str, collection: &str, fut: F) -> AppResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>> + Send,
    {
        match tokio::time::timeout(self.operation_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                error!(operation, collection, error = %e, "Document store operation failed");
                Err(AppError::database(format!("{} on {} failed: {}", operation, collection, e)))
            }
            Err(_) => {
                error!(
                    operation,
                    collection,
                    timeout_ms = self.operation_timeout.as_millis() as u64,
                    "Document store operation timed out"
                );
                Err(AppError::database(format!(
                    "{} on {} timed out after {:?}",
                    operation, collection, self.operation_timeout
                )))
            }
        }
    }
}

impl PostgresDocumentStore {
    /// 锁定文档、在内存中应用更新，仅在内容变化时写回
    async fn update_locked(
        &self,
        collection: &str,
        id: &DocumentId,
        update: &DocumentUpdate,
    ) -> Result<UpdateResult, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let row: Option<(Json<Fields>,)> = sqlx::query_as(SELECT_FOR_UPDATE)
            .bind(collection)
            .bind(id.as_str())
            .fetch_optional(&mut *tx)
            .await?;
        let Some((Json(mut fields),)) = row else {
            return Ok(UpdateResult::default());
        };

        let modified = update.op.apply(&mut fields);
        if modified {
            sqlx::query(WRITE_BODY)
                .bind(collection)
                .bind(id.as_str())
                .bind(Json(&fields))
                .bind(update.updated_at)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        Ok(UpdateResult {
            matched: 1,
            modified: u64::from(modified),
        })
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn find_by_id(&self, collection: &str, id: &DocumentId) -> AppResult<Option<Document>> {
        let row = self
            .timed(
                "find_by_id",
                collection,
                sqlx::query_as::<_, DocumentRow>(FIND_BY_ID)
                    .bind(collection)
                    .bind(id.as_str())
                    .fetch_optional(&self.pool),
            )
            .await?;

        Ok(row.map(Document::from))
    }

    async fn insert_one(&self, collection: &str, document: &NewDocument) -> AppResult<DocumentId> {
        let id = DocumentId::generate();

        self.timed(
            "insert_one",
            collection,
            sqlx::query(INSERT)
                .bind(collection)
                .bind(id.as_str())
                .bind(Json(&document.fields))
                .bind(document.created_at)
                .bind(document.updated_at)
                .execute(&self.pool),
        )
        .await?;

        Ok(id)
    }

    async fn update_one(
        &self,
        collection: &str,
        id: &DocumentId,
        update: &DocumentUpdate,
    ) -> AppResult<UpdateResult> {
        self.timed("update_one", collection, self.update_locked(collection, id, update))
            .await
    }

    async fn delete_one(&self, collection: &str, id: &DocumentId) -> AppResult<u64> {
        let result = self
            .timed(
                "delete_one",
                collection,
                sqlx::query(DELETE)
                    .bind(collection)
                    .bind(id.as_str())
                    .execute(&self.pool),
            )
            .await?;

        Ok(result.rows_affected())
    }

    async fn aggregate_stats(&self, collection: &str) -> AppResult<CollectionStats> {
        let (document_count, total_size, avg_document_size) = self
            .timed(
                "aggregate_stats",
                collection,
                sqlx::query_as::<_, (i64, i64, f64)>(STATS)
                    .bind(collection)
                    .fetch_one(&self.pool),
            )
            .await?;

        Ok(CollectionStats {
            document_count: document_count.max(0) as u64,
            total_size: total_size.max(0) as u64,
            avg_document_size,
        })
    }

    async fn ping(&self) -> AppResult<()> {
        self.timed(
            "ping",
            "-",
            sqlx::query("SELECT 1").execute(&self.pool),
        )
        .await?;
        Ok(())
    }
}
