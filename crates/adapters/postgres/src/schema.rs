//! 表结构初始化

use campus_errors::{AppError, AppResult};
use sqlx::PgPool;
use tracing::info;

const CREATE_DOCUMENTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS documents (
    collection  TEXT        NOT NULL,
    id          TEXT        NOT NULL,
    body        JSONB       NOT NULL DEFAULT '{}'::jsonb,
    created_at  TIMESTAMPTZ NOT NULL,
    updated_at  TIMESTAMPTZ NOT NULL,
    PRIMARY KEY (collection, id)
)
";

/// 幂等地创建 `documents` 表
pub async fn ensure_schema(pool: &PgPool) -> AppResult<()> {
    sqlx::query(CREATE_DOCUMENTS_TABLE)
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create documents table: {}", e)))?;

    info!("Document schema ready");
    Ok(())
}
