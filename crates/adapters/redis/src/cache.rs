//! Redis Cache 实现

use async_trait::async_trait;
use campus_errors::{AppError, AppResult};
use campus_ports::CachePort;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::time::Duration;
use tracing::debug;

use crate::config::RedisConfig;
use crate::connection::check_connection;

/// Redis Cache
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
    scan_batch_size: usize,
}

impl RedisCache {
    pub fn new(conn: ConnectionManager) -> Self {
        Self {
            conn,
            scan_batch_size: RedisConfig::default().scan_batch_size,
        }
    }

    pub fn with_scan_batch_size(mut self, size: usize) -> Self {
        self.scan_batch_size = size.max(1);
        self
    }
}

/// 转义 glob 元字符，使前缀按字面匹配
pub fn escape_glob(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len() + 4);
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Redis 的 EX 只接受整秒，且必须为正
fn ttl_secs(ttl: Duration) -> u64 {
    let secs = ttl.as_secs();
    if ttl.subsec_nanos() > 0 { secs + 1 } else { secs.max(1) }
}

#[async_trait]
impl CachePort for RedisCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get(key)
            .await
            .map_err(|e| AppError::cache(format!("Redis get failed: {}", e)))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let mut conn = self.conn.clone();
        conn.set_ex(key, value, ttl_secs(ttl))
            .await
            .map_err(|e| AppError::cache(format!("Redis set failed: {}", e)))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.conn.clone();
        conn.del(key)
            .await
            .map_err(|e| AppError::cache(format!("Redis delete failed: {}", e)))
    }

    async fn delete_by_prefix(&self, prefix: &str) -> AppResult<u64> {
        let mut conn = self.conn.clone();
        let pattern = format!("{}*", escape_glob(prefix));
        let mut cursor: u64 = 0;
        let mut deleted: u64 = 0;

        // SCAN 增量遍历，避免 KEYS 阻塞服务器
        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(self.scan_batch_size)
                .query_async(&mut conn)
                .await
                .map_err(|e| AppError::cache(format!("Redis scan failed: {}", e)))?;

            if !keys.is_empty() {
                let removed: u64 = conn
                    .del(&keys[..])
                    .await
                    .map_err(|e| AppError::cache(format!("Redis delete failed: {}", e)))?;
                deleted += removed;
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        debug!(prefix, deleted, "Deleted cache keys by prefix");
        Ok(deleted)
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.conn.clone();
        check_connection(&mut conn).await
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
