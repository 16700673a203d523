//! Redis 连接管理

use campus_errors::{AppError, AppResult};
use redis::Client;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};

use crate::config::RedisConfig;

/// 创建 Redis 连接管理器
///
/// ConnectionManager 可克隆、可并发使用，断线后自动重连
pub async fn create_connection_manager(config: &RedisConfig) -> AppResult<ConnectionManager> {
    let client = Client::open(config.url.as_str())
        .map_err(|e| AppError::cache(format!("Failed to create Redis client: {}", e)))?;

    let manager_config = ConnectionManagerConfig::new()
        .set_connection_timeout(config.connection_timeout)
        .set_response_timeout(config.response_timeout);

    ConnectionManager::new_with_config(client, manager_config)
        .await
        .map_err(|e| AppError::cache(format!("Failed to create Redis connection manager: {}", e)))
}

/// 检查 Redis 连接
pub async fn check_connection(conn: &mut ConnectionManager) -> AppResult<()> {
    redis::cmd("PING")
        .query_async::<String>(conn)
        .await
        .map_err(|e| AppError::cache(format!("Redis health check failed: {}", e)))?;
    Ok(())
}
