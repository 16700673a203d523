//! 基础设施资源管理
//!
//! 存储和缓存在进程启动时初始化一次，以 `Arc` 形式传给访问层

use std::sync::Arc;
use std::time::Duration;

use campus_adapter_memory::{MemoryCache, NoopCache};
use campus_adapter_postgres::{
    PostgresConfig, PostgresDocumentStore, create_pool, ensure_schema,
};
use campus_adapter_redis::{RedisCache, RedisConfig as RedisAdapterConfig, create_connection_manager};
use campus_common::{RetryConfig, with_retry};
use campus_config::{AppConfig, CacheBackend};
use campus_errors::{AppError, AppResult};
use campus_ports::{CachePort, DocumentStore};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;

/// 基础设施资源容器
pub struct Infrastructure {
    config: AppConfig,
    pool: PgPool,
    store: Arc<dyn DocumentStore>,
    cache: Arc<dyn CachePort>,
}

impl Infrastructure {
    /// 从配置创建基础设施资源（带重试）
    ///
    /// 存储必需；缓存后端按 `cache.backend` 选择，Redis 连接重试耗尽时启动失败
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let retry_config = RetryConfig::fixed(
            config.bootstrap.max_attempts,
            Duration::from_millis(config.bootstrap.delay_ms),
        );

        // 1. PostgreSQL 连接池
        let pg_config = PostgresConfig::new(config.database.url.expose_secret())
            .with_max_connections(config.database.max_connections)
            .with_connect_timeout(config.database.connect_timeout())
            .with_operation_timeout(config.database.operation_timeout());
        let pool = with_retry(&retry_config, "PostgreSQL connection", || {
            let cfg = pg_config.clone();
            async move { create_pool(&cfg).await }
        })
        .await?;
        info!(
            "PostgreSQL connection pool created (max_connections: {})",
            config.database.max_connections
        );

        ensure_schema(&pool).await?;

        let store: Arc<dyn DocumentStore> = Arc::new(
            PostgresDocumentStore::new(pool.clone())
                .with_operation_timeout(pg_config.operation_timeout),
        );

        // 2. 缓存后端
        let cache = Self::build_cache(&config, &retry_config).await?;
        info!(backend = cache.backend_name(), "Cache backend ready");

        Ok(Self {
            config,
            pool,
            store,
            cache,
        })
    }

    async fn build_cache(
        config: &AppConfig,
        retry_config: &RetryConfig,
    ) -> AppResult<Arc<dyn CachePort>> {
        match config.cache.backend {
            CacheBackend::Redis => {
                let redis = config.redis.as_ref().ok_or_else(|| {
                    AppError::config("cache.backend = \"redis\" requires a [redis] section")
                })?;
                let redis_config = RedisAdapterConfig::new(redis.url.expose_secret().clone())
                    .with_connection_timeout(Duration::from_millis(redis.connection_timeout_ms))
                    .with_response_timeout(Duration::from_millis(redis.response_timeout_ms));

                let conn = with_retry(retry_config, "Redis connection", || {
                    let cfg = redis_config.clone();
                    async move { create_connection_manager(&cfg).await }
                })
                .await?;
                info!("Redis connection created");

                Ok(Arc::new(
                    RedisCache::new(conn).with_scan_batch_size(redis_config.scan_batch_size),
                ))
            }
            CacheBackend::Memory => Ok(Arc::new(MemoryCache::new(
                config.cache.memory_max_capacity,
            ))),
            CacheBackend::None => {
                info!("Cache disabled, all reads go to the document store");
                Ok(Arc::new(NoopCache))
            }
        }
    }

    /// 获取应用配置
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 获取文档存储
    pub fn store(&self) -> Arc<dyn DocumentStore> {
        self.store.clone()
    }

    /// 获取缓存
    pub fn cache(&self) -> Arc<dyn CachePort> {
        self.cache.clone()
    }

    /// 释放连接池
    pub async fn close(&self) {
        self.pool.close().await;
        info!("PostgreSQL connection pool closed");
    }
}
