//! Cache trait 定义

use async_trait::async_trait;
use campus_errors::AppResult;
use std::time::Duration;

/// 带过期时间的键值缓存
///
/// 所有操作都是幂等的：重复 set 直接覆盖，删除不存在的键不是错误
#[async_trait]
pub trait CachePort: Send + Sync {
    /// 获取缓存值，不存在或已过期返回 None
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// 设置缓存值并指定 TTL
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// 删除缓存
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// 删除所有以 prefix 开头的键，返回删除数量；没有匹配时是空操作
    async fn delete_by_prefix(&self, prefix: &str) -> AppResult<u64>;

    /// 连通性检查
    async fn ping(&self) -> AppResult<()>;

    /// 后端名称（日志、健康检查用）
    fn backend_name(&self) -> &'static str;
}
