//! Redis 配置模块

use std::time::Duration;

/// Redis 配置
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis URL
    pub url: String,
    /// 建立连接超时
    pub connection_timeout: Duration,
    /// 单条命令响应超时
    pub response_timeout: Duration,
    /// SCAN 每批建议数量
    pub scan_batch_size: usize,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            connection_timeout: Duration::from_secs(2),
            response_timeout: Duration::from_millis(500),
            scan_batch_size: 500,
        }
    }
}

impl RedisConfig {
    /// 创建新的配置
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// 设置连接超时
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// 设置响应超时
    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = timeout;
        self
    }

    /// 设置 SCAN 批大小
    pub fn with_scan_batch_size(mut self, size: usize) -> Self {
        self.scan_batch_size = size.max(1);
        self
    }
}
