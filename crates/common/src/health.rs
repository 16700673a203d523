//! 通用健康检查模块

use serde::{Deserialize, Serialize};

/// 基础健康检查结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseHealthResult {
    /// 是否健康
    pub healthy: bool,
    /// 延迟（毫秒）
    pub latency_ms: Option<u64>,
    /// 错误信息
    pub error: Option<String>,
}

impl BaseHealthResult {
    /// 创建健康结果
    pub fn healthy(latency_ms: u64) -> Self {
        Self {
            healthy: true,
            latency_ms: Some(latency_ms),
            error: None,
        }
    }

    /// 创建不健康结果
    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            healthy: false,
            latency_ms: None,
            error: Some(error.into()),
        }
    }

    /// 创建超时结果
    pub fn timeout() -> Self {
        Self {
            healthy: false,
            latency_ms: None,
            error: Some("Health check timed out".to_string()),
        }
    }
}

/// 组件健康状态
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// 组件名称
    pub name: String,
    /// 是否健康
    pub healthy: bool,
    /// 是否为关键组件（不健康时整体不可用）
    pub critical: bool,
    /// 延迟（毫秒）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    /// 错误信息
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 聚合多个健康检查结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedHealthResult {
    /// 整体是否健康（只看关键组件）
    pub healthy: bool,
    /// 各组件状态
    pub components: Vec<ComponentHealth>,
}

impl AggregatedHealthResult {
    pub fn new() -> Self {
        Self {
            healthy: true,
            components: Vec::new(),
        }
    }

    /// 添加组件状态
    pub fn add_component(&mut self, name: impl Into<String>, critical: bool, result: BaseHealthResult) {
        if critical && !result.healthy {
            self.healthy = false;
        }

        self.components.push(ComponentHealth {
            name: name.into(),
            healthy: result.healthy,
            critical,
            latency_ms: result.latency_ms,
            error: result.error,
        });
    }

    /// 是否所有组件都健康
    pub fn is_fully_healthy(&self) -> bool {
        self.components.iter().all(|c| c.healthy)
    }
}

impl Default for AggregatedHealthResult {
    fn default() -> Self {
        Self::new()
    }
}
