//! 就绪检查

use std::time::{Duration, Instant};

use campus_common::{AggregatedHealthResult, BaseHealthResult};
use campus_errors::AppResult;
use campus_ports::{CachePort, DocumentStore};

const CHECK_TIMEOUT: Duration = Duration::from_secs(2);

async fn check_component<F>(fut: F) -> BaseHealthResult
where
    F: Future<Output = AppResult<()>>,
{
    let start = Instant::now();
    match tokio::time::timeout(CHECK_TIMEOUT, fut).await {
        Ok(Ok(())) => BaseHealthResult::healthy(start.elapsed().as_millis() as u64),
        Ok(Err(e)) => BaseHealthResult::unhealthy(e.to_string()),
        Err(_) => BaseHealthResult::timeout(),
    }
}

/// 检查存储与缓存
///
/// 缓存不是关键组件：缓存故障时请求仍可由存储兜底
pub async fn check_readiness(store: &dyn DocumentStore, cache: &dyn CachePort) -> AggregatedHealthResult {
    let (store_result, cache_result) = tokio::join!(
        check_component(store.ping()),
        check_component(cache.ping())
    );

    let mut result = AggregatedHealthResult::new();
    result.add_component("document_store", true, store_result);
    result.add_component(format!("cache:{}", cache.backend_name()), false, cache_result);
    result
}
