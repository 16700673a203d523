//! 路由共享状态

use std::sync::Arc;

use campus_ports::{CachePort, DocumentStore};
use metrics_exporter_prometheus::PrometheusHandle;

use crate::application::{CacheAside, CacheAsideConfig, CourseService, StudentService};

#[derive(Clone)]
pub struct AppState {
    pub courses: CourseService,
    pub students: StudentService,
    pub store: Arc<dyn DocumentStore>,
    pub cache: Arc<dyn CachePort>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        cache: Arc<dyn CachePort>,
        config: CacheAsideConfig,
    ) -> Self {
        let access = CacheAside::new(store.clone(), cache.clone()).with_config(config);

        Self {
            courses: CourseService::new(access.clone()),
            students: StudentService::new(access),
            store,
            cache,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }
}
