//! campus-api - 课程与学生服务
//!
//! 文档存储 + cache-aside 缓存层，对外提供 HTTP 接口

pub mod api;
pub mod application;
pub mod domain;

pub use api::{AppState, router};
pub use application::{CacheAside, CacheAsideConfig, CacheLookup, CachePolicy};
