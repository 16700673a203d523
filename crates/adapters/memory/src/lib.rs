//! campus-adapter-memory - 进程内适配器
//!
//! - MemoryCache: 基于 moka 的本地缓存，支持按条目 TTL
//! - NoopCache: 关闭缓存时使用，永远未命中
//! - MemoryDocumentStore: 进程内文档存储，用于测试与本地开发

mod cache;
mod document_store;

pub use cache::*;
pub use document_store::*;
