//! ports - 抽象 trait 层
//!
//! 定义缓存与文档存储的抽象接口，访问层只依赖这里

mod cache;
mod document_store;

pub use cache::*;
pub use document_store::*;
