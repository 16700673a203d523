//! campus-adapter-postgres - PostgreSQL 文档存储适配器
//!
//! 所有集合共用一张 `documents` 表，文档内容存为 JSONB

mod connection;
mod document_store;
mod schema;

pub use connection::*;
pub use document_store::*;
pub use schema::*;
