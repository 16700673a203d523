//! campus-adapter-redis - Redis 适配器

mod cache;
mod config;
mod connection;

pub use cache::*;
pub use config::*;
pub use connection::*;
