//! campus-bootstrap - 服务启动骨架
//!
//! 进程级资源（存储、缓存）的初始化与释放，以及运行时初始化

mod health;
mod infrastructure;
mod runtime;

pub use health::*;
pub use infrastructure::*;
pub use runtime::*;
