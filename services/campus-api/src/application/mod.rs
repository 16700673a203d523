//! 应用层

mod cache_aside;
mod course_service;
mod student_service;

pub use cache_aside::*;
pub use course_service::*;
pub use student_service::*;
