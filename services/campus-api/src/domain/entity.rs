//! 实体种类与缓存键

use campus_common::DocumentId;
use derive_more::Display;

/// 实体种类，同时作为缓存键的命名空间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum EntityKind {
    #[display("course")]
    Course,
    #[display("student")]
    Student,
}

impl EntityKind {
    pub const ALL: [EntityKind; 2] = [EntityKind::Course, EntityKind::Student];

    /// 缓存键前缀、指标标签
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::Student => "student",
        }
    }

    /// 面向用户的名称，用于错误信息
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Course => "Course",
            Self::Student => "Student",
        }
    }

    /// 存储中的集合名
    pub const fn collection(&self) -> &'static str {
        match self {
            Self::Course => "courses",
            Self::Student => "students",
        }
    }
}

/// 缓存键 `{kind}:{id}`
///
/// 读取、回填、失效都只通过这里构造键
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn for_entity(kind: EntityKind, id: &DocumentId) -> Self {
        Self(format!("{}{}", Self::kind_prefix(kind), id))
    }

    /// 某一实体种类所有键的公共前缀
    pub fn kind_prefix(kind: EntityKind) -> String {
        format!("{}:", kind.as_str())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
