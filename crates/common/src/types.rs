//! 通用类型定义

use chrono::{DateTime, SubsecRound, Utc};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 文档 ID
///
/// 由存储分配，对访问层不透明。新生成的 ID 为 24 位小写十六进制：
/// 4 字节秒级时间戳 + 8 字节随机数
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From)]
#[display("{_0}")]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn generate() -> Self {
        let secs = Utc::now().timestamp().max(0) as u32;
        let random = Uuid::new_v4();
        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..].copy_from_slice(&random.as_bytes()[..8]);
        Self(hex::encode(bytes))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// 当前时间，截断到微秒
///
/// PostgreSQL `TIMESTAMPTZ` 只保存微秒，写入前先截断，读回的值才能与写入值相等
pub fn now_micros() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
