//! Domain identifiers.
//!
//! RequestId は分類リクエスト1件ごとに振られる ID で、
//! tick → 推論 → 判定 → dispatch のログを突き合わせるために使う。
//! ULID なので生成順にソートでき、調整なしで生成できる。

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// 分類リクエストの ID（Display は `req-` プレフィックス付き）
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(Ulid);

impl RequestId {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    pub fn as_ulid(&self) -> Ulid {
        self.0
    }

    /// ULID の timestamp 部分（ミリ秒）
    pub fn timestamp_ms(&self) -> u64 {
        self.0.timestamp_ms()
    }
}

impl From<Ulid> for RequestId {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}
