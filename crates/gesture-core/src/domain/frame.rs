//! Frame - Classifier に渡すカメラフレーム
//!
//! コアにとってフレームは不透明な値で、中身を解釈するのは Classifier だけ。

use chrono::{DateTime, Utc};
use std::sync::Arc;

/// 現在のカメラフレーム
///
/// `data` は Arc で共有するので、worker タスクへの受け渡しはコピーにならない。
#[derive(Debug, Clone)]
pub struct Frame {
    pub sequence: u64,
    pub captured_at: DateTime<Utc>,
    pub data: Arc<[u8]>,
}

impl Frame {
    pub fn new(sequence: u64, captured_at: DateTime<Utc>, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            sequence,
            captured_at,
            data: data.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
