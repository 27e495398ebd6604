//! Classification model: typed output of the Classifier Port.
//!
//! ラベルと確信度は最後まで `(label, confidence)` のペアとして運ぶ。
//! 文字列に整形してから split し直すようなことはしないので、
//! パース失敗というエラー種別はそもそも存在しない。

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::DomainError;

/// 確信度（[0, 1] の有限値）
///
/// 範囲外の値は `try_new` / デシリアライズの時点で弾く。
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Confidence(f32);

impl Confidence {
    pub fn try_new(value: f32) -> Result<Self, DomainError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidConfidence(value))
        }
    }

    /// 範囲チェック済みの定数用
    pub(crate) const fn new_unchecked(value: f32) -> Self {
        Self(value)
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// 閾値を厳密に超えているか（等しい場合は false）
    pub fn exceeds(self, threshold: Confidence) -> bool {
        self.0 > threshold.0
    }
}

impl TryFrom<f32> for Confidence {
    type Error = DomainError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Confidence> for f32 {
    fn from(c: Confidence) -> Self {
        c.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// 1件の予測
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub confidence: Confidence,
}

impl Prediction {
    pub fn new(label: impl Into<String>, confidence: Confidence) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }

    /// f32 から直接作る（範囲外なら DomainError）
    pub fn try_new(label: impl Into<String>, confidence: f32) -> Result<Self, DomainError> {
        Ok(Self::new(label, Confidence::try_new(confidence)?))
    }
}

/// 確信度の降順に並んだ予測列（空もあり得る）
///
/// # 不変条件
/// - `predictions` は常に確信度の降順（同値は元の順序を保つ）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Prediction>", into = "Vec<Prediction>")]
pub struct ClassificationResult {
    predictions: Vec<Prediction>,
}

impl ClassificationResult {
    /// 予測列から作る（降順に並べ直す）
    pub fn new(mut predictions: Vec<Prediction>) -> Self {
        // sort_by は安定ソート
        predictions.sort_by(|a, b| b.confidence.0.total_cmp(&a.confidence.0));
        Self { predictions }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// 最上位の予測（index 0）
    pub fn top(&self) -> Option<&Prediction> {
        self.predictions.first()
    }

    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions
    }

    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }
}

impl From<Vec<Prediction>> for ClassificationResult {
    fn from(predictions: Vec<Prediction>) -> Self {
        Self::new(predictions)
    }
}

impl From<ClassificationResult> for Vec<Prediction> {
    fn from(result: ClassificationResult) -> Self {
        result.predictions
    }
}

impl FromIterator<Prediction> for ClassificationResult {
    fn from_iter<I: IntoIterator<Item = Prediction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
