//! Errors - ドメイン層のエラー型
//!
//! # 分類
//! - ClassifierError: 推論呼び出しの失敗（ログに出してその tick をスキップ）
//! - DomainError: 値の検証エラー（起動時・読み込み時に返す）

use thiserror::Error;

/// ClassifierError は Classifier Port が返す失敗
///
/// Decision Loop はこのエラーを記録するだけで、リトライもエスカレーションもしない。
/// 次の tick が自然に再試行になる。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifierError {
    #[error("inference failed: {0}")]
    Inference(String),

    #[error("classifier unavailable: {0}")]
    Unavailable(String),
}

/// DomainError はドメイン値の検証エラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("confidence must be a finite value in [0, 1], got {0}")]
    InvalidConfidence(f32),

    #[error("duplicate trigger for label={0}")]
    DuplicateTrigger(String),
}
