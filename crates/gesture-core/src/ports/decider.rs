//! Decider port - ClassificationResult から Verdict を生成
//!
//! Decider は純粋関数として設計されます（副作用なし）。
//! 実際の dispatch は DecisionLoop に任せる。

use crate::domain::{ClassificationResult, Verdict};

/// Decider は分類結果から次のアクションを決める
///
/// # 設計原則
/// - 純粋関数（observation → verdict）
/// - 状態を持たない（閾値・マッピングは起動時に固定）
pub trait Decider: Send + Sync {
    fn decide(&self, result: &ClassificationResult) -> Verdict;
}
