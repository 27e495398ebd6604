//! Classifier port - オンデバイス分類器の抽象化
//!
//! 推論ランタイムそのものは外部コラボレータ。コアとの契約は
//! 「フレームを渡すと、確信度の降順に並んだ (label, confidence) を返す」だけ。

use async_trait::async_trait;

use crate::domain::{ClassificationResult, ClassifierError, Frame};

/// Classifier は1フレームを分類する
///
/// # 契約
/// - 結果は確信度の降順（ClassificationResult が保証する）
/// - 失敗してもよい（DecisionLoop はログに出して次の tick を待つ）
/// - 完了までの時間は制限しない（DecisionLoop は await でブロックしない）
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, frame: Frame) -> Result<ClassificationResult, ClassifierError>;
}
