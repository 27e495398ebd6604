//! ScriptedClassifier - 台本どおりに結果を返す Classifier
//!
//! # 学習ポイント
//! - async fn の中で std::sync::Mutex を使うときは await を跨がない
//! - serde の untagged enum で「結果 or 失敗」の台本を読む

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{ClassificationResult, ClassifierError, Frame};
use crate::ports::Classifier;

/// 台本の1行
///
/// JSON では次のどちらか:
/// - `{"predictions": [{"label": "FIVE-UB-RHand", "confidence": 0.42}]}`
/// - `{"error": "model not loaded"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptEntry {
    Failure { error: String },
    Predictions { predictions: ClassificationResult },
}

impl From<ScriptEntry> for Result<ClassificationResult, ClassifierError> {
    fn from(entry: ScriptEntry) -> Self {
        match entry {
            ScriptEntry::Failure { error } => Err(ClassifierError::Inference(error)),
            ScriptEntry::Predictions { predictions } => Ok(predictions),
        }
    }
}

/// 台本1行を Classifier の戻り値にしたもの
pub type ScriptedResult = Result<ClassificationResult, ClassifierError>;

/// ScriptedClassifier は台本を先頭から順に返す
///
/// - 台本が尽きたら空の結果を返す（`cycle()` なら先頭に戻る）
/// - `with_latency()` で推論時間を模擬できる
pub struct ScriptedClassifier {
    pending: Mutex<VecDeque<ScriptedResult>>,
    script: Vec<ScriptedResult>,
    cycle: bool,
    latency: Duration,
    calls: AtomicUsize,
}

impl ScriptedClassifier {
    pub fn new(script: Vec<ScriptedResult>) -> Self {
        Self {
            pending: Mutex::new(script.iter().cloned().collect()),
            script,
            cycle: false,
            latency: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn from_entries(entries: Vec<ScriptEntry>) -> Self {
        Self::new(entries.into_iter().map(Into::into).collect())
    }

    /// JSON 配列の台本から作る
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<ScriptEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries))
    }

    pub fn cycle(mut self) -> Self {
        self.cycle = true;
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// classify が呼ばれた回数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_scripted(&self) -> ScriptedResult {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if pending.is_empty() && self.cycle {
            pending.extend(self.script.iter().cloned());
        }
        pending
            .pop_front()
            .unwrap_or_else(|| Ok(ClassificationResult::empty()))
    }
}

#[async_trait]
impl Classifier for ScriptedClassifier {
    async fn classify(&self, _frame: Frame) -> Result<ClassificationResult, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.next_scripted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Prediction;
    use chrono::Utc;

    fn frame() -> Frame {
        Frame::new(0, Utc::now(), vec![0u8; 4])
    }

    #[tokio::test]
    async fn replays_script_then_returns_empty() {
        let classifier = ScriptedClassifier::new(vec![
            Ok(vec![Prediction::try_new("FIVE-UB-RHand", 0.42).unwrap()].into()),
            Err(ClassifierError::Inference("boom".to_string())),
        ]);

        let first = classifier.classify(frame()).await.unwrap();
        assert_eq!(first.top().unwrap().label, "FIVE-UB-RHand");
        assert!(classifier.classify(frame()).await.is_err());
        assert!(classifier.classify(frame()).await.unwrap().is_empty());
        assert_eq!(classifier.calls(), 3);
    }

    #[tokio::test]
    async fn cycle_restarts_from_the_top() {
        let classifier = ScriptedClassifier::new(vec![Ok(vec![
            Prediction::try_new("fist-UB-RHand", 0.5).unwrap(),
        ]
        .into())])
        .cycle();

        for _ in 0..3 {
            let result = classifier.classify(frame()).await.unwrap();
            assert_eq!(result.top().unwrap().label, "fist-UB-RHand");
        }
    }

    #[tokio::test]
    async fn loads_json_script() {
        let classifier = ScriptedClassifier::from_json_str(
            r#"[
                {"predictions": [{"label": "FIVE-UB-RHand", "confidence": 0.42},
                                 {"label": "other", "confidence": 0.10}]},
                {"error": "model not loaded"},
                {"predictions": []}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            classifier.classify(frame()).await.unwrap().len(),
            2
        );
        assert_eq!(
            classifier.classify(frame()).await.unwrap_err(),
            ClassifierError::Inference("model not loaded".to_string())
        );
        assert!(classifier.classify(frame()).await.unwrap().is_empty());
    }

    #[test]
    fn json_script_rejects_out_of_range_confidence() {
        let loaded = ScriptedClassifier::from_json_str(
            r#"[{"predictions": [{"label": "x", "confidence": 2.0}]}]"#,
        );
        assert!(loaded.is_err());
    }
}
