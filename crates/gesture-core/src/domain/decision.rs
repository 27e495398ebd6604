//! Decision model: classification → at most one Action.
//!
//! This module defines the Verdict type (what a result turned into) and
//! DecisionRule, the static label → Action mapping with a single global
//! confidence threshold.

use std::collections::HashMap;

use super::{Action, ClassificationResult, Confidence, DomainError};
use crate::ports::Decider;

/// 参照実装の閾値（これを「厳密に」超えたときだけ発火）
pub const REFERENCE_THRESHOLD: f32 = 0.10;

/// 参照実装のラベル
pub const OPEN_HAND_LABEL: &str = "FIVE-UB-RHand";
pub const FIST_LABEL: &str = "fist-UB-RHand";

/// 1件の分類結果を評価した結果
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// 候補なし（エラーではない）
    Empty,

    /// 最上位の確信度が閾値以下
    BelowThreshold { label: String, confidence: Confidence },

    /// 閾値は超えたが、どのトリガーにも一致しない（エラーではない）
    Unmatched { label: String, confidence: Confidence },

    /// Action を1回だけ発火する
    Trigger {
        label: String,
        confidence: Confidence,
        action: Action,
    },
}

impl Verdict {
    pub fn action(&self) -> Option<Action> {
        match self {
            Verdict::Trigger { action, .. } => Some(*action),
            _ => None,
        }
    }
}

/// DecisionRule は label → Action の静的マッピング + 閾値
///
/// # 不変条件
/// - 起動時に組み立てたら実行中は変更しない（学習・適応なし）
/// - ラベル比較は完全一致のみ（大文字小文字も区別）
#[derive(Debug, Clone)]
pub struct DecisionRule {
    threshold: Confidence,
    triggers: HashMap<String, Action>,
}

impl DecisionRule {
    pub fn new(threshold: Confidence) -> Self {
        Self {
            threshold,
            triggers: HashMap::new(),
        }
    }

    /// 参照実装のルール: 開いた手 → 前進、握り拳 → 後退
    pub fn reference() -> Self {
        let mut triggers = HashMap::new();
        triggers.insert(OPEN_HAND_LABEL.to_string(), Action::MoveForward);
        triggers.insert(FIST_LABEL.to_string(), Action::MoveBackward);
        Self {
            threshold: Confidence::new_unchecked(REFERENCE_THRESHOLD),
            triggers,
        }
    }

    /// トリガーを追加（同じラベルの二重登録はエラー）
    pub fn with_trigger(
        mut self,
        label: impl Into<String>,
        action: Action,
    ) -> Result<Self, DomainError> {
        let label = label.into();
        if self.triggers.contains_key(&label) {
            return Err(DomainError::DuplicateTrigger(label));
        }
        self.triggers.insert(label, action);
        Ok(self)
    }

    pub fn threshold(&self) -> Confidence {
        self.threshold
    }

    pub fn action_for(&self, label: &str) -> Option<Action> {
        self.triggers.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}

impl Default for DecisionRule {
    fn default() -> Self {
        Self::reference()
    }
}

impl Decider for DecisionRule {
    /// 最上位（index 0）だけを見る。
    ///
    /// 元々は上位3件を切り出していたが index 0 しか読んでいなかったので、
    /// 上位1件に単純化している（観測できる振る舞いは同じ）。
    fn decide(&self, result: &ClassificationResult) -> Verdict {
        let Some(top) = result.top() else {
            return Verdict::Empty;
        };

        if !top.confidence.exceeds(self.threshold) {
            return Verdict::BelowThreshold {
                label: top.label.clone(),
                confidence: top.confidence,
            };
        }

        match self.action_for(&top.label) {
            Some(action) => Verdict::Trigger {
                label: top.label.clone(),
                confidence: top.confidence,
                action,
            },
            None => Verdict::Unmatched {
                label: top.label.clone(),
                confidence: top.confidence,
            },
        }
    }
}
