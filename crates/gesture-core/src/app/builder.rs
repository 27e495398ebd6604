//! DecisionLoopBuilder - DecisionLoop の構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - コラボレータはコンストラクタで注入する（グローバルな singleton にしない）

use std::sync::Arc;

use super::decision_loop::DecisionLoop;
use super::dispatcher::ActionSender;
use crate::domain::DecisionRule;
use crate::ports::{Classifier, Decider, FrameSource, IdGenerator, SystemClock, UlidGenerator};

/// DecisionLoopBuilder は DecisionLoop を構築
///
/// # 使用例
/// ```ignore
/// let decision_loop = DecisionLoopBuilder::new()
///     .classifier(Arc::new(my_classifier))
///     .frames(Arc::new(my_camera))
///     .actions(dispatcher.sender())
///     .build()?;
/// ```
///
/// # Fail-fast 設計
/// - Classifier / FrameSource / ActionSender は必須
/// - 不足があれば abort せずに BuildError を返す（どうするかはホストが決める）
/// - Decider は省略すると参照ルール、IdGenerator は ULID + SystemClock
pub struct DecisionLoopBuilder {
    classifier: Option<Arc<dyn Classifier>>,
    frames: Option<Arc<dyn FrameSource>>,
    decider: Option<Arc<dyn Decider>>,
    ids: Option<Arc<dyn IdGenerator>>,
    actions: Option<ActionSender>,
}

/// BuildError は DecisionLoop 構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("no classifier configured; call .classifier() before build()")]
    MissingClassifier,

    #[error("no frame source configured; call .frames() before build()")]
    MissingFrameSource,

    #[error("no action sender configured; call .actions() before build()")]
    MissingActionSender,
}

impl DecisionLoopBuilder {
    pub fn new() -> Self {
        Self {
            classifier: None,
            frames: None,
            decider: None,
            ids: None,
            actions: None,
        }
    }

    pub fn classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn frames(mut self, frames: Arc<dyn FrameSource>) -> Self {
        self.frames = Some(frames);
        self
    }

    /// 静的ルールを使う（起動後は変更できない）
    pub fn rule(self, rule: DecisionRule) -> Self {
        self.decider(Arc::new(rule))
    }

    pub fn decider(mut self, decider: Arc<dyn Decider>) -> Self {
        self.decider = Some(decider);
        self
    }

    pub fn ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn actions(mut self, actions: ActionSender) -> Self {
        self.actions = Some(actions);
        self
    }

    pub fn build(self) -> Result<DecisionLoop, BuildError> {
        let classifier = self.classifier.ok_or(BuildError::MissingClassifier)?;
        let frames = self.frames.ok_or(BuildError::MissingFrameSource)?;
        let actions = self.actions.ok_or(BuildError::MissingActionSender)?;
        let decider: Arc<dyn Decider> = match self.decider {
            Some(decider) => decider,
            None => Arc::new(DecisionRule::reference()),
        };
        let ids: Arc<dyn IdGenerator> = match self.ids {
            Some(ids) => ids,
            None => Arc::new(UlidGenerator::new(SystemClock)),
        };

        Ok(DecisionLoop::new(classifier, frames, decider, ids, actions))
    }
}

impl Default for DecisionLoopBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ActionDispatcher;
    use crate::impls::{RecordingSink, ScriptedClassifier, SyntheticFrameSource};

    #[test]
    fn test_build_success() {
        let dispatcher = ActionDispatcher::new(RecordingSink::new());
        let built = DecisionLoopBuilder::new()
            .classifier(Arc::new(ScriptedClassifier::new(vec![])))
            .frames(Arc::new(SyntheticFrameSource::default()))
            .actions(dispatcher.sender())
            .build();
        assert!(built.is_ok());
    }

    #[test]
    fn test_build_missing_classifier() {
        let dispatcher = ActionDispatcher::new(RecordingSink::new());
        let built = DecisionLoopBuilder::new()
            .frames(Arc::new(SyntheticFrameSource::default()))
            .actions(dispatcher.sender())
            .build();
        assert!(matches!(built, Err(BuildError::MissingClassifier)));
    }

    #[test]
    fn test_build_missing_frame_source() {
        let dispatcher = ActionDispatcher::new(RecordingSink::new());
        let built = DecisionLoopBuilder::new()
            .classifier(Arc::new(ScriptedClassifier::new(vec![])))
            .actions(dispatcher.sender())
            .build();
        assert!(matches!(built, Err(BuildError::MissingFrameSource)));
    }

    #[test]
    fn test_build_missing_action_sender() {
        let built = DecisionLoopBuilder::new()
            .classifier(Arc::new(ScriptedClassifier::new(vec![])))
            .frames(Arc::new(SyntheticFrameSource::default()))
            .build();
        assert!(matches!(built, Err(BuildError::MissingActionSender)));
    }
}
