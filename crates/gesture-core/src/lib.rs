//! gesture-core
//!
//! Core building blocks for the gesture decision loop: a periodic poller that
//! asks an on-device classifier about the current camera frame and turns the
//! top prediction into at most one animation on a 3D model.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（Confidence, Prediction, ClassificationResult, DecisionRule, Action, ...）
//! - **ports**: 抽象化レイヤー（Classifier, FrameSource, ActionSink, Decider, Clock, IdGenerator）
//! - **app**: アプリケーションロジック（DecisionLoopBuilder, DecisionLoop, ActionDispatcher, LoopStats）
//! - **impls**: 代役の実装（ScriptedClassifier, SyntheticFrameSource, DroneNode, RecordingSink）
//! - **config**: JSON の設定（LoopConfig）

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::{
    ActionDispatcher, ActionSender, BuildError, DecisionLoop, DecisionLoopBuilder, Evaluation,
    LoopError, LoopHandle, LoopStats, TickOutcome,
};
pub use config::{ConfigError, LoopConfig};
pub use domain::{
    Action, ClassificationResult, ClassifierError, Confidence, DecisionRule, Prediction, Verdict,
};
