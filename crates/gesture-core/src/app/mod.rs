//! App - アプリケーション層
//!
//! このモジュールは、ports を組み合わせてアプリケーションロジックを実装します。
//!
//! # 主要コンポーネント
//! - **DecisionLoopBuilder**: DecisionLoop の構築とワイヤリング（起動時検証）
//! - **DecisionLoop**: tick → classify → decide → dispatch
//! - **ActionDispatcher**: ActionSink を所有する UI コンテキスト
//! - **LoopStats**: tick ごとの結果の集計

pub mod builder;
pub mod decision_loop;
pub mod dispatcher;
pub mod status;

// 主要な型を再エクスポート
pub use self::builder::{BuildError, DecisionLoopBuilder};
pub use self::decision_loop::{DecisionLoop, Evaluation, LoopError, LoopHandle, TickOutcome};
pub use self::dispatcher::{ActionDispatcher, ActionSender, DispatchedAction};
pub use self::status::LoopStats;
