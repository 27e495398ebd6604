//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! 各 trait はホストプラットフォーム（カメラ、推論ランタイム、3D シーン）への
//! インターフェースを提供し、実装の詳細を隠蔽します。
//!
//! # 設計原則
//! - Classifier / FrameSource は worker コンテキストから呼ばれる（Send + Sync）
//! - ActionSink は UI コンテキストだけが所有する（&mut self）
//! - Clock / IdGenerator はテストで差し替えられるようにする

pub mod action_sink;
pub mod classifier;
pub mod clock;
pub mod decider;
pub mod frame_source;
pub mod id_generator;

// 主要な trait を再エクスポート
pub use self::action_sink::ActionSink;
pub use self::classifier::Classifier;
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::decider::Decider;
pub use self::frame_source::FrameSource;
pub use self::id_generator::{IdGenerator, UlidGenerator};
