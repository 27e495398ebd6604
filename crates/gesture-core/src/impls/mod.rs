//! Impls - ports の実装（開発用・テスト用）
//!
//! ホストプラットフォーム（カメラ、推論ランタイム、3D シーン）が無い環境で
//! ループを端から端まで動かすための代役。
//!
//! # 含まれる実装
//! - **ScriptedClassifier**: 結果・失敗の台本を再生する Classifier
//! - **SyntheticFrameSource**: 空のフレームを出す FrameSource
//! - **DroneNode**: ドローンの位置とアニメーションを追う ActionSink
//! - **RecordingSink**: 受け取った Action を記録するだけの ActionSink

pub mod drone;
pub mod frames;
pub mod recording;
pub mod scripted;

// 主要な型を再エクスポート
pub use self::drone::{Animation, DroneNode, Position};
pub use self::frames::SyntheticFrameSource;
pub use self::recording::RecordingSink;
pub use self::scripted::{ScriptEntry, ScriptedClassifier, ScriptedResult};
