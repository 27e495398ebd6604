//! Domain model (predictions, rules, actions, frames, ...).
//!
//! ここにあるのは純粋なデータと判定ロジックだけで、
//! タイマー・チャネル・外部コラボレータには依存しません。

pub mod action;
pub mod classification;
pub mod decision;
pub mod errors;
pub mod frame;
pub mod ids;

pub use self::action::Action;
pub use self::classification::{ClassificationResult, Confidence, Prediction};
pub use self::decision::{DecisionRule, Verdict, REFERENCE_THRESHOLD};
pub use self::errors::{ClassifierError, DomainError};
pub use self::frame::Frame;
pub use self::ids::RequestId;
