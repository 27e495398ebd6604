//! FrameSource port - 現在のカメラフレームの取得

use crate::domain::Frame;

/// FrameSource は「今この瞬間」のフレームを返す
///
/// カメラがまだフレームを出していなければ None。
/// その tick は何もせずに終わる。
pub trait FrameSource: Send + Sync {
    fn current_frame(&self) -> Option<Frame>;
}
