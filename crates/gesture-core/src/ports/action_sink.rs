//! ActionSink port - 3D オブジェクトへのアニメーション操作
//!
//! ActionSink は描画状態を書き換えるので、UI を所有するコンテキスト
//! （ActionDispatcher のタスク）だけが触る。worker からは直接呼ばない。

use crate::domain::Action;

/// ActionSink は2つのアニメーション操作を公開する
///
/// # 契約
/// - 同期的に呼ばれ、戻り値は観測しない
/// - `&mut self` なので所有者は常に1つ（共有しない）
pub trait ActionSink: Send {
    fn move_forward(&mut self);

    fn move_backward(&mut self);

    fn apply(&mut self, action: Action) {
        match action {
            Action::MoveForward => self.move_forward(),
            Action::MoveBackward => self.move_backward(),
        }
    }
}
