//! RecordingSink - 受け取った Action を記録する ActionSink

use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::Action;
use crate::ports::ActionSink;

/// clone（`handle()`）は同じ記録を共有する
///
/// dispatcher に1つ渡し、手元の handle で結果を読む。
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    actions: Arc<Mutex<Vec<Action>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> Self {
        self.clone()
    }

    pub fn actions(&self) -> Vec<Action> {
        self.actions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self, action: Action) -> usize {
        self.actions().iter().filter(|a| **a == action).count()
    }

    fn push(&mut self, action: Action) {
        self.actions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(action);
    }
}

impl ActionSink for RecordingSink {
    fn move_forward(&mut self) {
        self.push(Action::MoveForward);
    }

    fn move_backward(&mut self) {
        self.push(Action::MoveBackward);
    }
}
