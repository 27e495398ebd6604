//! Action - Action Sink に対する離散操作

use serde::{Deserialize, Serialize};
use std::fmt;

/// 3D モデルに対するアニメーション操作
///
/// snake_case でシリアライズする（設定ファイルで `"move_forward"` と書ける）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    MoveForward,
    MoveBackward,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::MoveForward => write!(f, "move_forward"),
            Action::MoveBackward => write!(f, "move_backward"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_serializes_as_snake_case() {
        let s = serde_json::to_string(&Action::MoveForward).unwrap();
        assert_eq!(s, "\"move_forward\"");

        let back: Action = serde_json::from_str("\"move_backward\"").unwrap();
        assert_eq!(back, Action::MoveBackward);
    }

    #[test]
    fn display_matches_serialized_name() {
        assert_eq!(Action::MoveBackward.to_string(), "move_backward");
    }
}
