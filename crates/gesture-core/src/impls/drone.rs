//! DroneNode - ドローンモデルの位置を追う ActionSink
//!
//! 3D シーンそのものは扱わない。ノードの位置と、適用したアニメーション
//! （1秒かけて z 方向に 0.2 動く）を記録するだけ。

use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::domain::Action;
use crate::ports::ActionSink;

/// カメラ前方 1.5 の位置に置く
pub const START_POSITION: Position = Position {
    x: 0.0,
    y: 0.0,
    z: -1.5,
};
pub const MODEL_SCALE: f32 = 0.5;
pub const STEP: f32 = 0.2;
pub const ANIMATION_DURATION: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// 適用したアニメーション1件
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Animation {
    pub action: Action,
    pub from: Position,
    pub to: Position,
    pub duration_ms: u64,
}

/// DroneNode はノードの位置を保持する
///
/// 前進はカメラから遠ざかる方向（z を減らす）、後退はその逆。
#[derive(Debug, Clone, Serialize)]
pub struct DroneNode {
    position: Position,
    scale: f32,
    animations: Vec<Animation>,
}

impl DroneNode {
    pub fn new() -> Self {
        Self {
            position: START_POSITION,
            scale: MODEL_SCALE,
            animations: Vec::new(),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    fn animate(&mut self, action: Action, dz: f32) {
        let from = self.position;
        let to = Position {
            z: from.z + dz,
            ..from
        };
        self.position = to;
        debug!(%action, from_z = from.z, to_z = to.z, "drone moved");
        self.animations.push(Animation {
            action,
            from,
            to,
            duration_ms: ANIMATION_DURATION.as_millis() as u64,
        });
    }
}

impl Default for DroneNode {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionSink for DroneNode {
    fn move_forward(&mut self) {
        self.animate(Action::MoveForward, -STEP);
    }

    fn move_backward(&mut self) {
        self.animate(Action::MoveBackward, STEP);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn starts_in_front_of_camera() {
        let drone = DroneNode::new();
        assert_eq!(drone.position(), START_POSITION);
        assert_eq!(drone.scale(), MODEL_SCALE);
        assert!(drone.animations().is_empty());
    }

    #[test]
    fn forward_moves_away_and_backward_returns() {
        let mut drone = DroneNode::new();

        drone.move_forward();
        assert!(close(drone.position().z, -1.7));

        drone.apply(Action::MoveBackward);
        drone.apply(Action::MoveBackward);
        assert!(close(drone.position().z, -1.3));
        assert_eq!(drone.position().x, 0.0);
        assert_eq!(drone.position().y, 0.0);

        let animations = drone.animations();
        assert_eq!(animations.len(), 3);
        assert_eq!(animations[0].action, Action::MoveForward);
        assert_eq!(animations[0].from, START_POSITION);
        assert_eq!(animations[0].duration_ms, 1000);
        assert_eq!(animations[1].to, animations[2].from);
    }
}
