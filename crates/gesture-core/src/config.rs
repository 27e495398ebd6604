//! LoopConfig - DecisionLoop の設定（JSON）
//!
//! すべての項目にデフォルトがあり、空の `{}` は参照実装と同じ設定になる:
//! 100ms 間隔、閾値 0.10、開いた手 → 前進、握り拳 → 後退。

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::domain::decision::{FIST_LABEL, OPEN_HAND_LABEL};
use crate::domain::{Action, Confidence, DecisionRule, DomainError, REFERENCE_THRESHOLD};

pub const DEFAULT_INTERVAL_MS: u64 = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Domain(#[from] DomainError),

    #[error("interval_ms must be greater than zero")]
    ZeroInterval,
}

/// ラベル1つ分のトリガー
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerConfig {
    pub label: String,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoopConfig {
    pub interval_ms: u64,
    pub confidence_threshold: f32,
    pub triggers: Vec<TriggerConfig>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            confidence_threshold: REFERENCE_THRESHOLD,
            triggers: vec![
                TriggerConfig {
                    label: OPEN_HAND_LABEL.to_string(),
                    action: Action::MoveForward,
                },
                TriggerConfig {
                    label: FIST_LABEL.to_string(),
                    action: Action::MoveBackward,
                },
            ],
        }
    }
}

impl LoopConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// パースと同時に検証する（rule() / interval() が失敗しないことを保証）
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.interval()?;
        config.rule()?;
        Ok(config)
    }

    pub fn interval(&self) -> Result<Duration, ConfigError> {
        if self.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(Duration::from_millis(self.interval_ms))
    }

    pub fn rule(&self) -> Result<DecisionRule, ConfigError> {
        let threshold = Confidence::try_new(self.confidence_threshold)?;
        let mut rule = DecisionRule::new(threshold);
        for trigger in &self.triggers {
            rule = rule.with_trigger(trigger.label.clone(), trigger.action)?;
        }
        Ok(rule)
    }
}
