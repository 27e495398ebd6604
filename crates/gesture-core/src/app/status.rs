//! Status - DecisionLoop の集計
//!
//! tick と完了のそれぞれが何になったかを数えるだけ。履歴は持たない。

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use super::decision_loop::{Evaluation, TickOutcome};
use crate::domain::Verdict;

/// LoopStats はカウンタのスナップショット
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopStats {
    pub ticks: u64,
    pub dropped: u64,
    pub no_frame: u64,
    pub requested: u64,
    pub failed: u64,
    pub empty: u64,
    pub below_threshold: u64,
    pub unmatched: u64,
    pub triggered: u64,
    /// 発行中のリクエストと一致しなかった完了（評価していない）
    pub stale: u64,
}

impl LoopStats {
    /// 完了（成功・失敗を問わず）した分類リクエストの数。stale は含まない
    pub fn completed(&self) -> u64 {
        self.failed + self.empty + self.below_threshold + self.unmatched + self.triggered
    }
}

/// timer タスクと worker タスクの両方から更新されるので atomic
#[derive(Debug, Default)]
pub(crate) struct StatusCounters {
    ticks: AtomicU64,
    dropped: AtomicU64,
    no_frame: AtomicU64,
    requested: AtomicU64,
    failed: AtomicU64,
    empty: AtomicU64,
    below_threshold: AtomicU64,
    unmatched: AtomicU64,
    triggered: AtomicU64,
    stale: AtomicU64,
}

impl StatusCounters {
    pub(crate) fn record_tick(&self, outcome: &TickOutcome) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
        let counter = match outcome {
            TickOutcome::Dropped => &self.dropped,
            TickOutcome::NoFrame => &self.no_frame,
            TickOutcome::Requested(_) => &self.requested,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_evaluation(&self, evaluation: &Evaluation) {
        let counter = match evaluation {
            Evaluation::Failed(_) => &self.failed,
            Evaluation::Decided(Verdict::Empty) => &self.empty,
            Evaluation::Decided(Verdict::BelowThreshold { .. }) => &self.below_threshold,
            Evaluation::Decided(Verdict::Unmatched { .. }) => &self.unmatched,
            Evaluation::Decided(Verdict::Trigger { .. }) => &self.triggered,
            Evaluation::Stale => &self.stale,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> LoopStats {
        LoopStats {
            ticks: self.ticks.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            no_frame: self.no_frame.load(Ordering::Relaxed),
            requested: self.requested.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            empty: self.empty.load(Ordering::Relaxed),
            below_threshold: self.below_threshold.load(Ordering::Relaxed),
            unmatched: self.unmatched.load(Ordering::Relaxed),
            triggered: self.triggered.load(Ordering::Relaxed),
            stale: self.stale.load(Ordering::Relaxed),
        }
    }
}
