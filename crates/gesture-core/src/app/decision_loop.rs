//! DecisionLoop - tick → classify → decide → dispatch
//!
//! # フロー
//! 1. timer タスクが一定間隔で `on_tick()` を呼ぶ
//! 2. 分類が in-flight なら tick を捨てる（キューに積まない）
//! 3. FrameSource から現在フレームを取り、worker タスクで Classifier を呼ぶ
//! 4. 完了したら `on_classification_result()` で Decider を適用
//! 5. Trigger なら ActionSender 経由で UI コンテキストへ1回だけ送る
//! 6. in-flight を下ろす
//!
//! in-flight は RequestId で持つ。発行中の ID と一致しない完了は stale として
//! 数えるだけで、評価も dispatch もせず、in-flight も下ろさない。
//! なので in-flight は常に高々1件で、完了の順序を気にする必要はない。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::dispatcher::{ActionSender, DispatchedAction};
use super::status::{LoopStats, StatusCounters};
use crate::domain::{ClassificationResult, ClassifierError, RequestId, Verdict};
use crate::ports::{Classifier, Decider, FrameSource, IdGenerator};

/// 1回の tick が何になったか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// 分類が in-flight だったので捨てた
    Dropped,

    /// カメラがまだフレームを出していない
    NoFrame,

    /// 分類リクエストを worker に投げた
    Requested(RequestId),
}

/// 1回の完了が何になったか
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// 推論失敗（ログに出して終わり）
    Failed(ClassifierError),

    Decided(Verdict),

    /// 発行中のリクエストではない完了（無視した）
    Stale,
}

#[derive(Debug, Error)]
pub enum LoopError {
    #[error("decision loop already started")]
    AlreadyStarted,

    #[error("tick interval must be greater than zero, got {0:?}")]
    InvalidInterval(Duration),
}

/// DecisionLoop は分類結果を高々1つのアクションに変換する
///
/// 構築は [`DecisionLoopBuilder`](super::DecisionLoopBuilder) で行う。
pub struct DecisionLoop {
    inner: Arc<LoopInner>,
    started: AtomicBool,
}

struct LoopInner {
    classifier: Arc<dyn Classifier>,
    frames: Arc<dyn FrameSource>,
    decider: Arc<dyn Decider>,
    ids: Arc<dyn IdGenerator>,
    actions: ActionSender,
    /// 発行中のリクエスト（ロックは await を跨がない）
    in_flight: Mutex<Option<RequestId>>,
    counters: StatusCounters,
}

impl DecisionLoop {
    pub(crate) fn new(
        classifier: Arc<dyn Classifier>,
        frames: Arc<dyn FrameSource>,
        decider: Arc<dyn Decider>,
        ids: Arc<dyn IdGenerator>,
        actions: ActionSender,
    ) -> Self {
        Self {
            inner: Arc::new(LoopInner {
                classifier,
                frames,
                decider,
                ids,
                actions,
                in_flight: Mutex::new(None),
                counters: StatusCounters::default(),
            }),
            started: AtomicBool::new(false),
        }
    }

    /// 一定間隔の tick を開始する
    ///
    /// 2回目の呼び出しは `LoopError::AlreadyStarted`。
    /// 返された LoopHandle を drop しても timer は止まる。
    pub fn start(&self, interval: Duration) -> Result<LoopHandle, LoopError> {
        if interval.is_zero() {
            return Err(LoopError::InvalidInterval(interval));
        }
        if self.started.swap(true, Ordering::AcqRel) {
            return Err(LoopError::AlreadyStarted);
        }

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let inner = Arc::clone(&self.inner);
        let join = tokio::spawn(async move {
            timer_loop(inner, interval, &mut shutdown_rx).await;
        });

        info!(interval_ms = interval.as_millis() as u64, "decision loop started");
        Ok(LoopHandle { shutdown_tx, join })
    }

    /// tick 1回分の処理（ブロックしない）
    ///
    /// tokio ランタイムの中から呼ぶこと（worker タスクを spawn する）。
    pub fn on_tick(&self) -> TickOutcome {
        self.inner.on_tick()
    }

    /// 分類の完了処理
    ///
    /// `request_id` が発行中のリクエストと一致するときだけ評価する。
    /// それ以外は `Evaluation::Stale`。
    pub fn on_classification_result(
        &self,
        request_id: RequestId,
        result: Result<ClassificationResult, ClassifierError>,
    ) -> Evaluation {
        self.inner.on_classification_result(request_id, result)
    }

    pub fn is_in_flight(&self) -> bool {
        self.outstanding().is_some()
    }

    /// 発行中のリクエスト ID
    pub fn outstanding(&self) -> Option<RequestId> {
        *self.inner.slot()
    }

    pub fn stats(&self) -> LoopStats {
        self.inner.counters.snapshot()
    }
}

impl LoopInner {
    fn slot(&self) -> MutexGuard<'_, Option<RequestId>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn on_tick(self: &Arc<Self>) -> TickOutcome {
        let (request_id, frame) = {
            let mut slot = self.slot();
            if slot.is_some() {
                drop(slot);
                debug!("classification in flight; tick dropped");
                return self.record_tick(TickOutcome::Dropped);
            }

            let Some(frame) = self.frames.current_frame() else {
                drop(slot);
                debug!("no camera frame yet; tick skipped");
                return self.record_tick(TickOutcome::NoFrame);
            };

            let request_id = self.ids.generate_request_id();
            *slot = Some(request_id);
            (request_id, frame)
        };
        debug!(%request_id, frame = frame.sequence, "requesting classification");

        let outcome = self.record_tick(TickOutcome::Requested(request_id));

        let inner = Arc::clone(self);
        tokio::spawn(async move {
            let _guard = InFlightGuard {
                slot: &inner.in_flight,
                request_id,
            };
            let result = inner.classifier.classify(frame).await;
            inner.on_classification_result(request_id, result);
        });

        outcome
    }

    fn on_classification_result(
        &self,
        request_id: RequestId,
        result: Result<ClassificationResult, ClassifierError>,
    ) -> Evaluation {
        let outstanding = *self.slot();
        if outstanding != Some(request_id) {
            warn!(
                %request_id,
                outstanding = ?outstanding,
                "completion does not match the outstanding request; ignored"
            );
            let evaluation = Evaluation::Stale;
            self.counters.record_evaluation(&evaluation);
            return evaluation;
        }

        let evaluation = match result {
            Err(err) => {
                warn!(%request_id, error = %err, "classification failed");
                Evaluation::Failed(err)
            }
            Ok(result) => {
                let verdict = self.decider.decide(&result);
                debug!(%request_id, candidates = result.len(), ?verdict, "classification evaluated");

                if let Verdict::Trigger {
                    label,
                    confidence,
                    action,
                } = &verdict
                {
                    info!(%request_id, %label, %confidence, %action, "gesture recognized");
                    self.actions.send(DispatchedAction {
                        request_id,
                        action: *action,
                        label: label.clone(),
                        confidence: *confidence,
                    });
                }
                Evaluation::Decided(verdict)
            }
        };

        self.counters.record_evaluation(&evaluation);
        release(&self.in_flight, request_id);
        evaluation
    }

    fn record_tick(&self, outcome: TickOutcome) -> TickOutcome {
        self.counters.record_tick(&outcome);
        outcome
    }
}

/// slot が `request_id` のときだけ空にする
fn release(slot: &Mutex<Option<RequestId>>, request_id: RequestId) {
    let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
    if *slot == Some(request_id) {
        *slot = None;
    }
}

/// worker タスクがどう終わっても（classify や Decider の panic を含む）
/// 自分のリクエストを in-flight から外す
struct InFlightGuard<'a> {
    slot: &'a Mutex<Option<RequestId>>,
    request_id: RequestId,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        release(self.slot, self.request_id);
    }
}

/// timer タスクのハンドル
/// - `stop()` で timer を止めて終了を待つ
/// - in-flight の分類は止めない（完了すれば普通に評価される）
pub struct LoopHandle {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl LoopHandle {
    pub fn request_stop(&self) {
        // ignore send error: timer may already be gone
        let _ = self.shutdown_tx.send(true);
    }

    pub async fn stop(self) {
        self.request_stop();
        match self.join.await {
            Ok(()) => info!("decision loop stopped"),
            Err(err) => warn!(error = %err, "decision loop timer ended abnormally"),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

async fn timer_loop(
    inner: Arc<LoopInner>,
    period: Duration,
    shutdown_rx: &mut watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(period);
    // 遅れた tick はまとめて撃たずに捨てる
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        if *shutdown_rx.borrow() {
            break;
        }

        tokio::select! {
            changed = shutdown_rx.changed() => {
                // sender が drop されたら終わり
                if changed.is_err() {
                    break;
                }
            }
            _ = ticker.tick() => {
                inner.on_tick();
            }
        }
    }
}
