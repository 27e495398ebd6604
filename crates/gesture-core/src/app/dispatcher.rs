//! ActionDispatcher - ActionSink を所有する UI コンテキスト
//!
//! ActionSink は描画状態を書き換えるので、触ってよいのはこのタスクだけ。
//! worker は DispatchedAction をチャネルに送るだけで、sink には触らない。

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::domain::{Action, Confidence, RequestId};
use crate::ports::ActionSink;

/// UI コンテキストへ送られる1件のアクション
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchedAction {
    pub request_id: RequestId,
    pub action: Action,
    pub label: String,
    pub confidence: Confidence,
}

/// DispatchedAction の送信側（clone して配れる）
#[derive(Debug, Clone)]
pub struct ActionSender {
    tx: mpsc::UnboundedSender<DispatchedAction>,
}

impl ActionSender {
    /// 送信する。dispatcher が止まっていたらログに出して false
    pub fn send(&self, dispatched: DispatchedAction) -> bool {
        match self.tx.send(dispatched) {
            Ok(()) => true,
            Err(mpsc::error::SendError(dropped)) => {
                warn!(
                    request_id = %dropped.request_id,
                    action = %dropped.action,
                    "action dispatcher stopped; action discarded"
                );
                false
            }
        }
    }
}

/// ActionDispatcher は sink を所有し、受け取った順に適用する
///
/// # 使用例
/// ```ignore
/// let dispatcher = ActionDispatcher::new(DroneNode::default());
/// let sender = dispatcher.sender();
/// let ui = dispatcher.spawn();
/// // ... sender を DecisionLoopBuilder に渡す ...
/// drop(loop_and_senders);
/// let drone = ui.await?;
/// ```
///
/// すべての ActionSender が drop されるとタスクは終了し、sink を返す。
pub struct ActionDispatcher<S> {
    sink: S,
    tx: mpsc::UnboundedSender<DispatchedAction>,
    rx: mpsc::UnboundedReceiver<DispatchedAction>,
}

impl<S: ActionSink + 'static> ActionDispatcher<S> {
    pub fn new(sink: S) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { sink, tx, rx }
    }

    pub fn sender(&self) -> ActionSender {
        ActionSender {
            tx: self.tx.clone(),
        }
    }

    /// UI タスクを起動する
    ///
    /// spawn 前に取った sender だけが有効（自分の tx はここで手放す）。
    pub fn spawn(self) -> JoinHandle<S> {
        let Self { mut sink, tx, mut rx } = self;
        drop(tx);

        tokio::spawn(async move {
            while let Some(dispatched) = rx.recv().await {
                info!(
                    request_id = %dispatched.request_id,
                    action = %dispatched.action,
                    label = %dispatched.label,
                    confidence = %dispatched.confidence,
                    "applying action"
                );
                sink.apply(dispatched.action);
            }
            sink
        })
    }
}
