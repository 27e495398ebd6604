use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use gesture_core::domain::{Frame, Prediction, RequestId};
use gesture_core::impls::{DroneNode, RecordingSink, ScriptedClassifier, SyntheticFrameSource};
use gesture_core::ports::Classifier;
use gesture_core::{
    Action, ActionDispatcher, ClassificationResult, ClassifierError, DecisionLoopBuilder,
    Evaluation, LoopConfig, TickOutcome,
};
use tokio::sync::Notify;
use tokio::time::{sleep, timeout};
use ulid::Ulid;

fn result(entries: &[(&str, f32)]) -> ClassificationResult {
    entries
        .iter()
        .map(|(label, c)| Prediction::try_new(*label, *c).unwrap())
        .collect()
}

async fn settle(decision_loop: &gesture_core::DecisionLoop) {
    timeout(Duration::from_secs(5), async {
        while decision_loop.is_in_flight() {
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("classification did not complete");
}

/// 1 tick ずつ手で回して、台本の各行が期待どおりのアクションになるか
#[tokio::test]
async fn scripted_scenarios_drive_the_drone() {
    let classifier = Arc::new(ScriptedClassifier::new(vec![
        Ok(result(&[("FIVE-UB-RHand", 0.42), ("other", 0.10)])),
        Ok(result(&[("fist-UB-RHand", 0.11)])),
        Ok(result(&[("fist-UB-RHand", 0.10)])),
        Ok(ClassificationResult::empty()),
        Err(ClassifierError::Unavailable("camera busy".to_string())),
        Ok(result(&[("thumbs-up", 0.99)])),
    ]));

    let dispatcher = ActionDispatcher::new(DroneNode::new());
    let decision_loop = DecisionLoopBuilder::new()
        .classifier(classifier.clone())
        .frames(Arc::new(SyntheticFrameSource::default()))
        .rule(LoopConfig::default().rule().unwrap())
        .actions(dispatcher.sender())
        .build()
        .unwrap();
    let ui = dispatcher.spawn();

    for _ in 0..6 {
        assert!(matches!(decision_loop.on_tick(), TickOutcome::Requested(_)));
        settle(&decision_loop).await;
    }

    let stats = decision_loop.stats();
    assert_eq!(classifier.calls(), 6);
    assert_eq!(stats.triggered, 2);
    assert_eq!(stats.below_threshold, 1);
    assert_eq!(stats.empty, 1);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.unmatched, 1);

    drop(decision_loop);
    let drone = ui.await.unwrap();

    let actions: Vec<Action> = drone.animations().iter().map(|a| a.action).collect();
    assert_eq!(actions, vec![Action::MoveForward, Action::MoveBackward]);
    // 前進して戻ったので元の位置
    assert!((drone.position().z - (-1.5)).abs() < 1e-5);
}

/// 推論が tick 間隔より遅いとき、tick は捨てられて in-flight は常に1件
#[tokio::test]
async fn slow_classifier_never_overlaps() {
    let classifier = Arc::new(
        ScriptedClassifier::new(vec![Ok(result(&[("FIVE-UB-RHand", 0.8)]))])
            .cycle()
            .with_latency(Duration::from_millis(40)),
    );
    let sink = RecordingSink::new();
    let recorded = sink.handle();

    let dispatcher = ActionDispatcher::new(sink);
    let decision_loop = DecisionLoopBuilder::new()
        .classifier(classifier.clone())
        .frames(Arc::new(SyntheticFrameSource::default()))
        .actions(dispatcher.sender())
        .build()
        .unwrap();
    let ui = dispatcher.spawn();

    let handle = decision_loop.start(Duration::from_millis(5)).unwrap();
    sleep(Duration::from_millis(300)).await;
    handle.stop().await;
    settle(&decision_loop).await;

    let stats = decision_loop.stats();
    assert!(stats.dropped > 0, "stats: {stats:?}");
    assert_eq!(stats.requested as usize, classifier.calls());
    assert_eq!(stats.requested, stats.completed());
    assert_eq!(stats.ticks, stats.requested + stats.dropped + stats.no_frame);

    drop(decision_loop);
    ui.await.unwrap();
    assert_eq!(recorded.count(Action::MoveForward) as u64, stats.triggered);
    assert_eq!(recorded.count(Action::MoveBackward), 0);
}

#[tokio::test]
async fn camera_warmup_ticks_are_skipped() {
    let dispatcher = ActionDispatcher::new(RecordingSink::new());
    let decision_loop = DecisionLoopBuilder::new()
        .classifier(Arc::new(ScriptedClassifier::new(vec![])))
        .frames(Arc::new(SyntheticFrameSource::default().with_warmup(3)))
        .actions(dispatcher.sender())
        .build()
        .unwrap();

    for _ in 0..3 {
        assert_eq!(decision_loop.on_tick(), TickOutcome::NoFrame);
    }
    assert!(matches!(decision_loop.on_tick(), TickOutcome::Requested(_)));
    settle(&decision_loop).await;

    let stats = decision_loop.stats();
    assert_eq!(stats.no_frame, 3);
    assert_eq!(stats.empty, 1);
}

/// gate が開くまで返らない推論
struct HeldClassifier {
    gate: Arc<Notify>,
}

#[async_trait]
impl Classifier for HeldClassifier {
    async fn classify(&self, _frame: Frame) -> Result<ClassificationResult, ClassifierError> {
        self.gate.notified().await;
        Ok(result(&[("fist-UB-RHand", 0.64)]))
    }
}

/// 発行していない ID の完了が紛れ込んでも、2件目のリクエストは出ない
#[tokio::test]
async fn stray_completion_keeps_single_request_outstanding() {
    let gate = Arc::new(Notify::new());
    let recorded = RecordingSink::new();
    let dispatcher = ActionDispatcher::new(recorded.handle());
    let decision_loop = DecisionLoopBuilder::new()
        .classifier(Arc::new(HeldClassifier { gate: gate.clone() }))
        .frames(Arc::new(SyntheticFrameSource::default()))
        .actions(dispatcher.sender())
        .build()
        .unwrap();
    let ui = dispatcher.spawn();

    let TickOutcome::Requested(issued) = decision_loop.on_tick() else {
        panic!("first tick should issue a request");
    };
    let stray = decision_loop.on_classification_result(
        RequestId::from(Ulid::new()),
        Ok(result(&[("FIVE-UB-RHand", 0.99)])),
    );
    assert_eq!(stray, Evaluation::Stale);
    assert_eq!(decision_loop.outstanding(), Some(issued));

    for _ in 0..5 {
        assert_eq!(decision_loop.on_tick(), TickOutcome::Dropped);
    }

    gate.notify_one();
    settle(&decision_loop).await;

    let stats = decision_loop.stats();
    assert_eq!(stats.requested, 1);
    assert_eq!(stats.dropped, 5);
    assert_eq!(stats.stale, 1);
    assert_eq!(stats.completed(), 1);

    drop(decision_loop);
    ui.await.unwrap();
    assert_eq!(recorded.actions(), vec![Action::MoveBackward]);
}
