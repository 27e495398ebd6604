use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tokio::time::sleep;
use tracing_subscriber::EnvFilter;

use gesture_core::impls::{Animation, DroneNode, Position, ScriptedClassifier, SyntheticFrameSource};
use gesture_core::{ActionDispatcher, DecisionLoopBuilder, LoopConfig, LoopStats};

/// 台本を指定しないときに流すデモ
const DEFAULT_SCRIPT: &str = r#"[
    {"predictions": [{"label": "FIVE-UB-RHand", "confidence": 0.42}, {"label": "other", "confidence": 0.10}]},
    {"predictions": [{"label": "fist-UB-RHand", "confidence": 0.11}]},
    {"predictions": [{"label": "fist-UB-RHand", "confidence": 0.10}]},
    {"predictions": []},
    {"error": "inference runtime busy"},
    {"predictions": [{"label": "FIVE-UB-RHand", "confidence": 0.87}]}
]"#;

#[derive(Debug, Parser)]
#[command(
    name = "gesture",
    about = "Run the gesture decision loop against a scripted classifier and a drone model"
)]
struct Cli {
    /// Loop configuration (JSON). Defaults to the reference rule.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Classifier script (JSON array of {"predictions": [...]} or {"error": "..."}).
    #[arg(long)]
    script: Option<PathBuf>,

    /// How many tick intervals to run before stopping.
    #[arg(long, default_value_t = 20)]
    ticks: u32,

    /// Simulated inference latency in milliseconds.
    #[arg(long, default_value_t = 0)]
    latency_ms: u64,

    /// Number of initial polls for which the camera has no frame yet.
    #[arg(long, default_value_t = 0)]
    warmup_frames: u64,

    /// Replay the script from the top once it is exhausted.
    #[arg(long)]
    cycle: bool,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    position: Position,
    animations: &'a [Animation],
    stats: LoopStats,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // (A) 設定と台本を読む
    let config = match &cli.config {
        Some(path) => LoopConfig::from_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => LoopConfig::default(),
    };
    let script = match &cli.script {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading script from {}", path.display()))?,
        None => DEFAULT_SCRIPT.to_string(),
    };

    let mut classifier = ScriptedClassifier::from_json_str(&script)
        .context("parsing classifier script")?
        .with_latency(Duration::from_millis(cli.latency_ms));
    if cli.cycle {
        classifier = classifier.cycle();
    }

    // (B) UI コンテキスト（ドローンを所有する）を起動
    let dispatcher = ActionDispatcher::new(DroneNode::new());
    let decision_loop = DecisionLoopBuilder::new()
        .classifier(Arc::new(classifier))
        .frames(Arc::new(
            SyntheticFrameSource::default().with_warmup(cli.warmup_frames),
        ))
        .rule(config.rule()?)
        .actions(dispatcher.sender())
        .build()?;
    let ui = dispatcher.spawn();

    // (C) timer を回す
    let interval = config.interval()?;
    let handle = decision_loop.start(interval)?;
    sleep(interval * cli.ticks).await;
    handle.stop().await;

    // (D) in-flight の分類は止めないので、終わるまで待つ
    while decision_loop.is_in_flight() {
        sleep(Duration::from_millis(5)).await;
    }
    let stats = decision_loop.stats();
    drop(decision_loop);
    let drone = ui.await.context("ui task failed")?;

    let report = Report {
        position: drone.position(),
        animations: drone.animations(),
        stats,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
