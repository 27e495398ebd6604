//! SyntheticFrameSource - 空のフレームを出す FrameSource
//!
//! 中身は0埋めのバイト列。Classifier の代役（ScriptedClassifier）は
//! フレームの中身を見ないので、これで十分。

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::Frame;
use crate::ports::{Clock, FrameSource, SystemClock};

const DEFAULT_FRAME_LEN: usize = 64;

/// SyntheticFrameSource は連番のフレームを出す
///
/// `with_warmup(n)` で最初の n 回は None を返す（カメラの起動待ちの再現）。
pub struct SyntheticFrameSource {
    clock: Box<dyn Clock>,
    warmup: AtomicU64,
    sequence: AtomicU64,
    frame_len: usize,
}

impl SyntheticFrameSource {
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            warmup: AtomicU64::new(0),
            sequence: AtomicU64::new(0),
            frame_len: DEFAULT_FRAME_LEN,
        }
    }

    pub fn with_warmup(self, polls: u64) -> Self {
        self.warmup.store(polls, Ordering::Relaxed);
        self
    }

    pub fn with_frame_len(mut self, frame_len: usize) -> Self {
        self.frame_len = frame_len;
        self
    }

    /// これまでに出したフレーム数
    pub fn produced(&self) -> u64 {
        self.sequence.load(Ordering::Relaxed)
    }
}

impl Default for SyntheticFrameSource {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl FrameSource for SyntheticFrameSource {
    fn current_frame(&self) -> Option<Frame> {
        let warming_up = self
            .warmup
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |left| left.checked_sub(1))
            .is_ok();
        if warming_up {
            return None;
        }

        let sequence = self.sequence.fetch_add(1, Ordering::AcqRel);
        Some(Frame::new(
            sequence,
            self.clock.now(),
            vec![0u8; self.frame_len],
        ))
    }
}
