//! Frame clock
//!
//! Turns animation-frame timestamps into a clamped, normalized step so that
//! physics and spawn rates read "per 60 fps frame" at any refresh rate.

use crate::consts::{MAX_FRAME_MS, TARGET_FRAME_MS};

/// Elapsed time for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStep {
    /// Unclamped wall-clock milliseconds since the previous frame
    pub real_ms: f32,
    /// Clamped delta as a multiple of the target frame interval
    pub step: f32,
}

impl FrameStep {
    /// A frame that moves nothing
    pub const ZERO: FrameStep = FrameStep {
        real_ms: 0.0,
        step: 0.0,
    };

    /// Build a step from a real delta in milliseconds
    pub fn from_ms(real_ms: f32) -> Self {
        let real_ms = real_ms.max(0.0);
        Self {
            real_ms,
            step: real_ms.min(MAX_FRAME_MS) / TARGET_FRAME_MS,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.step == 0.0 && self.real_ms == 0.0
    }
}

/// Tracks the previous frame timestamp
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    previous_ms: Option<f64>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous timestamp; the next frame emits a zero step
    pub fn rearm(&mut self) {
        self.previous_ms = None;
    }

    /// Record `now_ms` and return the step since the previous frame
    pub fn advance(&mut self, now_ms: f64) -> FrameStep {
        match self.previous_ms.replace(now_ms) {
            None => FrameStep::ZERO,
            Some(previous) => FrameStep::from_ms((now_ms - previous) as f32),
        }
    }
}
