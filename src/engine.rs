//! Seams to the external engine and frame scheduler
//!
//! Drawing, projectile physics and collision live outside this crate. The
//! game hands them a battlefield and fire events and gets back where each
//! shot ended.

use std::ops::Range;

use crate::consts::FRAME_RATE_HZ;
use crate::sim::{Battlefield, FireEvent, Tank};

/// How a shot in flight finished
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotOutcome {
    /// Shell hit the ground at this column
    Impact { x: f64 },
    /// Shell left the board
    OutOfBounds,
}

/// External render/physics engine
pub trait Engine {
    /// A new round's battlefield is ready to draw
    fn start(&mut self, battlefield: &Battlefield);

    /// Launch a shell from `from` with the captured settings
    fn fire(&mut self, event: FireEvent, from: &Tank);

    /// Advance one frame; report the end of the shot in flight, if any
    fn step(&mut self, timestamp: f64) -> Option<ShotOutcome>;

    /// An impact reshaped `columns` of the terrain
    fn reshape(&mut self, _battlefield: &Battlefield, _columns: Range<usize>) {}
}

/// Per-frame scheduling primitive
pub trait FrameSource {
    /// Block until the next display refresh; `None` once the host tears down
    fn next_frame(&mut self) -> Option<f64>;
}

/// Frames at a fixed rate without a display, for headless runs and tests
#[derive(Debug, Clone)]
pub struct FixedRateFrames {
    interval_ms: f64,
    now_ms: f64,
    remaining: Option<u64>,
}

impl FixedRateFrames {
    /// Unbounded frame source at `hz` refreshes per second
    ///
    /// A rate that is not a positive, finite number falls back to
    /// [`FRAME_RATE_HZ`], so timestamps always advance.
    pub fn new(hz: f64) -> Self {
        let hz = if hz.is_finite() && hz > 0.0 {
            hz
        } else {
            log::warn!("Invalid frame rate {} Hz, using {} Hz", hz, FRAME_RATE_HZ);
            FRAME_RATE_HZ
        };
        Self {
            interval_ms: 1000.0 / hz,
            now_ms: 0.0,
            remaining: None,
        }
    }

    /// Stop after `frames` refreshes
    pub fn with_limit(mut self, frames: u64) -> Self {
        self.remaining = Some(frames);
        self
    }
}

impl FrameSource for FixedRateFrames {
    fn next_frame(&mut self) -> Option<f64> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }
        self.now_ms += self.interval_ms;
        Some(self.now_ms)
    }
}
