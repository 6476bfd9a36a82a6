//! Frame timing with an injectable time source.

use crate::constants::MAX_FRAME_DT;
use instant::Instant;
use std::cell::Cell;
use std::rc::Rc;

pub trait Clock {
    /// Monotonic time in seconds since an arbitrary origin.
    fn now_secs(&self) -> f64;
}

/// Wall clock backed by `instant` (performance.now() on the web).
pub struct InstantClock {
    origin: Instant,
}

impl Default for InstantClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for InstantClock {
    fn now_secs(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-advanced clock for deterministic stepping. Clones share the same time.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        self.now.get()
    }
}

/// Produces per-frame deltas clamped to `[0, MAX_FRAME_DT]`.
pub struct FrameClock<C: Clock> {
    clock: C,
    last: f64,
}

impl<C: Clock> FrameClock<C> {
    pub fn new(clock: C) -> Self {
        let last = clock.now_secs();
        Self { clock, last }
    }

    /// Seconds since the previous call, clamped so a stalled or backgrounded
    /// tab does not produce one huge step.
    pub fn delta(&mut self) -> f32 {
        let now = self.clock.now_secs();
        let dt = now - self.last;
        self.last = now;
        if dt.is_finite() {
            (dt as f32).clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        }
    }
}
