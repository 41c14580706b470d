//! Fixed timestep clock and frame scheduling
//!
//! The host calls back once per display frame with a monotonically
//! increasing timestamp. [`FixedStepper`] turns those into whole simulation
//! ticks; [`FrameScheduler`] stands in for the host's "call me next frame"
//! facility so start/stop/cancel are explicit and testable.

use crate::consts::TICK_MS;

/// Slack for float error when comparing against the tick length
const TICK_EPSILON_MS: f64 = 1e-6;

/// Accumulates wall-clock time and releases it in fixed-size ticks
#[derive(Debug, Clone)]
pub struct FixedStepper {
    tick_ms: f64,
    accumulator: f64,
    last_timestamp: Option<f64>,
}

impl Default for FixedStepper {
    fn default() -> Self {
        Self::new(TICK_MS)
    }
}

impl FixedStepper {
    pub fn new(tick_ms: f64) -> Self {
        Self {
            tick_ms,
            accumulator: 0.0,
            last_timestamp: None,
        }
    }

    pub fn tick_ms(&self) -> f64 {
        self.tick_ms
    }

    /// Banked time not yet converted into ticks
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Forget the baseline and any banked time. The next frame only
    /// re-establishes the baseline, so a long gap never turns into a burst
    /// of catch-up ticks.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_timestamp = None;
    }

    /// Bank the time elapsed since the previous frame
    ///
    /// The first frame after a reset only records the baseline. Timestamps
    /// that go backwards contribute nothing.
    pub fn advance(&mut self, timestamp_ms: f64) {
        if let Some(last) = self.last_timestamp {
            let elapsed = timestamp_ms - last;
            if elapsed > 0.0 {
                self.accumulator += elapsed;
            } else if elapsed < 0.0 {
                log::debug!("clock went backwards by {:.3} ms", -elapsed);
            }
        }
        if self.last_timestamp.is_none_or(|last| timestamp_ms > last) {
            self.last_timestamp = Some(timestamp_ms);
        }
    }

    /// Take one tick's worth of banked time, if available
    pub fn next_tick(&mut self) -> bool {
        if self.accumulator + TICK_EPSILON_MS >= self.tick_ms {
            self.accumulator = (self.accumulator - self.tick_ms).max(0.0);
            true
        } else {
            false
        }
    }

    /// Advance and count every available tick
    pub fn drain(&mut self, timestamp_ms: f64) -> u32 {
        self.advance(timestamp_ms);
        let mut ticks = 0;
        while self.next_tick() {
            ticks += 1;
        }
        ticks
    }
}

/// Host frame-callback facility
pub trait FrameScheduler {
    /// Ask for a callback on the next display frame (idempotent)
    fn request_frame(&mut self);

    /// Drop any pending callback (idempotent)
    fn cancel_frame(&mut self);
}

/// Scheduler driven by hand: tests and headless runs poll it
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    pending: bool,
    requests: u64,
    cancels: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Consume the pending callback; the host fires the frame if true
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Callbacks actually scheduled (repeat requests excluded)
    pub fn requests(&self) -> u64 {
        self.requests
    }

    /// Callbacks actually cancelled (no-op cancels excluded)
    pub fn cancels(&self) -> u64 {
        self.cancels
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        if !self.pending {
            self.pending = true;
            self.requests += 1;
        }
    }

    fn cancel_frame(&mut self) {
        if self.pending {
            self.pending = false;
            self.cancels += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_frame_sets_baseline() {
        let mut stepper = FixedStepper::default();
        assert_eq!(stepper.drain(5_000.0), 0);
        assert_eq!(stepper.accumulator(), 0.0);
        assert_eq!(stepper.drain(5_000.0 + TICK_MS * 3.0), 3);
    }

    #[test]
    fn test_partial_time_carries_over() {
        let mut stepper = FixedStepper::default();
        stepper.drain(0.0);
        assert_eq!(stepper.drain(10.0), 0);
        assert_eq!(stepper.drain(20.0), 1);
        assert!((stepper.accumulator() - (20.0 - TICK_MS)).abs() < 1e-9);
    }

    #[test]
    fn test_backwards_time_is_ignored() {
        let mut stepper = FixedStepper::default();
        stepper.drain(100.0);
        assert_eq!(stepper.drain(50.0), 0);
        // Baseline stays at 100
        assert_eq!(stepper.drain(100.0 + TICK_MS), 1);
    }

    #[test]
    fn test_reset_discards_backlog() {
        let mut stepper = FixedStepper::default();
        stepper.drain(0.0);
        stepper.advance(10.0);
        stepper.reset();
        assert_eq!(stepper.drain(1_000_000.0), 0);
        assert_eq!(stepper.drain(1_000_000.0 + TICK_MS), 1);
    }

    #[test]
    fn test_manual_scheduler_is_idempotent() {
        let mut scheduler = ManualScheduler::new();
        scheduler.cancel_frame();
        assert_eq!(scheduler.cancels(), 0);

        scheduler.request_frame();
        scheduler.request_frame();
        assert_eq!(scheduler.requests(), 1);
        assert!(scheduler.is_pending());

        scheduler.cancel_frame();
        scheduler.cancel_frame();
        assert_eq!(scheduler.cancels(), 1);
        assert!(!scheduler.take_pending());

        scheduler.request_frame();
        assert!(scheduler.take_pending());
        assert!(!scheduler.is_pending());
    }

    proptest! {
        #[test]
        fn prop_fragmentation_does_not_change_tick_count(
            n in 0u32..600,
            start in 0.0f64..1.0e6,
            mut cuts in prop::collection::vec(0.0f64..1.0, 0..40),
        ) {
            let total = n as f64 * TICK_MS;
            cuts.sort_by(|a, b| a.partial_cmp(b).unwrap());

            let mut stepper = FixedStepper::default();
            let mut ticks = stepper.drain(start);
            for cut in cuts {
                ticks += stepper.drain(start + cut * total);
            }
            ticks += stepper.drain(start + total);

            prop_assert_eq!(ticks, n);
        }

        #[test]
        fn prop_reset_never_catches_up(gap in 0.0f64..1.0e9) {
            let mut stepper = FixedStepper::default();
            stepper.drain(0.0);
            stepper.drain(TICK_MS * 2.5);
            stepper.reset();
            prop_assert_eq!(stepper.drain(TICK_MS * 2.5 + gap), 0);
        }
    }
}
