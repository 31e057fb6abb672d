//! Fixed-step timing utilities

use std::time::Duration;

/// Default fixed tick rate (50 Hz)
pub const DEFAULT_FIXED_STEP: Duration = Duration::from_millis(20);

/// Upper bound on ticks produced by a single [`FixedTimestep::advance`] call.
///
/// A long stall (debugger, window drag) would otherwise replay hundreds of
/// ticks in one frame.
pub const MAX_TICKS_PER_ADVANCE: u32 = 8;

/// Converts variable frame deltas into a whole number of fixed ticks.
///
/// Hosts that already own a fixed-rate scheduler do not need this; it only
/// exists so a plain render loop can drive [`WaterSurface::fixed_tick`](crate::water::WaterSurface::fixed_tick).
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: Duration,
    accumulator: Duration,
    tick_count: u64,
}

impl FixedTimestep {
    /// Create a timestep with the given tick length (zero is replaced by the default).
    pub fn new(step: Duration) -> Self {
        let step = if step.is_zero() { DEFAULT_FIXED_STEP } else { step };
        Self {
            step,
            accumulator: Duration::ZERO,
            tick_count: 0,
        }
    }

    /// Add a frame delta and return how many fixed ticks are now due
    pub fn advance(&mut self, delta: Duration) -> u32 {
        self.accumulator += delta;

        let mut ticks = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            ticks += 1;
            if ticks == MAX_TICKS_PER_ADVANCE {
                // Drop the backlog instead of spiralling
                self.accumulator = Duration::ZERO;
                break;
            }
        }

        self.tick_count += ticks as u64;
        ticks
    }

    /// Fixed tick length
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Fraction of the next tick already accumulated, in `[0, 1)`
    pub fn alpha(&self) -> f32 {
        self.accumulator.as_secs_f32() / self.step.as_secs_f32()
    }

    /// Total ticks produced so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(DEFAULT_FIXED_STEP)
    }
}
