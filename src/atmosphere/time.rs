//! Cycle clock with cycle counting.

/// Tracks seconds elapsed within a repeating cycle plus completed cycles.
#[derive(Clone, Debug)]
pub struct CycleClock {
    /// Seconds into the current cycle, in `[0, cycle_seconds)`.
    seconds: f64,
    /// Number of full cycles that have elapsed.
    cycle_count: u32,
    cycle_seconds: f64,
}

impl CycleClock {
    /// Create a clock `start_seconds` into a cycle of `cycle_seconds`.
    pub fn new(start_seconds: f32, cycle_seconds: f32) -> Self {
        let mut clock = Self {
            seconds: 0.0,
            cycle_count: 0,
            cycle_seconds: cycle_seconds.max(0.0) as f64,
        };
        clock.set(start_seconds);
        clock
    }

    /// Advance by `dt_seconds`. Negative steps are ignored.
    pub fn advance(&mut self, dt_seconds: f32) {
        if self.cycle_seconds <= 0.0 || dt_seconds.is_nan() || dt_seconds <= 0.0 {
            return;
        }
        let total = self.seconds + dt_seconds as f64;
        let wraps = (total / self.cycle_seconds).floor();
        self.seconds = total.rem_euclid(self.cycle_seconds);
        if self.seconds >= self.cycle_seconds {
            self.seconds = 0.0;
        }
        // Saturates instead of overflowing on absurd steps
        self.cycle_count = self.cycle_count.saturating_add(wraps.min(u32::MAX as f64) as u32);
    }

    /// Jump to `seconds` into the current cycle, wrapping.
    pub fn set(&mut self, seconds: f32) {
        self.seconds = if self.cycle_seconds > 0.0 {
            (seconds as f64).rem_euclid(self.cycle_seconds)
        } else {
            0.0
        };
    }

    /// Fraction of the cycle elapsed, in `[0, 1)`.
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.cycle_seconds > 0.0 {
            (self.seconds / self.cycle_seconds) as f32
        } else {
            0.0
        }
    }

    #[inline]
    pub fn seconds(&self) -> f32 {
        self.seconds as f32
    }

    /// Number of full cycles that have passed.
    #[inline]
    pub fn cycle_count(&self) -> u32 {
        self.cycle_count
    }
}
