//! Frame timing utilities

use std::time::{Duration, Instant};

/// Longest step a real-time frame may report, in seconds. A stalled host
/// would otherwise teleport the creature across the map in one tick.
pub const MAX_REALTIME_STEP: f32 = 0.25;

/// How the timer derives each frame's delta
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepMode {
    /// Every tick advances by the same number of seconds
    Fixed(f32),
    /// Ticks measure wall-clock time since the previous tick
    Realtime,
}

/// Tracks frame timing and calculates FPS
pub struct FrameTimer {
    mode: StepMode,
    last_frame: Instant,
    delta: f32,
    elapsed: f64,
    frame_count: u64,
    fps_timer: Instant,
    fps: f32,
    fps_frame_count: u32,
}

impl FrameTimer {
    /// Create a new frame timer
    pub fn new(mode: StepMode) -> Self {
        let now = Instant::now();
        Self {
            mode,
            last_frame: now,
            delta: 0.0,
            elapsed: 0.0,
            frame_count: 0,
            fps_timer: now,
            fps: 0.0,
            fps_frame_count: 0,
        }
    }

    /// Fixed-step timer at the given rate in Hz
    pub fn fixed_rate(hz: f32) -> Self {
        Self::new(StepMode::Fixed(1.0 / hz.max(1.0)))
    }

    /// Call once per frame; returns the step in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta = match self.mode {
            StepMode::Fixed(dt) => dt,
            StepMode::Realtime => (now - self.last_frame).as_secs_f32().min(MAX_REALTIME_STEP),
        };
        self.last_frame = now;
        self.elapsed += self.delta as f64;
        self.frame_count += 1;
        self.fps_frame_count += 1;

        // Update FPS every second of wall time
        let fps_elapsed = now - self.fps_timer;
        if fps_elapsed >= Duration::from_secs(1) {
            self.fps = self.fps_frame_count as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = 0;
            self.fps_timer = now;
        }

        self.delta
    }

    /// Step length of the last tick in seconds
    pub fn delta_secs(&self) -> f32 {
        self.delta
    }

    /// Simulated seconds since the timer started
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed as f32
    }

    /// Wall-clock FPS (updated every second)
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Get total frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn mode(&self) -> StepMode {
        self.mode
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::fixed_rate(60.0)
    }
}
