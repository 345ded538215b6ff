//! Day/night cycle and sky.
//!
//! The main entry point is [`AtmosphereSystem`], updated once per frame. It
//! owns the [`DayNightCycle`] that drives lighting and the drifting
//! [`CloudLayer`].

pub mod clouds;
pub mod color;
pub mod config;
pub mod cycle;
pub mod sun;
pub mod time;

// Re-exports
pub use clouds::{Cloud, CloudLayer, Puff};
pub use color::{Lerp, hex_rgb};
pub use config::{AtmosphereConfig, CloudConfig};
pub use cycle::{DayNightCycle, LightingSample, lighting_at, phase_at};
pub use time::CycleClock;

use rand::Rng;

// ---------------------------------------------------------------------------
// AtmosphereSystem
// ---------------------------------------------------------------------------

/// Main atmosphere system. Call [`update`](Self::update) each frame, then read
/// [`lighting`](Self::lighting) and [`clouds`](Self::clouds).
pub struct AtmosphereSystem {
    cycle: DayNightCycle,
    clouds: CloudLayer,
}

impl AtmosphereSystem {
    /// Create the system for a sky sphere of `sphere_radius`.
    pub fn new<R: Rng + ?Sized>(
        config: AtmosphereConfig,
        cloud_config: CloudConfig,
        sphere_radius: f32,
        rng: &mut R,
    ) -> Self {
        Self {
            cycle: DayNightCycle::new(config, sphere_radius),
            clouds: CloudLayer::generate(cloud_config, rng),
        }
    }

    /// Advance time by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.cycle.update(dt);
        self.clouds.update(dt);
    }

    pub fn lighting(&self) -> LightingSample {
        self.cycle.lighting()
    }

    pub fn cycle(&self) -> &DayNightCycle {
        &self.cycle
    }

    pub fn cycle_mut(&mut self) -> &mut DayNightCycle {
        &mut self.cycle
    }

    pub fn clouds(&self) -> &[Cloud] {
        self.clouds.clouds()
    }
}
