//! Day/night lighting as a function of cycle progress.
//!
//! Progress runs dawn, day, dusk, night. Within each phase the sky color and
//! light intensities move linearly with the phase-local fraction `t`:
//!
//! | phase | sky                | sun intensity | ambient     |
//! |-------|--------------------|---------------|-------------|
//! | dawn  | twilight to day    | 0.5 + 0.5t    | 0.4 + 0.3t  |
//! | day   | day                | 1.0           | 0.7         |
//! | dusk  | day to twilight    | 1.0 - 0.5t    | 0.7 - 0.3t  |
//! | night | twilight to night  | 0.5 - 0.3t    | 0.4 - 0.2t  |

use knoll_protocol::{DayPhase, LightingReport};

use super::color::{Lerp, hex_rgb};
use super::config::AtmosphereConfig;
use super::sun::compute_sun_position;
use super::time::CycleClock;

/// Lighting for one moment of the cycle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightingSample {
    pub phase: DayPhase,
    pub progress: f32,
    pub sky_color: [f32; 3],
    pub sun_position: glam::Vec3,
    pub sun_color: [f32; 3],
    pub sun_intensity: f32,
    pub ambient_intensity: f32,
}

impl LightingSample {
    pub fn to_report(&self) -> LightingReport {
        LightingReport {
            phase: self.phase,
            progress: self.progress,
            sky_color: self.sky_color,
            sun_position: self.sun_position.to_array(),
            sun_color: self.sun_color,
            sun_intensity: self.sun_intensity,
            ambient_intensity: self.ambient_intensity,
        }
    }
}

/// Phase containing `progress`, plus the fraction of that phase elapsed.
pub fn phase_at(progress: f32, config: &AtmosphereConfig) -> (DayPhase, f32) {
    let dawn_end = config.dawn_fraction;
    let day_end = dawn_end + config.day_fraction;
    let dusk_end = day_end + config.dusk_fraction;

    if progress < dawn_end {
        (DayPhase::Dawn, progress / config.dawn_fraction)
    } else if progress < day_end {
        (DayPhase::Day, (progress - dawn_end) / config.day_fraction)
    } else if progress < dusk_end {
        (DayPhase::Dusk, (progress - day_end) / config.dusk_fraction)
    } else {
        let t = (progress - dusk_end) / config.night_fraction();
        (DayPhase::Night, t.clamp(0.0, 1.0))
    }
}

/// Lighting at `progress` with the sun on an orbit of `sun_radius`.
pub fn lighting_at(progress: f32, config: &AtmosphereConfig, sun_radius: f32) -> LightingSample {
    let day = hex_rgb(config.sky_day);
    let night = hex_rgb(config.sky_night);
    let twilight = hex_rgb(config.sky_twilight);

    let (phase, t) = phase_at(progress, config);
    let (sky_color, sun_hex, sun_intensity, ambient_intensity) = match phase {
        DayPhase::Dawn => (twilight.lerp(&day, t), config.sun_twilight, 0.5 + 0.5 * t, 0.4 + 0.3 * t),
        DayPhase::Day => (day, config.sun_day, 1.0, 0.7),
        DayPhase::Dusk => (day.lerp(&twilight, t), config.sun_twilight, 1.0 - 0.5 * t, 0.7 - 0.3 * t),
        DayPhase::Night => (twilight.lerp(&night, t), config.sun_night, 0.5 - 0.3 * t, 0.4 - 0.2 * t),
    };

    LightingSample {
        phase,
        progress,
        sky_color,
        sun_position: compute_sun_position(progress, sun_radius),
        sun_color: hex_rgb(sun_hex),
        sun_intensity,
        ambient_intensity,
    }
}

/// Running day/night cycle.
pub struct DayNightCycle {
    config: AtmosphereConfig,
    clock: CycleClock,
    sun_radius: f32,
}

impl DayNightCycle {
    /// Create a cycle whose sun orbits a sky sphere of `sphere_radius`.
    pub fn new(config: AtmosphereConfig, sphere_radius: f32) -> Self {
        let clock = CycleClock::new(
            config.day_length_seconds * config.start_fraction,
            config.cycle_seconds(),
        );
        let sun_radius = sphere_radius * config.sun_orbit_factor;
        Self { config, clock, sun_radius }
    }

    /// Advance by `dt` seconds unless paused.
    pub fn update(&mut self, dt: f32) {
        if !self.config.time_paused {
            self.clock.advance(dt);
        }
    }

    /// Jump to a cycle fraction in `[0, 1)`.
    pub fn set_progress(&mut self, progress: f32) {
        self.clock.set(progress * self.config.cycle_seconds());
    }

    pub fn progress(&self) -> f32 {
        self.clock.progress()
    }

    pub fn cycles_completed(&self) -> u32 {
        self.clock.cycle_count()
    }

    pub fn lighting(&self) -> LightingSample {
        lighting_at(self.progress(), &self.config, self.sun_radius)
    }

    pub fn config(&self) -> &AtmosphereConfig {
        &self.config
    }
}
