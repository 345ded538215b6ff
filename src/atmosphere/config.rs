//! Day/night and cloud configuration.

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

// ---------------------------------------------------------------------------
// Day/night cycle
// ---------------------------------------------------------------------------

/// Day/night cycle timing and palette.
///
/// Colors are sRGB hex values as authored; see [`super::color::hex_rgb`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmosphereConfig {
    /// Seconds of daylight per cycle.
    pub day_length_seconds: f32,
    /// Seconds of night per cycle.
    pub night_length_seconds: f32,
    /// Cycle start, as a fraction of the day length.
    pub start_fraction: f32,
    /// Whether time advancement is paused.
    pub time_paused: bool,

    // -- Phase split of cycle progress ------------------------------------

    pub dawn_fraction: f32,
    pub day_fraction: f32,
    pub dusk_fraction: f32,

    /// Sun orbit radius relative to the sky sphere radius.
    pub sun_orbit_factor: f32,

    // -- Palette ------------------------------------------------------------

    pub sky_day: u32,
    pub sky_night: u32,
    pub sky_twilight: u32,
    pub sun_day: u32,
    pub sun_twilight: u32,
    pub sun_night: u32,
}

impl Default for AtmosphereConfig {
    fn default() -> Self {
        Self {
            day_length_seconds: 15.0 * 60.0,
            night_length_seconds: 10.0 * 60.0,
            start_fraction: 0.05,
            time_paused: false,

            dawn_fraction: 0.05,
            day_fraction: 0.45,
            dusk_fraction: 0.05,

            sun_orbit_factor: 1.1,

            sky_day: 0x87CEEB,
            sky_night: 0x0A0A33,
            sky_twilight: 0xFF8C1A,
            sun_day: 0xFFFFFF,
            sun_twilight: 0xFFB347,
            sun_night: 0x223366,
        }
    }
}

impl AtmosphereConfig {
    /// Full cycle length in seconds.
    pub fn cycle_seconds(&self) -> f32 {
        self.day_length_seconds + self.night_length_seconds
    }

    /// Whatever progress is left after dawn, day and dusk.
    pub fn night_fraction(&self) -> f32 {
        1.0 - self.dawn_fraction - self.day_fraction - self.dusk_fraction
    }

    pub fn validate(&self) -> Result<()> {
        let lengths = [self.day_length_seconds, self.night_length_seconds];
        if lengths.iter().any(|l| !(l.is_finite() && *l >= 0.0)) || self.cycle_seconds() <= 0.0 {
            return Err(Error::InvalidConfig(
                "atmosphere: day and night lengths must be non-negative with a positive sum".into(),
            ));
        }
        let phases = [self.dawn_fraction, self.day_fraction, self.dusk_fraction];
        if phases.iter().any(|f| !(f.is_finite() && *f > 0.0)) || self.night_fraction() <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "atmosphere: phase fractions {phases:?} must be positive and sum below 1"
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Clouds
// ---------------------------------------------------------------------------

/// Cloud layer parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    pub count: u32,
    /// Horizontal distance from the origin: `min_radius + U * radius_spread`.
    pub min_radius: f32,
    pub radius_spread: f32,
    /// Altitude: `min_height + U * height_spread`.
    pub min_height: f32,
    pub height_spread: f32,
    /// Size multiplier: `min_scale + U * scale_spread`.
    pub min_scale: f32,
    pub scale_spread: f32,
    /// Small spheres attached to each cloud body.
    pub puffs: u32,
    /// Drift along X in units per second. Even clouds drift +X, odd ones -X.
    pub drift_speed: f32,
    /// Clouds past `|x| > wrap_x` reappear on the other side.
    pub wrap_x: f32,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            count: 8,
            min_radius: 120.0,
            radius_spread: 80.0,
            min_height: 80.0,
            height_spread: 40.0,
            min_scale: 0.8,
            scale_spread: 1.2,
            puffs: 3,
            // 0.02 units per frame at 60 Hz
            drift_speed: 1.2,
            wrap_x: 200.0,
        }
    }
}
