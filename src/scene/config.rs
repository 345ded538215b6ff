//! Scene configuration
//!
//! Every group defaults to the stock scene, so an empty JSON object `{}` is
//! a complete config file.

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::atmosphere::{AtmosphereConfig, CloudConfig};
use crate::core::camera::CameraConfig;
use crate::core::{Error, Result};
use crate::entity::{STAT_MAX, WanderParams};
use crate::generation::PlacementConfig;
use crate::generation::config::positive_range;
use crate::terrain::{MAX_MESH_VERTICES, TerrainParams, WorldConfig};
use super::selection::MarkerConfig;
use super::transition::FocusConfig;

/// Creature start state and wander tuning
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatureConfig {
    /// Spawn point on the XZ plane
    pub start: [f32; 2],
    pub food: f32,
    pub water: f32,
    pub wander: WanderParams,
}

impl Default for CreatureConfig {
    fn default() -> Self {
        Self {
            start: [0.0, 0.0],
            food: STAT_MAX,
            water: STAT_MAX,
            wander: WanderParams::default(),
        }
    }
}

/// Configuration for the whole scene
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Seed for every random draw; `None` seeds from the OS
    pub seed: Option<u64>,
    pub world: WorldConfig,
    pub terrain: TerrainParams,
    pub trees: PlacementConfig,
    pub creature: CreatureConfig,
    pub camera: CameraConfig,
    pub focus: FocusConfig,
    pub marker: MarkerConfig,
    pub atmosphere: AtmosphereConfig,
    pub clouds: CloudConfig,
}

impl SceneConfig {
    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        info!("Loaded scene config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let world = &self.world;
        let radii_ok = [world.plane_radius, world.sphere_radius]
            .iter()
            .all(|r| r.is_finite() && *r > 0.0);
        if !radii_ok {
            return Err(invalid(format!(
                "world: plane radius {} and sphere radius {} must be positive",
                world.plane_radius, world.sphere_radius
            )));
        }
        if world.mesh_segments < 3 || world.mesh_rings == 0 {
            return Err(invalid(format!(
                "world: mesh needs at least 3 segments and 1 ring, got {}x{}",
                world.mesh_segments, world.mesh_rings
            )));
        }
        if world.mesh_segments as u64 * world.mesh_rings as u64 > MAX_MESH_VERTICES as u64 {
            return Err(invalid(format!(
                "world: mesh of {}x{} exceeds {} vertices",
                world.mesh_segments, world.mesh_rings, MAX_MESH_VERTICES
            )));
        }

        self.trees.validate()?;

        let wander = &self.creature.wander;
        if !(wander.speed.is_finite() && wander.speed >= 0.0) {
            return Err(invalid(format!("creature: speed {} must not be negative", wander.speed)));
        }
        if !(wander.boundary_fraction > 0.0 && wander.boundary_fraction <= 1.0) {
            return Err(invalid(format!(
                "creature: boundary_fraction {} must lie in (0, 1]",
                wander.boundary_fraction
            )));
        }
        if !positive_range(wander.redirect_min, wander.redirect_max) {
            return Err(invalid(format!(
                "creature: redirect range [{}, {}] must be positive and ordered",
                wander.redirect_min, wander.redirect_max
            )));
        }
        if !positive_range(wander.wait_min, wander.wait_max) {
            return Err(invalid(format!(
                "creature: wait range [{}, {}] must be positive and ordered",
                wander.wait_min, wander.wait_max
            )));
        }
        if !(wander.bounce_redirect.is_finite() && wander.bounce_redirect > 0.0) {
            return Err(invalid("creature: bounce_redirect must be positive".into()));
        }

        let camera = &self.camera;
        let limits = [camera.min_distance, camera.max_distance_factor];
        if !limits.iter().all(|v| v.is_finite() && *v > 0.0) {
            return Err(invalid("camera: distance limits must be positive".into()));
        }
        if camera.min_distance > world.sphere_radius * camera.max_distance_factor {
            return Err(invalid(format!(
                "camera: min distance {} exceeds max distance {}",
                camera.min_distance,
                world.sphere_radius * camera.max_distance_factor
            )));
        }
        if !(camera.near > 0.0 && camera.near < camera.far && camera.far.is_finite()) {
            return Err(invalid(format!(
                "camera: clip range [{}, {}] must be positive and ordered",
                camera.near, camera.far
            )));
        }

        if self.focus.steps == 0 {
            return Err(invalid("focus: transition needs at least one step".into()));
        }

        self.atmosphere.validate()?;

        let clouds = &self.clouds;
        let cloud_values = [
            clouds.min_radius,
            clouds.radius_spread,
            clouds.min_height,
            clouds.height_spread,
            clouds.min_scale,
            clouds.scale_spread,
            clouds.drift_speed,
            clouds.wrap_x,
        ];
        if cloud_values.iter().any(|v| !v.is_finite()) {
            return Err(invalid("clouds: every parameter must be finite".into()));
        }
        if clouds.radius_spread < 0.0 || clouds.height_spread < 0.0 || clouds.scale_spread < 0.0 {
            return Err(invalid("clouds: spreads must not be negative".into()));
        }
        if clouds.wrap_x <= 0.0 {
            return Err(invalid(format!("clouds: wrap_x {} must be positive", clouds.wrap_x)));
        }
        Ok(())
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidConfig(message)
}
