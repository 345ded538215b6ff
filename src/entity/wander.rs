//! Autonomous wandering for the creature
//!
//! One call to [`WanderController::tick`] per frame. Within a tick the
//! checks run in a fixed order and the first one that fails ends the tick
//! without moving:
//!
//! 1. waiting after a bump: count down, stand still
//! 2. redirect timer expired: pick a new heading
//! 3. step would leave the disk: turn toward the origin
//! 4. step would hit a trunk: wait a moment, pick a new heading
//! 5. step would sink into rising terrain: pick a new heading
//! 6. commit: move and rest on the ground
//!
//! Nothing here can fail. A blocked step is answered by turning or waiting.

use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{Vec2, Vec3};
use crate::math::within_disk;
use crate::terrain::HeightField;
use super::creature::Creature;
use super::obstacle::Obstacle;

/// Heading used when a direction cannot be normalized
pub const FALLBACK_HEADING: Vec2 = Vec2::X;

/// Tuning for the wander behavior
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WanderParams {
    /// Ground speed in units per second
    pub speed: f32,
    /// Fraction of the plane radius the creature may roam
    pub boundary_fraction: f32,
    /// Clearance kept around each trunk, on top of its radius
    pub obstacle_margin: f32,
    /// Range of the regular redirect interval, seconds
    pub redirect_min: f32,
    pub redirect_max: f32,
    /// Redirect interval after bouncing off the boundary or a slope
    pub bounce_redirect: f32,
    /// Range of the pause after bumping into a trunk, seconds
    pub wait_min: f32,
    pub wait_max: f32,
    /// Tolerance for the rising-terrain check
    pub terrain_epsilon: f32,
    /// Height of the creature's center above the ground
    pub rest_offset: f32,
}

impl Default for WanderParams {
    fn default() -> Self {
        Self {
            // 0.7 units per frame at 60 Hz
            speed: 42.0,
            boundary_fraction: 0.95,
            obstacle_margin: 4.0,
            redirect_min: 2.0,
            redirect_max: 4.0,
            bounce_redirect: 0.5,
            wait_min: 0.5,
            wait_max: 1.0,
            terrain_epsilon: 0.01,
            rest_offset: 1.0,
        }
    }
}

/// What a tick did
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// Standing still until the wait timer runs out
    Waiting,
    /// Step committed
    Moved,
    /// Step would leave the disk; turned toward the origin
    HitBoundary,
    /// Step would enter the trunk at this index; now waiting
    Blocked(usize),
    /// Step would end below the ground; turned
    TooSteep,
}

/// Per-tick steering state machine
#[derive(Clone, Debug)]
pub struct WanderController {
    params: WanderParams,
    boundary_radius: f32,
}

impl WanderController {
    pub fn new(params: WanderParams, plane_radius: f32) -> Self {
        let boundary_radius = plane_radius * params.boundary_fraction;
        Self { params, boundary_radius }
    }

    pub fn params(&self) -> &WanderParams {
        &self.params
    }

    /// Radius of the disk the creature may roam
    pub fn boundary_radius(&self) -> f32 {
        self.boundary_radius
    }

    /// Advance the creature by `dt` seconds
    pub fn tick<H, R>(
        &self,
        creature: &mut Creature,
        field: &H,
        obstacles: &[Obstacle],
        rng: &mut R,
        dt: f32,
    ) -> TickOutcome
    where
        H: HeightField + ?Sized,
        R: Rng + ?Sized,
    {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let p = &self.params;

        if creature.wait_timer > 0.0 {
            creature.wait_timer -= dt;
            return TickOutcome::Waiting;
        }

        creature.redirect_timer -= dt;
        if creature.redirect_timer <= 0.0 {
            creature.heading = random_heading(rng);
            creature.redirect_timer = draw_in(rng, p.redirect_min, p.redirect_max);
        }

        let heading = creature.heading.try_normalize().unwrap_or(FALLBACK_HEADING);
        creature.heading = heading;
        let current = Vec2::new(creature.position.x, creature.position.z);
        let next = current + heading * p.speed * dt;

        if !within_disk(next.x, next.y, self.boundary_radius) {
            creature.heading = (-next).try_normalize().unwrap_or(FALLBACK_HEADING);
            creature.redirect_timer = p.bounce_redirect;
            trace!("Creature turned at boundary ({:.1}, {:.1})", next.x, next.y);
            return TickOutcome::HitBoundary;
        }

        if let Some(index) = obstacles.iter().position(|o| o.blocks(next, p.obstacle_margin)) {
            creature.wait_timer = draw_in(rng, p.wait_min, p.wait_max);
            creature.heading = random_heading(rng);
            trace!("Creature blocked by trunk {index}, waiting {:.2}s", creature.wait_timer);
            return TickOutcome::Blocked(index);
        }

        let ground = field.height(next.x, next.y);
        if creature.position.y + p.terrain_epsilon < ground {
            creature.heading = random_heading(rng);
            creature.redirect_timer = p.bounce_redirect;
            trace!("Creature turned at slope ({:.1}, {:.1})", next.x, next.y);
            return TickOutcome::TooSteep;
        }

        creature.position = Vec3::new(next.x, ground + p.rest_offset, next.y);
        TickOutcome::Moved
    }
}

/// Unit heading with a uniformly distributed angle
pub fn random_heading<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::from_angle(rng.random_range(0.0..std::f32::consts::TAU))
}

fn draw_in<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..=hi) } else { lo }
}
