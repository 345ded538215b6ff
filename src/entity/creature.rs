//! Creature state: position, steering timers, vitals

use serde::{Deserialize, Serialize};

use crate::core::types::{Vec2, Vec3};
use crate::math::Aabb;
use crate::terrain::{HeightField, ground_point};

/// Upper bound of a vital stat
pub const STAT_MAX: f32 = 100.0;

/// Edge length of the creature's box
pub const CREATURE_SIZE: f32 = 2.0;

/// Clamp a vital stat into `[0, STAT_MAX]`
#[inline]
pub fn clamp_stat(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, STAT_MAX) }
}

/// Food and water levels, always within `[0, 100]`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    food: f32,
    water: f32,
}

impl Vitals {
    pub fn new(food: f32, water: f32) -> Self {
        Self { food: clamp_stat(food), water: clamp_stat(water) }
    }

    pub fn food(&self) -> f32 {
        self.food
    }

    pub fn water(&self) -> f32 {
        self.water
    }

    pub fn set_food(&mut self, value: f32) {
        self.food = clamp_stat(value);
    }

    pub fn set_water(&mut self, value: f32) {
        self.water = clamp_stat(value);
    }
}

impl Default for Vitals {
    fn default() -> Self {
        Self::new(STAT_MAX, STAT_MAX)
    }
}

/// Steering state, derived from the timers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WanderState {
    Moving,
    /// Paused after bumping into an obstacle
    Waiting,
}

/// The single autonomous entity in the scene
#[derive(Clone, Debug)]
pub struct Creature {
    /// Center of the creature's box
    pub position: Vec3,
    /// Unit heading on the XZ plane (`y` is world Z)
    pub heading: Vec2,
    /// Seconds until the next forced heading change
    pub redirect_timer: f32,
    /// Seconds left to stand still
    pub wait_timer: f32,
    pub vitals: Vitals,
}

impl Creature {
    pub fn new(position: Vec3, heading: Vec2) -> Self {
        Self {
            position,
            heading,
            redirect_timer: 0.0,
            wait_timer: 0.0,
            vitals: Vitals::default(),
        }
    }

    /// Creature resting `rest_offset` above the terrain at (x, z)
    pub fn spawn<H: HeightField + ?Sized>(field: &H, x: f32, z: f32, rest_offset: f32) -> Self {
        Self::new(ground_point(field, x, z, rest_offset), Vec2::X)
    }

    pub fn state(&self) -> WanderState {
        if self.wait_timer > 0.0 { WanderState::Waiting } else { WanderState::Moving }
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_center_size(self.position, Vec3::splat(CREATURE_SIZE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::HillTerrain;

    #[test]
    fn test_clamp_stat() {
        assert_eq!(clamp_stat(-5.0), 0.0);
        assert_eq!(clamp_stat(42.0), 42.0);
        assert_eq!(clamp_stat(150.0), 100.0);
        assert_eq!(clamp_stat(f32::NAN), 0.0);
    }

    #[test]
    fn test_vitals_setters_clamp() {
        let mut vitals = Vitals::default();
        assert_eq!((vitals.food(), vitals.water()), (100.0, 100.0));
        vitals.set_food(120.0);
        vitals.set_water(-1.0);
        assert_eq!((vitals.food(), vitals.water()), (100.0, 0.0));
    }

    #[test]
    fn test_spawn_rests_on_ground() {
        let terrain = HillTerrain::default();
        let creature = Creature::spawn(&terrain, 0.0, 0.0, 1.0);
        assert_eq!(creature.position, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(creature.state(), WanderState::Moving);
    }

    #[test]
    fn test_bounding_box_is_two_units() {
        let creature = Creature::new(Vec3::new(1.0, 2.0, 3.0), Vec2::X);
        let aabb = creature.bounding_box();
        assert_eq!(aabb.min, Vec3::new(0.0, 1.0, 2.0));
        assert_eq!(aabb.max, Vec3::new(2.0, 3.0, 4.0));
    }
}
