//! The wandering creature and what it steers around

pub mod creature;
pub mod obstacle;
pub mod wander;

pub use creature::{CREATURE_SIZE, Creature, STAT_MAX, Vitals, WanderState, clamp_stat};
pub use obstacle::{Obstacle, trunk_obstacles};
pub use wander::{TickOutcome, WanderController, WanderParams};
