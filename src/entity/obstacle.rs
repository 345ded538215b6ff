//! Circular obstacles on the ground plane

use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;
use crate::generation::PlacedTree;

/// A vertical cylinder the creature must not walk into
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub z: f32,
    pub radius: f32,
}

impl Obstacle {
    pub fn new(x: f32, z: f32, radius: f32) -> Self {
        Self { x, z, radius }
    }

    /// True when `point` is closer than `margin + radius` to the center
    #[inline]
    pub fn blocks(&self, point: Vec2, margin: f32) -> bool {
        point.distance(Vec2::new(self.x, self.z)) < margin + self.radius
    }
}

/// One trunk obstacle per placed tree, in placement order
pub fn trunk_obstacles(trees: &[PlacedTree], trunk_radius: f32) -> Vec<Obstacle> {
    trees
        .iter()
        .map(|t| Obstacle::new(t.x, t.z, trunk_radius))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_threshold() {
        let trunk = Obstacle::new(10.0, 0.0, 2.5);
        assert!(trunk.blocks(Vec2::new(4.0, 0.0), 4.0));
        assert!(!trunk.blocks(Vec2::new(3.5, 0.0), 4.0));
        assert!(!trunk.blocks(Vec2::new(3.0, 0.0), 4.0));
    }

    #[test]
    fn test_trunk_obstacles_follow_trees() {
        let trees = [
            PlacedTree { x: 1.0, z: 2.0, canopy_radius: 8.0, ground_y: 0.0, trunk_height: 20.0 },
            PlacedTree { x: -3.0, z: 4.0, canopy_radius: 9.0, ground_y: 1.0, trunk_height: 25.0 },
        ];
        let obstacles = trunk_obstacles(&trees, 2.5);
        assert_eq!(obstacles, vec![Obstacle::new(1.0, 2.0, 2.5), Obstacle::new(-3.0, 4.0, 2.5)]);
    }
}
