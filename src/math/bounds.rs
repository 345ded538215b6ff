//! Radial bounds for mobile entities

use crate::core::types::Vec3;

/// Spherical shell `[min_radius, max_radius]` around a moving center.
///
/// The camera uses this to stay inside the sky sphere while orbiting its
/// target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialBounds {
    pub min_radius: f32,
    pub max_radius: f32,
}

impl RadialBounds {
    pub fn new(min_radius: f32, max_radius: f32) -> Self {
        Self { min_radius, max_radius }
    }

    /// Rescale `position - center` into the shell, keeping its direction.
    ///
    /// A position exactly at the center has no direction; it is pushed
    /// out straight up so the result never carries a NaN.
    pub fn enforce(&self, position: Vec3, center: Vec3) -> Vec3 {
        let offset = position - center;
        let distance = offset.length();

        if distance > self.max_radius {
            center + offset * (self.max_radius / distance)
        } else if distance < self.min_radius {
            let dir = offset.try_normalize().unwrap_or(Vec3::Y);
            center + dir * self.min_radius
        } else {
            position
        }
    }

    pub fn contains(&self, position: Vec3, center: Vec3) -> bool {
        let distance = position.distance(center);
        distance >= self.min_radius && distance <= self.max_radius
    }
}

/// Planar containment test against a disk around the origin.
///
/// The creature is kept on the ground disk by rejecting steps that fail
/// this test rather than by recentring it.
#[inline]
pub fn within_disk(x: f32, z: f32, radius: f32) -> bool {
    x * x + z * z <= radius * radius
}
