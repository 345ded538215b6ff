//! Ground clamping against a height field

use crate::core::types::Vec3;
use super::HeightField;

/// Lift `position` so it sits at least `margin` above the terrain.
/// X and Z are never changed.
pub fn clamp_to_ground<H: HeightField + ?Sized>(field: &H, position: Vec3, margin: f32) -> Vec3 {
    let floor = field.height(position.x, position.z) + margin;
    if position.y < floor {
        Vec3::new(position.x, floor, position.z)
    } else {
        position
    }
}

/// Point on the terrain surface at (x, z), raised by `offset`
pub fn ground_point<H: HeightField + ?Sized>(field: &H, x: f32, z: f32, offset: f32) -> Vec3 {
    Vec3::new(x, field.height(x, z) + offset, z)
}
