//! Click picking and the selection marker

use knoll_protocol::SelectionMarker;
use serde::{Deserialize, Serialize};

use crate::core::types::Vec3;
use crate::math::{Aabb, Ray};
use crate::terrain::HeightField;

/// Something the user can click on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selected {
    Creature,
    /// Tree by placement index
    Tree(usize),
}

/// Selection marker ring parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Ring outer radius relative to the object's bounding sphere
    pub radius_scale: f32,
    /// Inner radius relative to the outer one
    pub inner_ratio: f32,
    /// Height of the ring above the ground
    pub lift: f32,
    /// Pixels between the object's screen position and its label
    pub label_offset_px: f32,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self { radius_scale: 1.2, inner_ratio: 0.95, lift: 0.1, label_offset_px: 20.0 }
    }
}

/// Closest candidate hit by `ray`, if any. Ground and sky are never candidates.
pub fn pick(ray: &Ray, candidates: &[(Selected, Aabb)]) -> Option<Selected> {
    ray.nearest_hit(candidates.iter().map(|(_, aabb)| aabb))
        .map(|(index, _)| candidates[index].0)
}

/// Ring on the ground under an object with the given bounds
pub fn marker_for<H: HeightField + ?Sized>(bounds: &Aabb, field: &H, config: &MarkerConfig) -> SelectionMarker {
    let center = bounds.center();
    let outer = bounds.bounding_radius() * config.radius_scale;
    SelectionMarker {
        center: Vec3::new(center.x, field.height(center.x, center.z) + config.lift, center.z).to_array(),
        inner_radius: outer * config.inner_ratio,
        outer_radius: outer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::HillTerrain;

    #[test]
    fn test_pick_nearest() {
        let candidates = [
            (Selected::Tree(0), Aabb::from_center_size(Vec3::new(0.0, 0.0, -50.0), Vec3::splat(5.0))),
            (Selected::Creature, Aabb::from_center_size(Vec3::new(0.0, 0.0, -10.0), Vec3::splat(2.0))),
        ];
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert_eq!(pick(&ray, &candidates), Some(Selected::Creature));
    }

    #[test]
    fn test_pick_miss() {
        let candidates = [(Selected::Tree(3), Aabb::from_center_size(Vec3::new(100.0, 0.0, 0.0), Vec3::ONE))];
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert_eq!(pick(&ray, &candidates), None);
    }

    #[test]
    fn test_marker_for_creature() {
        let terrain = HillTerrain::default();
        let bounds = Aabb::from_center_size(Vec3::new(0.0, 5.0, 0.0), Vec3::splat(2.0));
        let marker = marker_for(&bounds, &terrain, &MarkerConfig::default());
        let outer = 3.0_f32.sqrt() * 1.2;
        assert!((marker.outer_radius - outer).abs() < 1e-5);
        assert!((marker.inner_radius - outer * 0.95).abs() < 1e-5);
        assert!((marker.center[1] - 4.1).abs() < 1e-5);
    }
}
