//! Tree placement configuration, extracted from SceneConfig.

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Tree sites from the hand-authored layout. The first lies outside the
/// usable disk of a 240-unit plane and is always rejected there.
pub const REFERENCE_TREE_SITES: [[f32; 2]; 10] = [
    [60.0, 300.0],
    [-70.0, 80.0],
    [60.0, -50.0],
    [-120.0, -60.0],
    [30.0, -100.0],
    [90.0, 30.0],
    [80.0, 110.0],
    [-60.0, -160.0],
    [120.0, 40.0],
    [0.0, 120.0],
];

/// How candidate points are drawn inside the placement disk
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiskSampling {
    /// Radial distance `u * R`: denser toward the center
    Linear,
    /// Radial distance `sqrt(u) * R`: uniform over the disk area
    AreaUniform,
}

/// Where tree candidates come from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "sites", rename_all = "snake_case")]
pub enum TreeLayout {
    /// Rejection sampling inside the disk
    Random,
    /// A fixed candidate list, validated with the same rules
    Fixed(Vec<[f32; 2]>),
    /// [`REFERENCE_TREE_SITES`]
    Reference,
}

/// Configuration for tree placement.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub layout: TreeLayout,
    /// Trees requested in `Random` layout
    pub count: usize,
    /// Footprint (canopy) radius range
    pub footprint_min: f32,
    pub footprint_max: f32,
    /// Extra gap required between two footprints
    pub safety_margin: f32,
    /// Candidate points tried per tree before it is skipped
    pub max_attempts: u32,
    /// Fraction of the plane radius trees may occupy
    pub disk_fraction: f32,
    pub sampling: DiskSampling,
    pub trunk_height_min: f32,
    pub trunk_height_max: f32,
    /// Edge length of the square trunk
    pub trunk_width: f32,
    /// Collision radius of a trunk for the wandering creature
    pub trunk_radius: f32,
    /// Cubes scattered over each canopy sphere
    pub canopy_cubes: u32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            layout: TreeLayout::Random,
            count: 10,
            footprint_min: 7.5,
            footprint_max: 10.0,
            safety_margin: 2.0,
            max_attempts: 100,
            disk_fraction: 0.95,
            sampling: DiskSampling::AreaUniform,
            trunk_height_min: 20.0,
            trunk_height_max: 30.0,
            trunk_width: 5.0,
            trunk_radius: 2.5,
            canopy_cubes: 10,
        }
    }
}

impl PlacementConfig {
    pub fn validate(&self) -> Result<()> {
        if !positive_range(self.footprint_min, self.footprint_max) {
            return Err(Error::InvalidConfig(format!(
                "trees: footprint range [{}, {}] must be positive and ordered",
                self.footprint_min, self.footprint_max
            )));
        }
        if !positive_range(self.trunk_height_min, self.trunk_height_max) {
            return Err(Error::InvalidConfig(format!(
                "trees: trunk height range [{}, {}] must be positive and ordered",
                self.trunk_height_min, self.trunk_height_max
            )));
        }
        let sizes = [self.safety_margin, self.trunk_width, self.trunk_radius];
        if sizes.iter().any(|v| !v.is_finite())
            || self.safety_margin < 0.0
            || self.trunk_width <= 0.0
            || self.trunk_radius < 0.0
        {
            return Err(Error::InvalidConfig(
                "trees: margins and trunk sizes must be finite and not negative".into(),
            ));
        }
        if !(self.disk_fraction > 0.0 && self.disk_fraction <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "trees: disk_fraction {} must lie in (0, 1]",
                self.disk_fraction
            )));
        }
        Ok(())
    }
}

/// Finite, positive and ordered `[lo, hi]`, safe to draw from
pub(crate) fn positive_range(lo: f32, hi: f32) -> bool {
    lo.is_finite() && hi.is_finite() && lo > 0.0 && lo <= hi
}
