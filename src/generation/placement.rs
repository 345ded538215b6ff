//! Non-overlapping tree placement on the ground disk
//!
//! Trees are placed one at a time by rejection sampling. Each accepted tree
//! becomes an obstacle for the ones after it, so insertion order matters
//! and is preserved in the output. A tree that finds no free spot within
//! the attempt budget is skipped; fewer trees than requested is a normal
//! outcome.

use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{Vec2, Vec3};
use crate::math::{Aabb, within_disk};
use crate::terrain::HeightField;
use super::canopy::fibonacci_sphere;
use super::config::{DiskSampling, PlacementConfig, REFERENCE_TREE_SITES, TreeLayout};

/// A tree accepted by the solver
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedTree {
    pub x: f32,
    pub z: f32,
    /// Footprint radius used for overlap tests; also the canopy sphere radius
    pub canopy_radius: f32,
    /// Terrain height under the trunk
    pub ground_y: f32,
    pub trunk_height: f32,
}

impl PlacedTree {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.z)
    }

    /// Trunk box. One eighth of the trunk is sunk below the ground so it
    /// never floats on a slope.
    pub fn trunk_box(&self, trunk_width: f32) -> Aabb {
        let h = self.trunk_height;
        let center = Vec3::new(self.x, self.ground_y + h / 2.0 - h / 8.0, self.z);
        Aabb::from_center_size(center, Vec3::new(trunk_width, h, trunk_width))
    }

    /// Top of the trunk, where the canopy sphere is centred
    pub fn canopy_center(&self) -> Vec3 {
        Vec3::new(self.x, self.ground_y + self.trunk_height, self.z)
    }

    /// Canopy cubes: edge `canopy_radius`, centred on the canopy sphere
    pub fn canopy_boxes(&self, count: u32) -> Vec<Aabb> {
        let center = self.canopy_center();
        let edge = Vec3::splat(self.canopy_radius);
        fibonacci_sphere(count)
            .map(|dir| Aabb::from_center_size(center + dir * self.canopy_radius, edge))
            .collect()
    }
}

/// Rejection-sampling placer for circular footprints
pub struct PlacementSolver {
    config: PlacementConfig,
    plane_radius: f32,
}

impl PlacementSolver {
    pub fn new(config: PlacementConfig, plane_radius: f32) -> Self {
        Self { config, plane_radius }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Radius of the disk trees must stay inside
    pub fn usable_radius(&self) -> f32 {
        self.plane_radius * self.config.disk_fraction
    }

    /// Place trees according to the configured layout
    pub fn solve<H, R>(&self, field: &H, rng: &mut R) -> Vec<PlacedTree>
    where
        H: HeightField + ?Sized,
        R: Rng + ?Sized,
    {
        let trees = match &self.config.layout {
            TreeLayout::Random => self.solve_random(field, rng),
            TreeLayout::Fixed(sites) => self.solve_fixed(field, sites, rng),
            TreeLayout::Reference => self.solve_fixed(field, &REFERENCE_TREE_SITES, rng),
        };
        info!(
            "Placed {} trees ({} layout, usable radius {:.1})",
            trees.len(),
            layout_name(&self.config.layout),
            self.usable_radius()
        );
        trees
    }

    /// Rejection sampling: `count` trees, each with up to `max_attempts` tries
    pub fn solve_random<H, R>(&self, field: &H, rng: &mut R) -> Vec<PlacedTree>
    where
        H: HeightField + ?Sized,
        R: Rng + ?Sized,
    {
        let mut placed: Vec<PlacedTree> = Vec::with_capacity(self.config.count);

        for index in 0..self.config.count {
            let radius = self.draw_footprint(rng);
            let mut accepted = None;
            for _ in 0..self.config.max_attempts {
                let candidate = self.sample_disk(rng);
                if self.is_clear(candidate, radius, &placed) {
                    accepted = Some(candidate);
                    break;
                }
            }

            match accepted {
                Some(site) => {
                    let tree = self.make_tree(field, site, radius, rng);
                    debug!("Tree {index} at ({:.2}, {:.2}) r={:.2}", tree.x, tree.z, radius);
                    placed.push(tree);
                }
                None => warn!(
                    "Skipping tree {index}: no free spot after {} attempts",
                    self.config.max_attempts
                ),
            }
        }
        placed
    }

    /// Validate a fixed list of sites, in order, with the same rules
    pub fn solve_fixed<H, R>(&self, field: &H, sites: &[[f32; 2]], rng: &mut R) -> Vec<PlacedTree>
    where
        H: HeightField + ?Sized,
        R: Rng + ?Sized,
    {
        let mut placed: Vec<PlacedTree> = Vec::with_capacity(sites.len());
        for &[x, z] in sites {
            let radius = self.draw_footprint(rng);
            let site = Vec2::new(x, z);
            if self.is_clear(site, radius, &placed) {
                placed.push(self.make_tree(field, site, radius, rng));
            } else {
                warn!("Skipping tree site ({x}, {z}): overlaps a tree or leaves the disk");
            }
        }
        placed
    }

    /// A candidate is clear when it lies in the usable disk and keeps
    /// `r + r' + safety_margin` from every placed footprint.
    pub fn is_clear(&self, candidate: Vec2, radius: f32, placed: &[PlacedTree]) -> bool {
        within_disk(candidate.x, candidate.y, self.usable_radius())
            && placed.iter().all(|other| {
                candidate.distance(other.position())
                    >= radius + other.canopy_radius + self.config.safety_margin
            })
    }

    /// Uniform angle, radial distance per [`DiskSampling`]
    pub fn sample_disk<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let u: f32 = rng.random();
        let r = match self.config.sampling {
            DiskSampling::Linear => u,
            DiskSampling::AreaUniform => u.sqrt(),
        } * self.usable_radius();
        Vec2::new(angle.cos() * r, angle.sin() * r)
    }

    fn draw_footprint<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        draw_in(rng, self.config.footprint_min, self.config.footprint_max)
    }

    fn make_tree<H, R>(&self, field: &H, site: Vec2, radius: f32, rng: &mut R) -> PlacedTree
    where
        H: HeightField + ?Sized,
        R: Rng + ?Sized,
    {
        PlacedTree {
            x: site.x,
            z: site.y,
            canopy_radius: radius,
            ground_y: field.height(site.x, site.y),
            trunk_height: draw_in(rng, self.config.trunk_height_min, self.config.trunk_height_max),
        }
    }
}

fn layout_name(layout: &TreeLayout) -> &'static str {
    match layout {
        TreeLayout::Random => "random",
        TreeLayout::Fixed(_) => "fixed",
        TreeLayout::Reference => "reference",
    }
}

/// Uniform draw from `[lo, hi]`, tolerating an empty range
fn draw_in<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..=hi) } else { lo }
}
