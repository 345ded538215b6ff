//! Scene population: tree placement and canopy packing.

pub mod config;
pub mod canopy;
pub mod placement;

pub use config::{DiskSampling, PlacementConfig, REFERENCE_TREE_SITES, TreeLayout};
pub use canopy::fibonacci_sphere;
pub use placement::{PlacedTree, PlacementSolver};
