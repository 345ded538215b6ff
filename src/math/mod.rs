//! Geometric helpers: boxes, rays, radial bounds

pub mod aabb;
pub mod bounds;
pub mod ray;

pub use aabb::Aabb;
pub use bounds::{RadialBounds, within_disk};
pub use ray::Ray;
