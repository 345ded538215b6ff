//! Spherical-Fibonacci canopy packing

use crate::core::types::Vec3;

/// Unit directions of `count` points spread over a sphere.
///
/// Point `j` sits at polar angle `acos(-1 + (2j + 1) / count)` and azimuth
/// `pi * (1 + sqrt 5) * j`, so the points spiral from the bottom pole up.
pub fn fibonacci_sphere(count: u32) -> impl Iterator<Item = Vec3> {
    let n = count.max(1) as f32;
    let golden = std::f32::consts::PI * (1.0 + 5.0_f32.sqrt());
    (0..count).map(move |j| {
        let j = j as f32;
        let phi = (-1.0 + (2.0 * j + 1.0) / n).acos();
        let theta = golden * j;
        Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin())
    })
}
