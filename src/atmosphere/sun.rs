//! Sun position calculation.
//!
//! The sun circles the origin in the XY plane: it rises on +X at cycle
//! start, passes overhead a quarter of the way through and sets on -X at
//! the halfway mark.

/// Sun position for cycle `progress` on an orbit of `radius`.
pub fn compute_sun_position(progress: f32, radius: f32) -> glam::Vec3 {
    let angle = progress * std::f32::consts::TAU;
    glam::Vec3::new(angle.cos() * radius, angle.sin() * radius, 0.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
