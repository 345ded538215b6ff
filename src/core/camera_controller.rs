//! Orbit camera controller

use std::f32::consts::FRAC_PI_2;

use knoll_protocol::Key;

use crate::core::camera::{CameraConfig, OrbitCamera};
use crate::core::types::Vec3;
use crate::math::RadialBounds;
use crate::terrain::{HeightField, clamp_to_ground};

/// Keeps the camera inside the sky sphere and above the ground.
///
/// Applied after every camera mutation: first the shell around the target,
/// then the ground clamp.
#[derive(Clone, Copy, Debug)]
pub struct CameraConstraint {
    pub bounds: RadialBounds,
    pub ground_margin: f32,
}

impl CameraConstraint {
    pub fn new(config: &CameraConfig, sphere_radius: f32) -> Self {
        Self {
            bounds: RadialBounds::new(config.min_distance, sphere_radius * config.max_distance_factor),
            ground_margin: config.ground_margin,
        }
    }

    pub fn apply<H: HeightField + ?Sized>(&self, camera: &mut OrbitCamera, field: &H) {
        let shelled = self.bounds.enforce(camera.position, camera.target);
        camera.position = clamp_to_ground(field, shelled, self.ground_margin);
    }
}

/// Spherical coordinates of an offset, Y up.
///
/// `phi` is the polar angle from +Y, `theta` the azimuth from +Z toward +X.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Spherical {
    radius: f32,
    phi: f32,
    theta: f32,
}

impl Spherical {
    fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self { radius, phi: 0.0, theta: 0.0 };
        }
        Self {
            radius,
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
            theta: v.x.atan2(v.z),
        }
    }

    fn to_offset(self) -> Vec3 {
        let ring = self.phi.sin() * self.radius;
        Vec3::new(ring * self.theta.sin(), self.phi.cos() * self.radius, ring * self.theta.cos())
    }
}

/// Mouse-drag orbit, wheel zoom and arrow-key panning around the target
pub struct OrbitController {
    /// Radians of rotation per pixel dragged
    pub rotate_speed: f32,
    /// Relative zoom per wheel notch
    pub zoom_step: f32,
    /// World units moved per arrow key press
    pub pan_step: f32,
    /// Polar angle limits, radians from straight up
    pub min_polar: f32,
    pub max_polar: f32,
    constraint: CameraConstraint,
}

impl OrbitController {
    /// Create new controller
    pub fn new(constraint: CameraConstraint) -> Self {
        Self {
            rotate_speed: 0.01,
            zoom_step: 0.1,
            pan_step: 2.0,
            min_polar: 0.1,
            max_polar: FRAC_PI_2 - 0.05,
            constraint,
        }
    }

    pub fn constraint(&self) -> &CameraConstraint {
        &self.constraint
    }

    /// Re-apply shell and ground limits
    pub fn constrain<H: HeightField + ?Sized>(&self, camera: &mut OrbitCamera, field: &H) {
        self.constraint.apply(camera, field);
    }

    /// Orbit around the target by a drag of (dx, dy) pixels
    pub fn orbit<H: HeightField + ?Sized>(&self, camera: &mut OrbitCamera, dx: f32, dy: f32, field: &H) {
        let mut s = Spherical::from_offset(camera.position - camera.target);
        s.theta -= dx * self.rotate_speed;
        s.phi = (s.phi - dy * self.rotate_speed).clamp(self.min_polar, self.max_polar);
        s.radius = s.radius.clamp(self.constraint.bounds.min_radius, self.constraint.bounds.max_radius);

        camera.position = camera.target + s.to_offset();
        self.constrain(camera, field);
    }

    /// Zoom out for positive wheel deltas, in for negative ones
    pub fn zoom<H: HeightField + ?Sized>(&self, camera: &mut OrbitCamera, delta_y: f32, field: &H) {
        if delta_y == 0.0 || delta_y.is_nan() {
            return;
        }
        let factor = if delta_y > 0.0 { 1.0 + self.zoom_step } else { 1.0 - self.zoom_step };
        let offset = (camera.position - camera.target) * factor;
        let radius = offset
            .length()
            .clamp(self.constraint.bounds.min_radius, self.constraint.bounds.max_radius);
        let dir = offset.try_normalize().unwrap_or(Vec3::Y);

        camera.position = camera.target + dir * radius;
        self.constrain(camera, field);
    }

    /// Arrow keys slide camera and target together.
    ///
    /// Left/Right move along world X; Up/Down move along the horizontal
    /// viewing direction.
    pub fn pan<H: HeightField + ?Sized>(&self, camera: &mut OrbitCamera, key: Key, field: &H) {
        let step = self.pan_step;
        let shift = match key {
            Key::ArrowLeft => Vec3::new(-step, 0.0, 0.0),
            Key::ArrowRight => Vec3::new(step, 0.0, 0.0),
            Key::ArrowUp => camera.horizontal_forward() * step,
            Key::ArrowDown => camera.horizontal_forward() * -step,
            Key::Other => return,
        };
        camera.position += shift;
        camera.target += shift;
        self.constrain(camera, field);
    }
}
