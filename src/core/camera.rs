//! Orbit camera for the hill scene

use serde::{Deserialize, Serialize};

use crate::core::types::{Mat4, Vec2, Vec3, Vec4};
use crate::math::Ray;

/// Camera placement and projection settings
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Closest the camera may get to its target
    pub min_distance: f32,
    /// Fraction of the sky sphere radius the camera may orbit out to
    pub max_distance_factor: f32,
    /// Height kept between the camera and the ground below it
    pub ground_margin: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [60.0, 120.0, 60.0],
            target: [30.0, 0.0, 0.0],
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            min_distance: 5.0,
            max_distance_factor: 0.98,
            ground_margin: 2.0,
        }
    }
}

/// Perspective camera that always looks at a target point
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    /// World position
    pub position: Vec3,
    /// Point the camera looks at and orbits around
    pub target: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl OrbitCamera {
    /// Create a new camera
    pub fn new(position: Vec3, target: Vec3, fov_y_degrees: f32, aspect: f32) -> Self {
        Self {
            position,
            target,
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near: 0.1,
            far: 1000.0,
        }
    }

    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self::new(
            Vec3::from_array(config.position),
            Vec3::from_array(config.target),
            config.fov_degrees,
            aspect,
        );
        camera.near = config.near;
        camera.far = config.far;
        camera
    }

    /// Get view matrix (world to camera space)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Get projection matrix (camera to clip space)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Get combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get inverse view-projection matrix (for ray generation)
    pub fn view_projection_inverse(&self) -> Mat4 {
        self.view_projection().inverse()
    }

    /// Unit direction from position to target; -Z when they coincide
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    /// Viewing direction flattened onto the ground plane.
    ///
    /// Re-normalized so keyboard steps cover the same distance at any pitch.
    /// Looking straight down falls back to -Z.
    pub fn horizontal_forward(&self) -> Vec3 {
        let f = self.forward();
        Vec3::new(f.x, 0.0, f.z).try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    /// Update aspect ratio (call on viewport resize)
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Project a world point to pixel coordinates (origin top-left).
    /// Returns `None` for points behind the camera.
    pub fn project_to_screen(&self, world: Vec3, viewport: Vec2) -> Option<Vec2> {
        let clip = self.view_projection() * Vec4::new(world.x, world.y, world.z, 1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x * 0.5 + 0.5) * viewport.x,
            (-ndc.y * 0.5 + 0.5) * viewport.y,
        ))
    }

    /// Picking ray through a pixel
    pub fn screen_ray(&self, screen: Vec2, viewport: Vec2) -> Ray {
        let ndc_x = screen.x / viewport.x.max(1.0) * 2.0 - 1.0;
        let ndc_y = -(screen.y / viewport.y.max(1.0) * 2.0 - 1.0);

        // glam's perspective_rh maps depth to [0, 1]
        let inv = self.view_projection_inverse();
        let near = inv.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        let direction = (far - near).try_normalize().unwrap_or_else(|| self.forward());
        Ray::new(near, direction)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), 16.0 / 9.0)
    }
}
