//! Finite-step camera focus transition
//!
//! A transition interpolates camera position and target linearly over a
//! fixed number of ticks. It is `Active` until the last step has been
//! applied and `Done` afterwards. The owner re-applies the camera
//! constraint after each step, and may drop the transition at any time to
//! cancel it.

use serde::{Deserialize, Serialize};

use crate::core::camera::OrbitCamera;
use crate::core::types::Vec3;
use crate::terrain::HeightField;

/// Focus move parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    /// Ticks the move takes
    pub steps: u32,
    /// Distance kept from the focused object
    pub distance: f32,
    /// Minimum height of the destination above the ground
    pub min_clearance: f32,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self { steps: 30, distance: 20.0, min_clearance: 5.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionState {
    Active,
    Done,
}

/// Linear camera move from a start pose to an end pose
#[derive(Clone, Debug)]
pub struct CameraTransition {
    start_position: Vec3,
    start_target: Vec3,
    end_position: Vec3,
    end_target: Vec3,
    step: u32,
    total: u32,
}

impl CameraTransition {
    /// Start a move from the camera's current pose
    pub fn new(camera: &OrbitCamera, end_position: Vec3, end_target: Vec3, total_steps: u32) -> Self {
        Self {
            start_position: camera.position,
            start_target: camera.target,
            end_position,
            end_target,
            step: 0,
            total: total_steps.max(1),
        }
    }

    /// Move toward `object`, stopping `config.distance` short of it along
    /// the current line of sight, never lower than the ground clearance.
    pub fn focus_on<H: HeightField + ?Sized>(
        camera: &OrbitCamera,
        object: Vec3,
        field: &H,
        config: &FocusConfig,
    ) -> Self {
        let end = focus_position(camera.position, object, field, config);
        Self::new(camera, end, object, config.steps)
    }

    /// Apply the next step to `camera`
    pub fn advance(&mut self, camera: &mut OrbitCamera) -> TransitionState {
        if self.step < self.total {
            self.step += 1;
            let t = self.step as f32 / self.total as f32;
            camera.position = self.start_position.lerp(self.end_position, t);
            camera.target = self.start_target.lerp(self.end_target, t);
        }
        self.state()
    }

    pub fn state(&self) -> TransitionState {
        if self.step < self.total { TransitionState::Active } else { TransitionState::Done }
    }

    /// Fraction of steps applied
    pub fn progress(&self) -> f32 {
        self.step as f32 / self.total as f32
    }

    pub fn end_target(&self) -> Vec3 {
        self.end_target
    }
}

/// Camera destination for focusing on `object` from `camera_position`
pub fn focus_position<H: HeightField + ?Sized>(
    camera_position: Vec3,
    object: Vec3,
    field: &H,
    config: &FocusConfig,
) -> Vec3 {
    let dir = (object - camera_position).try_normalize().unwrap_or(Vec3::NEG_Z);
    let mut end = object - dir * config.distance;
    end.y = end.y.max(field.height(end.x, end.z) + config.min_clearance);
    end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::height_field::FlatTerrain;

    #[test]
    fn test_thirty_steps_to_done() {
        let mut camera = OrbitCamera::default();
        let mut transition = CameraTransition::new(&camera, Vec3::new(0.0, 50.0, 0.0), Vec3::ZERO, 30);

        for i in 1..30 {
            assert_eq!(transition.advance(&mut camera), TransitionState::Active, "step {i}");
        }
        assert_eq!(transition.advance(&mut camera), TransitionState::Done);
        assert_eq!(camera.position, Vec3::new(0.0, 50.0, 0.0));
        assert_eq!(camera.target, Vec3::ZERO);

        // Further steps are no-ops
        camera.position = Vec3::ONE;
        assert_eq!(transition.advance(&mut camera), TransitionState::Done);
        assert_eq!(camera.position, Vec3::ONE);
    }

    #[test]
    fn test_midpoint_is_linear() {
        let mut camera = OrbitCamera::new(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO, 60.0, 1.0);
        let mut transition =
            CameraTransition::new(&camera, Vec3::new(10.0, 10.0, 0.0), Vec3::new(10.0, 0.0, 0.0), 4);
        transition.advance(&mut camera);
        transition.advance(&mut camera);
        assert!((camera.position.x - 5.0).abs() < 1e-5);
        assert!((camera.target.x - 5.0).abs() < 1e-5);
        assert!((transition.progress() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_focus_position_backs_off() {
        let field = FlatTerrain(0.0);
        let end = focus_position(Vec3::new(0.0, 0.0, 100.0), Vec3::new(0.0, 10.0, 0.0), &field, &FocusConfig::default());
        // Looking along -Z, so the camera ends 20 units behind the object on +Z
        assert!((end.z - 20.0).abs() < 0.5);
        assert!(end.y >= 5.0);
    }

    #[test]
    fn test_focus_position_respects_clearance() {
        let field = FlatTerrain(30.0);
        let end = focus_position(Vec3::new(0.0, 10.0, 100.0), Vec3::new(0.0, 10.0, 0.0), &field, &FocusConfig::default());
        assert_eq!(end.y, 35.0);
    }

    #[test]
    fn test_zero_steps_treated_as_one() {
        let mut camera = OrbitCamera::default();
        let mut transition = CameraTransition::new(&camera, Vec3::ZERO, Vec3::X, 0);
        assert_eq!(transition.advance(&mut camera), TransitionState::Done);
        assert_eq!(camera.target, Vec3::X);
    }
}
