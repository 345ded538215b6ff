//! Screen-anchored labels for the selected object

use knoll_protocol::{LabelKind, OverlayLabel};

use crate::core::camera::OrbitCamera;
use crate::core::types::{Vec2, Vec3};

/// Label text for a label kind
pub fn label_text(kind: &LabelKind) -> String {
    match kind {
        LabelKind::Creature { food, water } => format!("Food: {food}\nWater: {water}"),
        LabelKind::Tree { x, z } => format!("X: {x:.2}\nZ: {z:.2}"),
    }
}

/// Label for an object at `world`, lifted `offset_px` above its projection.
/// `None` while the object is behind the camera.
pub fn project_label(
    kind: LabelKind,
    world: Vec3,
    camera: &OrbitCamera,
    viewport: Vec2,
    offset_px: f32,
) -> Option<OverlayLabel> {
    let screen = camera.project_to_screen(world, viewport)?;
    Some(OverlayLabel {
        anchor: [screen.x, screen.y - offset_px],
        text: label_text(&kind),
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creature_text() {
        let text = label_text(&LabelKind::Creature { food: 100.0, water: 42.5 });
        assert_eq!(text, "Food: 100\nWater: 42.5");
    }

    #[test]
    fn test_tree_text_two_decimals() {
        let text = label_text(&LabelKind::Tree { x: 60.0, z: -49.996 });
        assert_eq!(text, "X: 60.00\nZ: -50.00");
    }

    #[test]
    fn test_label_lifted_above_target() {
        let camera = OrbitCamera::default();
        let viewport = Vec2::new(800.0, 600.0);
        let label = project_label(LabelKind::Tree { x: 30.0, z: 0.0 }, camera.target, &camera, viewport, 20.0).unwrap();
        assert!((label.anchor[0] - 400.0).abs() < 0.5);
        assert!((label.anchor[1] - 280.0).abs() < 0.5);
    }

    #[test]
    fn test_no_label_behind_camera() {
        let camera = OrbitCamera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 60.0, 1.0);
        let label = project_label(
            LabelKind::Creature { food: 1.0, water: 1.0 },
            Vec3::new(0.0, 0.0, 30.0),
            &camera,
            Vec2::new(100.0, 100.0),
            20.0,
        );
        assert!(label.is_none());
    }
}
