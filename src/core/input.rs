//! Pointer drag tracking

use crate::core::types::Vec2;
use knoll_protocol::BUTTON_PRIMARY;

/// Turns pointer down/move/up events into drag deltas.
///
/// Only the primary button starts a drag; releasing any button ends it.
#[derive(Debug, Default)]
pub struct PointerTracker {
    dragging: bool,
    last: Vec2,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_down(&mut self, x: f32, y: f32, button: u8) {
        if button == BUTTON_PRIMARY {
            self.dragging = true;
            self.last = Vec2::new(x, y);
        }
    }

    /// Returns the movement since the previous event while dragging
    pub fn pointer_move(&mut self, x: f32, y: f32) -> Option<Vec2> {
        if !self.dragging {
            return None;
        }
        let pos = Vec2::new(x, y);
        let delta = pos - self.last;
        self.last = pos;
        Some(delta)
    }

    pub fn pointer_up(&mut self, _button: u8) {
        self.dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_deltas() {
        let mut tracker = PointerTracker::new();
        assert!(tracker.pointer_move(5.0, 5.0).is_none());

        tracker.pointer_down(10.0, 10.0, BUTTON_PRIMARY);
        assert_eq!(tracker.pointer_move(13.0, 8.0), Some(Vec2::new(3.0, -2.0)));
        assert_eq!(tracker.pointer_move(14.0, 8.0), Some(Vec2::new(1.0, 0.0)));

        tracker.pointer_up(BUTTON_PRIMARY);
        assert!(!tracker.is_dragging());
        assert!(tracker.pointer_move(20.0, 20.0).is_none());
    }

    #[test]
    fn test_secondary_button_does_not_drag() {
        let mut tracker = PointerTracker::new();
        tracker.pointer_down(0.0, 0.0, 2);
        assert!(!tracker.is_dragging());
    }
}
