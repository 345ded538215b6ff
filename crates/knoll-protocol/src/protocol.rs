//! Input and overlay protocol - JSON event/report definitions

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while decoding protocol lines
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Pointer button ids as reported by the host
pub const BUTTON_PRIMARY: u8 = 0;

/// Keys the scene reacts to, named after DOM `KeyboardEvent.key` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    /// Any other key; ignored by the scene
    Other,
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        match name.as_str() {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            _ => Key::Other,
        }
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        match key {
            Key::ArrowLeft => "ArrowLeft",
            Key::ArrowRight => "ArrowRight",
            Key::ArrowUp => "ArrowUp",
            Key::ArrowDown => "ArrowDown",
            Key::Other => "Other",
        }
        .to_string()
    }
}

/// Events sent from the input collaborator to the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Pointer pressed at screen coordinates
    PointerDown { x: f32, y: f32, button: u8 },
    /// Pointer moved to screen coordinates
    PointerMove { x: f32, y: f32 },
    /// Pointer released
    PointerUp { button: u8 },
    /// Wheel scrolled; positive delta zooms out
    Wheel { delta_y: f32 },
    /// Key pressed
    KeyDown { key: Key },
    /// Click (press and release without drag) at screen coordinates
    Click { x: f32, y: f32 },
    /// Viewport resized
    Resize { width: u32, height: u32 },
}

/// An input event scheduled for a given frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedInput {
    pub frame: u64,
    pub event: InputEvent,
}

/// Parse a JSON-lines input script. Blank lines and `#` comments are skipped.
///
/// The result is sorted by frame; events sharing a frame keep file order.
pub fn parse_script(text: &str) -> Result<Vec<ScriptedInput>, ProtocolError> {
    let mut inputs = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let input: ScriptedInput = serde_json::from_str(line)
            .map_err(|source| ProtocolError::Json { line: idx + 1, source })?;
        inputs.push(input);
    }
    inputs.sort_by_key(|i| i.frame);
    Ok(inputs)
}

/// Portion of the day/night cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPhase {
    Dawn,
    Day,
    Dusk,
    Night,
}

/// What an overlay label describes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LabelKind {
    /// Creature vitals, both in [0, 100]
    Creature { food: f32, water: f32 },
    /// Tree ground position
    Tree { x: f32, z: f32 },
}

/// Screen-anchored text for the overlay collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayLabel {
    /// Screen position in pixels, origin top-left
    pub anchor: [f32; 2],
    pub text: String,
    #[serde(flatten)]
    pub kind: LabelKind,
}

/// Ring drawn on the ground under the selected object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionMarker {
    pub center: [f32; 3],
    pub inner_radius: f32,
    pub outer_radius: f32,
}

/// Lighting values for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightingReport {
    pub phase: DayPhase,
    /// Cycle progress in [0, 1)
    pub progress: f32,
    pub sky_color: [f32; 3],
    pub sun_position: [f32; 3],
    pub sun_color: [f32; 3],
    pub sun_intensity: f32,
    pub ambient_intensity: f32,
}

/// Per-frame state published to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    pub frame: u64,
    pub elapsed_secs: f32,
    pub creature_position: [f32; 3],
    pub camera_position: [f32; 3],
    pub camera_target: [f32; 3],
    pub trees_placed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<SelectionMarker>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub labels: Vec<OverlayLabel>,
    pub lighting: LightingReport,
}
