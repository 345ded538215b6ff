//! Wire types shared between the knoll scene and its host collaborators.
//!
//! Input events flow from the host (pointer, wheel, keys) into the scene.
//! Frame reports flow out to whatever draws the overlay: selection marker,
//! screen-anchored labels and the lighting values for the current frame.
//!
//! Every type here is plain serde data, one JSON object per line:
//! ```ignore
//! {"frame": 12, "event": {"type": "click", "x": 640.0, "y": 360.0}}
//! ```

pub mod protocol;

pub use protocol::*;
