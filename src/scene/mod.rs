//! Scene assembly: configuration, selection, camera focus and the running
//! simulation state

pub mod config;
pub mod overlay;
pub mod selection;
pub mod state;
pub mod transition;

pub use config::{CreatureConfig, SceneConfig};
pub use overlay::{label_text, project_label};
pub use selection::{MarkerConfig, Selected, marker_for, pick};
pub use state::{DEFAULT_VIEWPORT, SimulationState};
pub use transition::{CameraTransition, FocusConfig, TransitionState, focus_position};
