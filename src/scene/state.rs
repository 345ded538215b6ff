//! The running scene
//!
//! [`SimulationState`] owns everything the hill scene simulates and is
//! advanced one frame at a time by [`SimulationState::tick`]. Input events
//! arrive between ticks through [`SimulationState::handle_input`]; the
//! render and overlay collaborators read the scene back through the
//! accessors and [`SimulationState::frame_report`].

use knoll_protocol::{FrameReport, InputEvent, Key, LabelKind, OverlayLabel, SelectionMarker};
use log::{debug, info, trace};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::atmosphere::AtmosphereSystem;
use crate::core::camera::OrbitCamera;
use crate::core::camera_controller::{CameraConstraint, OrbitController};
use crate::core::input::PointerTracker;
use crate::core::types::{Vec2, Vec3};
use crate::core::Result;
use crate::entity::{Creature, Obstacle, TickOutcome, WanderController, trunk_obstacles};
use crate::generation::{PlacedTree, PlacementSolver};
use crate::math::Aabb;
use crate::terrain::{HillTerrain, TerrainMesh};
use super::config::SceneConfig;
use super::overlay::project_label;
use super::selection::{Selected, marker_for, pick};
use super::transition::{CameraTransition, TransitionState};

/// Viewport used until the host reports a size
pub const DEFAULT_VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

/// Terrain, trees, creature, camera and sky for one scene
pub struct SimulationState {
    config: SceneConfig,
    terrain: HillTerrain,
    trees: Vec<PlacedTree>,
    trunk_boxes: Vec<Aabb>,
    obstacles: Vec<Obstacle>,
    creature: Creature,
    wander: WanderController,
    camera: OrbitCamera,
    controller: OrbitController,
    pointer: PointerTracker,
    transition: Option<CameraTransition>,
    selection: Option<Selected>,
    atmosphere: AtmosphereSystem,
    viewport: Vec2,
    rng: StdRng,
    frame: u64,
    elapsed: f64,
}

impl SimulationState {
    /// Validate `config` and build the scene: place trees, spawn the
    /// creature and set the camera at its start pose.
    pub fn new(config: SceneConfig, viewport: Vec2) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let world = &config.world;
        let terrain = HillTerrain::new(config.terrain.clone());

        let solver = PlacementSolver::new(config.trees.clone(), world.plane_radius);
        let trees = solver.solve(&terrain, &mut rng);
        let trunk_boxes = trees.iter().map(|t| t.trunk_box(config.trees.trunk_width)).collect();
        let obstacles = trunk_obstacles(&trees, config.trees.trunk_radius);

        let wander = WanderController::new(config.creature.wander.clone(), world.plane_radius);
        let [start_x, start_z] = config.creature.start;
        let mut creature = Creature::spawn(&terrain, start_x, start_z, wander.params().rest_offset);
        creature.vitals.set_food(config.creature.food);
        creature.vitals.set_water(config.creature.water);

        let viewport = sanitize_viewport(viewport).unwrap_or(DEFAULT_VIEWPORT);
        let mut camera = OrbitCamera::from_config(&config.camera, viewport.x / viewport.y);
        let controller = OrbitController::new(CameraConstraint::new(&config.camera, world.sphere_radius));
        controller.constrain(&mut camera, &terrain);

        let atmosphere = AtmosphereSystem::new(
            config.atmosphere.clone(),
            config.clouds.clone(),
            world.sphere_radius,
            &mut rng,
        );

        info!(
            "Scene ready: {} trees, creature at ({:.1}, {:.1}, {:.1}), seed {}",
            trees.len(),
            creature.position.x,
            creature.position.y,
            creature.position.z,
            config.seed.map_or_else(|| "random".to_string(), |s| s.to_string()),
        );

        Ok(Self {
            config,
            terrain,
            trees,
            trunk_boxes,
            obstacles,
            creature,
            wander,
            camera,
            controller,
            pointer: PointerTracker::new(),
            transition: None,
            selection: None,
            atmosphere,
            viewport,
            rng,
            frame: 0,
            elapsed: 0.0,
        })
    }

    /// Advance the scene by `dt` seconds.
    ///
    /// Order: creature wander, camera transition step, day cycle and clouds.
    pub fn tick(&mut self, dt: f32) -> TickOutcome {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        let outcome = self.wander.tick(&mut self.creature, &self.terrain, &self.obstacles, &mut self.rng, dt);
        trace!("Frame {}: wander {:?}", self.frame, outcome);

        if let Some(transition) = self.transition.as_mut() {
            let state = transition.advance(&mut self.camera);
            self.controller.constrain(&mut self.camera, &self.terrain);
            if state == TransitionState::Done {
                debug!("Camera transition finished at frame {}", self.frame);
                self.transition = None;
            }
        }

        self.atmosphere.update(dt);

        self.frame += 1;
        self.elapsed += dt as f64;
        outcome
    }

    /// Route one input event. Camera input cancels a running focus move.
    pub fn handle_input(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { x, y, button } => self.pointer.pointer_down(x, y, button),
            InputEvent::PointerMove { x, y } => {
                if let Some(delta) = self.pointer.pointer_move(x, y) {
                    self.cancel_transition();
                    self.controller.orbit(&mut self.camera, delta.x, delta.y, &self.terrain);
                }
            }
            InputEvent::PointerUp { button } => self.pointer.pointer_up(button),
            InputEvent::Wheel { delta_y } => {
                self.cancel_transition();
                self.controller.zoom(&mut self.camera, delta_y, &self.terrain);
            }
            InputEvent::KeyDown { key } => {
                if key != Key::Other {
                    self.cancel_transition();
                    self.controller.pan(&mut self.camera, key, &self.terrain);
                }
            }
            InputEvent::Click { x, y } => self.click(Vec2::new(x, y)),
            InputEvent::Resize { width, height } => self.resize(width, height),
        }
    }

    /// Pick at a screen position. A hit selects and focuses the object; a
    /// miss clears the selection.
    pub fn click(&mut self, screen: Vec2) {
        let ray = self.camera.screen_ray(screen, self.viewport);
        match pick(&ray, &self.pick_candidates()) {
            Some(selected) => self.select(selected),
            None => {
                if self.selection.take().is_some() {
                    debug!("Selection cleared");
                }
            }
        }
    }

    /// Select an object and start a focus move toward it, replacing any
    /// move already running. Unknown tree indices are ignored.
    pub fn select(&mut self, selected: Selected) {
        let Some(target) = self.selected_position(selected) else {
            return;
        };
        self.selection = Some(selected);
        self.transition = Some(CameraTransition::focus_on(
            &self.camera,
            target,
            &self.terrain,
            &self.config.focus,
        ));
        debug!("Selected {:?}, focusing on ({:.1}, {:.1}, {:.1})", selected, target.x, target.y, target.z);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(viewport) = sanitize_viewport(Vec2::new(width as f32, height as f32)) {
            self.viewport = viewport;
            self.camera.set_aspect(viewport.x, viewport.y);
        }
    }

    /// Snapshot for the overlay collaborator
    pub fn frame_report(&self) -> FrameReport {
        FrameReport {
            frame: self.frame,
            elapsed_secs: self.elapsed as f32,
            creature_position: self.creature.position.to_array(),
            camera_position: self.camera.position.to_array(),
            camera_target: self.camera.target.to_array(),
            trees_placed: self.trees.len(),
            selection: self.selection_marker(),
            labels: self.labels(),
            lighting: self.atmosphere.lighting().to_report(),
        }
    }

    /// Ring under the selected object
    pub fn selection_marker(&self) -> Option<SelectionMarker> {
        let bounds = self.selected_bounds(self.selection?)?;
        Some(marker_for(&bounds, &self.terrain, &self.config.marker))
    }

    /// Labels for the selected object, re-projected for the current camera
    pub fn labels(&self) -> Vec<OverlayLabel> {
        let Some(selected) = self.selection else {
            return Vec::new();
        };
        let kind = match selected {
            Selected::Creature => LabelKind::Creature {
                food: self.creature.vitals.food(),
                water: self.creature.vitals.water(),
            },
            Selected::Tree(index) => match self.trees.get(index) {
                Some(tree) => LabelKind::Tree { x: tree.x, z: tree.z },
                None => return Vec::new(),
            },
        };
        let Some(world) = self.selected_position(selected) else {
            return Vec::new();
        };
        project_label(kind, world, &self.camera, self.viewport, self.config.marker.label_offset_px)
            .into_iter()
            .collect()
    }

    /// Ground mesh for the render collaborator
    pub fn terrain_mesh(&self) -> TerrainMesh {
        let world = &self.config.world;
        TerrainMesh::build(&self.terrain, world.plane_radius, world.mesh_segments, world.mesh_rings)
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn terrain(&self) -> &HillTerrain {
        &self.terrain
    }

    pub fn trees(&self) -> &[PlacedTree] {
        &self.trees
    }

    pub fn trunk_boxes(&self) -> &[Aabb] {
        &self.trunk_boxes
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn creature(&self) -> &Creature {
        &self.creature
    }

    pub fn creature_mut(&mut self) -> &mut Creature {
        &mut self.creature
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn selection(&self) -> Option<Selected> {
        self.selection
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn atmosphere(&self) -> &AtmosphereSystem {
        &self.atmosphere
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    fn cancel_transition(&mut self) {
        if self.transition.take().is_some() {
            debug!("Camera transition cancelled by user input");
        }
    }

    fn pick_candidates(&self) -> Vec<(Selected, Aabb)> {
        std::iter::once((Selected::Creature, self.creature.bounding_box()))
            .chain(
                self.trunk_boxes
                    .iter()
                    .enumerate()
                    .map(|(i, aabb)| (Selected::Tree(i), *aabb)),
            )
            .collect()
    }

    fn selected_bounds(&self, selected: Selected) -> Option<Aabb> {
        match selected {
            Selected::Creature => Some(self.creature.bounding_box()),
            Selected::Tree(index) => self.trunk_boxes.get(index).copied(),
        }
    }

    fn selected_position(&self, selected: Selected) -> Option<Vec3> {
        match selected {
            Selected::Creature => Some(self.creature.position),
            Selected::Tree(index) => self.trunk_boxes.get(index).map(Aabb::center),
        }
    }
}

fn sanitize_viewport(viewport: Vec2) -> Option<Vec2> {
    (viewport.x >= 1.0 && viewport.y >= 1.0 && viewport.is_finite()).then_some(viewport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;
    use crate::generation::TreeLayout;
    use crate::terrain::HeightField;
    use knoll_protocol::DayPhase;

    fn seeded(seed: u64) -> SceneConfig {
        SceneConfig { seed: Some(seed), ..Default::default() }
    }

    fn treeless(seed: u64) -> SimulationState {
        let mut config = seeded(seed);
        config.trees.layout = TreeLayout::Fixed(Vec::new());
        SimulationState::new(config, Vec2::new(800.0, 600.0)).unwrap()
    }

    fn creature_screen(state: &SimulationState) -> Vec2 {
        state
            .camera()
            .project_to_screen(state.creature().position, state.viewport())
            .unwrap()
    }

    #[test]
    fn test_new_builds_scene() {
        let state = SimulationState::new(seeded(3), DEFAULT_VIEWPORT).unwrap();
        assert!(state.trees().len() <= 10);
        assert_eq!(state.trees().len(), state.trunk_boxes().len());
        assert_eq!(state.trees().len(), state.obstacles().len());

        // h(0, 0) = 4 under the hill formula; the creature rests 1 above it
        assert_eq!(state.creature().position, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(state.creature().vitals.food(), 100.0);
        assert_eq!(state.frame(), 0);
        assert!(state.selection().is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = seeded(1);
        config.world.plane_radius = 0.0;
        let result = SimulationState::new(config, DEFAULT_VIEWPORT);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_same_seed_same_scene() {
        let mut a = SimulationState::new(seeded(11), DEFAULT_VIEWPORT).unwrap();
        let mut b = SimulationState::new(seeded(11), DEFAULT_VIEWPORT).unwrap();
        assert_eq!(a.trees(), b.trees());
        for _ in 0..200 {
            a.tick(1.0 / 60.0);
            b.tick(1.0 / 60.0);
        }
        assert_eq!(a.creature().position, b.creature().position);
    }

    #[test]
    fn test_creature_stays_in_bounds_and_on_ground() {
        let mut state = SimulationState::new(seeded(5), DEFAULT_VIEWPORT).unwrap();
        let limit = state.config().world.plane_radius * 0.95;
        for _ in 0..2000 {
            state.tick(1.0 / 60.0);
            let p = state.creature().position;
            assert!(p.x.hypot(p.z) <= limit + 1e-3);
            let ground = state.terrain().height(p.x, p.z);
            assert!((p.y - (ground + 1.0)).abs() < 1e-4);
        }
    }

    #[test]
    fn test_tick_advances_clock_and_sky() {
        let mut state = treeless(2);
        let progress = state.atmosphere().cycle().progress();
        state.tick(0.5);
        state.tick(0.5);
        let report = state.frame_report();
        assert_eq!(report.frame, 2);
        assert!((report.elapsed_secs - 1.0).abs() < 1e-6);
        assert!(state.atmosphere().cycle().progress() > progress);
        assert_eq!(report.lighting.phase, DayPhase::Dawn);
    }

    #[test]
    fn test_bad_dt_is_ignored() {
        let mut state = treeless(2);
        let before = state.creature().position;
        state.tick(f32::NAN);
        state.tick(-1.0);
        assert_eq!(state.creature().position, before);
        assert_eq!(state.frame(), 2);
    }

    #[test]
    fn test_huge_dt_stays_safe() {
        let mut state = treeless(2);
        state.tick(1.0e15);
        state.tick(1.0e15);
        let report = state.frame_report();
        assert_eq!(report.frame, 2);
        assert!((0.0..1.0).contains(&report.lighting.progress));
        assert!(state.creature().position.is_finite());
        assert!(state.atmosphere().clouds().iter().all(|c| c.position.x.abs() <= 200.0));
    }

    #[test]
    fn test_click_creature_selects_and_focuses() {
        let mut state = treeless(4);
        let target = state.creature().position;
        let screen = creature_screen(&state);

        state.handle_input(&InputEvent::Click { x: screen.x, y: screen.y });
        assert_eq!(state.selection(), Some(Selected::Creature));
        assert!(state.is_transitioning());

        for _ in 0..30 {
            state.tick(1.0 / 60.0);
        }
        assert!(!state.is_transitioning());
        assert!((state.camera().target - target).length() < 1e-4);
        let distance = state.camera().position.distance(target);
        assert!(distance >= 5.0 - 1e-3 && distance < 30.0, "distance {distance}");
    }

    #[test]
    fn test_click_empty_sky_clears_selection() {
        let mut state = treeless(4);
        state.select(Selected::Creature);
        state.handle_input(&InputEvent::Click { x: 0.0, y: 0.0 });
        assert!(state.selection().is_none());
    }

    #[test]
    fn test_drag_cancels_transition() {
        let mut state = treeless(6);
        state.select(Selected::Creature);
        assert!(state.is_transitioning());

        state.handle_input(&InputEvent::PointerDown { x: 100.0, y: 100.0, button: 0 });
        state.handle_input(&InputEvent::PointerMove { x: 120.0, y: 100.0 });
        state.handle_input(&InputEvent::PointerUp { button: 0 });
        assert!(!state.is_transitioning());
        assert_eq!(state.selection(), Some(Selected::Creature));
    }

    #[test]
    fn test_wheel_zooms_and_keys_pan() {
        let mut state = treeless(6);
        let distance = state.camera().position.distance(state.camera().target);
        state.handle_input(&InputEvent::Wheel { delta_y: -120.0 });
        let zoomed = state.camera().position.distance(state.camera().target);
        assert!((zoomed - distance * 0.9).abs() < 1e-2);

        let target = state.camera().target;
        state.handle_input(&InputEvent::KeyDown { key: Key::ArrowRight });
        assert!((state.camera().target.x - (target.x + 2.0)).abs() < 1e-4);

        let target = state.camera().target;
        state.handle_input(&InputEvent::KeyDown { key: Key::Other });
        assert_eq!(state.camera().target, target);
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut state = treeless(1);
        state.handle_input(&InputEvent::Resize { width: 1000, height: 500 });
        assert_eq!(state.viewport(), Vec2::new(1000.0, 500.0));
        assert!((state.camera().aspect - 2.0).abs() < 1e-6);

        state.handle_input(&InputEvent::Resize { width: 0, height: 500 });
        assert_eq!(state.viewport(), Vec2::new(1000.0, 500.0));
    }

    #[test]
    fn test_report_for_selected_creature() {
        let mut state = treeless(8);
        state.select(Selected::Creature);
        let report = state.frame_report();

        let marker = report.selection.unwrap();
        let p = state.creature().position;
        assert!((marker.center[1] - (state.terrain().height(p.x, p.z) + 0.1)).abs() < 1e-5);
        assert!((marker.inner_radius - marker.outer_radius * 0.95).abs() < 1e-5);

        assert_eq!(report.labels.len(), 1);
        assert_eq!(report.labels[0].text, "Food: 100\nWater: 100");
    }

    #[test]
    fn test_labels_follow_vitals_and_clear() {
        let mut state = treeless(8);
        state.select(Selected::Creature);
        state.creature_mut().vitals.set_food(42.5);
        state.creature_mut().vitals.set_water(150.0);
        assert_eq!(state.labels()[0].text, "Food: 42.5\nWater: 100");

        state.clear_selection();
        let report = state.frame_report();
        assert!(report.selection.is_none());
        assert!(report.labels.is_empty());
    }

    #[test]
    fn test_select_tree_labels_position() {
        let mut config = seeded(9);
        config.trees.layout = TreeLayout::Reference;
        let mut state = SimulationState::new(config, DEFAULT_VIEWPORT).unwrap();
        assert!(!state.trees().is_empty());

        state.select(Selected::Tree(0));
        for _ in 0..30 {
            state.tick(1.0 / 60.0);
        }
        let tree = state.trees()[0];
        let report = state.frame_report();
        assert_eq!(report.labels.len(), 1);
        assert_eq!(report.labels[0].kind, LabelKind::Tree { x: tree.x, z: tree.z });
        assert!((state.camera().target - state.trunk_boxes()[0].center()).length() < 1e-4);
    }

    #[test]
    fn test_select_unknown_tree_ignored() {
        let mut state = treeless(1);
        state.select(Selected::Tree(99));
        assert!(state.selection().is_none());
        assert!(!state.is_transitioning());
    }

    #[test]
    fn test_terrain_mesh_matches_world() {
        let mut config = seeded(1);
        config.world.mesh_segments = 16;
        config.world.mesh_rings = 4;
        let state = SimulationState::new(config, DEFAULT_VIEWPORT).unwrap();
        let mesh = state.terrain_mesh();
        assert_eq!(mesh.vertices.len(), 1 + 16 * 4);
    }
}
