//! Top-down pawn
//!
//! Owns the camera rig, zoom, drag session, probe volume and cursor. Input
//! callbacks and the fixed tick both mutate it through `&mut self`; the host
//! supplies a player controller and a motion port.

use std::rc::Rc;

use glam::{Quat, Vec2, Vec3};
use topdown_core::{EntityId, Transform};
use tracing::{debug, warn};

use crate::camera::{CameraView, SpringArmRig, ZoomCurve, ZoomStateMachine};
use crate::config::TopDownConfig;
use crate::input::{DeviceSignal, InputAction, InputClassifier, InputDeviceKind};
use crate::projection::{GroundProjection, PlayerControllerPort, ScreenToWorldProjector};

use super::cursor::{CursorVisual, HoverTarget, ProbeVolume, WorldActor};
use super::drag::{DragPanCalculator, DragStep};
use super::edge_scroll::EdgeScrollCalculator;
use super::motion::PawnMotionPort;
use super::movement::MovementConfig;
use super::origin_pull::OriginPullCalculator;

/// What a select press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The probe was over an actor
    Selected(EntityId),
    /// Nothing under the probe; a drag session opened
    DragStarted,
    /// No player controller
    Ignored,
}

/// Camera and cursor pawn for a top-down view
pub struct TopDownPawn<C: PlayerControllerPort, M: PawnMotionPort> {
    id: EntityId,
    controller: Option<C>,
    motion: M,
    classifier: InputClassifier,
    movement: MovementConfig,
    projector: ScreenToWorldProjector,
    edge_scroll: EdgeScrollCalculator,
    origin_pull: OriginPullCalculator,
    zoom: ZoomStateMachine,
    rig: SpringArmRig,
    drag: DragPanCalculator,
    probe: ProbeVolume,
    cursor: CursorVisual,
    hover: HoverTarget,
    last_projection: Option<GroundProjection>,
}

impl<C: PlayerControllerPort, M: PawnMotionPort> TopDownPawn<C, M> {
    /// Create an unpossessed pawn. The rig is framed from the initial zoom.
    pub fn new(config: &TopDownConfig, motion: M) -> Self {
        let movement = config.movement.clone();
        let mut pawn = Self {
            id: EntityId::new(),
            controller: None,
            motion,
            classifier: InputClassifier::new(),
            projector: ScreenToWorldProjector::new(movement.touch_vertical_bias),
            edge_scroll: EdgeScrollCalculator::from_config(&movement),
            origin_pull: OriginPullCalculator::new(
                movement.pull_start_distance,
                movement.pull_falloff_distance,
            ),
            movement,
            zoom: ZoomStateMachine::new(&config.camera),
            rig: SpringArmRig::new(&config.camera),
            drag: DragPanCalculator::new(),
            probe: ProbeVolume::default(),
            cursor: CursorVisual::new(config.cursor.clone()),
            hover: HoverTarget::default(),
            last_projection: None,
        };
        pawn.zoom(0.0);
        pawn
    }

    /// Attach the zoom curve and reframe the rig
    pub fn with_zoom_curve(mut self, curve: impl ZoomCurve + 'static) -> Self {
        self.set_zoom_curve(Some(Box::new(curve)));
        self
    }

    pub fn set_zoom_curve(&mut self, curve: Option<Box<dyn ZoomCurve>>) {
        self.zoom.set_curve(curve);
        self.refresh_rig();
    }

    /// Hand control to a player controller
    pub fn possess(&mut self, controller: C) {
        self.controller = Some(controller);
        self.sync_camera();
    }

    /// Release the player controller; the pawn goes inert
    pub fn unpossess(&mut self) -> Option<C> {
        self.drag.end();
        self.controller.take()
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn controller(&self) -> Option<&C> {
        self.controller.as_ref()
    }

    pub fn controller_mut(&mut self) -> Option<&mut C> {
        self.controller.as_mut()
    }

    pub fn motion(&self) -> &M {
        &self.motion
    }

    pub fn motion_mut(&mut self) -> &mut M {
        &mut self.motion
    }

    pub fn classifier(&self) -> &InputClassifier {
        &self.classifier
    }

    /// Subscribe to device switches through the classifier
    pub fn classifier_mut(&mut self) -> &mut InputClassifier {
        &mut self.classifier
    }

    pub fn device(&self) -> InputDeviceKind {
        self.classifier.active()
    }

    pub fn zoom_state(&self) -> &ZoomStateMachine {
        &self.zoom
    }

    pub fn rig(&self) -> &SpringArmRig {
        &self.rig
    }

    pub fn probe(&self) -> &ProbeVolume {
        &self.probe
    }

    pub fn cursor_transform(&self) -> Transform {
        self.cursor.transform()
    }

    pub fn hover_target(&self) -> Option<Rc<dyn WorldActor>> {
        self.hover.get()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub fn drag_anchor(&self) -> Option<Vec3> {
        self.drag.anchor()
    }

    /// Ground pick from the most recent tick
    pub fn last_projection(&self) -> Option<GroundProjection> {
        self.last_projection
    }

    /// Camera pose for the pawn's current transform
    pub fn camera_view(&self) -> CameraView {
        self.rig.camera_view(&self.motion.actor_transform())
    }

    /// Feed a raw device signal to the classifier
    pub fn apply_device_signal(&mut self, signal: DeviceSignal) {
        match signal {
            DeviceSignal::Key(key) => {
                self.classifier.on_gamepad_key(key);
                self.classifier.on_touch_key(key);
            }
            DeviceSignal::MouseAxis(delta) => self.classifier.on_mouse_axis_move(delta),
        }
    }

    /// Dispatch a bound action
    pub fn handle_action(&mut self, action: InputAction) -> Option<SelectOutcome> {
        match action {
            InputAction::Move(value) => self.move_input(value),
            InputAction::Spin(degrees) => self.spin(degrees),
            InputAction::Zoom(delta) => self.zoom(delta),
            InputAction::SelectStarted => return Some(self.select_started()),
            InputAction::SelectStopped => self.select_stopped(),
            InputAction::Drag => self.drag_move(),
        }
        None
    }

    /// Planar movement relative to the pawn's heading: y forward, x right
    pub fn move_input(&mut self, value: Vec2) {
        if self.controller.is_none() || value == Vec2::ZERO {
            return;
        }
        let transform = self.motion.actor_transform();
        self.motion.add_movement_input(transform.forward(), value.y);
        self.motion.add_movement_input(transform.right(), value.x);
    }

    /// Yaw by `degrees`
    pub fn spin(&mut self, degrees: f32) {
        self.motion.add_local_rotation(Quat::from_rotation_z(degrees.to_radians()));
    }

    /// Step the zoom and reframe the rig
    pub fn zoom(&mut self, delta: f32) {
        self.zoom.apply_zoom_input(delta);
        self.refresh_rig();
    }

    fn refresh_rig(&mut self) {
        self.rig.focus_on_arm();
        let Some(params) = self.zoom.derive_rig_parameters() else {
            return;
        };
        self.rig.apply(&params);
        self.motion.set_max_speed(params.max_move_speed);
        self.sync_camera();
    }

    fn sync_camera(&mut self) {
        let view = self.camera_view();
        if let Some(controller) = self.controller.as_mut() {
            controller.sync_camera(&view);
        }
    }

    /// Grab the ground under the pointer, or select what the probe touches
    pub fn select_started(&mut self) -> SelectOutcome {
        let Some(controller) = self.controller.as_mut() else {
            warn!("select_started: no player controller");
            return SelectOutcome::Ignored;
        };

        let device = self.classifier.active();
        let projection = self.projector.project(device, &*controller);
        // Anchor even on a failed pick; the first drag step will end the session
        self.drag.begin(projection.intersection);
        if device == InputDeviceKind::Touch {
            self.probe.snap_to(projection.intersection);
        }

        if let Some(actor) = self.probe.first_overlapping() {
            self.drag.end();
            let id = actor.id();
            debug!("Selected {:?}", id);
            return SelectOutcome::Selected(id);
        }

        controller.add_drag_context();
        debug!("Drag session opened at {:?}", projection.intersection);
        SelectOutcome::DragStarted
    }

    /// End any drag session
    pub fn select_stopped(&mut self) {
        let Some(controller) = self.controller.as_mut() else {
            warn!("select_stopped: no player controller");
            return;
        };
        self.drag.end();
        controller.remove_drag_context();
    }

    /// Keep the anchored ground point under the pointer
    pub fn drag_move(&mut self) {
        let Some(controller) = self.controller.as_mut() else {
            warn!("drag_move: no player controller");
            return;
        };
        let transform = self.motion.actor_transform();
        let camera_offset = self.rig.camera_world_offset(&transform);
        let projection = self.projector.project(self.classifier.active(), &*controller);

        match self.drag.step(&projection, camera_offset) {
            DragStep::Pan(offset) => {
                self.motion.add_world_offset(offset);
                self.sync_camera();
            }
            DragStep::Lost => {
                debug!("Drag session lost its ground pick");
                controller.remove_drag_context();
            }
            DragStep::Idle => {}
        }
    }

    /// The probe started touching `actor`
    pub fn on_overlap_begin(&mut self, actor: &Rc<dyn WorldActor>) {
        if actor.id() == self.id {
            return;
        }
        self.probe.begin_overlap(actor);
        self.hover.set(actor);
    }

    /// The probe stopped touching the actor `id`
    pub fn on_overlap_end(&mut self, id: EntityId) {
        if id == self.id {
            return;
        }
        self.probe.end_overlap(id);
        self.hover.clear_if(id);
    }

    /// Per-tick update: origin pull, edge scroll, probe and cursor
    pub fn fixed_tick(&mut self, dt: f32) {
        let Some(controller) = self.controller.as_ref() else {
            warn!("fixed_tick: no player controller");
            return;
        };

        let device = self.classifier.active();
        let transform = self.motion.actor_transform();

        let (pull_direction, pull_scale) = self.origin_pull.contribution(transform.position);
        self.motion.add_movement_input(pull_direction, pull_scale);

        let projection = self.projector.project(device, controller);
        let edge_direction = self.edge_scroll.direction(
            &projection,
            controller.viewport_size(),
            device,
            self.movement.edge_scale(device),
            &transform,
        );
        self.motion.add_movement_input(edge_direction, 1.0);

        if device == InputDeviceKind::Touch {
            if projection.valid {
                self.probe.snap_to(projection.intersection);
            } else {
                let current = self.probe.position();
                let sunk = Vec3::new(current.x, current.y, self.movement.probe_sink_height);
                self.probe.interp_to(sunk, dt, self.movement.probe_interp_speed);
            }
        } else {
            self.probe
                .snap_to(projection.intersection + Vec3::Z * self.movement.probe_lift);
        }

        let hover = self.hover.get();
        self.cursor.update(device, &projection, hover.as_deref(), &self.probe, dt);

        self.last_projection = Some(projection);
        self.sync_camera();
    }
}
