//! Headless host for the top-down pawn
//!
//! Plays a scripted stream of window events through the input handler, runs
//! the pawn on the fixed timer and reports overlaps between the probe and a
//! handful of world markers.

use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

use glam::{Vec2, Vec3};
use topdown_core::{Bounds, EntityId, FixedTimer, Ray};
use topdown_game::camera::CameraView;
use topdown_game::input::{InputAction, InputHandler, PointerState};
use topdown_game::pawn::{FloatingPawnMovement, SelectOutcome, TopDownPawn, WorldActor};
use topdown_game::{PawnMotionPort, PlayerControllerPort};
use tracing::{debug, info};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, TouchPhase};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::settings::Settings;

/// Player controller backed by the last synced camera and live pointer state
#[derive(Debug, Clone)]
pub struct HostController {
    viewport: Vec2,
    pointer: PointerState,
    camera: Option<CameraView>,
    drag_context: bool,
}

impl HostController {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            pointer: PointerState::default(),
            camera: None,
            drag_context: false,
        }
    }

    pub fn set_pointer(&mut self, pointer: &PointerState) {
        self.pointer = pointer.clone();
    }

    /// Whether drag actions should reach the pawn
    pub fn drag_context_active(&self) -> bool {
        self.drag_context
    }

    pub fn camera(&self) -> Option<&CameraView> {
        self.camera.as_ref()
    }
}

impl PlayerControllerPort for HostController {
    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    fn mouse_position(&self) -> Option<Vec2> {
        self.pointer.mouse_position
    }

    fn touch_state(&self, slot: usize) -> Option<Vec2> {
        self.pointer.touches.get(slot).copied().flatten()
    }

    fn deproject_screen_to_world(&self, screen: Vec2) -> Option<Ray> {
        self.camera?.deproject(screen, self.viewport)
    }

    fn add_drag_context(&mut self) {
        self.drag_context = true;
    }

    fn remove_drag_context(&mut self) {
        self.drag_context = false;
    }

    fn sync_camera(&mut self, view: &CameraView) {
        self.camera = Some(*view);
    }
}

/// Static box standing in the world
#[derive(Debug, Clone)]
pub struct Marker {
    id: EntityId,
    bounds: Bounds,
}

impl Marker {
    pub fn new(origin: Vec3, extent: Vec3) -> Self {
        Self {
            id: EntityId::new(),
            bounds: Bounds::new(origin, extent),
        }
    }
}

impl WorldActor for Marker {
    fn id(&self) -> EntityId {
        self.id
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// Change in the probe's overlap set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlapEvent {
    Begin(EntityId),
    End(EntityId),
}

/// Sphere-versus-box overlap test on the ground plane
#[derive(Debug, Clone)]
pub struct OverlapTracker {
    pub radius: f32,
    inside: HashSet<EntityId>,
}

impl OverlapTracker {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            inside: HashSet::new(),
        }
    }

    fn touches(&self, probe: Vec3, bounds: &Bounds) -> bool {
        let min = bounds.origin - bounds.extent.abs();
        let max = bounds.origin + bounds.extent.abs();
        let closest = probe.clamp(min, max);
        let delta = Vec2::new(probe.x - closest.x, probe.y - closest.y);
        delta.length_squared() <= self.radius * self.radius
    }

    /// Diff the overlap set against the probe's new position
    pub fn update(&mut self, probe: Vec3, actors: &[Rc<dyn WorldActor>]) -> Vec<OverlapEvent> {
        let mut events = Vec::new();
        for actor in actors {
            let id = actor.id();
            let touching = self.touches(probe, &actor.bounds());
            if touching && self.inside.insert(id) {
                events.push(OverlapEvent::Begin(id));
            } else if !touching && self.inside.remove(&id) {
                events.push(OverlapEvent::End(id));
            }
        }
        events
    }
}

/// Window event fed to the input handler
#[derive(Debug, Clone, Copy)]
pub enum ScriptEvent {
    CursorMoved(f32, f32),
    CursorLeft,
    MouseMotion(f32, f32),
    Wheel(f32),
    Button(MouseButton, ElementState),
    Key(KeyCode, ElementState),
    Touch(u64, TouchPhase, f32, f32),
}

/// Event due at a session time
#[derive(Debug, Clone, Copy)]
pub struct ScriptStep {
    pub at: f32,
    pub event: ScriptEvent,
}

impl ScriptStep {
    pub fn new(at: f32, event: ScriptEvent) -> Self {
        Self { at, event }
    }
}

/// Scroll to the right edge, zoom out, drag the map, walk forward, then pick
/// a marker with a touch.
pub fn demo_script(viewport: Vec2) -> Vec<ScriptStep> {
    use ScriptEvent::*;

    let center = viewport * 0.5;
    vec![
        ScriptStep::new(0.0, MouseMotion(4.0, 0.0)),
        ScriptStep::new(0.0, CursorMoved(center.x, center.y)),
        ScriptStep::new(0.5, CursorMoved(viewport.x - 5.0, center.y)),
        ScriptStep::new(1.5, CursorMoved(center.x, center.y)),
        ScriptStep::new(1.6, Wheel(-3.0)),
        ScriptStep::new(1.8, Button(MouseButton::Left, ElementState::Pressed)),
        ScriptStep::new(2.0, CursorMoved(center.x - 200.0, center.y + 120.0)),
        ScriptStep::new(2.4, Button(MouseButton::Left, ElementState::Released)),
        ScriptStep::new(2.6, Key(KeyCode::KeyW, ElementState::Pressed)),
        ScriptStep::new(3.6, Key(KeyCode::KeyW, ElementState::Released)),
        ScriptStep::new(3.8, Key(KeyCode::KeyE, ElementState::Pressed)),
        ScriptStep::new(4.0, Key(KeyCode::KeyE, ElementState::Released)),
        ScriptStep::new(4.2, CursorLeft),
        ScriptStep::new(4.4, Touch(1, TouchPhase::Started, center.x, center.y)),
        ScriptStep::new(4.8, Touch(1, TouchPhase::Moved, center.x + 150.0, center.y)),
        ScriptStep::new(5.2, Touch(1, TouchPhase::Ended, center.x + 150.0, center.y)),
    ]
}

/// Totals reported when a session ends
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSummary {
    pub ticks: u64,
    pub device_switches: u32,
    pub selections: u32,
    pub drags_started: u32,
    pub overlap_events: u32,
    pub final_position: Vec3,
    pub final_zoom: f32,
}

/// Pawn, input handler and timer driven from scripted events
pub struct Session {
    pawn: TopDownPawn<HostController, FloatingPawnMovement>,
    input: InputHandler,
    timer: FixedTimer,
    actors: Vec<Rc<dyn WorldActor>>,
    overlaps: OverlapTracker,
    device_switches: Rc<Cell<u32>>,
    summary: SessionSummary,
    clock: f32,
}

impl Session {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let config = &settings.controller;
        config.validate()?;

        let motion = FloatingPawnMovement::with_config(config.floating.clone());
        let mut pawn = TopDownPawn::new(config, motion).with_zoom_curve(settings.zoom_curve()?);

        let (width, height) = settings.session.resolution();
        pawn.possess(HostController::new(Vec2::new(width as f32, height as f32)));

        let device_switches = Rc::new(Cell::new(0));
        let counter = Rc::clone(&device_switches);
        pawn.classifier_mut().subscribe(move |kind| {
            info!("Active input device: {}", kind);
            counter.set(counter.get() + 1);
        });

        Ok(Self {
            pawn,
            input: InputHandler::new(),
            timer: FixedTimer::new(config.timer.clone()),
            actors: Vec::new(),
            overlaps: OverlapTracker::new(60.0),
            device_switches,
            summary: SessionSummary::default(),
            clock: 0.0,
        })
    }

    pub fn add_actor(&mut self, actor: Rc<dyn WorldActor>) {
        self.actors.push(actor);
    }

    pub fn pawn(&self) -> &TopDownPawn<HostController, FloatingPawnMovement> {
        &self.pawn
    }

    /// Hand one window event to the input handler
    pub fn feed(&mut self, event: ScriptEvent) {
        let input = &mut self.input;
        match event {
            ScriptEvent::CursorMoved(x, y) => input.handle_cursor_moved((x as f64, y as f64)),
            ScriptEvent::CursorLeft => input.handle_cursor_left(),
            ScriptEvent::MouseMotion(dx, dy) => input.handle_mouse_motion((dx as f64, dy as f64)),
            ScriptEvent::Wheel(lines) => {
                input.handle_scroll(MouseScrollDelta::LineDelta(0.0, lines))
            }
            ScriptEvent::Button(button, state) => input.handle_mouse_button(button, state),
            ScriptEvent::Key(code, state) => input.handle_keyboard(PhysicalKey::Code(code), state),
            ScriptEvent::Touch(id, phase, x, y) => {
                input.handle_touch(id, phase, (x as f64, y as f64))
            }
        }
    }

    /// Dispatch this frame's input, then run the ticks that are due
    pub fn frame(&mut self, frame_delta: f32) {
        let frame = self.input.end_frame();
        if let Some(controller) = self.pawn.controller_mut() {
            controller.set_pointer(&self.input.pointer);
        }

        for signal in frame.signals {
            self.pawn.apply_device_signal(signal);
        }
        for action in frame.actions {
            self.dispatch(action);
        }

        let interval = self.timer.interval();
        for _ in 0..self.timer.advance(frame_delta) {
            self.pawn.fixed_tick(interval);
            self.pawn.motion_mut().integrate(interval);
            self.update_overlaps();
        }
        self.clock += frame_delta;
    }

    fn dispatch(&mut self, action: InputAction) {
        if action == InputAction::Drag
            && !self
                .pawn
                .controller()
                .is_some_and(HostController::drag_context_active)
        {
            return;
        }

        match self.pawn.handle_action(action) {
            Some(SelectOutcome::Selected(id)) => {
                info!("Selected {:?}", id);
                self.summary.selections += 1;
            }
            Some(SelectOutcome::DragStarted) => self.summary.drags_started += 1,
            Some(SelectOutcome::Ignored) | None => {}
        }
    }

    fn update_overlaps(&mut self) {
        let probe = self.pawn.probe().position();
        for event in self.overlaps.update(probe, &self.actors) {
            self.summary.overlap_events += 1;
            match event {
                OverlapEvent::Begin(id) => {
                    if let Some(actor) = self.actors.iter().find(|a| a.id() == id) {
                        debug!("Probe entered {:?}", id);
                        let actor = Rc::clone(actor);
                        self.pawn.on_overlap_begin(&actor);
                    }
                }
                OverlapEvent::End(id) => {
                    debug!("Probe left {:?}", id);
                    self.pawn.on_overlap_end(id);
                }
            }
        }
    }

    /// Play `script` for `duration` seconds of simulated time
    pub fn run(
        &mut self,
        script: &[ScriptStep],
        duration: f32,
        frame_delta: f32,
    ) -> SessionSummary {
        let mut pending = script.iter().peekable();
        while self.clock < duration {
            while let Some(step) = pending.next_if(|step| step.at <= self.clock) {
                self.feed(step.event);
            }
            self.frame(frame_delta);
        }
        self.summary()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            ticks: self.timer.tick_count,
            device_switches: self.device_switches.get(),
            final_position: self.pawn.motion().actor_position(),
            final_zoom: self.pawn.zoom_state().value(),
            ..self.summary.clone()
        }
    }
}
