//! Scripted port implementations shared by unit tests

use glam::{Quat, Vec2, Vec3};
use topdown_core::{Ray, Transform};

use crate::camera::CameraView;
use crate::pawn::PawnMotionPort;
use crate::projection::PlayerControllerPort;

/// Player controller returning fixed samples and a fixed ray
#[derive(Debug, Clone)]
pub struct ScriptedController {
    pub viewport: Vec2,
    pub mouse: Option<Vec2>,
    pub touches: [Option<Vec2>; 2],
    pub ray: Option<Ray>,
    pub drag_context: bool,
    pub drag_context_removals: u32,
    pub synced_views: u32,
}

impl ScriptedController {
    pub fn new() -> Self {
        Self {
            viewport: Vec2::new(1920.0, 1080.0),
            mouse: None,
            touches: [None; 2],
            ray: None,
            drag_context: false,
            drag_context_removals: 0,
            synced_views: 0,
        }
    }

    pub fn with_mouse(mut self, point: Vec2) -> Self {
        self.mouse = Some(point);
        self
    }

    pub fn with_touch(mut self, slot: usize, point: Vec2) -> Self {
        self.touches[slot] = Some(point);
        self
    }

    pub fn with_ray(mut self, ray: Ray) -> Self {
        self.ray = Some(ray);
        self
    }

    /// Aim a straight-down ray so the ground hit lands on `point`
    pub fn aim_at(&mut self, point: Vec3) {
        self.ray = Some(Ray::new(Vec3::new(point.x, point.y, 1000.0), Vec3::NEG_Z));
    }
}

impl PlayerControllerPort for ScriptedController {
    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    fn mouse_position(&self) -> Option<Vec2> {
        self.mouse
    }

    fn touch_state(&self, slot: usize) -> Option<Vec2> {
        self.touches.get(slot).copied().flatten()
    }

    fn deproject_screen_to_world(&self, _screen: Vec2) -> Option<Ray> {
        self.ray
    }

    fn add_drag_context(&mut self) {
        self.drag_context = true;
    }

    fn remove_drag_context(&mut self) {
        self.drag_context = false;
        self.drag_context_removals += 1;
    }

    fn sync_camera(&mut self, _view: &CameraView) {
        self.synced_views += 1;
    }
}

/// Motion port that records everything it is asked to do
#[derive(Debug, Clone, Default)]
pub struct RecordingMotion {
    pub transform: Transform,
    pub inputs: Vec<(Vec3, f32)>,
    pub max_speed: Option<f32>,
}

impl RecordingMotion {
    /// Sum of direction * scale over every recorded input
    pub fn accumulated(&self) -> Vec3 {
        self.inputs.iter().map(|(d, s)| *d * *s).sum()
    }
}

impl PawnMotionPort for RecordingMotion {
    fn add_movement_input(&mut self, direction: Vec3, scale: f32) {
        self.inputs.push((direction, scale));
    }

    fn actor_transform(&self) -> Transform {
        self.transform
    }

    fn add_world_offset(&mut self, delta: Vec3) {
        self.transform.position += delta;
    }

    fn add_local_rotation(&mut self, delta: Quat) {
        self.transform.rotate_local(delta);
    }

    fn set_max_speed(&mut self, speed: f32) {
        self.max_speed = Some(speed);
    }
}
