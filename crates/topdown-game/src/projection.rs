//! Screen-to-ground picking
//!
//! Resolves which screen point the active device is pointing at, deprojects
//! it through the player controller and intersects the ray with the ground.

use glam::{Vec2, Vec3};
use topdown_core::{Plane, Ray};

use crate::camera::CameraView;
use crate::input::InputDeviceKind;

/// Touch slot holding the primary finger
pub const PRIMARY_TOUCH: usize = 0;
/// Touch slot for the second finger
pub const SECONDARY_TOUCH: usize = 1;

/// Services the host's player controller provides to the pawn
pub trait PlayerControllerPort {
    /// Current viewport size in pixels
    fn viewport_size(&self) -> Vec2;

    /// Cursor position, if the mouse is over the viewport
    fn mouse_position(&self) -> Option<Vec2>;

    /// Position of a pressed touch in `slot`
    fn touch_state(&self, slot: usize) -> Option<Vec2>;

    /// World-space ray through a screen point
    fn deproject_screen_to_world(&self, screen: Vec2) -> Option<Ray>;

    /// Enable the input context that repeats drag actions
    fn add_drag_context(&mut self);

    /// Disable the drag input context and ignore keys held until release
    fn remove_drag_context(&mut self);

    /// Receive the camera pose after the pawn updates its rig
    fn sync_camera(&mut self, _view: &CameraView) {}
}

/// Result of a ground pick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundProjection {
    pub screen_point: Vec2,
    /// Geometric hit, reported even when `valid` is false
    pub intersection: Vec3,
    /// Whether movement code may trust the hit
    pub valid: bool,
}

impl GroundProjection {
    fn failed(screen_point: Vec2) -> Self {
        Self {
            screen_point,
            intersection: Vec3::ZERO,
            valid: false,
        }
    }
}

/// Projects the active device's screen point onto the ground plane
#[derive(Debug, Clone)]
pub struct ScreenToWorldProjector {
    plane: Plane,
    /// Vertical offset added to touch hits
    pub touch_vertical_bias: f32,
}

impl ScreenToWorldProjector {
    pub fn new(touch_vertical_bias: f32) -> Self {
        Self {
            plane: Plane::ground(),
            touch_vertical_bias,
        }
    }

    /// Screen point for the active device, falling back to viewport center
    pub fn resolve_screen_point(
        &self,
        device: InputDeviceKind,
        controller: &impl PlayerControllerPort,
    ) -> (Vec2, bool) {
        let center = controller.viewport_size() * 0.5;
        match device {
            InputDeviceKind::KeyboardMouse => match controller.mouse_position() {
                Some(point) => (point, true),
                None => (center, false),
            },
            InputDeviceKind::Touch => match controller.touch_state(PRIMARY_TOUCH) {
                Some(point) => (point, true),
                None => (center, false),
            },
            InputDeviceKind::Gamepad | InputDeviceKind::Unknown => (center, false),
        }
    }

    /// Pick the ground under the active device's pointer
    pub fn project(
        &self,
        device: InputDeviceKind,
        controller: &impl PlayerControllerPort,
    ) -> GroundProjection {
        let (screen_point, has_sample) = self.resolve_screen_point(device, controller);

        let Some(ray) = controller.deproject_screen_to_world(screen_point) else {
            return GroundProjection::failed(screen_point);
        };
        let Some(mut intersection) = self.plane.intersect_line(&ray) else {
            return GroundProjection::failed(screen_point);
        };

        if device == InputDeviceKind::Touch {
            intersection.z += self.touch_vertical_bias;
        }

        let valid = match device {
            InputDeviceKind::Unknown => false,
            InputDeviceKind::KeyboardMouse | InputDeviceKind::Touch => has_sample,
            InputDeviceKind::Gamepad => true,
        };

        GroundProjection {
            screen_point,
            intersection,
            valid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedController;

    fn projector() -> ScreenToWorldProjector {
        ScreenToWorldProjector::new(-500.0)
    }

    fn straight_down() -> ScriptedController {
        ScriptedController::new()
            .with_ray(Ray::new(Vec3::new(0.0, 0.0, 1000.0), Vec3::NEG_Z))
    }

    #[test]
    fn test_straight_down_hits_origin() {
        let controller = straight_down().with_mouse(Vec2::new(10.0, 10.0));
        let hit = projector().project(InputDeviceKind::KeyboardMouse, &controller);
        assert!(hit.valid);
        assert_eq!(hit.intersection, Vec3::ZERO);
        assert_eq!(hit.screen_point, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_touch_bias() {
        let controller = straight_down().with_touch(PRIMARY_TOUCH, Vec2::new(5.0, 5.0));
        let hit = projector().project(InputDeviceKind::Touch, &controller);
        assert!(hit.valid);
        assert_eq!(hit.intersection, Vec3::new(0.0, 0.0, -500.0));
    }

    #[test]
    fn test_validity_per_device() {
        let controller = straight_down();
        let p = projector();
        assert!(!p.project(InputDeviceKind::Unknown, &controller).valid);
        assert!(!p.project(InputDeviceKind::KeyboardMouse, &controller).valid);
        assert!(!p.project(InputDeviceKind::Touch, &controller).valid);
        assert!(p.project(InputDeviceKind::Gamepad, &controller).valid);
    }

    #[test]
    fn test_missing_sample_uses_center_and_keeps_geometry() {
        let controller = straight_down();
        let hit = projector().project(InputDeviceKind::KeyboardMouse, &controller);
        assert_eq!(hit.screen_point, Vec2::new(960.0, 540.0));
        assert!(!hit.valid);
        assert_eq!(hit.intersection, Vec3::ZERO);
    }

    #[test]
    fn test_gamepad_ignores_mouse() {
        let controller = straight_down().with_mouse(Vec2::new(1.0, 2.0));
        let hit = projector().project(InputDeviceKind::Gamepad, &controller);
        assert_eq!(hit.screen_point, Vec2::new(960.0, 540.0));
    }

    #[test]
    fn test_far_camera_still_hits_ground() {
        let direction = Vec3::new(1.0, 0.0, -1.0).normalize();
        let controller = ScriptedController::new()
            .with_mouse(Vec2::new(1.0, 1.0))
            .with_ray(Ray::new(Vec3::new(0.0, 0.0, 5_000_000.0), direction));
        let hit = projector().project(InputDeviceKind::KeyboardMouse, &controller);
        assert!(hit.valid);
        assert!((hit.intersection - Vec3::new(5_000_000.0, 0.0, 0.0)).length() < 1.0);
    }

    #[test]
    fn test_parallel_ray_fails() {
        let controller = ScriptedController::new()
            .with_mouse(Vec2::new(1.0, 1.0))
            .with_ray(Ray::new(Vec3::new(0.0, 0.0, 1000.0), Vec3::X));
        let hit = projector().project(InputDeviceKind::KeyboardMouse, &controller);
        assert!(!hit.valid);
    }

    #[test]
    fn test_deprojection_failure() {
        let controller = ScriptedController::new().with_mouse(Vec2::new(1.0, 1.0));
        let hit = projector().project(InputDeviceKind::KeyboardMouse, &controller);
        assert!(!hit.valid);
        assert_eq!(hit.screen_point, Vec2::new(1.0, 1.0));
    }
}
