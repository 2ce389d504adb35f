//! Spring-arm camera rig
//!
//! The camera hangs off the pawn on an arm of configurable length, tilted by a
//! fixed pitch and shifted by a socket offset at the arm's end.

use glam::{Quat, Vec2, Vec3};
use topdown_core::{Ray, Transform};

use super::config::CameraConfig;
use super::zoom::CameraRigParameters;

/// Depth of field override applied to the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthOfField {
    pub fstop: f32,
    /// Millimetres
    pub sensor_width: f32,
    pub focal_distance: f32,
}

/// Resolved camera pose for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub position: Vec3,
    pub rotation: Quat,
    /// Horizontal field of view in degrees
    pub field_of_view: f32,
}

impl CameraView {
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Build the world-space ray through a screen pixel.
    ///
    /// Returns `None` for an empty viewport.
    pub fn deproject(&self, screen: Vec2, viewport: Vec2) -> Option<Ray> {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return None;
        }

        let ndc_x = 2.0 * screen.x / viewport.x - 1.0;
        let ndc_y = 1.0 - 2.0 * screen.y / viewport.y;
        let aspect = viewport.x / viewport.y;
        let half_width = (self.field_of_view.to_radians() * 0.5).tan();

        let direction = self.forward()
            + self.right() * ndc_x * half_width
            + self.up() * ndc_y * half_width / aspect;
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }
        Some(Ray::new(self.position, direction))
    }
}

/// Spring-arm camera mount
#[derive(Debug, Clone)]
pub struct SpringArmRig {
    /// Distance from the pawn to the arm end
    pub arm_length: f32,
    /// Pitch in degrees relative to the pawn (negative looks down)
    pub pitch: f32,
    /// Offset at the arm end, in arm space
    pub socket_offset: Vec3,
    /// Horizontal field of view in degrees
    pub field_of_view: f32,
    /// Post-process focus
    pub depth_of_field: DepthOfField,
}

impl SpringArmRig {
    /// Create a rig with the pre-zoom framing from config
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            arm_length: config.initial_arm_length,
            pitch: config.initial_pitch,
            socket_offset: config.socket_offset,
            field_of_view: config.initial_field_of_view,
            depth_of_field: DepthOfField {
                fstop: config.dof_fstop,
                sensor_width: config.dof_sensor_width,
                focal_distance: config.initial_arm_length,
            },
        }
    }

    /// Apply zoom-derived parameters
    pub fn apply(&mut self, params: &CameraRigParameters) {
        self.arm_length = params.arm_length;
        self.pitch = params.tilt_pitch;
        self.field_of_view = params.field_of_view;
        self.focus_on_arm();
    }

    /// Point the depth of field focus at the arm end
    pub fn focus_on_arm(&mut self) {
        self.depth_of_field.focal_distance = self.arm_length;
    }

    /// World rotation of the arm for a pawn transform
    pub fn arm_rotation(&self, pawn: &Transform) -> Quat {
        // Positive pitch looks up, which is a negative turn about +Y
        pawn.rotation * Quat::from_rotation_y(-self.pitch.to_radians())
    }

    /// Where the camera actually sits
    pub fn camera_view(&self, pawn: &Transform) -> CameraView {
        let rotation = self.arm_rotation(pawn);
        let position =
            pawn.position - rotation * Vec3::X * self.arm_length + rotation * self.socket_offset;
        CameraView {
            position,
            rotation,
            field_of_view: self.field_of_view,
        }
    }

    /// Offset between the arm-derived camera point used for drag anchoring
    /// and the real camera position.
    ///
    /// The drag point only follows the arm's forward and up axes, so this
    /// depends on the rig pose alone and not on zoom.
    pub fn camera_world_offset(&self, pawn: &Transform) -> Vec3 {
        let rotation = self.arm_rotation(pawn);
        let forward = rotation * Vec3::X;
        let up = rotation * Vec3::Z;

        let backward = forward * (self.arm_length - self.socket_offset.x) * -1.0;
        let vertical = up * self.socket_offset.z;
        let drag_point = pawn.position + backward + vertical;

        drag_point - self.camera_view(pawn).position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pawn_at(position: Vec3, yaw_degrees: f32) -> Transform {
        Transform::new(
            position,
            Quat::from_rotation_z(yaw_degrees.to_radians()),
            Vec3::ONE,
        )
    }

    #[test]
    fn test_camera_sits_behind_and_above() {
        let rig = SpringArmRig::new(&CameraConfig::default());
        let view = rig.camera_view(&pawn_at(Vec3::ZERO, 0.0));
        assert!(view.position.x < 0.0);
        assert!(view.position.z > 0.0);
        assert!(view.forward().z < 0.0);
    }

    #[test]
    fn test_camera_follows_yaw() {
        let rig = SpringArmRig::new(&CameraConfig::default());
        let view = rig.camera_view(&pawn_at(Vec3::ZERO, 90.0));
        // Facing +Y, so the camera trails on -Y
        assert!(view.position.y < 0.0);
        assert!(view.position.x.abs() < 1e-2);
    }

    #[test]
    fn test_center_ray_looks_along_forward() {
        let rig = SpringArmRig::new(&CameraConfig::default());
        let view = rig.camera_view(&pawn_at(Vec3::ZERO, 0.0));
        let ray = view
            .deproject(Vec2::new(960.0, 540.0), Vec2::new(1920.0, 1080.0))
            .unwrap();
        assert!((ray.direction - view.forward()).length() < 1e-5);
    }

    #[test]
    fn test_deproject_edges() {
        let rig = SpringArmRig::new(&CameraConfig::default());
        let view = rig.camera_view(&pawn_at(Vec3::ZERO, 0.0));
        let viewport = Vec2::new(1920.0, 1080.0);
        let right_edge = view.deproject(Vec2::new(1920.0, 540.0), viewport).unwrap();
        assert!(right_edge.direction.dot(view.right()) > 0.0);
        let top_edge = view.deproject(Vec2::new(960.0, 0.0), viewport).unwrap();
        assert!(top_edge.direction.dot(view.up()) > 0.0);
        assert!(view.deproject(Vec2::ZERO, Vec2::ZERO).is_none());
    }

    #[test]
    fn test_camera_world_offset_independent_of_zoom() {
        let mut rig = SpringArmRig::new(&CameraConfig::default());
        rig.socket_offset = Vec3::new(-300.0, 40.0, 80.0);
        let pawn = pawn_at(Vec3::new(500.0, -200.0, 0.0), 30.0);

        let before = rig.camera_world_offset(&pawn);
        rig.arm_length = 35000.0;
        let after = rig.camera_world_offset(&pawn);
        assert!((before - after).length() < 0.05);

        // Only the lateral socket component survives
        let expected = -(rig.arm_rotation(&pawn) * Vec3::Y) * 40.0;
        assert!((after - expected).length() < 0.05);
    }

    #[test]
    fn test_default_socket_has_zero_drag_offset() {
        let rig = SpringArmRig::new(&CameraConfig::default());
        let offset = rig.camera_world_offset(&pawn_at(Vec3::ZERO, 45.0));
        assert!(offset.length() < 1e-2);
    }

    #[test]
    fn test_apply_keeps_focus_on_arm() {
        let mut rig = SpringArmRig::new(&CameraConfig::default());
        rig.apply(&CameraRigParameters {
            arm_length: 5000.0,
            tilt_pitch: -50.0,
            field_of_view: 18.0,
            focal_distance: 5000.0,
            max_move_speed: 2000.0,
        });
        assert_eq!(rig.depth_of_field.focal_distance, 5000.0);
        assert_eq!(rig.pitch, -50.0);
    }
}
