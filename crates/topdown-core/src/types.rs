//! Core types used throughout the top-down controller
//!
//! World convention: Z is up, local +X is forward and local +Y is right.

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Below this squared distance an interpolation snaps straight to its target.
const INTERP_SNAP_EPSILON: f32 = 1e-8;

/// Unique identifier for actors in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Create a new random entity ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform from all three components
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Compute the model matrix for this transform
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Forward direction (positive X in local space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Right direction (positive Y in local space)
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Up direction (positive Z in local space)
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Translate by the given offset
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Rotate in local space by the given quaternion
    pub fn rotate_local(&mut self, rotation: Quat) {
        self.rotation = (self.rotation * rotation).normalize();
    }

    /// Heading around the vertical axis, in radians
    pub fn yaw(&self) -> f32 {
        let forward = self.forward();
        forward.y.atan2(forward.x)
    }

    /// Interpolate between two transforms
    pub fn lerp(a: &Transform, b: &Transform, t: f32) -> Transform {
        Transform {
            position: a.position.lerp(b.position, t),
            rotation: a.rotation.slerp(b.rotation, t),
            scale: a.scale.lerp(b.scale, t),
        }
    }

    /// Move toward `target` at an exponential rate.
    ///
    /// A non-positive `speed` snaps to the target.
    pub fn interp_to(&self, target: &Transform, delta_seconds: f32, speed: f32) -> Transform {
        if speed <= 0.0 {
            return *target;
        }
        let alpha = (delta_seconds * speed).clamp(0.0, 1.0);
        Transform::lerp(self, target, alpha)
    }
}

/// Move a point toward a target at an exponential rate.
///
/// Snaps when already close or when `speed` is not positive.
pub fn vinterp_to(current: Vec3, target: Vec3, delta_seconds: f32, speed: f32) -> Vec3 {
    if speed <= 0.0 {
        return target;
    }
    let distance = target - current;
    if distance.length_squared() < INTERP_SNAP_EPSILON {
        return target;
    }
    current + distance * (delta_seconds * speed).clamp(0.0, 1.0)
}

/// Axis-aligned bounds given as a center and half extent
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub origin: Vec3,
    pub extent: Vec3,
}

impl Bounds {
    pub fn new(origin: Vec3, extent: Vec3) -> Self {
        Self { origin, extent }
    }

    /// Largest absolute half extent on the ground plane (X or Y)
    pub fn max_horizontal_extent(&self) -> f32 {
        self.extent.x.abs().max(self.extent.y.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_matrix() {
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let matrix = transform.matrix();
        let translation = matrix.col(3).truncate();
        assert_eq!(translation, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_yaw_turns_forward_toward_right() {
        let transform = Transform::new(
            Vec3::ZERO,
            Quat::from_rotation_z(90f32.to_radians()),
            Vec3::ONE,
        );
        assert!((transform.forward() - Vec3::Y).length() < 1e-5);
        assert!((transform.yaw() - 90f32.to_radians()).abs() < 1e-5);
    }

    #[test]
    fn test_vinterp_to_moves_partially() {
        let next = vinterp_to(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), 0.05, 12.0);
        assert!((next.x - 60.0).abs() < 1e-3);

        // Large steps clamp to the target instead of overshooting
        let next = vinterp_to(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), 1.0, 12.0);
        assert_eq!(next, Vec3::new(100.0, 0.0, 0.0));
    }

    #[test]
    fn test_interp_to_never_snaps_on_small_step() {
        let current = Transform::default();
        let target = Transform::from_position(Vec3::new(10.0, 0.0, 0.0));
        let next = current.interp_to(&target, 1.0 / 60.0, 12.0);
        assert!(next.position.x > 0.0 && next.position.x < 10.0);
    }

    #[test]
    fn test_bounds_horizontal_extent_ignores_height() {
        let bounds = Bounds::new(Vec3::ZERO, Vec3::new(30.0, -80.0, 500.0));
        assert_eq!(bounds.max_horizontal_extent(), 80.0);
    }
}
