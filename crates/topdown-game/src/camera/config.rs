//! Camera configuration

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A value interpolated between the fully zoomed-in and fully zoomed-out ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomRange {
    /// Value at curve output 0
    pub near: f32,
    /// Value at curve output 1
    pub far: f32,
}

impl ZoomRange {
    pub const fn new(near: f32, far: f32) -> Self {
        Self { near, far }
    }

    /// Linear interpolation at `t` (not clamped)
    pub fn lerp(&self, t: f32) -> f32 {
        self.near + (self.far - self.near) * t
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Zoom change per unit of zoom input
    pub zoom_speed: f32,
    /// Normalized zoom at startup
    pub initial_zoom: f32,
    /// Spring arm length
    pub arm_length: ZoomRange,
    /// Arm pitch in degrees (negative looks down)
    pub pitch: ZoomRange,
    /// Horizontal field of view in degrees; narrows as the camera pulls out
    pub field_of_view: ZoomRange,
    /// Pawn max speed
    pub max_move_speed: ZoomRange,
    /// Arm length before the first zoom update
    pub initial_arm_length: f32,
    /// Arm pitch before the first zoom update
    pub initial_pitch: f32,
    /// Field of view before the first zoom update
    pub initial_field_of_view: f32,
    /// Camera offset at the end of the arm, in arm space
    pub socket_offset: Vec3,
    /// Depth of field aperture
    pub dof_fstop: f32,
    /// Depth of field sensor width in millimetres
    pub dof_sensor_width: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            zoom_speed: 0.01,
            initial_zoom: 0.5,
            arm_length: ZoomRange::new(800.0, 40000.0),
            pitch: ZoomRange::new(-40.0, -55.0),
            field_of_view: ZoomRange::new(20.0, 15.0),
            max_move_speed: ZoomRange::new(1000.0, 6000.0),
            initial_arm_length: 1100.0,
            initial_pitch: -40.0,
            initial_field_of_view: 90.0,
            socket_offset: Vec3::new(-300.0, 0.0, 80.0),
            dof_fstop: 3.0,
            dof_sensor_width: 150.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_range_lerp() {
        let range = ZoomRange::new(800.0, 40000.0);
        assert_eq!(range.lerp(0.0), 800.0);
        assert_eq!(range.lerp(1.0), 40000.0);
        assert_eq!(range.lerp(0.5), 20400.0);
    }
}
