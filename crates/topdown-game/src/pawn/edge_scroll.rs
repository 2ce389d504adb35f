//! Edge scrolling
//!
//! Pushing the pointer into a band along the viewport border moves the pawn in
//! that direction. The band is wider for touch and gamepad.

use glam::{Vec2, Vec3};
use topdown_core::Transform;

use crate::input::InputDeviceKind;
use crate::projection::GroundProjection;

use super::movement::MovementConfig;

/// Sign that maps zero to zero, unlike `f32::signum`
fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Turns a screen point near the viewport edge into a movement direction
#[derive(Debug, Clone, Copy)]
pub struct EdgeScrollCalculator {
    pub edge_move_distance: f32,
}

impl EdgeScrollCalculator {
    pub fn new(edge_move_distance: f32) -> Self {
        Self { edge_move_distance }
    }

    pub fn from_config(config: &MovementConfig) -> Self {
        Self::new(config.edge_move_distance)
    }

    /// Pawn-local direction for a screen point: x forward, y lateral
    pub fn local_direction(&self, screen_point: Vec2, viewport: Vec2, edge_scale: f32) -> Vec3 {
        let center = viewport * 0.5;
        let offset = screen_point - center;
        let threshold = center - Vec2::splat(self.edge_move_distance * edge_scale);

        let excess = (offset.abs() - threshold).max(Vec2::ZERO) / self.edge_move_distance;
        let lateral = excess.x * sign(offset.x);
        // Screen Y grows downward
        let forward = excess.y * -sign(offset.y);

        Vec3::new(forward, lateral, 0.0)
    }

    /// World-space edge scroll direction, zero for an untrusted projection
    pub fn direction(
        &self,
        projection: &GroundProjection,
        viewport: Vec2,
        device: InputDeviceKind,
        edge_scale: f32,
        pawn: &Transform,
    ) -> Vec3 {
        if !projection.valid || device == InputDeviceKind::Unknown {
            return Vec3::ZERO;
        }
        pawn.rotation * self.local_direction(projection.screen_point, viewport, edge_scale)
    }
}
