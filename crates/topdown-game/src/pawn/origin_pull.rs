//! Pull the pawn back toward the world origin once it drifts too far

use glam::Vec3;

/// Squared length under which a position counts as the origin
const DIRECTION_EPSILON: f32 = 1e-4;

/// Movement toward the origin, growing linearly past a start radius
#[derive(Debug, Clone, Copy)]
pub struct OriginPullCalculator {
    pub start_distance: f32,
    pub falloff_distance: f32,
}

impl OriginPullCalculator {
    pub fn new(start_distance: f32, falloff_distance: f32) -> Self {
        Self {
            start_distance,
            falloff_distance,
        }
    }

    /// Pull strength; zero inside the start radius, unbounded outside
    pub fn scale(&self, position: Vec3) -> f32 {
        ((position.length() - self.start_distance) / self.falloff_distance).max(0.0)
    }

    /// Flat unit direction toward the origin, or zero at the origin
    pub fn direction(&self, position: Vec3) -> Vec3 {
        if position.length_squared() < DIRECTION_EPSILON {
            return Vec3::ZERO;
        }
        let toward_origin = -position.normalize();
        Vec3::new(toward_origin.x, toward_origin.y, 0.0)
    }

    /// Direction and scale to feed to the motion port
    pub fn contribution(&self, position: Vec3) -> (Vec3, f32) {
        (self.direction(position), self.scale(position))
    }
}
