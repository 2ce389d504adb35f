//! Pawn motion
//!
//! The pawn never moves itself directly; it feeds movement input into a
//! motion port which integrates it once per tick.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use topdown_core::Transform;

/// Movement services the pawn needs from its host
pub trait PawnMotionPort {
    /// Accumulate input for the next integration step
    fn add_movement_input(&mut self, direction: Vec3, scale: f32);

    fn actor_transform(&self) -> Transform;

    fn actor_position(&self) -> Vec3 {
        self.actor_transform().position
    }

    /// Move the actor immediately, bypassing velocity
    fn add_world_offset(&mut self, delta: Vec3);

    fn add_local_rotation(&mut self, delta: Quat);

    fn set_max_speed(&mut self, speed: f32);
}

/// Floating movement tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatingMovementConfig {
    pub max_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    /// How quickly velocity turns toward a new input direction
    pub turning_boost: f32,
}

impl Default for FloatingMovementConfig {
    fn default() -> Self {
        Self {
            max_speed: 1500.0,
            acceleration: 8000.0,
            deceleration: 6500.0,
            turning_boost: 8.0,
        }
    }
}

/// Velocity-based movement constrained to the ground plane
#[derive(Debug, Clone)]
pub struct FloatingPawnMovement {
    pub config: FloatingMovementConfig,
    transform: Transform,
    velocity: Vec3,
    pending_input: Vec3,
}

impl FloatingPawnMovement {
    pub fn new() -> Self {
        Self::with_config(FloatingMovementConfig::default())
    }

    pub fn with_config(config: FloatingMovementConfig) -> Self {
        Self {
            config,
            transform: Transform::default(),
            velocity: Vec3::ZERO,
            pending_input: Vec3::ZERO,
        }
    }

    /// Place the pawn and stop it
    pub fn teleport(&mut self, position: Vec3) {
        self.transform.position = position;
        self.velocity = Vec3::ZERO;
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn pending_input(&self) -> Vec3 {
        self.pending_input
    }

    /// Consume pending input and advance the pawn by one step
    pub fn integrate(&mut self, dt: f32) {
        let input = self.pending_input.clamp_length_max(1.0);
        self.pending_input = Vec3::ZERO;

        let magnitude = input.length();
        if magnitude > 0.0 {
            let direction = input / magnitude;
            let speed = self.velocity.length();
            let turn = (dt * self.config.turning_boost).min(1.0);
            self.velocity += (direction * speed - self.velocity) * turn;

            self.velocity += input * self.config.acceleration * dt;
            self.velocity = self
                .velocity
                .clamp_length_max(self.config.max_speed * magnitude);
        } else {
            self.velocity =
                move_towards_vec3(self.velocity, Vec3::ZERO, self.config.deceleration * dt);
        }

        self.velocity.z = 0.0;
        self.transform.position += self.velocity * dt;
    }
}

impl Default for FloatingPawnMovement {
    fn default() -> Self {
        Self::new()
    }
}

impl PawnMotionPort for FloatingPawnMovement {
    fn add_movement_input(&mut self, direction: Vec3, scale: f32) {
        self.pending_input += direction * scale;
    }

    fn actor_transform(&self) -> Transform {
        self.transform
    }

    fn add_world_offset(&mut self, delta: Vec3) {
        self.transform.translate(delta);
    }

    fn add_local_rotation(&mut self, delta: Quat) {
        self.transform.rotate_local(delta);
    }

    fn set_max_speed(&mut self, speed: f32) {
        self.config.max_speed = speed;
    }
}

/// Move `current` toward `target` by at most `max_delta`
fn move_towards_vec3(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let diff = target - current;
    let distance = diff.length();

    if distance <= max_delta || distance == 0.0 {
        target
    } else {
        current + diff / distance * max_delta
    }
}
