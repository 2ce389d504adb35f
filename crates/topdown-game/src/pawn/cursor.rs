//! Ground cursor, hover target and the probe volume
//!
//! The probe volume follows the ground pick and reports overlaps. The cursor
//! visual eases toward the probe, or wraps a hovered actor with a pulse.

use std::fmt;
use std::rc::{Rc, Weak};

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use topdown_core::{vinterp_to, Bounds, EntityId, Transform};

use crate::input::InputDeviceKind;
use crate::projection::GroundProjection;

/// Something in the world the probe can overlap
pub trait WorldActor {
    fn id(&self) -> EntityId;

    /// Axis-aligned bounds including child components
    fn bounds(&self) -> Bounds;
}

/// Cursor visual tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Where the cursor parks on touch devices
    pub touch_location: Vec3,
    /// Scale on touch devices and when following the probe
    pub idle_scale: Vec3,
    /// Height the cursor hovers at over a hovered actor
    pub hover_height: f32,
    /// Divides the hovered actor's largest horizontal extent
    pub hover_extent_divisor: f32,
    /// Added to the hover scale factor
    pub hover_base_scale: f32,
    /// Pulse angular rate applied to the tick delta
    pub pulse_rate: f32,
    pub pulse_amplitude: f32,
    /// Cursor easing speed
    pub interp_speed: f32,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            touch_location: Vec3::new(0.0, 0.0, -100.0),
            idle_scale: Vec3::new(2.0, 2.0, 1.0),
            hover_height: 20.0,
            hover_extent_divisor: 50.0,
            hover_base_scale: 1.5,
            pulse_rate: 5.0,
            pulse_amplitude: 0.25,
            interp_speed: 12.0,
        }
    }
}

impl CursorConfig {
    /// Hover pulsation for a tick delta, within `±pulse_amplitude`
    pub fn pulse_offset(&self, delta_seconds: f32) -> f32 {
        (delta_seconds * self.pulse_rate).sin() * self.pulse_amplitude
    }
}

/// Non-owning reference to the actor under the probe
#[derive(Default, Clone)]
pub struct HoverTarget {
    actor: Option<Weak<dyn WorldActor>>,
}

impl fmt::Debug for HoverTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HoverTarget")
            .field("actor", &self.get().map(|actor| actor.id()))
            .finish()
    }
}

impl HoverTarget {
    pub fn set(&mut self, actor: &Rc<dyn WorldActor>) {
        self.actor = Some(Rc::downgrade(actor));
    }

    /// Forget the target if it is `id`
    pub fn clear_if(&mut self, id: EntityId) {
        if self.get().is_some_and(|actor| actor.id() == id) {
            self.actor = None;
        }
    }

    /// The hovered actor, if it is still alive
    pub fn get(&self) -> Option<Rc<dyn WorldActor>> {
        self.actor.as_ref().and_then(Weak::upgrade)
    }
}

/// Collision probe that follows the ground pick
#[derive(Default, Clone)]
pub struct ProbeVolume {
    pub transform: Transform,
    overlapping: Vec<Weak<dyn WorldActor>>,
}

impl fmt::Debug for ProbeVolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeVolume")
            .field("transform", &self.transform)
            .field("overlapping", &self.overlapping.len())
            .finish()
    }
}

impl ProbeVolume {
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn snap_to(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    pub fn interp_to(&mut self, target: Vec3, delta_seconds: f32, speed: f32) {
        self.transform.position = vinterp_to(self.transform.position, target, delta_seconds, speed);
    }

    pub fn begin_overlap(&mut self, actor: &Rc<dyn WorldActor>) {
        let id = actor.id();
        self.overlapping
            .retain(|weak| weak.upgrade().is_some_and(|other| other.id() != id));
        self.overlapping.push(Rc::downgrade(actor));
    }

    pub fn end_overlap(&mut self, id: EntityId) {
        self.overlapping
            .retain(|weak| weak.upgrade().is_some_and(|other| other.id() != id));
    }

    /// Oldest live overlapping actor
    pub fn first_overlapping(&self) -> Option<Rc<dyn WorldActor>> {
        self.overlapping.iter().find_map(Weak::upgrade)
    }
}

/// Rendered ground cursor
#[derive(Debug, Clone)]
pub struct CursorVisual {
    pub config: CursorConfig,
    transform: Transform,
}

impl CursorVisual {
    pub fn new(config: CursorConfig) -> Self {
        let transform = Transform::new(Vec3::ZERO, Quat::IDENTITY, config.idle_scale);
        Self { config, transform }
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Where the cursor wants to be this tick
    pub fn target(
        &self,
        device: InputDeviceKind,
        projection: &GroundProjection,
        hover: Option<&dyn WorldActor>,
        probe: &ProbeVolume,
        delta_seconds: f32,
    ) -> Transform {
        let config = &self.config;

        if device == InputDeviceKind::Touch {
            // Off-screen park spot, except when the pick failed
            let location = if projection.valid {
                config.touch_location
            } else {
                projection.intersection
            };
            return Transform::new(location, Quat::IDENTITY, config.idle_scale);
        }

        if let Some(actor) = hover {
            let bounds = actor.bounds();
            let location = Vec3::new(bounds.origin.x, bounds.origin.y, config.hover_height);
            let factor = bounds.max_horizontal_extent() / config.hover_extent_divisor
                + config.pulse_offset(delta_seconds)
                + config.hover_base_scale;
            return Transform::new(location, Quat::IDENTITY, Vec3::new(factor, factor, 1.0));
        }

        Transform::new(probe.position(), probe.transform.rotation, config.idle_scale)
    }

    /// Ease toward this tick's target
    pub fn update(
        &mut self,
        device: InputDeviceKind,
        projection: &GroundProjection,
        hover: Option<&dyn WorldActor>,
        probe: &ProbeVolume,
        delta_seconds: f32,
    ) {
        let target = self.target(device, projection, hover, probe, delta_seconds);
        self.transform = self
            .transform
            .interp_to(&target, delta_seconds, self.config.interp_speed);
    }
}
