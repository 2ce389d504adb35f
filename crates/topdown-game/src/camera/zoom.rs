//! Zoom state machine
//!
//! A single normalized value drives arm length, tilt, field of view, focal
//! distance and pawn speed. Nothing else sets those directly.

use std::fmt;

use super::config::{CameraConfig, ZoomRange};
use super::curve::ZoomCurve;

/// Camera rig values derived from the zoom value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRigParameters {
    pub arm_length: f32,
    /// Degrees, negative looks down
    pub tilt_pitch: f32,
    /// Degrees
    pub field_of_view: f32,
    /// Always equal to `arm_length`
    pub focal_distance: f32,
    pub max_move_speed: f32,
}

/// Owns the normalized zoom value and its response curve
pub struct ZoomStateMachine {
    value: f32,
    velocity: f32,
    speed: f32,
    curve: Option<Box<dyn ZoomCurve>>,
    arm_length: ZoomRange,
    pitch: ZoomRange,
    field_of_view: ZoomRange,
    max_move_speed: ZoomRange,
}

impl fmt::Debug for ZoomStateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoomStateMachine")
            .field("value", &self.value)
            .field("velocity", &self.velocity)
            .field("speed", &self.speed)
            .field("has_curve", &self.curve.is_some())
            .finish()
    }
}

impl ZoomStateMachine {
    /// Create a zoom state from camera config, without a curve
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            value: config.initial_zoom.clamp(0.0, 1.0),
            velocity: 0.0,
            speed: config.zoom_speed,
            curve: None,
            arm_length: config.arm_length,
            pitch: config.pitch,
            field_of_view: config.field_of_view,
            max_move_speed: config.max_move_speed,
        }
    }

    /// Attach the response curve
    pub fn with_curve(mut self, curve: impl ZoomCurve + 'static) -> Self {
        self.curve = Some(Box::new(curve));
        self
    }

    /// Replace or remove the response curve
    pub fn set_curve(&mut self, curve: Option<Box<dyn ZoomCurve>>) {
        self.curve = curve;
    }

    pub fn has_curve(&self) -> bool {
        self.curve.is_some()
    }

    /// Normalized zoom in [0, 1]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Last zoom input applied
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Step the zoom value by `delta * zoom_speed`, clamped to [0, 1].
    /// A non-finite delta counts as no input.
    pub fn apply_zoom_input(&mut self, delta: f32) {
        let delta = if delta.is_finite() { delta } else { 0.0 };
        self.velocity = delta;
        self.value = (self.value + delta * self.speed).clamp(0.0, 1.0);
    }

    /// Evaluate the curve and interpolate every rig parameter.
    ///
    /// Returns `None` when no curve is configured; callers keep their previous
    /// rig state in that case.
    pub fn derive_rig_parameters(&self) -> Option<CameraRigParameters> {
        let curve = self.curve.as_ref()?;
        let blend = curve.evaluate(self.value);

        let arm_length = self.arm_length.lerp(blend);
        Some(CameraRigParameters {
            arm_length,
            tilt_pitch: self.pitch.lerp(blend),
            field_of_view: self.field_of_view.lerp(blend),
            focal_distance: arm_length,
            max_move_speed: self.max_move_speed.lerp(blend),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::curve::{LinearCurve, SampledCurve};

    fn linear_zoom() -> ZoomStateMachine {
        ZoomStateMachine::new(&CameraConfig::default()).with_curve(LinearCurve)
    }

    #[test]
    fn test_initial_parameters() {
        let params = linear_zoom().derive_rig_parameters().unwrap();
        assert_eq!(params.arm_length, 20400.0);
        assert_eq!(params.tilt_pitch, -47.5);
        assert_eq!(params.field_of_view, 17.5);
        assert_eq!(params.max_move_speed, 3500.0);
    }

    #[test]
    fn test_zero_delta_is_idempotent() {
        let mut zoom = linear_zoom();
        let before = zoom.value();
        for _ in 0..10 {
            zoom.apply_zoom_input(0.0);
        }
        assert_eq!(zoom.value(), before);
    }

    #[test]
    fn test_clamps_to_exactly_one() {
        let mut config = CameraConfig::default();
        config.initial_zoom = 0.95;
        let mut zoom = ZoomStateMachine::new(&config);
        zoom.apply_zoom_input(10.0);
        assert_eq!(zoom.value(), 1.0);
        zoom.apply_zoom_input(-500.0);
        assert_eq!(zoom.value(), 0.0);
        assert_eq!(zoom.velocity(), -500.0);
    }

    #[test]
    fn test_monotonic_and_focal_tracks_arm() {
        let curve = SampledCurve::from_pairs(&[[0.0, 0.0], [0.3, 0.1], [1.0, 1.0]]).unwrap();
        let mut config = CameraConfig::default();
        config.initial_zoom = 0.0;
        let mut zoom = ZoomStateMachine::new(&config).with_curve(curve);

        let mut previous = zoom.derive_rig_parameters().unwrap();
        // Enough steps to saturate at 1.0
        for _ in 0..120 {
            zoom.apply_zoom_input(1.0);
            let params = zoom.derive_rig_parameters().unwrap();
            assert!(params.arm_length >= previous.arm_length);
            assert!(params.tilt_pitch <= previous.tilt_pitch);
            assert!(params.max_move_speed >= previous.max_move_speed);
            assert!(params.field_of_view <= previous.field_of_view);
            assert_eq!(params.focal_distance, params.arm_length);
            previous = params;
        }
        assert_eq!(zoom.value(), 1.0);
        assert_eq!(previous.arm_length, 40000.0);
    }

    #[test]
    fn test_non_finite_input_leaves_zoom_unchanged() {
        let curve = SampledCurve::from_pairs(&[[0.0, 0.0], [1.0, 1.0]]).unwrap();
        let mut zoom = ZoomStateMachine::new(&CameraConfig::default()).with_curve(curve);
        let before = zoom.derive_rig_parameters().unwrap();

        for delta in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            zoom.apply_zoom_input(delta);
            assert_eq!(zoom.value(), 0.5);
            assert_eq!(zoom.velocity(), 0.0);
        }
        assert_eq!(zoom.derive_rig_parameters().unwrap(), before);
    }

    #[test]
    fn test_missing_curve_freezes_rig() {
        let mut zoom = ZoomStateMachine::new(&CameraConfig::default());
        zoom.apply_zoom_input(5.0);
        assert!(zoom.derive_rig_parameters().is_none());
        // The value itself still moves
        assert!((zoom.value() - 0.55).abs() < 1e-6);
    }
}
