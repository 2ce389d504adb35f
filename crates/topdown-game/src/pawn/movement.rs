//! Movement configuration and constants

use serde::{Deserialize, Serialize};

use crate::input::InputDeviceKind;

/// Ground picking, edge scrolling and origin pull tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Distance from the origin where the pull back starts
    pub pull_start_distance: f32,
    /// Extra distance past the start over which the pull reaches full strength
    pub pull_falloff_distance: f32,
    /// Base edge-scroll band in pixels
    pub edge_move_distance: f32,
    /// Band multiplier for mouse
    pub mouse_edge_scale: f32,
    /// Band multiplier for gamepad
    pub gamepad_edge_scale: f32,
    /// Band multiplier for touch
    pub touch_edge_scale: f32,
    /// Vertical offset added to touch ground hits
    pub touch_vertical_bias: f32,
    /// Height of the probe volume above non-touch ground hits
    pub probe_lift: f32,
    /// Height the touch probe sinks toward when the pick fails
    pub probe_sink_height: f32,
    /// Interpolation speed of the sinking touch probe
    pub probe_interp_speed: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            pull_start_distance: 9000.0,
            pull_falloff_distance: 5000.0,
            edge_move_distance: 50.0,
            mouse_edge_scale: 1.0,
            gamepad_edge_scale: 2.0,
            touch_edge_scale: 2.0,
            touch_vertical_bias: -500.0,
            probe_lift: 10.0,
            probe_sink_height: -500.0,
            probe_interp_speed: 12.0,
        }
    }
}

impl MovementConfig {
    /// Edge band multiplier for a device; no band without a known device
    pub fn edge_scale(&self, device: InputDeviceKind) -> f32 {
        match device {
            InputDeviceKind::KeyboardMouse => self.mouse_edge_scale,
            InputDeviceKind::Gamepad => self.gamepad_edge_scale,
            InputDeviceKind::Touch => self.touch_edge_scale,
            InputDeviceKind::Unknown => 0.0,
        }
    }
}
