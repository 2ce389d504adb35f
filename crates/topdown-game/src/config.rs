//! Controller configuration

use serde::{Deserialize, Serialize};
use topdown_core::TimerConfig;

use crate::camera::CameraConfig;
use crate::pawn::{CursorConfig, FloatingMovementConfig, MovementConfig};

/// Invalid tuning values
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("camera.initial_zoom must be within [0, 1], got {0}")]
    InitialZoomOutOfRange(f32),
}

/// Everything the top-down pawn reads at construction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TopDownConfig {
    pub camera: CameraConfig,
    pub movement: MovementConfig,
    pub cursor: CursorConfig,
    pub floating: FloatingMovementConfig,
    pub timer: TimerConfig,
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

impl TopDownConfig {
    /// Reject values that would divide by zero or stall the tick
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("camera.zoom_speed", self.camera.zoom_speed)?;
        positive("movement.edge_move_distance", self.movement.edge_move_distance)?;
        positive("movement.pull_falloff_distance", self.movement.pull_falloff_distance)?;
        positive("cursor.hover_extent_divisor", self.cursor.hover_extent_divisor)?;
        positive("timer.interval", self.timer.interval)?;

        let zoom = self.camera.initial_zoom;
        if !(0.0..=1.0).contains(&zoom) {
            return Err(ConfigError::InitialZoomOutOfRange(zoom));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(TopDownConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_zero_edge_distance() {
        let mut config = TopDownConfig::default();
        config.movement.edge_move_distance = 0.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "movement.edge_move_distance",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_rejects_bad_tick_and_zoom() {
        let mut config = TopDownConfig::default();
        config.timer.interval = -1.0;
        assert!(config.validate().is_err());

        let mut config = TopDownConfig::default();
        config.camera.initial_zoom = 1.5;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InitialZoomOutOfRange(1.5))
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: TopDownConfig = toml::from_str(
            r#"
            [camera]
            zoom_speed = 0.02

            [movement]
            edge_move_distance = 80.0
            "#,
        )
        .unwrap();
        assert_eq!(config.camera.zoom_speed, 0.02);
        assert_eq!(config.camera.initial_zoom, 0.5);
        assert_eq!(config.movement.edge_move_distance, 80.0);
        assert_eq!(config.floating.max_speed, 1500.0);
    }
}
