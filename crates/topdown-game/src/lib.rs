//! Top-down game - camera pawn and input
//!
//! Provides the top-down pawn, its camera rig and zoom, ground picking and
//! input device classification.

pub mod camera;
pub mod config;
pub mod input;
pub mod pawn;
pub mod projection;

#[cfg(test)]
mod test_support;

pub use camera::{
    CameraConfig, CameraRigParameters, CameraView, LinearCurve, SampledCurve, SpringArmRig,
    ZoomCurve, ZoomStateMachine,
};
pub use config::{ConfigError, TopDownConfig};
pub use input::{
    DeviceSignal, FrameInput, InputAction, InputBindings, InputClassifier, InputDeviceKind,
    InputHandler,
};
pub use pawn::{
    CursorConfig, DragPanCalculator, EdgeScrollCalculator, FloatingMovementConfig,
    FloatingPawnMovement, MovementConfig, OriginPullCalculator, PawnMotionPort, SelectOutcome,
    TopDownPawn, WorldActor,
};
pub use projection::{GroundProjection, PlayerControllerPort, ScreenToWorldProjector};
