//! Camera module
//!
//! Spring-arm rig, zoom state and zoom response curves.

mod config;
mod curve;
mod rig;
mod zoom;

pub use config::{CameraConfig, ZoomRange};
pub use curve::{CurveError, CurveKey, LinearCurve, SampledCurve, ZoomCurve};
pub use rig::{CameraView, DepthOfField, SpringArmRig};
pub use zoom::{CameraRigParameters, ZoomStateMachine};
