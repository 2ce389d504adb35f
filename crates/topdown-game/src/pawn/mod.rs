//! Top-down pawn
//!
//! Per-tick movement calculators, the probe and cursor, and the pawn that
//! orchestrates them.

mod controller;
mod cursor;
mod drag;
mod edge_scroll;
mod motion;
mod movement;
mod origin_pull;

pub use controller::{SelectOutcome, TopDownPawn};
pub use cursor::{CursorConfig, CursorVisual, HoverTarget, ProbeVolume, WorldActor};
pub use drag::{DragPanCalculator, DragStep};
pub use edge_scroll::EdgeScrollCalculator;
pub use motion::{FloatingMovementConfig, FloatingPawnMovement, PawnMotionPort};
pub use movement::MovementConfig;
pub use origin_pull::OriginPullCalculator;
