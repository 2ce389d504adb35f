//! Topdown Core - Core types and utilities for the top-down controller
//!
//! This crate provides the foundational types used throughout the workspace:
//! - Mathematical primitives (re-exported from glam)
//! - Transform and bounds types with exponential interpolation
//! - Ray/plane geometry for ground picking
//! - A fixed-interval tick timer

pub mod geometry;
pub mod time;
pub mod types;

pub use geometry::{Plane, Ray};
pub use glam::{Quat, Vec2, Vec3};
pub use time::{FixedTimer, TimerConfig};
pub use types::{vinterp_to, Bounds, EntityId, Transform};
