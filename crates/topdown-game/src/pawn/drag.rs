//! Drag panning
//!
//! While a drag session is open the ground point grabbed at select time stays
//! under the pointer, so the pawn moves opposite to the pointer.

use glam::Vec3;

use crate::projection::GroundProjection;

/// Outcome of one drag step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragStep {
    /// Flat world offset to add to the pawn
    Pan(Vec3),
    /// The pick failed; the session has been closed
    Lost,
    /// No session is open
    Idle,
}

/// Drag session state and the pan offset computation
#[derive(Debug, Clone, Default)]
pub struct DragPanCalculator {
    anchor: Option<Vec3>,
}

impl DragPanCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session anchored at a ground point
    pub fn begin(&mut self, anchor: Vec3) {
        self.anchor = Some(anchor);
    }

    /// Close the session
    pub fn end(&mut self) {
        self.anchor = None;
    }

    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn anchor(&self) -> Option<Vec3> {
        self.anchor
    }

    /// Pan offset for a fresh projection; ends the session on a failed pick
    pub fn step(&mut self, projection: &GroundProjection, camera_world_offset: Vec3) -> DragStep {
        let Some(anchor) = self.anchor else {
            return DragStep::Idle;
        };
        if !projection.valid {
            self.end();
            return DragStep::Lost;
        }

        let delta = anchor - projection.intersection - camera_world_offset;
        DragStep::Pan(Vec3::new(delta.x, delta.y, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn hit(intersection: Vec3, valid: bool) -> GroundProjection {
        GroundProjection {
            screen_point: Vec2::ZERO,
            intersection,
            valid,
        }
    }

    #[test]
    fn test_pan_offset() {
        let mut drag = DragPanCalculator::new();
        drag.begin(Vec3::new(100.0, 200.0, 0.0));
        let step = drag.step(&hit(Vec3::new(90.0, 200.0, 0.0), true), Vec3::ZERO);
        assert_eq!(step, DragStep::Pan(Vec3::new(10.0, 0.0, 0.0)));
        assert!(drag.is_active());
    }

    #[test]
    fn test_pan_is_flat_and_subtracts_camera_offset() {
        let mut drag = DragPanCalculator::new();
        drag.begin(Vec3::new(0.0, 0.0, 30.0));
        let step = drag.step(&hit(Vec3::ZERO, true), Vec3::new(0.0, 5.0, 7.0));
        assert_eq!(step, DragStep::Pan(Vec3::new(0.0, -5.0, 0.0)));
    }

    #[test]
    fn test_failed_pick_ends_session() {
        let mut drag = DragPanCalculator::new();
        drag.begin(Vec3::ONE);
        assert_eq!(drag.step(&hit(Vec3::ZERO, false), Vec3::ZERO), DragStep::Lost);
        assert!(!drag.is_active());
        assert_eq!(drag.step(&hit(Vec3::ZERO, true), Vec3::ZERO), DragStep::Idle);
    }
}
