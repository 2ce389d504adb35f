//! Rays, planes and their intersection

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Rays closer to parallel than this are treated as missing the plane.
const PARALLEL_EPSILON: f32 = 1e-6;

/// A half-line in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at `distance` along the ray
    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// An infinite plane defined by a point and a normal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl Plane {
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize_or_zero(),
        }
    }

    /// The horizontal ground plane through the world origin
    pub fn ground() -> Self {
        Self::from_point_normal(Vec3::ZERO, Vec3::Z)
    }

    /// Signed distance of a point above the plane
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        (point - self.point).dot(self.normal)
    }

    /// Intersect the infinite line through `ray` with this plane.
    ///
    /// Returns `None` when the line runs parallel to the plane. Hits behind the
    /// ray origin are still reported, matching line (not half-line) semantics.
    pub fn intersect_line(&self, ray: &Ray) -> Option<Vec3> {
        let denom = ray.direction.dot(self.normal);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let distance = -self.signed_distance(ray.origin) / denom;
        Some(ray.at(distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_down_hits_origin_exactly() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1000.0), Vec3::NEG_Z);
        let hit = Plane::ground().intersect_line(&ray).unwrap();
        assert_eq!(hit, Vec3::ZERO);
    }

    #[test]
    fn test_oblique_ray() {
        let direction = Vec3::new(1.0, 0.0, -1.0).normalize();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 100.0), direction);
        let hit = Plane::ground().intersect_line(&ray).unwrap();
        assert!((hit - Vec3::new(100.0, 0.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_parallel_ray_misses() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 100.0), Vec3::X);
        assert!(Plane::ground().intersect_line(&ray).is_none());
    }

    #[test]
    fn test_signed_distance_and_line_hit_behind_origin() {
        let plane = Plane::from_point_normal(Vec3::new(0.0, 0.0, 50.0), Vec3::Z);
        assert_eq!(plane.signed_distance(Vec3::new(3.0, 4.0, 80.0)), 30.0);
        assert_eq!(plane.signed_distance(Vec3::new(0.0, 0.0, 20.0)), -30.0);

        // Pointing away from the plane still reports the line hit
        let ray = Ray::new(Vec3::new(7.0, 0.0, 80.0), Vec3::Z);
        let hit = plane.intersect_line(&ray).unwrap();
        assert!((hit - Vec3::new(7.0, 0.0, 50.0)).length() < 1e-4);
    }
}
