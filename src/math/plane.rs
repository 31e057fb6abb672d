//! Mirror plane for planar reflections

use crate::core::types::{Mat4, Vec3, Vec4};

/// A plane defined by a point on it and a unit normal
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReflectionPlane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl ReflectionPlane {
    /// Create a plane; the normal is normalized (zero falls back to up)
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize_or(Vec3::Y),
        }
    }

    /// Horizontal plane at the given height, facing up
    pub fn horizontal(height: f32) -> Self {
        Self::new(Vec3::new(0.0, height, 0.0), Vec3::Y)
    }

    /// Signed distance from point to plane (positive = on the normal side)
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        self.normal.dot(p - self.point)
    }

    /// Mirror a position across the plane
    pub fn reflect_point(&self, p: Vec3) -> Vec3 {
        p - 2.0 * self.signed_distance(p) * self.normal
    }

    /// Mirror a direction across the plane (translation-free)
    pub fn reflect_vector(&self, v: Vec3) -> Vec3 {
        v - 2.0 * v.dot(self.normal) * self.normal
    }

    /// Plane equation `(n, d)` in the space described by `view`, with
    /// `n·x + d >= 0` on the normal side.
    pub fn to_view_space(&self, view: &Mat4) -> Vec4 {
        let point = view.transform_point3(self.point);
        let normal = view.transform_vector3(self.normal).normalize();
        normal.extend(-point.dot(normal))
    }
}

impl Default for ReflectionPlane {
    fn default() -> Self {
        Self::horizontal(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_distance() {
        let plane = ReflectionPlane::horizontal(2.0);
        assert_eq!(plane.signed_distance(Vec3::new(0.0, 5.0, 0.0)), 3.0);
        assert_eq!(plane.signed_distance(Vec3::new(7.0, -3.0, 1.0)), -5.0);
    }

    #[test]
    fn test_reflect_point() {
        let plane = ReflectionPlane::horizontal(1.0);
        let p = plane.reflect_point(Vec3::new(3.0, 4.0, -2.0));
        assert!((p - Vec3::new(3.0, -2.0, -2.0)).length() < 1e-6);
    }

    #[test]
    fn test_double_reflection_is_identity() {
        let plane = ReflectionPlane::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.3, 1.0, -0.2));
        let vectors = [
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.4, -0.7, 0.2),
            Vec3::new(-12.0, 3.5, 8.0),
        ];
        for v in vectors {
            let twice = plane.reflect_vector(plane.reflect_vector(v));
            assert!((twice - v).length() < 1e-5, "{v:?} -> {twice:?}");

            let twice = plane.reflect_point(plane.reflect_point(v));
            assert!((twice - v).length() < 1e-4, "{v:?} -> {twice:?}");
        }
    }

    #[test]
    fn test_reflect_vector_flips_normal_component() {
        let plane = ReflectionPlane::default();
        let v = plane.reflect_vector(Vec3::new(1.0, -2.0, 3.0));
        assert_eq!(v, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_zero_normal_defaults_up() {
        let plane = ReflectionPlane::new(Vec3::ZERO, Vec3::ZERO);
        assert_eq!(plane.normal, Vec3::Y);
    }

    #[test]
    fn test_view_space_identity() {
        let plane = ReflectionPlane::horizontal(3.0);
        let eq = plane.to_view_space(&Mat4::IDENTITY);
        assert_eq!(eq, Vec4::new(0.0, 1.0, 0.0, -3.0));
        // Points above the plane evaluate positive
        assert!(eq.dot(Vec4::new(0.0, 4.0, 0.0, 1.0)) > 0.0);
    }
}
