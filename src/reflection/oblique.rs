//! Oblique near-plane clipping (Lengyel, "Oblique View Frustum Depth Projection and Clipping").

use crate::core::types::{Mat4, Vec4};

/// Rebuild `projection` so its near plane is `clip_plane`.
///
/// `clip_plane` is `(n, d)` in view space with `n·p + d >= 0` on the side
/// that stays visible; the camera origin must lie on the negative side.
/// Only the depth row changes: the far plane is tilted to pass through the
/// frustum corner opposite the new near plane, so x/y (and thus FOV) are
/// untouched. Assumes the `[0, 1]` clip depth range of `Mat4::perspective_rh`.
///
/// Returns `projection` unchanged if the plane is degenerate for it.
pub fn oblique_projection(projection: Mat4, clip_plane: Vec4) -> Mat4 {
    let inverse = projection.inverse();

    // Plane in clip space, then the far corner of the frustum on its visible side
    let clip_space_plane = inverse.transpose() * clip_plane;
    let corner = inverse
        * Vec4::new(
            clip_space_plane.x.signum(),
            clip_space_plane.y.signum(),
            1.0,
            1.0,
        );

    let denom = clip_plane.dot(corner);
    if denom.abs() < f32::EPSILON || !denom.is_finite() {
        log::debug!("Oblique clip plane {:?} is degenerate, keeping projection", clip_plane);
        return projection;
    }

    let w_row = projection.row(3);
    let depth_row = clip_plane * (w_row.dot(corner) / denom);

    Mat4::from_cols(projection.row(0), projection.row(1), depth_row, w_row).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec3;

    fn perspective() -> Mat4 {
        Mat4::perspective_rh(60f32.to_radians(), 16.0 / 9.0, 0.3, 100.0)
    }

    fn ndc(m: &Mat4, p: Vec3) -> Vec3 {
        let c = *m * p.extend(1.0);
        c.truncate() / c.w
    }

    #[test]
    fn test_points_on_plane_land_on_near_boundary() {
        // Horizontal plane two units above a camera looking down -Z, visible side up
        let plane = Vec4::new(0.0, 1.0, 0.0, -2.0);
        let m = oblique_projection(perspective(), plane);

        for p in [Vec3::new(0.0, 2.0, -5.0), Vec3::new(3.0, 2.0, -20.0), Vec3::new(-1.0, 2.0, -8.0)] {
            assert!(ndc(&m, p).z.abs() < 1e-4, "{p:?} -> {:?}", ndc(&m, p));
        }
    }

    #[test]
    fn test_sides_of_plane() {
        let plane = Vec4::new(0.0, 1.0, 0.0, -2.0);
        let m = oblique_projection(perspective(), plane);

        // Visible side maps inside [0, 1]
        let above = ndc(&m, Vec3::new(0.0, 3.0, -10.0));
        assert!(above.z > 0.0 && above.z <= 1.0, "{above:?}");
        // Between the camera and the plane gets clipped
        let below = ndc(&m, Vec3::new(0.0, 1.0, -10.0));
        assert!(below.z < 0.0, "{below:?}");
    }

    #[test]
    fn test_xy_rows_unchanged() {
        let base = perspective();
        let m = oblique_projection(base, Vec4::new(0.3, 1.0, 0.1, -1.5).normalize());
        assert_eq!(m.row(0), base.row(0));
        assert_eq!(m.row(1), base.row(1));
        assert_eq!(m.row(3), base.row(3));
        assert_ne!(m.row(2), base.row(2));
    }

    #[test]
    fn test_matches_near_plane_when_plane_is_near_plane() {
        // The regular near plane z = -near, facing the camera's view direction
        let base = perspective();
        let m = oblique_projection(base, Vec4::new(0.0, 0.0, -1.0, -0.3));
        let p = Vec3::new(0.05, 0.02, -0.3);
        assert!(ndc(&m, p).z.abs() < 1e-4);
        assert!(ndc(&base, p).z.abs() < 1e-4);
    }
}
