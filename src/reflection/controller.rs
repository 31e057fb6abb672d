//! Per-frame mirrored camera for planar reflections.

use crate::core::camera::{look_rotation, Camera};
use crate::core::types::{Mat4, Quat, UVec2, Vec3};
use crate::math::ReflectionPlane;

use super::oblique::oblique_projection;
use super::settings::ReflectionSettings;

/// Draws the reflection camera's view into its off-screen target.
///
/// Called at most once per frame, after the camera pose and projection
/// have been updated, and must finish before the main view renders.
pub trait ReflectionRenderer {
    fn render_reflection(&mut self, camera: &Camera, target_size: UVec2);
}

/// Mirrored pose and clipped projection for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReflectionPose {
    pub position: Vec3,
    pub rotation: Quat,
    pub view: Mat4,
    pub projection: Mat4,
}

impl ReflectionPose {
    /// Write the pose and projection onto a camera
    pub fn apply_to(&self, camera: &mut Camera) {
        camera.position = self.position;
        camera.rotation = self.rotation;
        camera.projection_override = Some(self.projection);
    }
}

/// Keeps a secondary camera mirrored across the water surface.
#[derive(Clone, Debug)]
pub struct ReflectionCameraController {
    settings: ReflectionSettings,
    /// World position of the reflecting surface
    surface_point: Vec3,
    target_size: Option<UVec2>,
}

impl ReflectionCameraController {
    pub fn new(settings: ReflectionSettings, surface_point: Vec3) -> Self {
        Self {
            settings,
            surface_point,
            target_size: None,
        }
    }

    pub fn settings(&self) -> &ReflectionSettings {
        &self.settings
    }

    pub fn surface_point(&self) -> Vec3 {
        self.surface_point
    }

    /// Move the reflecting surface (e.g. when the water object moves)
    pub fn set_surface_point(&mut self, point: Vec3) {
        self.surface_point = point;
    }

    pub fn plane(&self) -> ReflectionPlane {
        ReflectionPlane::new(self.surface_point, self.settings.surface_normal)
    }

    /// Off-screen target size for an observer: its pixel size times the
    /// resolution scale, rounded, never below 1x1.
    pub fn render_target_size(&self, observer: &Camera) -> UVec2 {
        let scale = self.settings.resolution_scale;
        let w = (observer.pixel_size.x as f32 * scale).round() as u32;
        let h = (observer.pixel_size.y as f32 * scale).round() as u32;
        UVec2::new(w, h).max(UVec2::ONE)
    }

    /// Current reflection target size, once [`setup_camera`](Self::setup_camera) has run
    pub fn target_size(&self) -> Option<UVec2> {
        self.target_size
    }

    /// Build the reflection camera from the observer's intrinsics and
    /// size the reflection target. Call again when the observer resizes.
    pub fn setup_camera(&mut self, observer: &Camera) -> Camera {
        let target = self.render_target_size(observer);
        self.target_size = Some(target);

        let mut camera = observer.clone();
        camera.projection_override = None;
        camera.culling_mask = self.settings.culling_mask;
        camera.pixel_size = target;

        log::info!(
            "Reflection camera set up: target {}x{} (scale {:.2})",
            target.x,
            target.y,
            self.settings.resolution_scale
        );
        camera
    }

    /// Mirrored pose and oblique projection for `observer`.
    ///
    /// `None` when the observer is on or below the surface; there is no
    /// valid reflection from underwater.
    pub fn compute(&self, observer: &Camera) -> Option<ReflectionPose> {
        let plane = self.plane();
        if plane.signed_distance(observer.position) <= 0.0 {
            return None;
        }

        let position = plane.reflect_point(observer.position);
        let forward = plane.reflect_vector(observer.forward());
        let up = plane.reflect_vector(observer.up());
        let rotation = look_rotation(forward, up);

        let mut mirrored = observer.clone();
        mirrored.position = position;
        mirrored.rotation = rotation;
        let view = mirrored.view_matrix();

        // Near plane clipped exactly at the water surface
        let clip_plane = plane.to_view_space(&view);
        let projection = oblique_projection(observer.projection_matrix(), clip_plane);

        Some(ReflectionPose {
            position,
            rotation,
            view,
            projection,
        })
    }

    /// Update `reflection` from `observer` and render it once.
    ///
    /// Missing cameras and underwater observers skip the frame and leave
    /// the reflection camera untouched. Returns whether a render happened.
    pub fn render_frame<R>(
        &mut self,
        observer: Option<&Camera>,
        reflection: Option<&mut Camera>,
        renderer: &mut R,
    ) -> bool
    where
        R: ReflectionRenderer + ?Sized,
    {
        let (Some(observer), Some(reflection)) = (observer, reflection) else {
            log::debug!("Reflection skipped: camera not available");
            return false;
        };

        let Some(pose) = self.compute(observer) else {
            log::trace!("Reflection skipped: observer at or below the surface");
            return false;
        };

        pose.apply_to(reflection);
        let target = match self.target_size {
            Some(size) => size,
            None => self.render_target_size(observer),
        };
        renderer.render_reflection(reflection, target);
        true
    }
}
