//! Camera pose, intrinsics and projection

use crate::core::types::{Mat3, Mat4, Quat, UVec2, Vec3};

/// How a camera clears its target before drawing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClearMode {
    #[default]
    Skybox,
    SolidColor,
    DepthOnly,
    Nothing,
}

/// Every culling layer enabled
pub const ALL_LAYERS: u32 = u32::MAX;

/// Camera with position, rotation, and projection parameters
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// World position
    pub position: Vec3,
    /// Rotation as quaternion
    pub rotation: Quat,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
    /// Size of the render target in pixels
    pub pixel_size: UVec2,
    /// Clear behaviour before rendering
    pub clear: ClearMode,
    /// Background color (linear RGBA) used by [`ClearMode::SolidColor`]
    pub background: [f32; 4],
    /// Bit mask of layers this camera draws
    pub culling_mask: u32,
    /// Replaces the perspective projection when set (oblique clipping)
    pub projection_override: Option<Mat4>,
}

impl Camera {
    /// Create a new camera
    pub fn new(position: Vec3, fov_y_degrees: f32, aspect: f32) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near: 0.3,
            far: 1000.0,
            pixel_size: UVec2::new(1920, 1080),
            clear: ClearMode::default(),
            background: [0.19, 0.3, 0.47, 1.0],
            culling_mask: ALL_LAYERS,
            projection_override: None,
        }
    }

    /// Create camera looking at a target
    pub fn look_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let mut camera = Self::new(position, 60.0, 16.0 / 9.0);
        camera.rotation = look_rotation(target - position, up);
        camera
    }

    /// Get view matrix (world to camera space)
    pub fn view_matrix(&self) -> Mat4 {
        let rotation_matrix = Mat4::from_quat(self.rotation.conjugate());
        let translation_matrix = Mat4::from_translation(-self.position);
        rotation_matrix * translation_matrix
    }

    /// Perspective projection built from the intrinsics, ignoring any override
    pub fn perspective_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Get projection matrix (camera to clip space)
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_override
            .unwrap_or_else(|| self.perspective_matrix())
    }

    /// Get combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get forward direction (negative Z in camera space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Get right direction (positive X in camera space)
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Get up direction (positive Y in camera space)
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Update target size and aspect ratio (call on window resize)
    pub fn set_pixel_size(&mut self, width: u32, height: u32) {
        self.pixel_size = UVec2::new(width.max(1), height.max(1));
        self.aspect = self.pixel_size.x as f32 / self.pixel_size.y as f32;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 5.0), 60.0, 16.0 / 9.0)
    }
}

/// Orthonormal rotation whose forward (-Z) is `forward` and whose up is as
/// close to `up` as the forward direction allows.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let forward = forward.normalize_or(-Vec3::Z);
    let mut right = forward.cross(up);
    if right.length_squared() < 1e-12 {
        // up parallel to forward
        right = forward.any_orthonormal_vector();
    }
    let right = right.normalize();
    let up = right.cross(forward);

    Quat::from_mat3(&Mat3::from_cols(right, up, -forward))
}
