//! Reflection camera settings.

use serde::{Deserialize, Serialize};

use crate::core::camera::ALL_LAYERS;
use crate::core::types::{Result, Vec3};
use crate::core::Error;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReflectionSettings {
    /// Reflection target size relative to the observer's, in `(0, 1]`.
    pub resolution_scale: f32,
    /// Normal of the reflecting surface (normalized on use).
    pub surface_normal: Vec3,
    /// Layers drawn into the reflection.
    pub culling_mask: u32,
}

impl Default for ReflectionSettings {
    fn default() -> Self {
        Self {
            resolution_scale: 0.5,
            surface_normal: Vec3::Y,
            culling_mask: ALL_LAYERS,
        }
    }
}

impl ReflectionSettings {
    pub fn validate(&self) -> Result<()> {
        if !(self.resolution_scale > 0.0 && self.resolution_scale <= 1.0) {
            return Err(Error::config(format!(
                "reflection resolution scale must be in (0, 1], got {}",
                self.resolution_scale
            )));
        }
        if !self.surface_normal.is_finite() || self.surface_normal.length_squared() < 1e-12 {
            return Err(Error::config(format!(
                "reflection surface normal must be a non-zero vector, got {:?}",
                self.surface_normal
            )));
        }
        Ok(())
    }
}
