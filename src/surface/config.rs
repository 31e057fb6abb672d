//! Surface size and resolution settings.

use serde::{Deserialize, Serialize};

use crate::core::types::{Result, UVec2, Vec2};
use crate::core::Error;

/// Smallest grid that still contains one quad per axis
pub const MIN_VERTEX_COUNT: u32 = 2;

/// Size and resolution of the water meshes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Width (x) and depth (z) of the top mesh in world units.
    pub top_size: Vec2,
    /// Height of the front skirt; the x extent comes from `top_size.x`.
    pub front_height: f32,
    /// Columns (x) and rows (z) of top mesh vertices. Ideally a multiple of the size.
    pub vertex_count: UVec2,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            top_size: Vec2::new(20.0, 6.5),
            front_height: 10.0,
            vertex_count: UVec2::new(200, 130),
        }
    }
}

impl SurfaceConfig {
    /// Width of the top mesh (x)
    #[inline]
    pub fn width(&self) -> f32 {
        self.top_size.x
    }

    /// Depth of the top mesh (z)
    #[inline]
    pub fn depth(&self) -> f32 {
        self.top_size.y
    }

    /// Vertex columns along x
    #[inline]
    pub fn columns(&self) -> u32 {
        self.vertex_count.x
    }

    /// Vertex rows along z
    #[inline]
    pub fn rows(&self) -> u32 {
        self.vertex_count.y
    }

    /// Vertices in the top grid
    pub fn top_vertex_count(&self) -> usize {
        self.columns() as usize * self.rows() as usize
    }

    /// Triangle indices in the top grid
    pub fn top_index_count(&self) -> usize {
        (self.columns() as usize).saturating_sub(1) * (self.rows() as usize).saturating_sub(1) * 6
    }

    /// Spacing between vertex columns, shared by the top grid and the front skirt
    pub fn column_spacing(&self) -> f32 {
        self.width() / (self.columns() - 1) as f32
    }

    /// Spacing between vertex rows of the top grid
    pub fn row_spacing(&self) -> f32 {
        self.depth() / (self.rows() - 1) as f32
    }

    /// Reject configurations that would produce degenerate or empty meshes.
    pub fn validate(&self) -> Result<()> {
        if self.columns() < MIN_VERTEX_COUNT || self.rows() < MIN_VERTEX_COUNT {
            return Err(Error::config(format!(
                "top surface needs at least {MIN_VERTEX_COUNT}x{MIN_VERTEX_COUNT} vertices, got {}x{}",
                self.columns(),
                self.rows()
            )));
        }
        // Indices are u32
        if self.top_vertex_count() as u64 > u32::MAX as u64 {
            return Err(Error::config(format!(
                "top surface vertex count {}x{} overflows 32-bit indices",
                self.columns(),
                self.rows()
            )));
        }
        if !(self.width() > 0.0 && self.depth() > 0.0) {
            return Err(Error::config(format!(
                "top surface size must be positive, got {}x{}",
                self.width(),
                self.depth()
            )));
        }
        if !(self.front_height > 0.0) {
            return Err(Error::config(format!(
                "front surface height must be positive, got {}",
                self.front_height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SurfaceConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.column_spacing() - 20.0 / 199.0).abs() < 1e-6);
        assert!((config.row_spacing() - 6.5 / 129.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_small_grid() {
        let config = SurfaceConfig {
            vertex_count: UVec2::new(1, 10),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfiguration(_))));

        let config = SurfaceConfig {
            vertex_count: UVec2::new(10, 0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_rejects_non_positive_sizes() {
        for bad in [
            SurfaceConfig { top_size: Vec2::new(0.0, 1.0), ..Default::default() },
            SurfaceConfig { top_size: Vec2::new(1.0, -2.0), ..Default::default() },
            SurfaceConfig { top_size: Vec2::new(f32::NAN, 1.0), ..Default::default() },
            SurfaceConfig { front_height: 0.0, ..Default::default() },
        ] {
            assert!(bad.validate().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_large_grid_counts_do_not_overflow() {
        let config = SurfaceConfig {
            vertex_count: UVec2::new(30_000, 30_000),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.top_vertex_count(), 900_000_000);
        assert_eq!(config.top_index_count(), 29_999 * 29_999 * 6);

        let config = SurfaceConfig {
            vertex_count: UVec2::new(70_000, 70_000),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SurfaceConfig = serde_json::from_str(r#"{ "front_height": 3.0 }"#).unwrap();
        assert_eq!(config.front_height, 3.0);
        assert_eq!(config.vertex_count, UVec2::new(200, 130));
    }
}
