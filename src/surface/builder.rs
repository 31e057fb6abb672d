//! Deterministic generation of the top grid and front skirt meshes.

use crate::core::types::{Result, Vec2, Vec3};

use super::config::SurfaceConfig;
use super::mesh::MeshGeometry;

pub const TOP_MESH_NAME: &str = "WaterTopMesh";
pub const FRONT_MESH_NAME: &str = "WaterFrontMesh";

/// Both meshes of a water body, built from the same configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceMeshes {
    pub config: SurfaceConfig,
    pub top: MeshGeometry,
    pub front: MeshGeometry,
}

/// Builds water meshes from a validated [`SurfaceConfig`].
#[derive(Clone, Copy, Debug)]
pub struct SurfaceMeshBuilder {
    config: SurfaceConfig,
}

impl SurfaceMeshBuilder {
    /// Validate the configuration up front so the build steps cannot fail.
    pub fn new(config: SurfaceConfig) -> Result<Self> {
        if let Err(e) = config.validate() {
            log::warn!("Rejected water surface config: {}", e);
            return Err(e);
        }
        Ok(Self { config })
    }

    /// Validate and build both meshes in one go
    pub fn generate(config: SurfaceConfig) -> Result<SurfaceMeshes> {
        Ok(Self::new(config)?.build())
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn build(&self) -> SurfaceMeshes {
        let top = self.build_top();
        let front = self.build_front();

        log::info!(
            "Generated water meshes: top {} verts / {} tris, front {} verts / {} tris",
            top.vertex_count(),
            top.triangle_count(),
            front.vertex_count(),
            front.triangle_count()
        );

        SurfaceMeshes {
            config: self.config,
            top,
            front,
        }
    }

    /// Flat `columns x rows` grid over `[0, width] x [0, depth]` at y = 0.
    ///
    /// Vertex `(i, j)` lives at index `i + j * columns`. Triangles wind
    /// counter-clockwise seen from +Y so the surface faces up.
    pub fn build_top(&self) -> MeshGeometry {
        let cols = self.config.columns();
        let rows = self.config.rows();
        let dx = self.config.column_spacing();
        let dz = self.config.row_spacing();

        let vertex_count = self.config.top_vertex_count();
        let mut positions = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);

        for j in 0..rows {
            for i in 0..cols {
                positions.push(Vec3::new(i as f32 * dx, 0.0, j as f32 * dz));
                uvs.push(Vec2::new(
                    i as f32 / (cols - 1) as f32,
                    j as f32 / (rows - 1) as f32,
                ));
            }
        }

        let mut indices = Vec::with_capacity(self.config.top_index_count());
        for j in 0..rows - 1 {
            for i in 0..cols - 1 {
                let v = i + j * cols;

                indices.extend_from_slice(&[v, v + cols, v + 1]);
                indices.extend_from_slice(&[v + 1, v + cols, v + cols + 1]);
            }
        }

        MeshGeometry::new(TOP_MESH_NAME, positions, uvs, indices)
    }

    /// Vertical skirt along the z = 0 edge of the top grid.
    ///
    /// Indices `0..columns` form the seam row (y = 0, uv.v = 1) and
    /// `columns..2*columns` the bottom row (y = -front_height, uv.v = 0).
    /// Column spacing matches the top grid so textures line up across the
    /// seam. Triangles face -Z, away from the body of water.
    pub fn build_front(&self) -> MeshGeometry {
        let cols = self.config.columns();
        let dx = self.config.column_spacing();
        let height = self.config.front_height;

        let mut positions = vec![Vec3::ZERO; cols as usize * 2];
        let mut uvs = vec![Vec2::ZERO; cols as usize * 2];

        for i in 0..cols {
            let u = i as f32 / (cols - 1) as f32;
            let x = i as f32 * dx;

            positions[i as usize] = Vec3::new(x, 0.0, 0.0);
            uvs[i as usize] = Vec2::new(u, 1.0);

            positions[(i + cols) as usize] = Vec3::new(x, -height, 0.0);
            uvs[(i + cols) as usize] = Vec2::new(u, 0.0);
        }

        let mut indices = Vec::with_capacity((cols as usize - 1) * 6);
        for i in 0..cols - 1 {
            let top_a = i;
            let top_b = i + 1;
            let bot_a = i + cols;
            let bot_b = i + cols + 1;

            indices.extend_from_slice(&[top_b, bot_a, top_a]);
            indices.extend_from_slice(&[bot_b, bot_a, top_b]);
        }

        MeshGeometry::new(FRONT_MESH_NAME, positions, uvs, indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::UVec2;
    use crate::core::Error;

    fn config(cols: u32, rows: u32) -> SurfaceConfig {
        SurfaceConfig {
            top_size: Vec2::new(4.0, 3.0),
            front_height: 2.0,
            vertex_count: UVec2::new(cols, rows),
        }
    }

    #[test]
    fn test_top_mesh_counts() {
        for (c, r) in [(2, 2), (3, 5), (17, 4), (200, 130)] {
            let top = SurfaceMeshBuilder::new(config(c, r)).unwrap().build_top();
            assert_eq!(top.vertex_count(), (c * r) as usize);
            assert_eq!(top.indices.len(), ((c - 1) * (r - 1) * 6) as usize);
            assert_eq!(top.uvs.len(), top.vertex_count());
            assert!(top.indices.iter().all(|&i| (i as usize) < top.vertex_count()));
        }
    }

    #[test]
    fn test_top_uvs_in_unit_range() {
        let top = SurfaceMeshBuilder::new(config(7, 9)).unwrap().build_top();
        for uv in &top.uvs {
            assert!((0.0..=1.0).contains(&uv.x) && (0.0..=1.0).contains(&uv.y), "{uv:?}");
        }
        assert_eq!(top.uvs[0], Vec2::ZERO);
        assert_eq!(*top.uvs.last().unwrap(), Vec2::ONE);
    }

    #[test]
    fn test_top_positions_span_size() {
        let top = SurfaceMeshBuilder::new(config(5, 4)).unwrap().build_top();
        assert_eq!(top.positions[0], Vec3::ZERO);
        // vertex (i=2, j=1)
        assert!((top.positions[2 + 5] - Vec3::new(2.0, 0.0, 1.0)).length() < 1e-6);
        assert!((top.bounds.max - Vec3::new(4.0, 0.0, 3.0)).length() < 1e-5);
        assert!(top.positions.iter().all(|p| p.y == 0.0));
    }

    #[test]
    fn test_top_faces_up() {
        let top = SurfaceMeshBuilder::new(config(4, 3)).unwrap().build_top();
        for n in &top.normals {
            assert!((*n - Vec3::Y).length() < 1e-5, "{n:?}");
        }
    }

    #[test]
    fn test_front_mesh_counts() {
        for c in [2, 3, 50] {
            let front = SurfaceMeshBuilder::new(config(c, 6)).unwrap().build_front();
            assert_eq!(front.vertex_count(), (2 * c) as usize);
            assert_eq!(front.indices.len(), ((c - 1) * 6) as usize);
        }
    }

    #[test]
    fn test_front_seam_matches_top_row() {
        let meshes = SurfaceMeshBuilder::generate(config(9, 4)).unwrap();
        let cols = 9;
        for i in 0..cols {
            let seam = meshes.front.positions[i];
            assert_eq!(seam, meshes.top.positions[i]);
            assert_eq!(meshes.front.uvs[i].y, 1.0);
            assert_eq!(meshes.front.uvs[i + cols].y, 0.0);
            assert_eq!(meshes.front.positions[i + cols].x, seam.x);
            assert_eq!(meshes.front.positions[i + cols].y, -2.0);
        }
    }

    #[test]
    fn test_front_faces_forward() {
        let front = SurfaceMeshBuilder::new(config(6, 2)).unwrap().build_front();
        for n in &front.normals {
            assert!((*n + Vec3::Z).length() < 1e-5, "{n:?}");
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = SurfaceMeshBuilder::generate(config(11, 7)).unwrap();
        let b = SurfaceMeshBuilder::generate(config(11, 7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_degenerate_grid_fails() {
        let err = SurfaceMeshBuilder::generate(config(1, 5)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
        let err = SurfaceMeshBuilder::generate(config(5, 1)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }
}
