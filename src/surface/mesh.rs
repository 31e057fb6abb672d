//! CPU-side mesh buffers ready for GPU upload.

use bytemuck::{Pod, Zeroable};

use crate::core::types::{Vec2, Vec3};
use crate::math::Aabb;

/// Interleaved vertex layout used by the water surface materials
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SurfaceVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Generated triangle mesh.
///
/// `positions`, `uvs` and `normals` are index-aligned; `indices` holds
/// triangle triples. Owned by whatever renderable displays it and replaced
/// wholesale on regeneration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshGeometry {
    pub name: &'static str,
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub bounds: Aabb,
}

impl MeshGeometry {
    /// Wrap raw buffers and derive normals and bounds from them
    pub fn new(name: &'static str, positions: Vec<Vec3>, uvs: Vec<Vec2>, indices: Vec<u32>) -> Self {
        debug_assert_eq!(positions.len(), uvs.len());
        debug_assert_eq!(indices.len() % 3, 0);

        let mut mesh = Self {
            name,
            positions,
            uvs,
            normals: Vec::new(),
            indices,
            bounds: Aabb::default(),
        };
        mesh.recalculate_normals();
        mesh.recalculate_bounds();
        mesh
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Area-weighted smooth normals. Counter-clockwise triangles face the viewer.
    pub fn recalculate_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];

        for [a, b, c] in self.triangles() {
            let (a, b, c) = (a as usize, b as usize, c as usize);
            let p0 = self.positions[a];
            let face = (self.positions[b] - p0).cross(self.positions[c] - p0);
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }

        for n in &mut normals {
            *n = n.normalize_or_zero();
        }
        self.normals = normals;
    }

    pub fn recalculate_bounds(&mut self) {
        self.bounds = Aabb::from_points(&self.positions).unwrap_or_default();
    }

    /// Interleave positions, normals and UVs into a single vertex buffer
    pub fn interleaved(&self) -> Vec<SurfaceVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .map(|((p, n), uv)| SurfaceVertex {
                position: p.to_array(),
                normal: n.to_array(),
                uv: uv.to_array(),
            })
            .collect()
    }

    /// Raw bytes of the interleaved vertex buffer
    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.interleaved()).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> MeshGeometry {
        // Unit quad on XZ, counter-clockwise seen from +Y
        MeshGeometry::new(
            "quad",
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(1.0, 0.0, 1.0),
            ],
            vec![Vec2::ZERO, Vec2::X, Vec2::Y, Vec2::ONE],
            vec![0, 2, 1, 1, 2, 3],
        )
    }

    #[test]
    fn test_normals_and_bounds() {
        let mesh = quad();
        assert_eq!(mesh.triangle_count(), 2);
        for n in &mesh.normals {
            assert!((*n - Vec3::Y).length() < 1e-6);
        }
        assert_eq!(mesh.bounds, Aabb::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0)));
    }

    #[test]
    fn test_interleaved_layout() {
        let mesh = quad();
        let verts = mesh.interleaved();
        assert_eq!(verts.len(), 4);
        assert_eq!(verts[3].position, [1.0, 0.0, 1.0]);
        assert_eq!(verts[3].uv, [1.0, 1.0]);
        assert_eq!(mesh.vertex_bytes().len(), 4 * std::mem::size_of::<SurfaceVertex>());
        assert_eq!(std::mem::size_of::<SurfaceVertex>(), 32);
    }
}
