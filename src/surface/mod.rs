//! Procedural water surface geometry.
//!
//! The water body is two meshes built from one [`SurfaceConfig`]: a flat
//! `top` grid on the XZ plane (displaced later by the surface shader) and a
//! vertical `front` skirt hanging below its z = 0 edge. Both are regenerated
//! wholesale whenever the configuration changes.

pub mod builder;
pub mod config;
pub mod mesh;

pub use builder::{SurfaceMeshBuilder, SurfaceMeshes, FRONT_MESH_NAME, TOP_MESH_NAME};
pub use config::SurfaceConfig;
pub use mesh::{MeshGeometry, SurfaceVertex};
