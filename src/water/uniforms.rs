//! Material parameters shared by the top and front meshes.

use bytemuck::{Pod, Zeroable};

use crate::ripple::{ShaderParam, ShaderParams};

/// GPU-ready water material uniforms
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct WaterUniforms {
    /// Depth (z extent) of the top mesh
    pub mesh_depth: f32,
    /// Attenuated strength of the latest ripple
    pub impact_height: f32,
    pub _pad: [f32; 2],
}

impl WaterUniforms {
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl ShaderParams for WaterUniforms {
    fn set_float(&mut self, param: ShaderParam, value: f32) {
        log::trace!("Material {} = {}", param.name(), value);
        match param {
            ShaderParam::WaterMeshDepth => self.mesh_depth = value,
            ShaderParam::ImpactHeight => self.impact_height = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_float_and_layout() {
        let mut u = WaterUniforms::default();
        u.set_float(ShaderParam::WaterMeshDepth, 6.5);
        u.set_float(ShaderParam::ImpactHeight, 0.08);
        assert_eq!(u.mesh_depth, 6.5);
        assert_eq!(u.impact_height, 0.08);
        // 16-byte aligned for uniform buffers
        assert_eq!(u.as_bytes().len(), 16);
    }
}
