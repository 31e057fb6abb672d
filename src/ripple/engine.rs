//! Contracts for the external simulation engine and material parameters.

use super::zone::UpdateZone;

/// Scalar material parameters written by the water core
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderParam {
    /// Depth of the top mesh, set once at initialization
    WaterMeshDepth,
    /// Attenuated strength of the ripple being applied this tick
    ImpactHeight,
}

impl ShaderParam {
    /// Property name as exposed to shaders
    pub fn name(self) -> &'static str {
        match self {
            Self::WaterMeshDepth => "_WaterMeshDepth",
            Self::ImpactHeight => "_ImpactHeight",
        }
    }
}

/// Anything that accepts scalar material parameters
pub trait ShaderParams {
    fn set_float(&mut self, param: ShaderParam, value: f32);
}

/// Iterative texture-space wave solver driven by [`RippleSimulationDriver`](super::RippleSimulationDriver).
///
/// The driver only issues commands; it never reads simulation results
/// back. Implementations are free to run on the GPU with ping-pong
/// buffers, on a compute shader or on the CPU.
pub trait SimulationEngine: ShaderParams {
    /// Reset the simulation state
    fn initialize(&mut self);

    /// Forget the zones submitted on a previous tick
    fn clear_update_zones(&mut self);

    /// Replace the zones applied by subsequent updates
    fn set_update_zones(&mut self, zones: &[UpdateZone]);

    /// Advance the simulation by `iterations` steps
    fn update(&mut self, iterations: u32);
}

impl<T: ShaderParams + ?Sized> ShaderParams for Box<T> {
    fn set_float(&mut self, param: ShaderParam, value: f32) {
        (**self).set_float(param, value);
    }
}

impl<T: SimulationEngine + ?Sized> SimulationEngine for Box<T> {
    fn initialize(&mut self) {
        (**self).initialize();
    }

    fn clear_update_zones(&mut self) {
        (**self).clear_update_zones();
    }

    fn set_update_zones(&mut self, zones: &[UpdateZone]) {
        (**self).set_update_zones(zones);
    }

    fn update(&mut self, iterations: u32) {
        (**self).update(iterations);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shader_param_names() {
        assert_eq!(ShaderParam::WaterMeshDepth.name(), "_WaterMeshDepth");
        assert_eq!(ShaderParam::ImpactHeight.name(), "_ImpactHeight");
    }
}
