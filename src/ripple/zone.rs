//! Update-zone descriptors submitted to the simulation engine.

use crate::core::types::Vec2;

/// Which behaviour the engine runs inside a zone
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum SimulationPass {
    /// Wave propagation and damping over the zone
    Smoothing = 0,
    /// Raise the surface inside the zone
    ImpulseUp = 1,
    /// Depress the surface inside the zone
    ImpulseDown = 2,
}

impl SimulationPass {
    /// Shader pass index
    #[inline]
    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn impulse(direction_up: bool) -> Self {
        if direction_up {
            Self::ImpulseUp
        } else {
            Self::ImpulseDown
        }
    }

    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(Self::Smoothing),
            1 => Some(Self::ImpulseUp),
            2 => Some(Self::ImpulseDown),
            _ => None,
        }
    }
}

/// A UV-space region plus the pass to run over it. Lives for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpdateZone {
    pub center: Vec2,
    pub size: Vec2,
    pub pass: SimulationPass,
    pub needs_buffer_swap: bool,
    /// Rotation in degrees around the zone center
    pub rotation: f32,
}

impl UpdateZone {
    /// The whole texture, running the smoothing pass
    pub fn full_surface() -> Self {
        Self {
            center: Vec2::splat(0.5),
            size: Vec2::ONE,
            pass: SimulationPass::Smoothing,
            needs_buffer_swap: true,
            rotation: 0.0,
        }
    }

    /// A small footprint at `center` running an impulse pass
    pub fn impact(center: Vec2, size: Vec2, direction_up: bool) -> Self {
        Self {
            center,
            size,
            pass: SimulationPass::impulse(direction_up),
            needs_buffer_swap: true,
            rotation: 0.0,
        }
    }

    #[inline]
    pub fn pass_index(&self) -> u32 {
        self.pass.index()
    }

    /// Lower-left and upper-right corners in UV space
    pub fn uv_rect(&self) -> (Vec2, Vec2) {
        let half = self.size * 0.5;
        (self.center - half, self.center + half)
    }
}
