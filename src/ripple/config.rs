//! Ripple simulation settings.

use serde::{Deserialize, Serialize};

use crate::core::types::{Result, UVec2};
use crate::core::Error;

/// Sub-iterations requested from the engine each fixed tick
pub const DEFAULT_ITERATIONS_PER_TICK: u32 = 5;
/// Accepted range for [`SimulationConfig::iterations_per_tick`]
pub const ITERATIONS_PER_TICK_RANGE: std::ops::RangeInclusive<u32> = 1..=8;
/// Largest simulation texture edge, matching common GPU texture limits
pub const MAX_TEXTURE_DIMENSION: u32 = 8192;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// How many times the simulation texture updates per fixed tick.
    pub iterations_per_tick: u32,
    /// Resolution of the CPU reference engine's height field.
    pub texture_size: UVec2,
    /// Per-iteration energy kept by the CPU reference engine, in `(0, 1]`.
    pub damping: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            iterations_per_tick: DEFAULT_ITERATIONS_PER_TICK,
            texture_size: UVec2::splat(256),
            damping: 0.985,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if !ITERATIONS_PER_TICK_RANGE.contains(&self.iterations_per_tick) {
            return Err(Error::config(format!(
                "iterations_per_tick must be in {:?}, got {}",
                ITERATIONS_PER_TICK_RANGE, self.iterations_per_tick
            )));
        }
        if self.texture_size.x == 0
            || self.texture_size.y == 0
            || self.texture_size.max_element() > MAX_TEXTURE_DIMENSION
        {
            return Err(Error::config(format!(
                "simulation texture size must be in 1..={MAX_TEXTURE_DIMENSION} per axis, got {}x{}",
                self.texture_size.x, self.texture_size.y
            )));
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(Error::config(format!(
                "damping must be in (0, 1], got {}",
                self.damping
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
        assert!(SimulationConfig::default().validate().is_ok());
        let largest = SimulationConfig { texture_size: UVec2::splat(MAX_TEXTURE_DIMENSION), ..Default::default() };
        assert!(largest.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range() {
        let bad = [
            SimulationConfig { iterations_per_tick: 0, ..Default::default() },
            SimulationConfig { iterations_per_tick: 9, ..Default::default() },
            SimulationConfig { texture_size: UVec2::new(0, 16), ..Default::default() },
            SimulationConfig { texture_size: UVec2::new(16, MAX_TEXTURE_DIMENSION + 1), ..Default::default() },
            SimulationConfig { texture_size: UVec2::splat(70_000), ..Default::default() },
            SimulationConfig { damping: 0.0, ..Default::default() },
            SimulationConfig { damping: 1.5, ..Default::default() },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{config:?} should be rejected");
        }
    }
}
